use crate::error::{Result, SetupError};
use std::path::Path;
use std::process::Command;

/// Environment variable carrying the manifest path to the packaging tool.
pub const MANIFEST_ENV: &str = "BLUES_SETUP_MANIFEST";

/// What happened at the packaging step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackagingOutcome {
    /// The packaging tool ran and exited successfully
    Ran { command: String },
    /// The tool was not run; the manifest is left for a later invocation
    Skipped { reason: String },
}

/// Hands a written manifest to the host packaging tool
pub trait Packager {
    fn package(&self, project_dir: &Path, manifest: &Path) -> Result<PackagingOutcome>;
}

/// Runs an external packaging command in the project directory
pub struct CommandPackager {
    program: String,
    args: Vec<String>,
}

impl CommandPackager {
    /// Build from a program-and-arguments list
    ///
    /// # Returns
    /// * `None` if the list is empty
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(CommandPackager {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Packager for CommandPackager {
    /// Run the tool with the manifest path in [MANIFEST_ENV]
    ///
    /// A non-zero exit is fatal and carries the tool's output.
    fn package(&self, project_dir: &Path, manifest: &Path) -> Result<PackagingOutcome> {
        let command = self.display();
        tracing::info!(%command, "running packaging tool");

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(project_dir)
            .env(MANIFEST_ENV, manifest)
            .output()
            .map_err(|e| SetupError::packaging(format!("Failed to execute {}: {}", command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(SetupError::packaging(format!(
                "{} failed with exit code {}\nStdout: {}\nStderr: {}",
                command,
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        Ok(PackagingOutcome::Ran { command })
    }
}

/// Leaves the manifest in place without running anything
pub struct DryRunPackager {
    pub reason: String,
}

impl Packager for DryRunPackager {
    fn package(&self, _project_dir: &Path, manifest: &Path) -> Result<PackagingOutcome> {
        tracing::info!(manifest = %manifest.display(), "skipping packaging tool");
        Ok(PackagingOutcome::Skipped {
            reason: self.reason.clone(),
        })
    }
}

/// Packager for a configured command, or a dry run when asked for or nothing is configured
pub fn packager_for(command: &[String], dry_run: bool) -> Box<dyn Packager> {
    if dry_run {
        return Box::new(DryRunPackager {
            reason: "dry run".to_string(),
        });
    }
    match CommandPackager::from_command(command) {
        Some(packager) => Box::new(packager),
        None => Box::new(DryRunPackager {
            reason: "no packaging command configured".to_string(),
        }),
    }
}
