use crate::error::{Result, SetupError};
use crate::revision::RevisionSource;
use std::env;
use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Output, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Environment variables forwarded to the revision query, when set.
pub const FORWARDED_ENV: [&str; 2] = ["SYSTEMROOT", "PATH"];

/// Locale variables pinned so the query output is not localised.
pub const PINNED_LOCALE_ENV: [&str; 3] = ["LANGUAGE", "LANG", "LC_ALL"];

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Runs `git rev-parse HEAD` with a constrained environment
#[derive(Debug, Clone)]
pub struct CommandRevisionSource {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandRevisionSource {
    /// `git rev-parse HEAD` with no timeout
    pub fn new() -> Self {
        CommandRevisionSource {
            program: "git".to_string(),
            args: vec!["rev-parse".to_string(), "HEAD".to_string()],
            timeout: None,
        }
    }

    /// Replace the program and arguments that are run
    pub fn with_command(mut self, program: impl Into<String>, args: &[&str]) -> Self {
        self.program = program.into();
        self.args = args.iter().map(|a| a.to_string()).collect();
        self
    }

    /// Kill the query when it runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn run(&self, work_dir: &Path) -> Result<Output> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .current_dir(work_dir)
            .env_clear()
            .envs(minimal_env())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let child = cmd.spawn().map_err(|e| {
            SetupError::revision(format!("Failed to execute {}: {}", self.program, e))
        })?;

        match self.timeout {
            None => Ok(child.wait_with_output()?),
            Some(limit) => wait_with_timeout(child, limit, &self.program),
        }
    }
}

impl Default for CommandRevisionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RevisionSource for CommandRevisionSource {
    fn head_revision(&self, work_dir: &Path) -> Result<String> {
        let output = self.run(work_dir)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SetupError::revision(format!(
                "{} exited with code {}: {}",
                self.program,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| SetupError::revision("Revision output is not valid UTF-8"))?;

        Ok(stdout.trim().to_string())
    }
}

/// Forwarded variables from the current process plus pinned locale settings
pub fn minimal_env() -> Vec<(String, String)> {
    let mut vars: Vec<(String, String)> = FORWARDED_ENV
        .iter()
        .filter_map(|key| env::var(key).ok().map(|value| (key.to_string(), value)))
        .collect();

    for key in PINNED_LOCALE_ENV {
        vars.push((key.to_string(), "C".to_string()));
    }

    vars
}

/// Read a pipe to the end on its own thread so the child never blocks on a full buffer.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            // a read error leaves whatever arrived before it
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn wait_with_timeout(mut child: Child, limit: Duration, program: &str) -> Result<Output> {
    let deadline = Instant::now() + limit;
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Output {
                status,
                stdout: stdout.join().unwrap_or_default(),
                stderr: stderr.join().unwrap_or_default(),
            });
        }

        if Instant::now() >= deadline {
            // kill can fail if the child exited since try_wait; the reap below still applies
            let _ = child.kill();
            let _ = child.wait();
            // readers are left detached: a grandchild may still hold the pipes open
            return Err(SetupError::revision(format!(
                "{} timed out after {:?}",
                program, limit
            )));
        }

        thread::sleep(POLL_INTERVAL);
    }
}
