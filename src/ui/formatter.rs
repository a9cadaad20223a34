//! Pure formatting functions for UI output.
//!
//! Functions here only print; `format_*` helpers return the text so it can be
//! tested without capturing stdout.

use console::style;

use crate::cli::BuildReport;
use crate::domain::VersionInfo;
use crate::packaging::PackagingOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// One line per generated version field, in file order.
pub fn format_version_info(info: &VersionInfo) -> Vec<String> {
    vec![
        format!("short_version: {}", info.short_version),
        format!(
            "build_number:  {}",
            info.build_number.as_deref().unwrap_or("None")
        ),
        format!("version:       {}", info.version),
        format!("full_version:  {}", info.full_version),
        format!("git_revision:  {}", info.git_revision),
        format!("release:       {}", info.release),
    ]
}

/// Display the resolved version fields.
pub fn display_version_info(info: &VersionInfo) {
    println!("\n{}", style("Version:").bold());
    for line in format_version_info(info) {
        println!("  {}", line);
    }
}

/// Summary lines for a finished build.
pub fn format_build_summary(report: &BuildReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Stamped {} into {}",
        report.version.full_version,
        report.version_file.display()
    )];

    if let Some(manifest) = &report.manifest {
        lines.push(format!(
            "{} packages, {} package data entries",
            report.packages.len(),
            report.package_data.len()
        ));
        lines.push(format!("Manifest written to {}", manifest.display()));
    }

    match &report.packaging {
        Some(PackagingOutcome::Ran { command }) => {
            lines.push(format!("Packaging tool finished: {}", command))
        }
        Some(PackagingOutcome::Skipped { reason }) => {
            lines.push(format!("Packaging tool skipped ({})", reason))
        }
        None => {}
    }

    lines
}

/// Display the build summary.
pub fn display_build_summary(report: &BuildReport) {
    for line in format_build_summary(report) {
        display_success(&line);
    }
}
