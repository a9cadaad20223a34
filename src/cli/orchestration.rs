//! Main build workflow orchestration logic
//!
//! Keeps the linear build procedure out of main.rs so it can be called
//! programmatically, and with injected revision and packaging seams, from
//! tests.

use std::path::PathBuf;

use crate::config::BuildConfig;
use crate::domain::VersionInfo;
use crate::error::Result;
use crate::manifest::{read_long_description, PackageManifest};
use crate::package_data::collect_package_data;
use crate::packages::package_list;
use crate::packaging::{packager_for, Packager, PackagingOutcome};
use crate::revision::{source_for, RevisionSource};
use crate::stamper::stamp_version;

/// Arguments for the build workflow
///
/// Mirrors the CLI Args without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildArgs {
    /// Directory holding the package sources; configured paths are relative to it
    pub project_dir: PathBuf,

    /// Write the version file and manifest but do not run the packaging tool
    pub dry_run: bool,

    /// Stop after writing the version file
    pub stamp_only: bool,
}

impl BuildArgs {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        BuildArgs {
            project_dir: project_dir.into(),
            dry_run: false,
            stamp_only: false,
        }
    }
}

/// Result of a successful build workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BuildReport {
    pub version: VersionInfo,
    pub version_file: PathBuf,
    pub packages: Vec<String>,
    pub package_data: Vec<String>,
    /// Absent when the workflow stopped after stamping
    pub manifest: Option<PathBuf>,
    pub packaging: Option<PackagingOutcome>,
}

/// Main build workflow, with sources chosen from configuration
pub fn run_build(args: &BuildArgs, config: &BuildConfig) -> Result<BuildReport> {
    let source = source_for(&config.revision);
    let packager = packager_for(&config.packaging.command, args.dry_run);
    run_build_with(args, config, source.as_ref(), packager.as_ref())
}

/// Main build workflow
///
/// Runs the build steps strictly in order:
/// 1. Stamp the version file (revision failures fall back to "Unknown")
/// 2. Collect package data
/// 3. Assemble the package list
/// 4. Read the README and write the manifest
/// 5. Hand the manifest to the packaging tool
///
/// Any error other than a failed revision lookup aborts the build.
pub fn run_build_with(
    args: &BuildArgs,
    config: &BuildConfig,
    source: &dyn RevisionSource,
    packager: &dyn Packager,
) -> Result<BuildReport> {
    let project_dir = args.project_dir.as_path();
    let version_file = project_dir.join(&config.version.output);

    let version = stamp_version(&config.version.spec(), project_dir, &version_file, source)?;

    if args.stamp_only {
        return Ok(BuildReport {
            version,
            version_file,
            packages: Vec::new(),
            package_data: Vec::new(),
            manifest: None,
            packaging: None,
        });
    }

    let package_data = collect_package_data(&config.package_data, project_dir)?;
    let packages = package_list(&config.packages, project_dir, &config.metadata.name)?;
    let long_description = read_long_description(&project_dir.join(&config.metadata.readme))?;

    let manifest = PackageManifest::assemble(
        config,
        &version,
        packages.clone(),
        package_data.clone(),
        long_description,
    );
    let manifest_path = project_dir.join(&config.packaging.manifest);
    manifest.write(&manifest_path)?;

    // the tool runs in project_dir, so it gets a path independent of our cwd
    let outcome = packager.package(project_dir, &manifest_path.canonicalize()?)?;

    Ok(BuildReport {
        version,
        version_file,
        packages,
        package_data,
        manifest: Some(manifest_path),
        packaging: Some(outcome),
    })
}
