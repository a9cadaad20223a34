//! Generated version file.
//!
//! Renders [VersionInfo] into a small Python module with one assignment per
//! field, so the built package can report exactly what it was built from.

use std::fs;
use std::path::Path;

use crate::domain::{VersionInfo, VersionSpec};
use crate::error::Result;
use crate::revision::{resolve_revision, RevisionSource};

/// First comment line of every generated file.
pub const GENERATED_HEADER: &str = "# This file is automatically generated by blues-setup";

/// Render the generated file contents.
///
/// Field names and quoting are read back by downstream tooling, so the layout
/// is fixed: five quoted strings and a `True`/`False` release flag.
pub fn render_version_file(info: &VersionInfo) -> String {
    let build_number = info.build_number.as_deref().unwrap_or("None");
    let release = if info.release { "True" } else { "False" };

    format!(
        "\n{header}\n\
         short_version = '{short}'\n\
         build_number = '{build}'\n\
         version = '{version}'\n\
         full_version = '{full}'\n\
         git_revision = '{rev}'\n\
         release = {release}\n",
        header = GENERATED_HEADER,
        short = info.short_version,
        build = build_number,
        version = info.version,
        full = info.full_version,
        rev = info.git_revision,
        release = release,
    )
}

/// Write the generated file to `path`, replacing any previous contents.
pub fn write_version_file(path: &Path, info: &VersionInfo) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_version_file(info))?;
    tracing::info!(path = %path.display(), version = %info.full_version, "wrote version file");
    Ok(())
}

/// Resolve the revision for `work_dir`, compose all versions and write them to `output`.
///
/// Revision lookup failures never abort stamping; only a failed write does.
/// Version strings are written as configured, whatever scheme they follow.
pub fn stamp_version(
    spec: &VersionSpec,
    work_dir: &Path,
    output: &Path,
    source: &dyn RevisionSource,
) -> Result<VersionInfo> {
    let revision = resolve_revision(work_dir, source);
    let info = spec.resolve(revision);

    write_version_file(output, &info)?;
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNKNOWN_REVISION;
    use crate::revision::MockRevisionSource;
    use tempfile::TempDir;

    fn git_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        dir
    }

    #[test]
    fn test_render_layout() {
        let info = VersionSpec::new("1.2.3", Some("4"), false).resolve("abcdef1234567");
        let rendered = render_version_file(&info);

        let expected = "\n# This file is automatically generated by blues-setup\n\
                        short_version = '1.2.3'\n\
                        build_number = '4'\n\
                        version = '1.2.3.dev4'\n\
                        full_version = '1.2.3.dev4-abcdef1'\n\
                        git_revision = 'abcdef1234567'\n\
                        release = False\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_released_without_build_number() {
        let info = VersionSpec::new("2.0.0", None, true).resolve("abcdef1234567");
        let rendered = render_version_file(&info);

        assert!(rendered.contains("build_number = 'None'\n"));
        assert!(rendered.contains("full_version = '2.0.0'\n"));
        assert!(rendered.contains("release = True\n"));
    }

    #[test]
    fn test_stamp_writes_file_and_creates_parent() {
        let dir = git_tree();
        let output = dir.path().join("blues").join("version.py");
        let source = MockRevisionSource::with_revision("abcdef1234567");

        let spec = VersionSpec::new("1.2.3", Some("4"), false);
        let info = stamp_version(&spec, dir.path(), &output, &source).unwrap();

        assert_eq!(info.full_version, "1.2.3.dev4-abcdef1");
        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, render_version_file(&info));
    }

    #[test]
    fn test_stamp_survives_revision_failure() {
        let dir = git_tree();
        let output = dir.path().join("version.py");
        let source = MockRevisionSource::failing("git: not found");

        let spec = VersionSpec::new("1.2.3", Some("4"), false);
        let info = stamp_version(&spec, dir.path(), &output, &source).unwrap();

        assert_eq!(info.git_revision, UNKNOWN_REVISION);
        assert!(fs::read_to_string(&output)
            .unwrap()
            .contains("git_revision = 'Unknown'"));
    }

    #[test]
    fn test_stamp_accepts_short_and_pre_release_versions() {
        let dir = git_tree();
        let output = dir.path().join("version.py");
        let source = MockRevisionSource::with_revision("abcdef1234567");

        let info = stamp_version(&VersionSpec::new("1.0", None, false), dir.path(), &output, &source)
            .unwrap();
        assert_eq!(info.full_version, "1.0-abcdef1");
        assert!(fs::read_to_string(&output)
            .unwrap()
            .contains("short_version = '1.0'\n"));

        let spec = VersionSpec::new("2.0.0a1", Some("3"), false);
        let info = stamp_version(&spec, dir.path(), &output, &source).unwrap();
        assert_eq!(info.version, "2.0.0a1.dev3");
        assert!(fs::read_to_string(&output)
            .unwrap()
            .contains("full_version = '2.0.0a1.dev3-abcdef1'\n"));
    }

    #[test]
    fn test_stamp_none_build_number() {
        let dir = git_tree();
        let output = dir.path().join("version.py");
        let source = MockRevisionSource::with_revision("abcdef1234567");

        let spec = VersionSpec::new("1.2.3", Some("None"), false);
        let info = stamp_version(&spec, dir.path(), &output, &source).unwrap();

        assert_eq!(info.version, "1.2.3");
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("build_number = 'None'\n"));
        assert!(written.contains("version = '1.2.3'\n"));
        assert!(!written.contains("devNone"));
    }

    #[test]
    fn test_stamp_overwrites_previous_file() {
        let dir = git_tree();
        let output = dir.path().join("version.py");
        fs::write(&output, "stale contents that are much longer than needed\n".repeat(20)).unwrap();

        let source = MockRevisionSource::with_revision("abcdef1234567");
        let spec = VersionSpec::new("1.2.3", None, true);
        let info = stamp_version(&spec, dir.path(), &output, &source).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), render_version_file(&info));
    }
}
