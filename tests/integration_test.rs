// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_blues-setup");

fn fixture_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("pkg/data/nested")).unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("pkg/__init__.py"), "").unwrap();
    fs::write(root.join("pkg/data/a.txt"), "a").unwrap();
    fs::write(root.join("pkg/data/nested/b.dat"), "b").unwrap();
    fs::write(root.join("docs/README.md"), "# pkg\n").unwrap();
    dir
}

fn fixture_config() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/released.toml")
        .display()
        .to_string()
}

#[test]
fn test_blues_setup_help() {
    let output = Command::new(BIN)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("blues-setup"));
    assert!(stdout.contains("Stamp the version file"));
}

#[test]
fn test_blues_setup_version() {
    let output = Command::new(BIN)
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_stamp_only_writes_version_file() {
    let project = fixture_project();

    let output = Command::new(BIN)
        .args(["--config", &fixture_config(), "--stamp-only", "--project-dir"])
        .arg(project.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let written = fs::read_to_string(project.path().join("pkg/version.py")).unwrap();
    assert!(written.contains("short_version = '1.0.0'"));
    assert!(written.contains("build_number = 'None'"));
    assert!(written.contains("full_version = '1.0.0'"));
    assert!(written.contains("git_revision = 'Unknown'"));
    assert!(written.contains("release = True"));
    assert!(!project.path().join("build/manifest.toml").exists());
}

#[test]
fn test_dry_run_writes_manifest() {
    let project = fixture_project();

    let output = Command::new(BIN)
        .args(["--config", &fixture_config(), "--dry-run", "--project-dir"])
        .arg(project.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let manifest = fs::read_to_string(project.path().join("build/manifest.toml")).unwrap();
    assert!(manifest.contains("data/a.txt"));
    assert!(manifest.contains("data/nested/b.dat"));
    assert!(manifest.contains("name = \"pkg\""));
}

#[test]
fn test_missing_data_root_exits_non_zero() {
    let project = fixture_project();
    fs::remove_dir_all(project.path().join("pkg/data")).unwrap();

    let output = Command::new(BIN)
        .args(["--config", &fixture_config(), "--dry-run", "--project-dir"])
        .arg(project.path())
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Directory not found"));
}

#[test]
fn test_print_version_writes_nothing() {
    let project = fixture_project();

    let output = Command::new(BIN)
        .args(["--config", &fixture_config(), "--print-version", "--project-dir"])
        .arg(project.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("full_version:  1.0.0"));
    assert!(!project.path().join("pkg/version.py").exists());
}

#[test]
fn test_print_version_accepts_pre_release_base() {
    let project = fixture_project();
    let config = project.path().join("pre.toml");
    fs::write(&config, "[version]\nbase_version = \"2.0.0a1\"\ndev_build = \"None\"\n").unwrap();

    let output = Command::new(BIN)
        .arg("--config")
        .arg(&config)
        .arg("--print-version")
        .arg("--project-dir")
        .arg(project.path())
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("short_version: 2.0.0a1"));
    assert!(stdout.contains("full_version:  2.0.0a1-Unknown"));
}
