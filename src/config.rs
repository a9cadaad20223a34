use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::version::VersionSpec;
use crate::error::Result;

/// File name looked up in the project directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "blues-setup.toml";

/// Represents the complete build configuration for blues-setup.
///
/// Replaces the module-level build constants of a classic setup script with
/// explicit sections: version, revision lookup, package metadata, package
/// discovery, package data and the packaging tool.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BuildConfig {
    #[serde(default)]
    pub version: VersionConfig,

    #[serde(default)]
    pub revision: RevisionConfig,

    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub packages: PackagesConfig,

    #[serde(default)]
    pub package_data: PackageDataConfig,

    #[serde(default)]
    pub packaging: PackagingConfig,
}

fn default_base_version() -> String {
    "0.2.3".to_string()
}

fn default_dev_build() -> Option<String> {
    Some("1".to_string())
}

fn default_version_output() -> PathBuf {
    PathBuf::from("blues/version.py")
}

/// Version stamping settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    #[serde(default = "default_base_version")]
    pub base_version: String,

    /// Dev build number as a string; absent, empty or `"None"` disables the `.devN` suffix.
    #[serde(default = "default_dev_build")]
    pub dev_build: Option<String>,

    #[serde(default)]
    pub released: bool,

    /// Generated version file, relative to the project directory.
    #[serde(default = "default_version_output")]
    pub output: PathBuf,
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            base_version: default_base_version(),
            dev_build: default_dev_build(),
            released: false,
            output: default_version_output(),
        }
    }
}

impl VersionConfig {
    /// Build the version inputs handed to the stamper.
    pub fn spec(&self) -> VersionSpec {
        VersionSpec::new(
            self.base_version.clone(),
            self.dev_build.as_deref(),
            self.released,
        )
    }
}

/// Which implementation answers the "current revision" question.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RevisionBackend {
    /// Run `git rev-parse HEAD` in a constrained environment
    #[default]
    Command,
    /// Read HEAD through libgit2
    Libgit2,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Revision lookup settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RevisionConfig {
    #[serde(default)]
    pub backend: RevisionBackend,

    /// Upper bound for the external query; `0` waits forever.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RevisionConfig {
    fn default() -> Self {
        RevisionConfig {
            backend: RevisionBackend::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_name() -> String {
    "blues".to_string()
}

fn default_author() -> String {
    "Samuel C. Gill, Nathan M. Lim, Kalistyn Burley, David L. Mobley, and others".to_string()
}

fn default_author_email() -> String {
    "dmobley@uci.edu".to_string()
}

fn default_description() -> String {
    "NCMC moves in OpenMM to enhance ligand sampling".to_string()
}

fn default_license() -> String {
    "MIT".to_string()
}

fn default_url() -> String {
    "https://github.com/MobleyLab/blues".to_string()
}

fn default_readme() -> PathBuf {
    PathBuf::from("README.md")
}

fn default_platforms() -> Vec<String> {
    vec![
        "Linux-64".to_string(),
        "Mac OSX-64".to_string(),
        "Unix-64".to_string(),
    ]
}

fn default_classifiers() -> Vec<String> {
    vec![
        "Development Status :: 1 - Alpha".to_string(),
        "Intended Audience :: Science/Research".to_string(),
        "Intended Audience :: Developers".to_string(),
        "License :: OSI Approved :: The MIT License (MIT)".to_string(),
        "Programming Language :: Python".to_string(),
        "Programming Language :: Python :: 3".to_string(),
        "Topic :: Scientific/Engineering :: Chemistry".to_string(),
        "Operating System :: Unix".to_string(),
    ]
}

/// Static package metadata passed through to the packaging tool.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MetadataConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_author")]
    pub author: String,

    #[serde(default = "default_author_email")]
    pub author_email: String,

    #[serde(default = "default_description")]
    pub description: String,

    #[serde(default = "default_license")]
    pub license: String,

    #[serde(default = "default_url")]
    pub url: String,

    /// README whose full text becomes the long description.
    #[serde(default = "default_readme")]
    pub readme: PathBuf,

    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,

    #[serde(default = "default_classifiers")]
    pub classifiers: Vec<String>,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        MetadataConfig {
            name: default_name(),
            author: default_author(),
            author_email: default_author_email(),
            description: default_description(),
            license: default_license(),
            url: default_url(),
            readme: default_readme(),
            platforms: default_platforms(),
            classifiers: default_classifiers(),
        }
    }
}

fn default_packages_root() -> PathBuf {
    PathBuf::from("blues")
}

fn default_explicit_packages() -> Vec<String> {
    vec![
        "blues".to_string(),
        "blues.tests".to_string(),
        "blues.tests.data".to_string(),
    ]
}

fn default_package_dir() -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert("blues".to_string(), "blues".to_string());
    map
}

/// Package list settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackagesConfig {
    /// Directory scanned for sub-packages.
    #[serde(default = "default_packages_root")]
    pub root: PathBuf,

    /// Packages always listed, ahead of discovered ones.
    #[serde(default = "default_explicit_packages")]
    pub explicit: Vec<String>,

    #[serde(default = "default_package_dir")]
    pub package_dir: BTreeMap<String, String>,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        PackagesConfig {
            root: default_packages_root(),
            explicit: default_explicit_packages(),
            package_dir: default_package_dir(),
        }
    }
}

fn default_data_root() -> PathBuf {
    PathBuf::from("blues/tests/data")
}

fn default_data_package_root() -> PathBuf {
    PathBuf::from("blues")
}

fn default_data_patterns() -> Vec<String> {
    vec!["notebooks/*.ipynb".to_string(), "images/*".to_string()]
}

/// Package data settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackageDataConfig {
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,

    #[serde(default = "default_data_package_root")]
    pub package_root: PathBuf,

    /// Glob patterns appended verbatim after the collected files.
    #[serde(default = "default_data_patterns")]
    pub patterns: Vec<String>,
}

impl Default for PackageDataConfig {
    fn default() -> Self {
        PackageDataConfig {
            data_root: default_data_root(),
            package_root: default_data_package_root(),
            patterns: default_data_patterns(),
        }
    }
}

fn default_packaging_command() -> Vec<String> {
    vec!["python".to_string(), "-m".to_string(), "build".to_string()]
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("target/blues-setup/manifest.toml")
}

/// Host packaging tool settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PackagingConfig {
    /// Program and arguments; an empty list only writes the manifest.
    #[serde(default = "default_packaging_command")]
    pub command: Vec<String>,

    #[serde(default = "default_manifest_path")]
    pub manifest: PathBuf,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        PackagingConfig {
            command: default_packaging_command(),
            manifest: default_manifest_path(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `blues-setup.toml` in the project directory
/// 3. `blues-setup.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// A project file always shadows the user file; a user file that is picked
/// up is logged at `info`.
///
/// # Returns
/// * `Ok(BuildConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, project_dir: &Path) -> Result<BuildConfig> {
    let local = project_dir.join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        tracing::debug!(path = %path.display(), "loading explicit config");
        fs::read_to_string(path)?
    } else if local.exists() {
        tracing::debug!(path = %local.display(), "loading project config");
        fs::read_to_string(&local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(CONFIG_FILE_NAME);
        if user_path.exists() {
            tracing::info!(path = %user_path.display(), "loading user config");
            fs::read_to_string(user_path)?
        } else {
            return Ok(BuildConfig::default());
        }
    } else {
        return Ok(BuildConfig::default());
    };

    let config: BuildConfig = toml::from_str(&config_str)?;
    Ok(config)
}
