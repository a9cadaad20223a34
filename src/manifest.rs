//! Package manifest handed to the host packaging tool.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::BuildConfig;
use crate::domain::VersionInfo;
use crate::error::{Result, SetupError};

/// Everything the packaging tool needs to build the distribution.
///
/// `version` is the base version, as published on the package index;
/// `full_version` carries the dev and revision decoration for reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    pub name: String,
    pub version: String,
    pub full_version: String,
    pub author: String,
    pub author_email: String,
    pub description: String,
    pub long_description: String,
    pub license: String,
    pub url: String,
    pub platforms: Vec<String>,
    pub classifiers: Vec<String>,
    pub packages: Vec<String>,
    pub zip_safe: bool,
    pub include_package_data: bool,
    pub package_dir: BTreeMap<String, String>,
    pub package_data: BTreeMap<String, Vec<String>>,
}

impl PackageManifest {
    /// Assemble the manifest from configuration and the values computed during the build.
    pub fn assemble(
        config: &BuildConfig,
        version: &VersionInfo,
        packages: Vec<String>,
        package_data: Vec<String>,
        long_description: String,
    ) -> Self {
        let metadata = &config.metadata;

        let mut data = BTreeMap::new();
        data.insert(metadata.name.clone(), package_data);

        PackageManifest {
            name: metadata.name.clone(),
            version: version.short_version.clone(),
            full_version: version.full_version.clone(),
            author: metadata.author.clone(),
            author_email: metadata.author_email.clone(),
            description: metadata.description.clone(),
            long_description,
            license: metadata.license.clone(),
            url: metadata.url.clone(),
            platforms: metadata.platforms.clone(),
            classifiers: metadata.classifiers.clone(),
            packages,
            zip_safe: false,
            include_package_data: true,
            package_dir: config.packages.package_dir.clone(),
            package_data: data,
        }
    }

    /// TOML rendering of the manifest.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the manifest to `path`, creating parent directories as needed.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        tracing::info!(path = %path.display(), "wrote package manifest");
        Ok(())
    }

    /// Read a manifest written by [PackageManifest::write].
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text)
            .map_err(|e| SetupError::manifest(format!("Invalid manifest {}: {}", path.display(), e)))
    }
}

/// Full text of the README used as the long description.
///
/// # Errors
/// * `Readme` - if the file is missing or unreadable
pub fn read_long_description(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| SetupError::Readme {
        path: path.to_path_buf(),
        source,
    })
}
