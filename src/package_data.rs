//! Package data enumeration.
//!
//! Every regular file under a data directory is listed relative to the
//! package that ships it, so the packaging tool can include fixtures,
//! notebooks and images next to the code.

use std::env;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::config::PackageDataConfig;
use crate::error::{Result, SetupError};

/// All regular files under `data_root`, as `/`-separated paths relative to `package_root`.
///
/// The result is sorted, and each file appears exactly once. Symlinks to
/// files are included, symlinked directories are not descended into.
///
/// # Errors
/// * `DirectoryNotFound` - if `data_root` does not exist or is not a directory
pub fn find_package_data(data_root: &Path, package_root: &Path) -> Result<Vec<String>> {
    if !data_root.is_dir() {
        return Err(SetupError::directory_not_found(data_root));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(data_root) {
        let entry = entry?;
        if entry.file_type().is_dir() || !entry.path().is_file() {
            continue;
        }
        files.push(relative_path(entry.path(), package_root)?);
    }

    files.sort();
    tracing::debug!(root = %data_root.display(), count = files.len(), "collected package data");
    Ok(files)
}

/// Collected data files for a project, followed by the configured static patterns.
pub fn collect_package_data(config: &PackageDataConfig, project_dir: &Path) -> Result<Vec<String>> {
    let data_root = project_dir.join(&config.data_root);
    let package_root = project_dir.join(&config.package_root);

    let mut entries = find_package_data(&data_root, &package_root)?;
    entries.extend(config.patterns.iter().cloned());
    Ok(entries)
}

/// Lexical relative path from `base` to `path`, using `..` when `path` lies outside `base`.
pub fn relative_path(path: &Path, base: &Path) -> Result<String> {
    let path = absolute(path)?;
    let base = absolute(base)?;

    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..base_parts.len() {
        parts.push("..".to_string());
    }
    for part in &path_parts[common..] {
        parts.push(part.as_os_str().to_string_lossy().into_owned());
    }

    if parts.is_empty() {
        return Ok(".".to_string());
    }
    Ok(parts.join("/"))
}

/// Absolute, lexically normalised form of `path`; symlinks are not resolved.
fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir()?.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}
