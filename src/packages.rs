//! Python package discovery.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::config::PackagesConfig;
use crate::error::{Result, SetupError};

const PACKAGE_MARKER: &str = "__init__.py";

fn identifier_regex() -> &'static Regex {
    static IDENT: OnceLock<Regex> = OnceLock::new();
    IDENT.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"))
}

fn is_package_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| identifier_regex().is_match(name))
        && entry.path().join(PACKAGE_MARKER).is_file()
}

/// Dotted names of all packages below `root`, sorted.
///
/// A directory is a package when its name is a valid identifier and it holds
/// an `__init__.py`. Directories that are not packages are not descended
/// into, so a package nested under a plain directory is not found.
/// `root` itself is never reported.
pub fn find_packages(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(SetupError::directory_not_found(root));
    }

    let mut packages = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .filter_entry(is_package_dir);

    for entry in walker {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| SetupError::config(format!("Package outside root: {}", e)))?;

        let dotted = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(".");
        packages.push(dotted);
    }

    packages.sort();
    Ok(packages)
}

/// Explicit packages followed by every discovered sub-package of `name`, without duplicates.
pub fn package_list(config: &PackagesConfig, project_dir: &Path, name: &str) -> Result<Vec<String>> {
    let discovered = find_packages(&project_dir.join(&config.root))?;

    let mut packages: Vec<String> = Vec::new();
    let candidates = config
        .explicit
        .iter()
        .cloned()
        .chain(discovered.into_iter().map(|p| format!("{}.{}", name, p)));

    for package in candidates {
        if !packages.contains(&package) {
            packages.push(package);
        }
    }

    tracing::debug!(count = packages.len(), "assembled package list");
    Ok(packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_package(root: &Path, rel: &str) {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PACKAGE_MARKER), "").unwrap();
    }

    #[test]
    fn test_finds_nested_packages() {
        let dir = TempDir::new().unwrap();
        make_package(dir.path(), "tests");
        make_package(dir.path(), "tests/data");
        make_package(dir.path(), "engine");

        let packages = find_packages(dir.path()).unwrap();
        assert_eq!(packages, vec!["engine", "tests", "tests.data"]);
    }

    #[test]
    fn test_skips_plain_directories_and_their_children() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("notebooks")).unwrap();
        make_package(dir.path(), "notebooks/hidden");
        make_package(dir.path(), "not-an-identifier");

        assert!(find_packages(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            find_packages(&dir.path().join("blues")),
            Err(SetupError::DirectoryNotFound(_))
        ));
    }

    #[test]
    fn test_package_list_deduplicates() {
        let dir = TempDir::new().unwrap();
        make_package(dir.path(), "blues");
        make_package(dir.path(), "blues/tests");
        make_package(dir.path(), "blues/tests/data");
        make_package(dir.path(), "blues/moves");

        let packages = package_list(&PackagesConfig::default(), dir.path(), "blues").unwrap();
        assert_eq!(
            packages,
            vec!["blues", "blues.tests", "blues.tests.data", "blues.moves"]
        );
    }
}
