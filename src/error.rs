use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for blues-setup operations
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Revision query failed: {0}")]
    Revision(String),

    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Cannot read README '{}': {source}", path.display())]
    Readme {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Packaging tool failed: {0}")]
    Packaging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in blues-setup
pub type Result<T> = std::result::Result<T, SetupError>;

impl SetupError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        SetupError::Config(msg.into())
    }

    /// Create a revision error with context
    pub fn revision(msg: impl Into<String>) -> Self {
        SetupError::Revision(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        SetupError::Manifest(msg.into())
    }

    /// Create a packaging error with context
    pub fn packaging(msg: impl Into<String>) -> Self {
        SetupError::Packaging(msg.into())
    }

    /// Create a directory-not-found error for the given path
    pub fn directory_not_found(path: impl Into<PathBuf>) -> Self {
        SetupError::DirectoryNotFound(path.into())
    }
}

impl From<toml::de::Error> for SetupError {
    fn from(e: toml::de::Error) -> Self {
        SetupError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for SetupError {
    fn from(e: toml::ser::Error) -> Self {
        SetupError::Manifest(e.to_string())
    }
}
