//! Domain logic - pure version rules independent of git and the file system

pub mod version;

pub use version::{short_revision, VersionInfo, VersionSpec, UNKNOWN_REVISION};
