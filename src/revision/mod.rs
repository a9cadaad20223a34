//! Source-control revision lookup
//!
//! This module answers one question: which commit is the working tree built
//! from? The answer is stamped into the generated version file.
//!
//! # Overview
//!
//! The primary abstraction is the [RevisionSource] trait. The concrete
//! implementations include:
//!
//! - [command::CommandRevisionSource]: runs `git rev-parse HEAD` in a minimal environment
//! - [repository::Git2RevisionSource]: reads `HEAD` through the `git2` crate
//! - [mock::MockRevisionSource]: a fixed answer for testing
//!
//! # Usage
//!
//! Callers go through [resolve_revision], which never fails: when the tree
//! has no `.git` entry, or the source reports any error, the revision is
//! [UNKNOWN_REVISION].
//!
//! ```rust
//! # use blues_setup::revision::{resolve_revision, MockRevisionSource};
//! # use std::path::Path;
//! let source = MockRevisionSource::failing("git not installed");
//! let revision = resolve_revision(Path::new("."), &source);
//! assert!(!revision.is_empty());
//! ```

pub mod command;
pub mod mock;
pub mod repository;

pub use command::CommandRevisionSource;
pub use mock::MockRevisionSource;
pub use repository::Git2RevisionSource;

use std::path::Path;
use std::time::Duration;

use crate::config::{RevisionBackend, RevisionConfig};
use crate::domain::UNKNOWN_REVISION;
use crate::error::Result;

/// Common revision lookup trait
///
/// ## Error Handling
///
/// Implementations report every failure (missing tool, non-zero exit,
/// unreadable repository, timeout) as an error. Substituting the sentinel is
/// the caller's decision, see [resolve_revision].
pub trait RevisionSource: Send + Sync {
    /// Full identifier of the commit checked out in `work_dir`
    ///
    /// # Returns
    /// * `Ok(String)` - The revision, trimmed
    /// * `Err` - If the revision cannot be determined
    fn head_revision(&self, work_dir: &Path) -> Result<String>;
}

/// Build the revision source selected in configuration
pub fn source_for(config: &RevisionConfig) -> Box<dyn RevisionSource> {
    match config.backend {
        RevisionBackend::Command => {
            let timeout = match config.timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };
            Box::new(CommandRevisionSource::new().with_timeout(timeout))
        }
        RevisionBackend::Libgit2 => Box::new(Git2RevisionSource),
    }
}

/// Revision for `work_dir`, or [UNKNOWN_REVISION] when it cannot be determined
///
/// The source is not consulted at all when `work_dir` has no `.git` entry,
/// which is the normal case for builds from a source distribution.
pub fn resolve_revision(work_dir: &Path, source: &dyn RevisionSource) -> String {
    if !work_dir.join(".git").exists() {
        tracing::info!(
            dir = %work_dir.display(),
            "no .git entry, using revision '{}'",
            UNKNOWN_REVISION
        );
        return UNKNOWN_REVISION.to_string();
    }

    match source.head_revision(work_dir) {
        Ok(revision) if !revision.is_empty() => {
            tracing::debug!(%revision, "resolved revision");
            revision
        }
        Ok(_) => {
            tracing::warn!("revision query returned no output");
            UNKNOWN_REVISION.to_string()
        }
        Err(e) => {
            tracing::warn!(error = %e, "revision query failed");
            UNKNOWN_REVISION.to_string()
        }
    }
}
