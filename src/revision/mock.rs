use crate::error::{Result, SetupError};
use crate::revision::RevisionSource;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock revision source for testing without a repository or git binary
pub struct MockRevisionSource {
    answer: std::result::Result<String, String>,
    calls: AtomicUsize,
}

impl MockRevisionSource {
    /// Always answer with `revision`
    pub fn with_revision(revision: impl Into<String>) -> Self {
        MockRevisionSource {
            answer: Ok(revision.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        MockRevisionSource {
            answer: Err(reason.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// How many times the source was queried
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RevisionSource for MockRevisionSource {
    fn head_revision(&self, _work_dir: &Path) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.answer {
            Ok(revision) => Ok(revision.clone()),
            Err(reason) => Err(SetupError::revision(reason.clone())),
        }
    }
}
