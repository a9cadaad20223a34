use crate::error::{Result, SetupError};
use crate::revision::RevisionSource;
use git2::Repository as Git2Repo;
use std::path::Path;

/// Reads the HEAD commit through libgit2 instead of the `git` binary
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2RevisionSource;

impl RevisionSource for Git2RevisionSource {
    fn head_revision(&self, work_dir: &Path) -> Result<String> {
        let repo = Git2Repo::open(work_dir)?;

        let head = repo
            .head()
            .map_err(|e| SetupError::revision(format!("Cannot resolve HEAD: {}", e)))?;

        let commit = head
            .peel_to_commit()
            .map_err(|e| SetupError::revision(format!("HEAD is not a commit: {}", e)))?;

        Ok(commit.id().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_not_a_repository() {
        let dir = TempDir::new().unwrap();
        assert!(Git2RevisionSource.head_revision(dir.path()).is_err());
    }

    #[test]
    fn test_unborn_head_is_an_error() {
        let dir = TempDir::new().unwrap();
        Git2Repo::init(dir.path()).unwrap();

        let err = Git2RevisionSource.head_revision(dir.path()).unwrap_err();
        assert!(err.to_string().contains("HEAD"));
    }

    #[test]
    fn test_reads_head_commit() {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();

        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();

        let revision = Git2RevisionSource.head_revision(dir.path()).unwrap();
        assert_eq!(revision, oid.to_string());
        assert_eq!(revision.len(), 40);
    }
}
