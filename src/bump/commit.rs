//! Commit message lookup.

use std::path::Path;

use git2::Repository;
use tracing::debug;

/// Message of the commit at `HEAD` in the repository containing `repo`,
/// or `""` if there is none.
pub fn last_commit_message(repo: &Path) -> String {
    match head_message(repo) {
        Ok(message) => message,
        Err(e) => {
            debug!("No commit message from {}: {}", repo.display(), e);
            String::new()
        }
    }
}

fn head_message(repo: &Path) -> Result<String, git2::Error> {
    let repo = Repository::discover(repo)?;
    let commit = repo.head()?.peel_to_commit()?;
    Ok(String::from_utf8_lossy(commit.message_bytes()).trim().to_string())
}

/// Use `provided` when non-empty, otherwise the last commit message.
pub fn resolve_message(provided: &str, repo: &Path) -> String {
    if provided.is_empty() {
        last_commit_message(repo)
    } else {
        provided.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;

    fn commit(repo: &Repository, message: &str) {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap();
    }

    #[test]
    fn provided_message_wins() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve_message("feat: x", dir.path()), "feat: x");
    }

    #[test]
    fn reads_head_commit_message() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        commit(&repo, "fix: first\n");
        commit(&repo, "feat(store): second\n\nBody text.\n");

        assert_eq!(
            resolve_message("", dir.path()),
            "feat(store): second\n\nBody text."
        );
    }

    #[test]
    fn repository_without_commits_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        assert_eq!(last_commit_message(dir.path()), "");
    }

    #[test]
    fn missing_directory_yields_empty() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        assert_eq!(last_commit_message(&gone), "");
    }
}
