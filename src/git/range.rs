//! Revision enumeration from HEAD back to a boundary commit.

use std::path::Path;

use git2::{Repository, Sort};
use tracing::debug;

use crate::error::GitError;

/// Open the repository at `repo_path`, failing with `OpenRepository` otherwise.
pub fn open_repository(repo_path: &Path) -> Result<Repository, GitError> {
    Repository::open(repo_path).map_err(|source| GitError::OpenRepository {
        path: repo_path.to_path_buf(),
        source,
    })
}

/// Resolve a user-supplied reference (hash, short hash, tag, branch) to a full commit hash.
pub fn resolve_commit(repo: &Repository, reference: &str) -> Result<String, GitError> {
    let unresolvable = |source| GitError::UnresolvableRevision {
        reference: reference.to_string(),
        source,
    };

    let object = repo.revparse_single(reference).map_err(unresolvable)?;
    let commit = object.peel_to_commit().map_err(unresolvable)?;
    Ok(commit.id().to_string())
}

/// List commit hashes from HEAD back to `boundary` (inclusive), newest first.
pub fn enumerate_revisions(repo_path: &Path, boundary: &str) -> Result<Vec<String>, GitError> {
    let repo = open_repository(repo_path)?;
    let resolved = resolve_commit(&repo, boundary)?;
    debug!("Resolved boundary {} to {}", boundary, resolved);

    let mut revwalk = repo.revwalk().map_err(GitError::RevwalkError)?;
    revwalk
        .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
        .map_err(GitError::RevwalkError)?;
    revwalk.push_head().map_err(GitError::RevwalkError)?;

    let history = revwalk.map(|oid| oid.map(|o| o.to_string()).map_err(GitError::RevwalkError));

    collect_until_boundary(history, &resolved).map_err(|e| match e {
        // Report what the user typed, not the canonical hash.
        GitError::NotAnAncestor { .. } => GitError::NotAnAncestor {
            reference: boundary.to_string(),
        },
        other => other,
    })
}

/// Take ids from a newest-first history until `boundary` is seen (inclusive).
///
/// Returns `NotAnAncestor` without a partial list if the history runs out first.
pub fn collect_until_boundary<I>(history: I, boundary: &str) -> Result<Vec<String>, GitError>
where
    I: IntoIterator<Item = Result<String, GitError>>,
{
    let mut revisions = Vec::new();

    for id in history {
        let id = id?;
        if id.is_empty() {
            continue;
        }
        let found = id == boundary;
        revisions.push(id);
        if found {
            return Ok(revisions);
        }
    }

    Err(GitError::NotAnAncestor {
        reference: boundary.to_string(),
    })
}
