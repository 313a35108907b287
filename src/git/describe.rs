//! Per-revision changeset and metadata lookup through the `git` binary.
//!
//! Both operations shell out to `git -C <repo> show ...`, inheriting the user's
//! git config. Neither call has a timeout: a hung `git` stalls the pipeline.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::GitError;

/// `git show` pretty format yielding hash, author name and ISO-like date, one per line.
const METADATA_FORMAT: &str = "--format=%H%n%an%n%ai";

/// Full diff plus the commit's own message, as printed by `git show --patch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionChangeset {
    pub id: String,
    pub patch: String,
}

/// Identity of one commit as recorded in the audit report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionMetadata {
    pub hash: String,
    pub author: String,
    pub date: String,
}

/// Read-only access to the revisions being audited.
///
/// This abstraction allows driving the audit pipeline with a fake repository in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RevisionSource: Send + Sync {
    /// Produce the patch text for `id`.
    async fn changeset_for(&self, id: &str) -> Result<RevisionChangeset, GitError>;

    /// Produce hash, author and date for `id`.
    async fn metadata_for(&self, id: &str) -> Result<RevisionMetadata, GitError>;
}

/// Check that a `git` executable is available on PATH.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git")
        .map(|_| ())
        .map_err(|_| GitError::GitNotInstalled)
}

/// [`RevisionSource`] backed by the system `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    async fn show(&self, id: &str, args: &[&str]) -> Result<std::process::Output, GitError> {
        Command::new("git")
            .arg("-C")
            .arg(&self.repo_path)
            .arg("show")
            .args(args)
            .arg(id)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| GitError::SpawnFailed {
                id: id.to_string(),
                source,
            })
    }
}

#[async_trait]
impl RevisionSource for GitCli {
    async fn changeset_for(&self, id: &str) -> Result<RevisionChangeset, GitError> {
        let output = self.show(id, &["--patch"]).await?;

        if !output.status.success() {
            return Err(GitError::DescribeFailed {
                id: id.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(RevisionChangeset {
            id: id.to_string(),
            patch: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    async fn metadata_for(&self, id: &str) -> Result<RevisionMetadata, GitError> {
        let output = self.show(id, &["-s", METADATA_FORMAT]).await?;

        if !output.status.success() {
            return Err(GitError::MetadataFailed {
                id: id.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_metadata(id, &String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse the three-line `%H%n%an%n%ai` output of `git show -s`.
pub fn parse_metadata(id: &str, output: &str) -> Result<RevisionMetadata, GitError> {
    let lines: Vec<&str> = output.trim().lines().collect();

    match lines.as_slice() {
        [hash, author, date] => Ok(RevisionMetadata {
            hash: hash.trim().to_string(),
            author: author.trim().to_string(),
            date: date.trim().to_string(),
        }),
        _ => Err(GitError::MalformedMetadata {
            id: id.to_string(),
            lines: if output.trim().is_empty() { 0 } else { lines.len() },
            output: output.to_string(),
        }),
    }
}
