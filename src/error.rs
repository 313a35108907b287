//! Error types for gitaudit modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading the `~/.gitaudit` configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the user home directory to locate the config file")]
    HomeDirUnavailable,

    #[error(
        "Config file not found at {}. Please create it with 'ollama_endpoint' and 'ollama_model'",
        path.display()
    )]
    NotFound { path: PathBuf },

    #[error("Failed to read config file {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode config file {}: {source}. Ensure it is valid JSON", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file {} must contain a non-empty '{field}'", path.display())]
    MissingField { path: PathBuf, field: &'static str },
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH")]
    GitNotInstalled,

    #[error("Path {} is not a git repository: {source}", path.display())]
    OpenRepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to resolve commit ID '{reference}': {source}")]
    UnresolvableRevision {
        reference: String,
        #[source]
        source: git2::Error,
    },

    #[error("Commit ID {reference} not found in the history of HEAD or is not an ancestor")]
    NotAnAncestor { reference: String },

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),

    #[error("Failed to spawn git for commit {id}: {source}")]
    SpawnFailed {
        id: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git show for commit {id} exited with {}: {stderr}", describe_code(*code))]
    DescribeFailed {
        id: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("git show for metadata on commit {id} exited with {}: {stderr}", describe_code(*code))]
    MetadataFailed {
        id: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error(
        "Unexpected metadata format for commit {id}: expected 3 lines, got {lines}. Output: {output}"
    )]
    MalformedMetadata {
        id: String,
        lines: usize,
        output: String,
    },
}

fn describe_code(code: Option<i32>) -> String {
    code.map_or("unknown status".to_string(), |c| format!("code {c}"))
}

/// Errors from the text-generation endpoint.
#[derive(Error, Debug)]
pub enum SummarizeError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Failed to send request to {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Generation request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to decode generation response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Errors from writing the audit report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to create report file {}: {source}", path.display())]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write audit data to file for commit {id}: {source}")]
    WriteFailed {
        id: String,
        #[source]
        source: std::io::Error,
    },
}

/// A single revision's failure inside the audit pipeline.
///
/// Every variant is recoverable: the revision goes back on the pending queue.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Error generating patch: {0}")]
    Changeset(#[source] GitError),

    #[error("Error calling the generation endpoint: {0}")]
    Summarize(#[source] SummarizeError),

    #[error("Error getting metadata: {0}")]
    Metadata(#[source] GitError),
}
