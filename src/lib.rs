//! gitaudit - A CLI tool that summarizes every commit back to a boundary commit.
//!
//! # Overview
//!
//! gitaudit walks the history from HEAD back to a user-supplied commit, asks an
//! Ollama-compatible model to describe each commit's patch, and writes the
//! results to `gitaudit.txt`, newest first. Failed commits are retried until
//! they succeed or the run is interrupted with Ctrl+C, in which case a partial
//! report is still written.

pub mod audit;
pub mod config;
pub mod error;
pub mod git;
pub mod ollama;
pub mod report;

// Re-export commonly used types
pub use audit::{AuditOutcome, AuditPipeline, CancellationToken, PipelineState};
pub use config::Config;
pub use error::{AuditError, ConfigError, GitError, ReportError, SummarizeError};
pub use git::{GitCli, RevisionChangeset, RevisionMetadata, RevisionSource};
pub use ollama::{OllamaClient, Summarizer};
pub use report::AuditEntry;
