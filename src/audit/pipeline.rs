//! Sequential audit pipeline with an unbounded retry queue.
//!
//! Revisions are processed one at a time: patch, then summary, then metadata.
//! Any failing step puts the revision back on the pending queue and the run
//! moves on. After the initial pass the queue is drained pass after pass until
//! it is empty or the cancellation token fires.
//!
//! There is deliberately no retry limit and no delay between passes: a pass in
//! which every revision fails is started again straight away, and only the
//! operator (via SIGINT/SIGTERM) decides when to give up.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::error::AuditError;
use crate::git::RevisionSource;
use crate::ollama::Summarizer;
use crate::report::AuditEntry;

use super::cancel::CancellationToken;

/// Where the pipeline is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Initial,
    Retrying,
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Initial => write!(f, "initial pass"),
            PipelineState::Retrying => write!(f, "retrying"),
            PipelineState::Done => write!(f, "done"),
        }
    }
}

/// Result of a complete pipeline run.
///
/// Every input revision is either represented in `entries` or listed in `pending`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditOutcome {
    /// Successful entries in completion order.
    pub entries: Vec<AuditEntry>,
    /// Revisions still unprocessed when the run stopped; empty unless interrupted.
    pub pending: Vec<String>,
    /// Whether cancellation had been requested by the time the run finished.
    pub interrupted: bool,
    /// Number of retry passes started after the initial pass.
    pub retry_passes: u32,
    /// Retry passes in which every attempted revision failed again.
    pub fully_failed_passes: u32,
}

impl AuditOutcome {
    /// Pending revisions with duplicates removed, in first-seen order.
    pub fn unique_pending(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.pending
            .iter()
            .map(String::as_str)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// Which kind of pass an attempt belongs to; only affects console wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Initial,
    Retry,
}

struct PassResult {
    /// Revisions for the next pass, in original relative order.
    carried: Vec<String>,
    /// Revisions that were actually attempted and failed.
    failures: usize,
    interrupted: bool,
}

/// Drives a [`RevisionSource`] and a [`Summarizer`] over a list of revisions.
pub struct AuditPipeline<'a, S: ?Sized, M: ?Sized> {
    source: &'a S,
    summarizer: &'a M,
    cancel: CancellationToken,
    state: PipelineState,
    retry_passes: u32,
}

impl<'a, S, M> AuditPipeline<'a, S, M>
where
    S: RevisionSource + ?Sized,
    M: Summarizer + ?Sized,
{
    pub fn new(source: &'a S, summarizer: &'a M, cancel: CancellationToken) -> Self {
        Self {
            source,
            summarizer,
            cancel,
            state: PipelineState::Initial,
            retry_passes: 0,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Retry passes started so far. No limit is enforced on this counter.
    pub fn retry_passes(&self) -> u32 {
        self.retry_passes
    }

    /// Process `revisions` (newest first) until all succeed or cancellation is observed.
    pub async fn run(&mut self, revisions: Vec<String>) -> AuditOutcome {
        let mut entries = Vec::with_capacity(revisions.len());
        let mut fully_failed_passes = 0;

        self.state = PipelineState::Initial;
        println!("--- Initial Processing Pass ---");

        let initial = self.run_pass(revisions, Attempt::Initial, &mut entries).await;
        let mut pending = initial.carried;

        if initial.interrupted {
            println!("Interrupted during initial processing pass.");
        } else if !pending.is_empty() {
            if self.cancel.is_cancelled() {
                println!("Interrupted before retry processing.");
            } else {
                self.state = PipelineState::Retrying;
                println!("\n--- Starting Retry Processing ---");
            }
        }

        while self.state == PipelineState::Retrying && !pending.is_empty() {
            if self.cancel.is_cancelled() {
                println!("Interrupted during retry processing.");
                break;
            }

            self.retry_passes += 1;
            println!("Commits in retry queue: {}", pending.len());
            debug!("Starting retry pass {}", self.retry_passes);

            let snapshot = std::mem::take(&mut pending);
            let attempted = snapshot.len();
            let pass = self.run_pass(snapshot, Attempt::Retry, &mut entries).await;
            pending = pass.carried;

            if pass.interrupted {
                println!("Interrupted during retry processing.");
                break;
            }

            if pass.failures > 0 && pass.failures == attempted {
                fully_failed_passes += 1;
                println!(
                    "All {} commits in the current retry pass failed. Retrying them again in the next pass.",
                    pass.failures
                );
            }
        }

        self.state = PipelineState::Done;

        AuditOutcome {
            entries,
            pending,
            interrupted: self.cancel.is_cancelled(),
            retry_passes: self.retry_passes,
            fully_failed_passes,
        }
    }

    /// Attempt each revision once, checking for cancellation before every item.
    async fn run_pass(
        &self,
        revisions: Vec<String>,
        attempt: Attempt,
        entries: &mut Vec<AuditEntry>,
    ) -> PassResult {
        let mut carried = Vec::new();
        let mut failures = 0;
        let mut remaining = revisions.into_iter();

        while let Some(id) = remaining.next() {
            if self.cancel.is_cancelled() {
                carried.push(id);
                carried.extend(remaining);
                return PassResult {
                    carried,
                    failures,
                    interrupted: true,
                };
            }

            match attempt {
                Attempt::Initial => println!("Processing commit: {}", id),
                Attempt::Retry => println!("Retrying commit: {}", id),
            }

            match self.process(&id).await {
                Ok(entry) => {
                    match attempt {
                        Attempt::Initial => println!("Successfully processed commit {}", id),
                        Attempt::Retry => println!("Successfully processed commit {} on retry", id),
                    }
                    entries.push(entry);
                }
                Err(e) => {
                    let next = match attempt {
                        Attempt::Initial => "Adding to retry queue.",
                        Attempt::Retry => "Will retry again.",
                    };
                    eprintln!("{} (commit {}). {}", e, id, next);
                    failures += 1;
                    carried.push(id);
                }
            }
        }

        PassResult {
            carried,
            failures,
            interrupted: false,
        }
    }

    /// Patch, summary, metadata; the first failing step aborts this attempt.
    async fn process(&self, id: &str) -> Result<AuditEntry, AuditError> {
        let changeset = self
            .source
            .changeset_for(id)
            .await
            .map_err(AuditError::Changeset)?;

        let summary = self
            .summarizer
            .summarize(&changeset.patch)
            .await
            .map_err(AuditError::Summarize)?;

        let metadata = self
            .source
            .metadata_for(id)
            .await
            .map_err(AuditError::Metadata)?;

        Ok(AuditEntry::new(metadata, summary))
    }
}
