//! The audit run: sequential processing, retry queue, cooperative cancellation.

pub mod cancel;
pub mod pipeline;

pub use cancel::{CancellationToken, spawn_signal_listener};
pub use pipeline::{AuditOutcome, AuditPipeline, PipelineState};
