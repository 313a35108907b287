//! Audit report layout and file output.

pub mod format;
pub mod writer;

pub use format::{AuditEntry, RECORD_SEPARATOR, format_entry, render_report};
pub use writer::{DEFAULT_REPORT_FILE, generate_summary, write_report};
