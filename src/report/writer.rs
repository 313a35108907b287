//! Write the audit report to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ReportError;

use super::format::{AuditEntry, format_entry, format_separator};

/// Default report file name, relative to the working directory.
pub const DEFAULT_REPORT_FILE: &str = "gitaudit.txt";

/// Write entries to `path` in the order supplied.
///
/// - Overwrites any existing file
/// - Creates no file at all when `entries` is empty
/// - A failure mid-write leaves the partial file on disk
///
/// Returns the number of records written.
pub fn write_report(path: &Path, entries: &[AuditEntry]) -> Result<usize, ReportError> {
    if entries.is_empty() {
        return Ok(0);
    }

    let file = File::create(path).map_err(|source| ReportError::CreateFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let mut out = BufWriter::new(file);

    for (i, entry) in entries.iter().enumerate() {
        let write_failed = |source| ReportError::WriteFailed {
            id: entry.hash.clone(),
            source,
        };

        out.write_all(format_entry(entry).as_bytes())
            .map_err(write_failed)?;

        if i + 1 < entries.len() {
            out.write_all(format_separator().as_bytes())
                .map_err(write_failed)?;
        }
    }

    out.flush().map_err(|source| ReportError::WriteFailed {
        id: entries[entries.len() - 1].hash.clone(),
        source,
    })?;

    Ok(entries.len())
}

/// Generate the end-of-run line for a written report.
pub fn generate_summary(written: usize, path: &Path) -> String {
    let entry_word = if written == 1 { "entry" } else { "entries" };
    format!(
        "Successfully wrote {} audited commit {} to {}",
        written,
        entry_word,
        path.display()
    )
}
