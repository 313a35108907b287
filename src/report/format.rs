//! Audit entry type and report text layout.

use crate::git::RevisionMetadata;

/// Line placed between two consecutive records.
pub const RECORD_SEPARATOR: &str = "---";

/// One successfully audited commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub hash: String,
    pub author: String,
    pub date: String,
    pub summary: String,
}

impl AuditEntry {
    pub fn new(metadata: RevisionMetadata, summary: String) -> Self {
        Self {
            hash: metadata.hash,
            author: metadata.author,
            date: metadata.date,
            summary,
        }
    }
}

/// Format a single record, ending with a newline.
pub fn format_entry(entry: &AuditEntry) -> String {
    format!(
        "Commit: {}\nAuthor: {}\nDate: {}\n\n{}\n",
        entry.hash, entry.author, entry.date, entry.summary
    )
}

/// Separator written after every record except the last.
pub fn format_separator() -> String {
    format!("\n{}\n\n", RECORD_SEPARATOR)
}

/// Render the whole report in the order given.
pub fn render_report(entries: &[AuditEntry]) -> String {
    let mut report = String::new();

    for (i, entry) in entries.iter().enumerate() {
        report.push_str(&format_entry(entry));
        if i + 1 < entries.len() {
            report.push_str(&format_separator());
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hash: &str) -> AuditEntry {
        AuditEntry {
            hash: hash.to_string(),
            author: "Jane Doe".to_string(),
            date: "2024-01-01 12:00:00 +0000".to_string(),
            summary: format!("Summary of {}", hash),
        }
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(
            format_entry(&entry("abc")),
            "Commit: abc\nAuthor: Jane Doe\nDate: 2024-01-01 12:00:00 +0000\n\nSummary of abc\n"
        );
    }

    #[test]
    fn test_single_entry_has_no_separator() {
        let report = render_report(&[entry("a")]);
        assert!(!report.contains(RECORD_SEPARATOR));
    }

    #[test]
    fn test_separators_between_records_only() {
        let report = render_report(&[entry("a"), entry("b"), entry("c")]);

        assert_eq!(report.matches("Commit: ").count(), 3);
        assert_eq!(report.lines().filter(|l| *l == RECORD_SEPARATOR).count(), 2);
        assert!(report.ends_with("Summary of c\n"));

        let a = report.find("Commit: a").unwrap();
        let b = report.find("Commit: b").unwrap();
        let c = report.find("Commit: c").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_separator_is_flanked_by_blank_lines() {
        let report = render_report(&[entry("a"), entry("b")]);
        assert!(report.contains("Summary of a\n\n---\n\nCommit: b"));
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(render_report(&[]), "");
    }
}
