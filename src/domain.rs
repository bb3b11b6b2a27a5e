//! Core data model shared across the scanner, prompt assembler, and session.

use serde::Serialize;
use std::collections::BTreeMap;

/// Marker recorded in place of content when every decoding attempt failed.
pub const UNREADABLE_MARKER: &str = "<unreadable: could not decode file>";

/// Text of a scanned file, or an explicit unreadable marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FileContent {
    Text(String),
    Unreadable,
}

impl FileContent {
    /// The embeddable text for this file: the content itself, or the
    /// unreadable marker.
    pub fn as_text(&self) -> &str {
        match self {
            FileContent::Text(text) => text,
            FileContent::Unreadable => UNREADABLE_MARKER,
        }
    }

    pub fn is_readable(&self) -> bool {
        matches!(self, FileContent::Text(_))
    }
}

/// One accepted file from a scan. Created once during traversal and never
/// mutated afterwards; owned by the `ScanSummary` that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    /// Path relative to the scan root, with forward slashes.
    pub relative_path: String,
    /// Last dot-delimited suffix of the filename, including the dot
    /// (e.g. ".py"). Empty when the filename has no interior dot.
    pub extension: String,
    /// Newline count + 1 for readable content, so an empty file counts as
    /// one line. Matches the original tool's convention; no trailing-newline
    /// normalization is applied. Zero for unreadable files.
    pub line_count: usize,
    pub content: FileContent,
}

/// Aggregate result of one directory traversal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanSummary {
    pub file_count: usize,
    pub total_lines: usize,
    /// Extension string -> number of accepted files carrying it.
    pub extension_histogram: BTreeMap<String, usize>,
    pub files: Vec<FileRecord>,
}

impl ScanSummary {
    /// Record one accepted file, keeping the aggregate counters consistent
    /// with the file list.
    pub fn push(&mut self, record: FileRecord) {
        self.file_count += 1;
        self.total_lines += record.line_count;
        *self.extension_histogram.entry(record.extension.clone()).or_insert(0) += 1;
        self.files.push(record);
    }

    /// Histogram entries sorted by count descending, ties broken by
    /// extension for stable output.
    pub fn histogram_by_count(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> =
            self.extension_histogram.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Counters describing what a scan saw and skipped.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Files visited by the walker, before any filtering.
    pub files_seen: usize,
    /// Files excluded by the hidden-entry policy.
    pub files_skipped_hidden: usize,
    /// Files excluded by an ignore-rule suffix match.
    pub files_skipped_ignored: usize,
    /// Accepted files whose content could not be decoded.
    pub files_unreadable: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_counters_consistent() {
        let mut summary = ScanSummary::default();
        summary.push(FileRecord {
            relative_path: "a.py".to_string(),
            extension: ".py".to_string(),
            line_count: 3,
            content: FileContent::Text("x\ny\nz".to_string()),
        });
        summary.push(FileRecord {
            relative_path: "b.py".to_string(),
            extension: ".py".to_string(),
            line_count: 1,
            content: FileContent::Text(String::new()),
        });

        assert_eq!(summary.file_count, summary.files.len());
        assert_eq!(
            summary.total_lines,
            summary.files.iter().map(|f| f.line_count).sum::<usize>()
        );
        assert_eq!(summary.extension_histogram.get(".py"), Some(&2));
    }

    #[test]
    fn histogram_by_count_sorts_descending() {
        let mut summary = ScanSummary::default();
        for (path, ext) in [("a.py", ".py"), ("b.py", ".py"), ("c.rs", ".rs")] {
            summary.push(FileRecord {
                relative_path: path.to_string(),
                extension: ext.to_string(),
                line_count: 1,
                content: FileContent::Text(String::new()),
            });
        }

        let entries = summary.histogram_by_count();
        assert_eq!(entries, vec![(".py", 2), (".rs", 1)]);
    }

    #[test]
    fn unreadable_content_exposes_marker() {
        assert_eq!(FileContent::Unreadable.as_text(), UNREADABLE_MARKER);
        assert!(!FileContent::Unreadable.is_readable());
    }
}
