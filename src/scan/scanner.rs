//! Depth-first tree scanner producing a `ScanSummary`.

use crate::domain::{FileContent, FileRecord, ScanStats, ScanSummary};
use crate::scan::filter::{IgnoreRules, DEFAULT_IGNORE_FILE};
use crate::utils::{normalize_path, read_file_text};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Walks a root directory, excluding hidden and ignore-filtered entries,
/// and records per-file metadata plus aggregate counts.
///
/// The scan never mutates the filesystem; an unreadable file degrades to a
/// recorded marker and a warning, never an abort. Files are enumerated in
/// traversal order with no cross-platform sorting guarantee.
pub struct TreeScanner {
    root: PathBuf,
    ignore_file: String,
    stats: ScanStats,
}

impl TreeScanner {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            stats: ScanStats::default(),
        }
    }

    /// Override the name of the ignore file read at the scan root.
    pub fn ignore_file(mut self, name: impl Into<String>) -> Self {
        self.ignore_file = name.into();
        self
    }

    pub fn scan(&mut self) -> Result<ScanSummary> {
        self.stats = ScanStats::default();

        // Rules live for exactly one scan.
        let rules = IgnoreRules::load(&self.root, &self.ignore_file);
        debug!("loaded {} ignore rule(s) from {}", rules.len(), self.ignore_file);

        let mut summary = ScanSummary::default();

        // Hidden directories are pruned at descent time; the root itself is
        // always entered regardless of its name. Hidden files pass through
        // here so the skip counters see them.
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !entry.file_name().to_string_lossy().starts_with('.')
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Per-file filesystem errors are terminal for that entry only.
                    warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            self.stats.files_seen += 1;

            let name = entry.file_name().to_string_lossy();
            if name.starts_with('.') {
                self.stats.files_skipped_hidden += 1;
                continue;
            }
            if rules.should_skip(&name) {
                self.stats.files_skipped_ignored += 1;
                continue;
            }

            let relative_path = entry
                .path()
                .strip_prefix(&self.root)
                .map(|p| normalize_path(&p.to_string_lossy()))
                .with_context(|| format!("entry outside scan root: {}", entry.path().display()))?;

            let extension = extension_of(&name);

            let (content, line_count) = match read_file_text(entry.path()) {
                Some(text) => {
                    // newline count + 1: an empty file counts as one line,
                    // and a trailing newline adds one. Intentional, matching
                    // the original tool; no normalization.
                    let lines = text.matches('\n').count() + 1;
                    (FileContent::Text(text), lines)
                }
                None => {
                    self.stats.files_unreadable += 1;
                    (FileContent::Unreadable, 0)
                }
            };

            summary.push(FileRecord { relative_path, extension, line_count, content });
        }

        Ok(summary)
    }

    pub fn stats(&self) -> &ScanStats {
        &self.stats
    }
}

/// Last dot-delimited suffix of a filename, including the dot. A leading
/// dot does not count (hidden files are excluded before this is reached).
fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scan(root: &std::path::Path) -> (ScanSummary, ScanStats) {
        let mut scanner = TreeScanner::new(root.to_path_buf());
        let summary = scanner.scan().expect("scan");
        let stats = scanner.stats().clone();
        (summary, stats)
    }

    #[test]
    fn counters_match_file_list() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("a.py"), "one\ntwo\nthree").expect("write");
        fs::write(tmp.path().join("b.rs"), "fn main() {}\n").expect("write");

        let (summary, _) = scan(tmp.path());
        assert_eq!(summary.file_count, summary.files.len());
        assert_eq!(
            summary.total_lines,
            summary.files.iter().map(|f| f.line_count).sum::<usize>()
        );
    }

    #[test]
    fn hidden_files_and_dirs_never_appear() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("visible.py"), "x\n").expect("write");
        fs::write(tmp.path().join(".hidden.py"), "x\n").expect("write");
        fs::create_dir(tmp.path().join(".cache")).expect("mkdir");
        fs::write(tmp.path().join(".cache/buried.py"), "x\n").expect("write");

        let (summary, stats) = scan(tmp.path());
        assert_eq!(summary.file_count, 1);
        assert!(summary.files.iter().all(|f| !f.relative_path.contains("hidden")));
        assert!(summary.files.iter().all(|f| !f.relative_path.contains(".cache")));
        // Only the root-level hidden file is counted as seen-then-skipped;
        // the hidden directory was pruned before its contents were visited.
        assert_eq!(stats.files_skipped_hidden, 1);
    }

    #[test]
    fn ignore_file_scenario() {
        // a.py (3 lines), .hidden.py, b.log, with ".log" in the ignore file:
        // only a.py survives.
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("a.py"), "l1\nl2\nl3").expect("write");
        fs::write(tmp.path().join(".hidden.py"), "l1").expect("write");
        fs::write(tmp.path().join("b.log"), "l1\nl2").expect("write");
        fs::write(tmp.path().join(".gitignore"), ".log\n").expect("write");

        let (summary, stats) = scan(tmp.path());
        assert_eq!(summary.file_count, 1);
        assert_eq!(summary.total_lines, 3);
        assert_eq!(summary.extension_histogram.len(), 1);
        assert_eq!(summary.extension_histogram.get(".py"), Some(&1));
        assert_eq!(stats.files_skipped_ignored, 1);
    }

    #[test]
    fn empty_root_yields_empty_summary() {
        let tmp = TempDir::new().expect("tmp");
        let (summary, stats) = scan(tmp.path());
        assert_eq!(summary.file_count, 0);
        assert_eq!(summary.total_lines, 0);
        assert!(summary.extension_histogram.is_empty());
        assert_eq!(stats.files_seen, 0);
    }

    #[test]
    fn content_round_trips_for_utf8_files() {
        let tmp = TempDir::new().expect("tmp");
        let original = "fn main() {\n    println!(\"ok\");\n}\n";
        fs::write(tmp.path().join("main.rs"), original).expect("write");

        let (summary, _) = scan(tmp.path());
        assert_eq!(summary.files[0].content.as_text(), original);
    }

    #[test]
    fn line_count_is_newlines_plus_one() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("empty.txt"), "").expect("write");
        fs::write(tmp.path().join("trailing.txt"), "a\nb\n").expect("write");

        let (summary, _) = scan(tmp.path());
        let by_name = |name: &str| {
            summary
                .files
                .iter()
                .find(|f| f.relative_path.ends_with(name))
                .expect("record")
        };
        // Empty file counts as one line; a trailing newline adds a line.
        assert_eq!(by_name("empty.txt").line_count, 1);
        assert_eq!(by_name("trailing.txt").line_count, 3);
    }

    #[test]
    fn extension_is_last_dot_suffix() {
        assert_eq!(extension_of("a.py"), ".py");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("Makefile"), "");
        assert_eq!(extension_of(".bashrc"), "");
    }

    #[test]
    fn nested_directories_are_walked() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir_all(tmp.path().join("src/inner")).expect("mkdir");
        fs::write(tmp.path().join("src/inner/deep.rs"), "x\n").expect("write");

        let (summary, _) = scan(tmp.path());
        assert_eq!(summary.file_count, 1);
        assert_eq!(summary.files[0].relative_path, "src/inner/deep.rs");
    }
}
