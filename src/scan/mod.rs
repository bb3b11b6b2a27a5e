//! Source-tree scanning: ignore rules, traversal, tree rendering.

use crate::domain::{ScanStats, ScanSummary};
use anyhow::Result;
use std::path::Path;

pub mod filter;
pub mod scanner;
pub mod tree;

pub use filter::IgnoreRules;
pub use scanner::TreeScanner;

/// Run one scan of `root` with default settings.
pub fn scan_tree<P: AsRef<Path>>(root: P) -> Result<(ScanSummary, ScanStats)> {
    let mut scanner = TreeScanner::new(root.as_ref().to_path_buf());
    let summary = scanner.scan()?;
    let stats = scanner.stats().clone();
    Ok((summary, stats))
}
