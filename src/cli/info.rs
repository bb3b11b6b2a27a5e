//! Info command implementation.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::scan::tree::render_tree;
use crate::scan::TreeScanner;
use crate::utils::format_with_commas;

#[derive(Args)]
pub struct InfoArgs {
    /// Local directory path to analyze
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Name of the ignore file read at the scan root
    #[arg(long, value_name = "NAME")]
    pub ignore_file: Option<String>,
}

pub fn run(args: InfoArgs) -> Result<()> {
    let root = args.path.canonicalize()?;
    if !root.is_dir() {
        anyhow::bail!("Path is not a directory: {}", root.display());
    }

    let mut scanner = TreeScanner::new(root.clone());
    if let Some(name) = args.ignore_file {
        scanner = scanner.ignore_file(name);
    }

    let summary = scanner.scan()?;
    let stats = scanner.stats().clone();

    let repo_name = root.file_name().and_then(|n| n.to_str()).unwrap_or("");
    println!("Repository: {}", repo_name);

    if !summary.extension_histogram.is_empty() {
        println!("File types:");
        for (ext, count) in summary.histogram_by_count() {
            let label = if ext.is_empty() { "no extension" } else { ext };
            println!("  {}: {} files", label, count);
        }
    }

    println!("Statistics:");
    println!("  Files seen: {}", stats.files_seen);
    println!("  Files included: {}", summary.file_count);
    println!("  Files skipped (hidden): {}", stats.files_skipped_hidden);
    println!("  Files skipped (ignore rules): {}", stats.files_skipped_ignored);
    println!("  Files unreadable: {}", stats.files_unreadable);
    println!("  Total lines: {}", format_with_commas(summary.total_lines as u64));

    let tree = render_tree(&root, 4)?;
    println!("\n{}", tree);

    Ok(())
}
