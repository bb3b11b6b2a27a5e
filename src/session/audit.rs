//! Prompt audit log.
//!
//! When enabled, every prompt submitted during a session is appended to a
//! per-session text file under `logs/`, named by the Unix-epoch timestamp
//! at session start. The log records the exact text sent to the provider.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct PromptLog {
    path: PathBuf,
}

impl PromptLog {
    /// Create the log file for this session under `base_dir/logs/`.
    pub fn create(base_dir: &Path) -> Result<Self> {
        let logs_dir = base_dir.join("logs");
        std::fs::create_dir_all(&logs_dir)
            .with_context(|| format!("failed to create log directory {}", logs_dir.display()))?;

        let path = logs_dir.join(format!("{}.txt", Utc::now().timestamp()));
        std::fs::write(&path, "")
            .with_context(|| format!("failed to create prompt log {}", path.display()))?;
        Ok(Self { path })
    }

    /// Append one submitted prompt verbatim.
    pub fn record(&self, prompt: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open prompt log {}", self.path.display()))?;
        writeln!(file, "{prompt}\n")
            .with_context(|| format!("failed to write prompt log {}", self.path.display()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
