//! Ignore-rule loading and matching.
//!
//! Rules come from a `.gitignore`-style file at the scan root, one pattern
//! per line. Matching is suffix-only against the file name, NOT glob
//! semantics: a literal `*.log` pattern does not match `app.log`. This is
//! documented behavior inherited from the original tool, preserved here
//! rather than silently upgraded to real gitignore matching.

use std::path::Path;

/// Default name of the project ignore file read at the scan root.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Ordered suffix patterns loaded once per scan and discarded afterwards.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    patterns: Vec<String>,
}

impl IgnoreRules {
    /// Load rules from `root/<file_name>`. A missing file yields an empty
    /// rule set, leaving only the hidden-entry policy in effect.
    pub fn load(root: &Path, file_name: &str) -> Self {
        let Ok(content) = std::fs::read_to_string(root.join(file_name)) else {
            return Self::default();
        };
        Self::parse(&content)
    }

    /// Parse rule text: blank lines and `#` comment lines are dropped,
    /// everything else is kept verbatim in order.
    pub fn parse(content: &str) -> Self {
        let patterns = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Self { patterns }
    }

    /// Whether an entry name should be excluded from the scan: hidden
    /// entries (leading dot) always, otherwise any rule that is a suffix of
    /// the name.
    pub fn should_skip(&self, name: &str) -> bool {
        if name.starts_with('.') {
            return true;
        }
        self.patterns.iter().any(|pattern| name.ends_with(pattern.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}
