//! Directory tree rendering for overview prompts and the `info` command.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Render the directory structure under `root` as an indented tree,
/// applying the same hidden-entry policy as the scanner. Depth is capped so
/// deep trees do not swamp the prompt.
pub fn render_tree(root: &Path, max_depth: usize) -> Result<String> {
    let mut lines =
        vec![format!("{}/", root.file_name().and_then(|n| n.to_str()).unwrap_or("."))];
    walk(root, "", 1, max_depth, &mut lines)?;
    Ok(lines.join("\n"))
}

fn walk(
    current: &Path,
    prefix: &str,
    depth: usize,
    max_depth: usize,
    lines: &mut Vec<String>,
) -> Result<()> {
    if depth > max_depth {
        return Ok(());
    }

    let mut entries: Vec<(bool, String, PathBuf)> = fs::read_dir(current)?
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let file_type = entry.file_type().ok()?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                return None;
            }
            Some((file_type.is_dir(), name, entry.path()))
        })
        .collect();

    // Directories first, then alphabetical.
    entries.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    let total = entries.len();
    for (idx, (is_dir, name, path)) in entries.into_iter().enumerate() {
        let is_last = idx == total - 1;
        let connector = if is_last { "└── " } else { "├── " };

        if is_dir {
            lines.push(format!("{}{}{}/", prefix, connector, name));
            let extension = if is_last { "    " } else { "│   " };
            walk(&path, &format!("{}{}", prefix, extension), depth + 1, max_depth, lines)?;
        } else {
            lines.push(format!("{}{}{}", prefix, connector, name));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn renders_dirs_and_files() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join("src")).expect("mkdir");
        fs::write(tmp.path().join("src/main.rs"), "fn main() {}\n").expect("write");
        fs::write(tmp.path().join("README.md"), "# Demo\n").expect("write");

        let tree = render_tree(tmp.path(), 4).expect("tree");
        assert!(tree.contains("src/"));
        assert!(tree.contains("main.rs"));
        assert!(tree.contains("README.md"));
    }

    #[test]
    fn skips_hidden_entries() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join(".git")).expect("mkdir");
        fs::write(tmp.path().join(".git/config"), "x").expect("write");
        fs::write(tmp.path().join("visible.rs"), "x").expect("write");

        let tree = render_tree(tmp.path(), 4).expect("tree");
        assert!(!tree.contains(".git"));
        assert!(tree.contains("visible.rs"));
    }

    #[test]
    fn respects_max_depth() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir_all(tmp.path().join("a/b/c")).expect("mkdir");
        fs::write(tmp.path().join("a/b/c/deep.rs"), "x").expect("write");

        let tree = render_tree(tmp.path(), 2).expect("tree");
        assert!(tree.contains("b/"));
        assert!(!tree.contains("deep.rs"));
    }
}
