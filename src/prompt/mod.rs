//! Prompt assembly: rendering bounded natural-language requests from a scan
//! summary and user-supplied context.
//!
//! Template wording is a content contract with the model, not a code
//! contract, so both templates are configurable strings with named
//! placeholders rather than baked-in text.

use crate::domain::ScanSummary;
use serde::{Deserialize, Serialize};

pub mod system;

/// Appended to a sampled file body when it was cut at the character cap.
pub const TRUNCATION_MARKER: &str = "\n... [truncated]";

/// Caps on how much file content an overview prompt may embed. They exist
/// to respect the downstream token budget and are configurable, never
/// hard-coded at call sites.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleLimits {
    /// Maximum number of file bodies embedded in an overview prompt.
    pub max_sample_files: usize,
    /// Maximum characters per embedded body before the truncation marker.
    pub max_sample_chars: usize,
}

impl Default for SampleLimits {
    fn default() -> Self {
        Self { max_sample_files: 5, max_sample_chars: 1000 }
    }
}

/// Overview and per-file analysis templates. Placeholders are substituted
/// by name; unknown placeholders pass through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptTemplates {
    /// Placeholders: {description} {technologies} {file_count} {total_lines}
    /// {file_types} {file_structure} {file_sample}
    pub overview: String,
    /// Placeholders: {path} {description} {technologies} {content}
    pub file_analysis: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            overview: DEFAULT_OVERVIEW_TEMPLATE.to_string(),
            file_analysis: DEFAULT_FILE_TEMPLATE.to_string(),
        }
    }
}

const DEFAULT_OVERVIEW_TEMPLATE: &str = "\
Analyze the following codebase:

Description: {description}
Technologies: {technologies}

File Count: {file_count}
Total Lines of Code: {total_lines}

File Types Distribution:
{file_types}

File Structure:
{file_structure}

Please provide a comprehensive analysis of the codebase, including:
1. Overall structure and organization
2. Potential improvements or best practices that could be applied
3. Any security concerns or performance issues
4. Suggestions for better code maintainability and scalability

Here's a sample of the code files:
{file_sample}
";

const DEFAULT_FILE_TEMPLATE: &str = "\
Analyze the following file from a codebase:

File: {path}
Description of codebase: {description}
Technologies used: {technologies}

File content:
{content}

Please provide a detailed analysis of this file, including:
1. The purpose and functionality of the code in this file
2. How it fits into the overall structure of the codebase
3. Any notable coding patterns or practices used
4. Potential areas for improvement or optimization
5. Any security concerns or best practices that should be implemented
6. Suggestions for better documentation or testing, if applicable

Your analysis should be thorough and provide valuable insights for the development team.
";

/// Renders prompts for one review session.
#[derive(Debug, Clone, Default)]
pub struct PromptAssembler {
    templates: PromptTemplates,
    limits: SampleLimits,
}

impl PromptAssembler {
    pub fn new(templates: PromptTemplates, limits: SampleLimits) -> Self {
        Self { templates, limits }
    }

    /// Overview prompt: description, counts, histogram, tree, and a capped
    /// sample of file contents. An empty scan produces a well-formed prompt
    /// with an empty sample section.
    pub fn build_overview_prompt(
        &self,
        description: &str,
        technologies: &str,
        summary: &ScanSummary,
        file_structure: &str,
    ) -> String {
        let histogram = serde_json::to_string_pretty(&summary.extension_histogram)
            .unwrap_or_else(|_| "{}".to_string());

        render(
            &self.templates.overview,
            &[
                ("description", description),
                ("technologies", technologies),
                ("file_count", &summary.file_count.to_string()),
                ("total_lines", &summary.total_lines.to_string()),
                ("file_types", &histogram),
                ("file_structure", file_structure),
                ("file_sample", &self.render_sample(summary)),
            ],
        )
    }

    /// Deep-analysis prompt for a single file's full, untruncated content.
    pub fn build_file_prompt(
        &self,
        path: &str,
        content: &str,
        description: &str,
        technologies: &str,
    ) -> String {
        render(
            &self.templates.file_analysis,
            &[
                ("path", path),
                ("description", description),
                ("technologies", technologies),
                ("content", content),
            ],
        )
    }

    fn render_sample(&self, summary: &ScanSummary) -> String {
        let mut sample = String::new();
        for record in summary.files.iter().take(self.limits.max_sample_files) {
            let text = record.content.as_text();
            let truncated = text.chars().count() > self.limits.max_sample_chars;
            let body: String = text.chars().take(self.limits.max_sample_chars).collect();
            let marker = if truncated { TRUNCATION_MARKER } else { "" };
            sample.push_str(&format!(
                "\n\nFile: {}\n```\n{}{}\n```",
                record.relative_path, body, marker
            ));
        }
        sample
    }
}

fn render(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in substitutions {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FileContent, FileRecord, ScanSummary};

    fn summary_with_files(count: usize, content_len: usize) -> ScanSummary {
        let mut summary = ScanSummary::default();
        for idx in 0..count {
            summary.push(FileRecord {
                relative_path: format!("file{idx}.py"),
                extension: ".py".to_string(),
                line_count: 1,
                content: FileContent::Text("x".repeat(content_len)),
            });
        }
        summary
    }

    #[test]
    fn sample_respects_file_cap() {
        let assembler = PromptAssembler::new(
            PromptTemplates::default(),
            SampleLimits { max_sample_files: 2, max_sample_chars: 100 },
        );
        let summary = summary_with_files(5, 10);

        let prompt = assembler.build_overview_prompt("desc", "tech", &summary, "");
        assert!(prompt.contains("File: file0.py"));
        assert!(prompt.contains("File: file1.py"));
        assert!(!prompt.contains("File: file2.py"));
    }

    #[test]
    fn sample_truncates_long_bodies_with_marker() {
        let assembler = PromptAssembler::new(
            PromptTemplates::default(),
            SampleLimits { max_sample_files: 5, max_sample_chars: 20 },
        );
        let summary = summary_with_files(1, 50);

        let prompt = assembler.build_overview_prompt("desc", "tech", &summary, "");
        assert!(prompt.contains(TRUNCATION_MARKER));
        // The embedded body itself is exactly the cap.
        assert!(prompt.contains(&"x".repeat(20)));
        assert!(!prompt.contains(&"x".repeat(21)));
    }

    #[test]
    fn short_bodies_carry_no_marker() {
        let assembler = PromptAssembler::default();
        let summary = summary_with_files(1, 10);

        let prompt = assembler.build_overview_prompt("desc", "tech", &summary, "");
        assert!(!prompt.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn empty_scan_produces_well_formed_prompt() {
        let assembler = PromptAssembler::default();
        let summary = ScanSummary::default();

        let prompt = assembler.build_overview_prompt("empty repo", "none", &summary, "root/");
        assert!(prompt.contains("File Count: 0"));
        assert!(prompt.contains("Total Lines of Code: 0"));
        assert!(prompt.contains("{}"));
        assert!(prompt.contains("Here's a sample of the code files:"));
    }

    #[test]
    fn overview_embeds_histogram_and_context() {
        let assembler = PromptAssembler::default();
        let summary = summary_with_files(1, 5);

        let prompt =
            assembler.build_overview_prompt("a web app", "rust, axum", &summary, "root/");
        assert!(prompt.contains("Description: a web app"));
        assert!(prompt.contains("Technologies: rust, axum"));
        assert!(prompt.contains("\".py\": 1"));
    }

    #[test]
    fn file_prompt_embeds_full_content() {
        let assembler = PromptAssembler::default();
        let content = "line\n".repeat(2000);

        let prompt = assembler.build_file_prompt("src/big.rs", &content, "d", "t");
        // File prompts are never truncated.
        assert!(prompt.contains(&content));
        assert!(prompt.contains("File: src/big.rs"));
        assert!(prompt.contains("6. Suggestions for better documentation or testing"));
    }

    #[test]
    fn custom_template_is_substituted() {
        let templates = PromptTemplates {
            overview: "files={file_count} about: {description}".to_string(),
            file_analysis: "look at {path}".to_string(),
        };
        let assembler = PromptAssembler::new(templates, SampleLimits::default());

        let prompt =
            assembler.build_overview_prompt("demo", "", &ScanSummary::default(), "");
        assert_eq!(prompt, "files=0 about: demo");
        assert_eq!(assembler.build_file_prompt("x.rs", "", "", ""), "look at x.rs");
    }
}
