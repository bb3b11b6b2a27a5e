//! Review session orchestration.
//!
//! `ReviewSession` is the pure core of a session: it owns the provider, the
//! prompt assembler, and the generation parameters, and exposes one method
//! per analysis cycle. It performs no terminal I/O; the CLI shell above it
//! handles prompts, spinners, and styling.

use crate::domain::ScanSummary;
use crate::prompt::PromptAssembler;
use crate::provider::{GenerationConfig, Provider};
use crate::utils::read_file_text;
use anyhow::{bail, Result};
use std::path::Path;
use tracing::warn;

pub mod audit;

pub use audit::PromptLog;

/// Fixed substitute for a failed provider call. The session continues; the
/// failure is logged, never fatal.
pub const ANALYSIS_UNAVAILABLE: &str =
    "Analysis unavailable: the provider could not complete this request.";

/// User-supplied context carried through every prompt of a session.
#[derive(Debug, Clone, Default)]
pub struct ReviewContext {
    pub description: String,
    pub technologies: String,
}

pub struct ReviewSession {
    provider: Box<dyn Provider>,
    assembler: PromptAssembler,
    generation: GenerationConfig,
    context: ReviewContext,
    system_prompt: Option<String>,
    prompt_log: Option<PromptLog>,
}

impl ReviewSession {
    pub fn new(
        provider: Box<dyn Provider>,
        assembler: PromptAssembler,
        generation: GenerationConfig,
        context: ReviewContext,
    ) -> Self {
        Self { provider, assembler, generation, context, system_prompt: None, prompt_log: None }
    }

    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.system_prompt = system_prompt;
        self
    }

    pub fn with_prompt_log(mut self, prompt_log: Option<PromptLog>) -> Self {
        self.prompt_log = prompt_log;
        self
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn context(&self) -> &ReviewContext {
        &self.context
    }

    /// Overview analysis: one assemble-and-submit cycle over the scan
    /// summary. Provider failure yields the substitute string.
    pub fn overview(&self, summary: &ScanSummary, file_structure: &str) -> String {
        let prompt = self.assembler.build_overview_prompt(
            &self.context.description,
            &self.context.technologies,
            summary,
            file_structure,
        );
        self.submit(&prompt)
    }

    /// Deep analysis of a single file under `root`. The file's full content
    /// is embedded untruncated. A nonexistent or unreadable file is an
    /// error for this call only.
    pub fn file_analysis(&self, root: &Path, relative_path: &str) -> Result<String> {
        let full_path = root.join(relative_path);
        if !full_path.is_file() {
            bail!("file does not exist: {}", full_path.display());
        }
        let Some(content) = read_file_text(&full_path) else {
            bail!("file could not be decoded: {}", full_path.display());
        };

        let prompt = self.assembler.build_file_prompt(
            relative_path,
            &content,
            &self.context.description,
            &self.context.technologies,
        );
        Ok(self.submit(&prompt))
    }

    fn submit(&self, prompt: &str) -> String {
        if let Some(log) = &self.prompt_log {
            if let Err(err) = log.record(prompt) {
                warn!("prompt log write failed: {err}");
            }
        }

        match self.provider.submit(prompt, self.system_prompt.as_deref(), &self.generation) {
            Ok(text) => text,
            Err(err) => {
                warn!("{} call failed: {err}", self.provider.name());
                ANALYSIS_UNAVAILABLE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use std::fs;
    use tempfile::TempDir;

    struct FixedProvider(Result<String, u16>);

    impl Provider for FixedProvider {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn submit(
            &self,
            _prompt: &str,
            _system_prompt: Option<&str>,
            _config: &GenerationConfig,
        ) -> Result<String, ProviderError> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(ProviderError::Status {
                    status: *status,
                    message: "server error".to_string(),
                }),
            }
        }
    }

    fn session(provider: FixedProvider) -> ReviewSession {
        ReviewSession::new(
            Box::new(provider),
            PromptAssembler::default(),
            GenerationConfig::default(),
            ReviewContext {
                description: "demo".to_string(),
                technologies: "rust".to_string(),
            },
        )
    }

    #[test]
    fn overview_returns_provider_text() {
        let session = session(FixedProvider(Ok("looks good".to_string())));
        let result = session.overview(&ScanSummary::default(), "");
        assert_eq!(result, "looks good");
    }

    #[test]
    fn provider_failure_substitutes_fixed_text() {
        // HTTP 500 from the backend: the call yields the substitute string
        // and the session object remains usable.
        let session = session(FixedProvider(Err(500)));
        let result = session.overview(&ScanSummary::default(), "");
        assert_eq!(result, ANALYSIS_UNAVAILABLE);

        let again = session.overview(&ScanSummary::default(), "");
        assert_eq!(again, ANALYSIS_UNAVAILABLE);
    }

    #[test]
    fn file_analysis_rejects_missing_file() {
        let tmp = TempDir::new().expect("tmp");
        let session = session(FixedProvider(Ok("ok".to_string())));

        let result = session.file_analysis(tmp.path(), "missing.rs");
        assert!(result.is_err());
    }

    #[test]
    fn file_analysis_submits_existing_file() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("lib.rs"), "pub fn x() {}\n").expect("write");

        let session = session(FixedProvider(Ok("analyzed".to_string())));
        let result = session.file_analysis(tmp.path(), "lib.rs").expect("analysis");
        assert_eq!(result, "analyzed");
    }

    #[test]
    fn prompts_are_audited_when_log_enabled() {
        let tmp = TempDir::new().expect("tmp");
        let log = PromptLog::create(tmp.path()).expect("log");
        let log_path = log.path().to_path_buf();

        let session =
            session(FixedProvider(Ok("ok".to_string()))).with_prompt_log(Some(log));
        session.overview(&ScanSummary::default(), "root/");

        let recorded = fs::read_to_string(log_path).expect("read");
        assert!(recorded.contains("Description: demo"));
    }
}
