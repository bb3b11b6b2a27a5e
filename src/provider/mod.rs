//! LLM provider backends.
//!
//! Two interchangeable backends exist (Anthropic messages endpoint, Google
//! generate-content endpoint) behind a single capability trait. The backend
//! is selected once at session start; call sites never re-branch on it.
//! Each submission is exactly one blocking round trip: no streaming, no
//! retry, no backoff.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

pub mod claude;
pub mod gemini;

pub use claude::ClaudeProvider;
pub use gemini::GeminiProvider;

/// Hard cap on how long one round trip may take. The original design had
/// no timeout at all; this is a hardening addition, not a contract.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Failure of a single provider round trip. Callers recover by
/// substituting fixed text; the session never aborts on these.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("missing credential: set the {0} environment variable")]
    MissingCredential(&'static str),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("prompt blocked by safety filter: {0}")]
    SafetyBlocked(String),
}

/// Generation parameters forwarded with every submission. Defaults match
/// the original tool's Gemini configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Sampling randomness.
    pub temperature: f32,
    /// Nucleus-sampling cutoff.
    pub top_p: f32,
    /// Candidate-pool size.
    pub top_k: u32,
    /// Hard cap on response length.
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self { temperature: 0.2, top_p: 1.0, top_k: 32, max_output_tokens: 2048 }
    }
}

/// A single-turn completion capability.
pub trait Provider {
    fn name(&self) -> &'static str;

    /// Submit one prompt and return the completion text. Exactly one
    /// network round trip.
    fn submit(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError>;
}

/// User-facing provider choice, made once at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Claude,
    Gemini,
}

impl ProviderKind {
    pub fn label(&self) -> &'static str {
        match self {
            ProviderKind::Claude => "claude",
            ProviderKind::Gemini => "gemini",
        }
    }

    /// Build the concrete backend, reading its credential from the
    /// environment. A missing credential is fatal at startup.
    pub fn build(self, model: &str) -> Result<Box<dyn Provider>, ProviderError> {
        match self {
            ProviderKind::Claude => {
                let key = std::env::var(claude::API_KEY_VAR)
                    .map_err(|_| ProviderError::MissingCredential(claude::API_KEY_VAR))?;
                Ok(Box::new(ClaudeProvider::new(key, model.to_string())))
            }
            ProviderKind::Gemini => {
                let key = std::env::var(gemini::API_KEY_VAR)
                    .map_err(|_| ProviderError::MissingCredential(gemini::API_KEY_VAR))?;
                Ok(Box::new(GeminiProvider::new(key, model.to_string())))
            }
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "claude" | "anthropic" => Ok(ProviderKind::Claude),
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            other => Err(format!("unknown provider '{other}' (expected 'claude' or 'gemini')")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_kind_parses_both_backends() {
        assert_eq!("claude".parse::<ProviderKind>().unwrap(), ProviderKind::Claude);
        assert_eq!("GEMINI".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert_eq!("google".parse::<ProviderKind>().unwrap(), ProviderKind::Gemini);
        assert!("openai".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn default_provider_is_claude() {
        assert_eq!(ProviderKind::default(), ProviderKind::Claude);
    }

    #[test]
    fn default_generation_config_matches_documented_values() {
        let config = GenerationConfig::default();
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.top_k, 32);
        assert_eq!(config.max_output_tokens, 2048);
    }
}
