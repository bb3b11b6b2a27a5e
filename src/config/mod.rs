//! Settings loading.
//!
//! Settings come from an optional TOML file merged over defaults, with CLI
//! flags applied on top by the command layer. An explicitly provided config
//! path is a hard error when unparsable; an auto-discovered file soft-fails
//! to defaults with a warning. Credentials are read from the environment at
//! provider construction, never stored here.

use crate::prompt::{PromptTemplates, SampleLimits};
use crate::provider::{claude, gemini, GenerationConfig, ProviderKind};
use crate::scan::filter::DEFAULT_IGNORE_FILE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// All tunable session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub provider: ProviderKind,
    pub claude_model: String,
    pub gemini_model: String,
    pub ignore_file: String,
    pub sample: SampleLimits,
    pub generation: GenerationConfig,
    pub templates: PromptTemplates,
    pub system_prompt_url: Option<String>,
    pub log_prompts: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            claude_model: claude::DEFAULT_MODEL.to_string(),
            gemini_model: gemini::DEFAULT_MODEL.to_string(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            sample: SampleLimits::default(),
            generation: GenerationConfig::default(),
            templates: PromptTemplates::default(),
            system_prompt_url: None,
            log_prompts: false,
        }
    }
}

impl Settings {
    /// Model identifier for the configured provider.
    pub fn model(&self) -> &str {
        match self.provider {
            ProviderKind::Claude => &self.claude_model,
            ProviderKind::Gemini => &self.gemini_model,
        }
    }
}

/// Load settings from `config_path` if given, otherwise auto-discover in
/// `search_dir`.
pub fn load_settings(search_dir: &Path, config_path: Option<&Path>) -> Result<Settings> {
    let explicit = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(search_dir),
    };

    let Some(config_file) = discovered else {
        return Ok(Settings::default());
    };

    let content = std::fs::read_to_string(&config_file)
        .with_context(|| format!("failed reading config file: {}", config_file.display()))?;

    match toml::from_str::<Settings>(&content)
        .with_context(|| format!("invalid config: {}", config_file.display()))
    {
        Ok(settings) => Ok(settings),
        Err(err) => {
            if explicit {
                return Err(err);
            }
            // Auto-discovered: warn and fall back to defaults.
            tracing::warn!(
                "failed to parse auto-discovered config {}: {}",
                config_file.display(),
                err
            );
            Ok(Settings::default())
        }
    }
}

fn discover_config(search_dir: &Path) -> Option<PathBuf> {
    let candidates = ["repo-review.toml", ".repo-review.toml"];
    candidates.iter().map(|name| search_dir.join(name)).find(|path| path.exists())
}
