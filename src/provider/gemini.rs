//! Google generate-content backend.

use crate::provider::{GenerationConfig, Provider, ProviderError, REQUEST_TIMEOUT};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-pro";

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const BLOCK_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// The four content-safety categories the original tool configures.
const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    safety_settings: Vec<SafetySetting>,
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

pub struct GeminiProvider {
    api_key: String,
    model: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { api_key, model, client }
    }

    fn build_request<'a>(
        &self,
        prompt: &'a str,
        system_prompt: Option<&'a str>,
        config: &GenerationConfig,
    ) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content { parts: vec![Part { text: prompt }] }],
            system_instruction: system_prompt
                .map(|text| Content { parts: vec![Part { text }] }),
            safety_settings: HARM_CATEGORIES
                .into_iter()
                .map(|category| SafetySetting { category, threshold: BLOCK_THRESHOLD })
                .collect(),
            generation_config: WireGenerationConfig {
                temperature: config.temperature,
                top_p: config.top_p,
                top_k: config.top_k,
                max_output_tokens: config.max_output_tokens,
            },
        }
    }
}

impl Provider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn submit(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/{}:generateContent?key={}", API_BASE_URL, self.model, self.api_key);
        let body = self.build_request(prompt, system_prompt, config);

        let response = self.client.post(&url).json(&body).send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "unknown error".to_string());
            return Err(ProviderError::Status { status: status.as_u16(), message });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|err| ProviderError::MalformedResponse(err.to_string()))?;

        if let Some(feedback) = &parsed.prompt_feedback {
            if let Some(reason) = &feedback.block_reason {
                return Err(ProviderError::SafetyBlocked(reason.clone()));
            }
        }

        parsed
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("response carried no candidates".to_string())
            })
    }
}
