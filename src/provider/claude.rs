//! Anthropic messages-endpoint backend.

use crate::provider::{GenerationConfig, Provider, ProviderError, REQUEST_TIMEOUT};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

pub struct ClaudeProvider {
    api_key: String,
    model: String,
    client: Client,
}

impl ClaudeProvider {
    pub fn new(api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { api_key, model, client }
    }

    fn build_request<'a>(
        &'a self,
        prompt: &'a str,
        system_prompt: Option<&'a str>,
        config: &GenerationConfig,
    ) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: config.max_output_tokens,
            system: system_prompt,
            temperature: Some(config.temperature),
            top_p: Some(config.top_p),
            top_k: Some(config.top_k),
            messages: vec![Message { role: "user", content: prompt }],
        }
    }
}

impl Provider for ClaudeProvider {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn submit(
        &self,
        prompt: &str,
        system_prompt: Option<&str>,
        config: &GenerationConfig,
    ) -> Result<String, ProviderError> {
        let body = self.build_request(prompt, system_prompt, config);

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "unknown error".to_string());
            return Err(ProviderError::Status { status: status.as_u16(), message });
        }

        let parsed: MessagesResponse = response
            .json()
            .map_err(|err| ProviderError::MalformedResponse(err.to_string()))?;

        parsed
            .content
            .first()
            .map(|block| block.text.clone())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("response carried no content blocks".to_string())
            })
    }
}
