//! Generation backend adapter.
//!
//! The pipeline treats text generation as an opaque capability: an
//! [`InstructionPayload`] goes in, raw text comes out, with no determinism
//! guarantee. [`LlmAdapter`] implements that capability over the OpenAI and
//! Anthropic chat-completion APIs, selected via environment variables or
//! workspace settings.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use terramod_prompt::InstructionPayload;

use crate::error::{LlmError, LlmResult};

/// The opaque text-generation capability.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate raw artifact text for one instruction payload.
    async fn generate(&self, payload: &InstructionPayload) -> LlmResult<String>;
}

/// LLM provider type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAI,
    Anthropic,
}

/// Backend adapter that handles API calls.
pub struct LlmAdapter {
    provider: LlmProvider,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl LlmAdapter {
    /// Create a new adapter with explicit configuration.
    pub fn new(provider: LlmProvider, api_key: String, model: Option<String>) -> Self {
        let default_model = match provider {
            LlmProvider::OpenAI => "gpt-5".to_string(),
            LlmProvider::Anthropic => "claude-sonnet-4.5".to_string(),
        };

        Self {
            provider,
            api_key,
            model: model.unwrap_or(default_model),
            client: reqwest::Client::new(),
        }
    }

    /// Create an adapter from environment variables.
    ///
    /// Checks in order:
    /// 1. OPENAI_API_KEY
    /// 2. ANTHROPIC_API_KEY
    pub fn from_env() -> LlmResult<Self> {
        // Check for custom model override
        let custom_model = std::env::var("TERRAMOD_LLM_MODEL").ok();

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            if !api_key.is_empty() {
                return Ok(Self::new(LlmProvider::OpenAI, api_key, custom_model));
            }
        }

        if let Ok(api_key) = std::env::var("ANTHROPIC_API_KEY") {
            if !api_key.is_empty() {
                return Ok(Self::new(LlmProvider::Anthropic, api_key, custom_model));
            }
        }

        Err(LlmError::NotConfigured)
    }

    /// Create an adapter from workspace settings.
    ///
    /// Reads `.terramod/settings.json` for `defaultProvider` and
    /// `defaultModel`; the API key always comes from the environment.
    pub fn from_settings(workspace_root: &Path) -> LlmResult<Self> {
        let settings_path = workspace_root.join(".terramod").join("settings.json");

        let (provider_str, model) = if settings_path.exists() {
            if let Ok(content) = std::fs::read_to_string(&settings_path) {
                if let Ok(settings) = serde_json::from_str::<serde_json::Value>(&content) {
                    let provider = settings
                        .get("defaultProvider")
                        .and_then(|v| v.as_str())
                        .unwrap_or("openai")
                        .to_string();
                    let model = settings
                        .get("defaultModel")
                        .and_then(|v| v.as_str())
                        .map(|s| s.to_string());
                    (provider, model)
                } else {
                    ("openai".to_string(), None)
                }
            } else {
                ("openai".to_string(), None)
            }
        } else {
            ("openai".to_string(), None)
        };

        let (provider, api_key) = if provider_str == "anthropic" {
            let key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| LlmError::NotConfigured)?;
            if key.is_empty() {
                return Err(LlmError::NotConfigured);
            }
            (LlmProvider::Anthropic, key)
        } else {
            let key = std::env::var("OPENAI_API_KEY").map_err(|_| LlmError::NotConfigured)?;
            if key.is_empty() {
                return Err(LlmError::NotConfigured);
            }
            (LlmProvider::OpenAI, key)
        };

        Ok(Self::new(provider, api_key, model))
    }

    /// Get the current provider.
    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    /// Get the current model.
    pub fn model(&self) -> &str {
        &self.model
    }

    // The payload's role line becomes the system message; the task text
    // plus the output contract become the single user message. No
    // conversation state is shared between payloads.
    fn user_message(payload: &InstructionPayload) -> String {
        format!(
            "{}\n\nExpected output: {}",
            payload.task, payload.expected_output
        )
    }

    // OpenAI chat completion
    async fn complete_openai(&self, payload: &InstructionPayload) -> LlmResult<String> {
        let url = "https://api.openai.com/v1/chat/completions";

        let request = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAIMessage {
                    role: "system".to_string(),
                    content: payload.role.clone(),
                },
                OpenAIMessage {
                    role: "user".to_string(),
                    content: Self::user_message(payload),
                },
            ],
            max_completion_tokens: Some(8192),
        };

        // Retry logic for transient errors (5xx, rate limits, network issues)
        const MAX_RETRIES: u32 = 3;
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_secs(1 << attempt);
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = Some(LlmError::Backend(format!("Network error: {}", e)));
                    continue;
                }
            };

            let status = response.status();

            if status.is_server_error() || status.as_u16() == 429 {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(LlmError::Backend(format!(
                    "OpenAI API error {} (attempt {}/{}): {}",
                    status,
                    attempt + 1,
                    MAX_RETRIES,
                    body
                )));
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Backend(format!(
                    "OpenAI API error {}: {}",
                    status, body
                )));
            }

            let result: OpenAIResponse = response
                .json()
                .await
                .map_err(|e| LlmError::Parse(format!("Failed to parse response: {}", e)))?;

            let content = result
                .choices
                .first()
                .map(|c| c.message.content.clone())
                .ok_or_else(|| LlmError::Parse("No response from OpenAI".to_string()))?;

            return Ok(content);
        }

        Err(last_error.unwrap_or_else(|| LlmError::Backend("Max retries exceeded".to_string())))
    }

    // Anthropic chat completion
    async fn complete_anthropic(&self, payload: &InstructionPayload) -> LlmResult<String> {
        let url = "https://api.anthropic.com/v1/messages";

        let request = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: 8192,
            system: Some(payload.role.clone()),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: Self::user_message(payload),
            }],
        };

        // Retry logic for transient errors (5xx, rate limits, network issues)
        const MAX_RETRIES: u32 = 3;
        let mut last_error = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_secs(1 << attempt);
                tokio::time::sleep(delay).await;
            }

            let response = match self
                .client
                .post(url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", "2023-06-01")
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = Some(LlmError::Backend(format!("Network error: {}", e)));
                    continue;
                }
            };

            let status = response.status();

            if status.is_server_error() || status.as_u16() == 429 {
                let body = response.text().await.unwrap_or_default();
                last_error = Some(LlmError::Backend(format!(
                    "Anthropic API error {} (attempt {}/{}): {}",
                    status,
                    attempt + 1,
                    MAX_RETRIES,
                    body
                )));
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Backend(format!(
                    "Anthropic API error {}: {}",
                    status, body
                )));
            }

            let result: AnthropicResponse = response
                .json()
                .await
                .map_err(|e| LlmError::Parse(format!("Failed to parse response: {}", e)))?;

            let content = result
                .content
                .first()
                .map(|c| c.text.clone())
                .ok_or_else(|| LlmError::Parse("No response from Anthropic".to_string()))?;

            return Ok(content);
        }

        Err(last_error.unwrap_or_else(|| LlmError::Backend("Max retries exceeded".to_string())))
    }
}

#[async_trait]
impl TextGenerator for LlmAdapter {
    async fn generate(&self, payload: &InstructionPayload) -> LlmResult<String> {
        debug!("Dispatching {} payload to {:?}", payload.kind, self.provider);
        match self.provider {
            LlmProvider::OpenAI => self.complete_openai(payload).await,
            LlmProvider::Anthropic => self.complete_anthropic(payload).await,
        }
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_completion_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: String,
}

// Anthropic API types
#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Debug, Deserialize)]
struct AnthropicContent {
    text: String,
}
