//! OpenAI-compatible fallback client.
//!
//! Used only by the smart-extract path when the primary extractor fails or
//! returns censored output; the three strict pipelines never fall back. The
//! request shape mirrors the primary extractor's so the two are
//! interchangeable behind [`FieldExtractor`].

use serde::{Deserialize, Serialize};
use tracing::debug;
use trialdoc_core::{FieldExtractor, ProviderConfig, Result, TrialdocError};

use crate::client::{EXTRACTION_TEMPERATURE, MAX_OUTPUT_TOKENS};
use crate::prompt;

/// Default fallback-provider endpoint.
pub const DEFAULT_FALLBACK_BASE_URL: &str = "https://api.openai.com";
/// Default fallback chat model.
pub const DEFAULT_FALLBACK_MODEL: &str = "gpt-4o";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP client for the fallback chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct FallbackClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl FallbackClient {
    /// Create a fallback client with the given credential and the default
    /// endpoint and model.
    #[must_use = "the client is created but not used"]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(
            ProviderConfig::new(api_key)
                .with_base_url(DEFAULT_FALLBACK_BASE_URL)
                .with_model(DEFAULT_FALLBACK_MODEL),
        )
    }

    /// Create a fallback client with a fully specified configuration.
    #[must_use = "the client is created but not used"]
    pub fn with_config(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Request structured fields from the fallback provider.
    ///
    /// # Errors
    ///
    /// - [`TrialdocError::Config`] when no API key is configured; returned
    ///   before any network call.
    /// - [`TrialdocError::Service`] when the endpoint fails or is unreachable.
    pub async fn extract_fields(
        &self,
        text: &str,
        schema: &serde_json::Value,
        system_prompt: &str,
    ) -> Result<String> {
        if !self.config.has_credential() {
            return Err(TrialdocError::Config(
                "fallback service API key is not configured".to_string(),
            ));
        }

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt::build_user_prompt(schema, text),
                },
            ],
            temperature: EXTRACTION_TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        };

        debug!(model = %request.model, "sending fallback extraction request");

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TrialdocError::Service(format!("fallback chat request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrialdocError::Service(format!(
                "fallback chat request failed ({status}): {body}"
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| TrialdocError::Service(format!("invalid fallback response: {e}")))?;
        Ok(chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl FieldExtractor for FallbackClient {
    async fn extract_fields(
        &self,
        text: &str,
        schema: &serde_json::Value,
        system_prompt: &str,
    ) -> Result<String> {
        Self::extract_fields(self, text, schema, system_prompt).await
    }
}
