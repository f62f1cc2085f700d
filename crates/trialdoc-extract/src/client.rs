//! Primary chat-completion extractor.

use serde::{Deserialize, Serialize};
use tracing::debug;
use trialdoc_core::{FieldExtractor, ProviderConfig, Result, TrialdocError};

use crate::prompt;

/// Sampling temperature for extraction. Low to keep field values anchored to
/// the document text.
pub const EXTRACTION_TEMPERATURE: f64 = 0.1;

/// Output token budget. Generous enough for the largest of the three record
/// shapes; truncation past this limit surfaces as a downstream parse failure.
pub const MAX_OUTPUT_TOKENS: u32 = 8000;

/// Chat completion request.
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

/// Chat completion response.
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
    // Providers occasionally return null or structured content here; anything
    // that is not a plain string is treated as empty and fails JSON parsing
    // downstream instead of erroring at the transport layer.
    #[serde(default)]
    content: Option<serde_json::Value>,
}

impl ChatResponse {
    fn content_text(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default()
    }
}

/// HTTP client for the primary chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatExtractor {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl ChatExtractor {
    /// Create an extractor with the given provider configuration.
    #[must_use = "the extractor is created but not used"]
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Request structured fields for `text` according to `schema`.
    ///
    /// Sends one chat request with two messages and returns the raw response
    /// content for downstream repair. Absent or non-string content is
    /// returned as an empty string.
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
                "chat service API key is not configured".to_string(),
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

        debug!(
            model = %request.model,
            document_chars = text.len(),
            "sending extraction request"
        );

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TrialdocError::Service(format!("chat request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrialdocError::Service(format!(
                "chat request failed ({status}): {body}"
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| TrialdocError::Service(format!("invalid chat response: {e}")))?;
        Ok(chat.content_text())
    }
}

#[async_trait::async_trait]
impl FieldExtractor for ChatExtractor {
    async fn extract_fields(
        &self,
        text: &str,
        schema: &serde_json::Value,
        system_prompt: &str,
    ) -> Result<String> {
        Self::extract_fields(self, text, schema, system_prompt).await
    }
}
