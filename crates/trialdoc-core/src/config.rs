//! Explicit service configuration, injected at construction time.

/// Connection settings for an OCR/chat provider.
///
/// Clients receive this at construction and never read the process
/// environment, so tests can pass fake credentials and unroutable endpoints
/// without touching global state. An empty `api_key` makes every client fail
/// fast before attempting a network call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Bearer credential for the provider.
    pub api_key: String,
    /// Base URL of the provider's API, without a trailing slash.
    pub base_url: String,
    /// Chat model identifier used for field extraction.
    pub model: String,
}

impl ProviderConfig {
    /// Default primary-provider endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.mistral.ai";
    /// Default chat model for field extraction.
    pub const DEFAULT_MODEL: &'static str = "mistral-large-latest";

    /// Configuration for the primary provider with default endpoint and model.
    #[must_use = "the configuration is created but not used"]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            model: Self::DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the base URL.
    #[must_use = "returns the updated configuration"]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the chat model.
    #[must_use = "returns the updated configuration"]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Whether a usable credential is present.
    #[inline]
    #[must_use = "the credential check result is returned but not used"]
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
