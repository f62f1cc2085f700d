//! Stage traits the extraction pipeline is assembled from.
//!
//! The pipeline orchestrates two external calls - OCR, then chat extraction -
//! behind these seams so tests can substitute in-memory implementations and
//! assert, for example, that the extractor is never invoked when OCR fails.

use crate::error::Result;
use crate::text::OcrText;

/// A source of page text for a document.
///
/// Production implementation: the OCR client in `trialdoc-ocr`.
#[async_trait::async_trait]
pub trait TextSource: Send + Sync {
    /// Extract page text from raw document bytes.
    ///
    /// # Errors
    ///
    /// Returns a configuration error before any network call when the
    /// credential is absent, a service error on provider failure, and an
    /// empty-extraction error when the call succeeds but yields no usable
    /// text.
    async fn get_text(&self, document: &[u8]) -> Result<OcrText>;
}

/// A schema-constrained field extractor over document text.
///
/// Production implementations: the chat extractor and the fallback client in
/// `trialdoc-extract`. Returns the raw response content as-is; repair and
/// coercion happen downstream.
#[async_trait::async_trait]
pub trait FieldExtractor: Send + Sync {
    /// Request structured fields for `text` according to `schema`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error before any network call when the
    /// credential is absent, and a service error on provider failure. Absent
    /// or non-string response content is returned as an empty string rather
    /// than an error.
    async fn extract_fields(
        &self,
        text: &str,
        schema: &serde_json::Value,
        system_prompt: &str,
    ) -> Result<String>;
}
