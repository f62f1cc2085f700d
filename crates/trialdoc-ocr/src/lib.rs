//! OCR service client.
//!
//! Converts a PDF into per-page markdown by driving the remote OCR service
//! through its four-step flow:
//!
//! 1. Upload the document (multipart, purpose `ocr`)
//! 2. Request a signed retrieval URL for the uploaded file
//! 3. Run the OCR operation against that URL
//! 4. Best-effort delete of the uploaded artifact
//!
//! The uploaded artifact is transient: created and deleted within a single
//! [`OcrClient::get_text`] call and never referenced by any other call. The
//! sequence is a single attempt - no retry, no backoff, and no explicit
//! deadline beyond the HTTP client's defaults.
//!
//! ## Example
//!
//! ```no_run
//! use trialdoc_core::ProviderConfig;
//! use trialdoc_ocr::OcrClient;
//!
//! # async fn example() -> trialdoc_core::Result<()> {
//! let client = OcrClient::new(ProviderConfig::new("api-key"));
//! let text = client.get_text(&std::fs::read("protocol.pdf")?).await?;
//! println!("{} pages", text.page_count());
//! # Ok(())
//! # }
//! ```

use reqwest::multipart;
use serde::Deserialize;
use tracing::{debug, warn};
use trialdoc_core::{OcrText, ProviderConfig, Result, TextSource, TrialdocError};

/// OCR model identifier on the primary provider.
const OCR_MODEL: &str = "mistral-ocr-latest";

/// Filename reported for the uploaded artifact. The service only uses it for
/// content-type sniffing.
const UPLOAD_FILENAME: &str = "document.pdf";

/// Response to a file upload.
#[derive(Debug, Deserialize)]
struct FileUploadResponse {
    id: String,
}

/// Response to a signed-URL request.
#[derive(Debug, Deserialize)]
struct SignedUrlResponse {
    url: String,
}

/// Response to an OCR run.
#[derive(Debug, Deserialize)]
struct OcrResponse {
    pages: Vec<OcrPage>,
}

/// One OCR'd page. The service returns pages in page order.
#[derive(Debug, Deserialize)]
struct OcrPage {
    markdown: String,
}

/// HTTP client for the remote OCR service.
#[derive(Debug, Clone)]
pub struct OcrClient {
    client: reqwest::Client,
    config: ProviderConfig,
}

impl OcrClient {
    /// Create a client with the given provider configuration.
    #[must_use = "the client is created but not used"]
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Extract page text from a PDF.
    ///
    /// The caller is responsible for the 50 MB ceiling and media-type check;
    /// this client sends whatever bytes it is given.
    ///
    /// # Errors
    ///
    /// - [`TrialdocError::Config`] when no API key is configured; returned
    ///   before any network call.
    /// - [`TrialdocError::Service`] when any service step fails.
    /// - [`TrialdocError::EmptyExtraction`] when OCR succeeds but the
    ///   extracted text is empty or whitespace-only.
    pub async fn get_text(&self, document: &[u8]) -> Result<OcrText> {
        if !self.config.has_credential() {
            return Err(TrialdocError::Config(
                "OCR service API key is not configured".to_string(),
            ));
        }

        let file_id = self.upload(document).await?;
        debug!(file_id = %file_id, bytes = document.len(), "uploaded document for OCR");

        let ocr_result = match self.signed_url(&file_id).await {
            Ok(url) => self.run_ocr(&url).await,
            Err(e) => Err(e),
        };

        // The uploaded artifact is transient; failure to delete it is logged,
        // never propagated.
        if let Err(e) = self.delete_file(&file_id).await {
            warn!(file_id = %file_id, error = %e, "failed to delete uploaded OCR artifact");
        }

        let pages = ocr_result?;
        let text = OcrText::new(pages);
        if text.is_blank() {
            return Err(TrialdocError::EmptyExtraction);
        }
        Ok(text)
    }

    async fn upload(&self, document: &[u8]) -> Result<String> {
        let part = multipart::Part::bytes(document.to_vec())
            .file_name(UPLOAD_FILENAME)
            .mime_str("application/pdf")
            .map_err(|e| TrialdocError::Service(format!("failed to build upload request: {e}")))?;
        let form = multipart::Form::new().text("purpose", "ocr").part("file", part);

        let response = self
            .client
            .post(format!("{}/v1/files", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TrialdocError::Service(format!("file upload failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrialdocError::Service(format!(
                "file upload failed ({status}): {body}"
            )));
        }

        let upload: FileUploadResponse = response
            .json()
            .await
            .map_err(|e| TrialdocError::Service(format!("invalid upload response: {e}")))?;
        Ok(upload.id)
    }

    async fn signed_url(&self, file_id: &str) -> Result<String> {
        let response = self
            .client
            .get(format!("{}/v1/files/{file_id}/url", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| TrialdocError::Service(format!("signed URL request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrialdocError::Service(format!(
                "signed URL request failed ({status}): {body}"
            )));
        }

        let signed: SignedUrlResponse = response
            .json()
            .await
            .map_err(|e| TrialdocError::Service(format!("invalid signed URL response: {e}")))?;
        Ok(signed.url)
    }

    async fn run_ocr(&self, document_url: &str) -> Result<Vec<String>> {
        let request = serde_json::json!({
            "model": OCR_MODEL,
            "document": {
                "type": "document_url",
                "document_url": document_url,
            },
        });

        let response = self
            .client
            .post(format!("{}/v1/ocr", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TrialdocError::Service(format!("OCR request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrialdocError::Service(format!(
                "OCR request failed ({status}): {body}"
            )));
        }

        let ocr: OcrResponse = response
            .json()
            .await
            .map_err(|e| TrialdocError::Service(format!("invalid OCR response: {e}")))?;
        Ok(ocr.pages.into_iter().map(|p| p.markdown).collect())
    }

    async fn delete_file(&self, file_id: &str) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/v1/files/{file_id}", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| TrialdocError::Service(format!("file deletion failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TrialdocError::Service(format!(
                "file deletion failed ({status})"
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TextSource for OcrClient {
    async fn get_text(&self, document: &[u8]) -> Result<OcrText> {
        Self::get_text(self, document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credential_fails_before_any_network_call() {
        // An unroutable base URL guarantees that any attempted request would
        // surface as a service error, not a config error.
        let config = ProviderConfig::new("").with_base_url("http://127.0.0.1:9");
        let client = OcrClient::new(config);

        let err = client.get_text(b"%PDF-1.4").await.unwrap_err();
        assert!(matches!(err, TrialdocError::Config(_)));
        assert!(err.to_string().contains("API key is not configured"));
    }

    #[test]
    fn test_upload_response_deserialization() {
        let upload: FileUploadResponse =
            serde_json::from_str(r#"{"id": "file-abc123", "object": "file", "bytes": 1024}"#)
                .unwrap();
        assert_eq!(upload.id, "file-abc123");
    }

    #[test]
    fn test_ocr_response_deserialization() {
        let ocr: OcrResponse = serde_json::from_str(
            r##"{"pages": [
                {"index": 0, "markdown": "# Protocol"},
                {"index": 1, "markdown": "Visit schedule"}
            ], "model": "mistral-ocr-latest"}"##,
        )
        .unwrap();
        assert_eq!(ocr.pages.len(), 2);
        assert_eq!(ocr.pages[1].markdown, "Visit schedule");
    }
}
