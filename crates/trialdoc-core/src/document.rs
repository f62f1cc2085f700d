//! Document kinds and input-boundary types.

use crate::error::{Result, TrialdocError};
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Maximum accepted document size: 50 MB.
///
/// Enforced by the calling layer before a pipeline is invoked; the OCR client
/// itself does not re-check.
pub const MAX_DOCUMENT_BYTES: usize = 50 * 1024 * 1024;

/// The only accepted media type.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Magic bytes at the start of every PDF file.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// The three document types the pipeline can process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Study protocol (design, enrollment, criteria, endpoints).
    Protocol,
    /// Study budget (payment line items, terms, pass-through costs).
    Budget,
    /// Clinical trial agreement (payment and invoicing terms).
    Cta,
}

impl DocumentKind {
    /// Stable identifier used in reports and logs.
    #[inline]
    #[must_use = "returns the document kind identifier"]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Protocol => "protocol",
            Self::Budget => "budget",
            Self::Cta => "cta",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "protocol" => Ok(Self::Protocol),
            "budget" => Ok(Self::Budget),
            "cta" | "agreement" | "clinical_trial_agreement" => Ok(Self::Cta),
            _ => Err(format!(
                "unknown document kind '{s}'. Valid options: protocol, budget, cta"
            )),
        }
    }
}

/// An uploaded document: raw bytes plus the declared media type.
///
/// Transient; exists only for the duration of one extraction call. The 50 MB
/// ceiling and the PDF-only media type are checked by [`RawDocument::validate`],
/// which the calling layer runs before handing bytes to a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    /// Document content.
    pub bytes: Vec<u8>,
    /// Declared media type, e.g. `application/pdf`.
    pub media_type: String,
}

impl RawDocument {
    /// Wrap raw PDF bytes.
    #[must_use = "the document is created but not used"]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            media_type: PDF_MEDIA_TYPE.to_string(),
        }
    }

    /// Decode a base64-encoded document, as received at the upload boundary.
    ///
    /// # Errors
    ///
    /// Returns [`TrialdocError::InvalidDocument`] if the payload is not valid
    /// base64.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| TrialdocError::InvalidDocument(format!("invalid base64 payload: {e}")))?;
        Ok(Self::new(bytes))
    }

    /// Size in bytes.
    #[inline]
    #[must_use = "returns the document size in bytes"]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the document is empty.
    #[inline]
    #[must_use = "returns whether the document is empty"]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the content starts with the PDF magic bytes.
    #[inline]
    #[must_use = "returns whether the content looks like a PDF"]
    pub fn looks_like_pdf(&self) -> bool {
        self.bytes.starts_with(PDF_MAGIC)
    }

    /// Run the calling-layer admission checks: media type, magic bytes, and
    /// the 50 MB ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`TrialdocError::InvalidDocument`] describing the first failed
    /// check.
    pub fn validate(&self) -> Result<()> {
        if self.media_type != PDF_MEDIA_TYPE {
            return Err(TrialdocError::InvalidDocument(format!(
                "unsupported media type '{}', only {PDF_MEDIA_TYPE} is accepted",
                self.media_type
            )));
        }
        if !self.looks_like_pdf() {
            return Err(TrialdocError::InvalidDocument(
                "content does not start with a PDF header".to_string(),
            ));
        }
        if self.len() > MAX_DOCUMENT_BYTES {
            return Err(TrialdocError::InvalidDocument(format!(
                "document is {} bytes, the maximum is {MAX_DOCUMENT_BYTES}",
                self.len()
            )));
        }
        Ok(())
    }
}
