//! The tagged result returned by every pipeline invocation.

use crate::error::TrialdocError;
use serde::{Deserialize, Serialize};

/// Result of one pipeline invocation, tagged by the method that produced it.
///
/// Exactly one of `data` or `error` is meaningful per outcome; `raw_text`
/// accompanies successful structured extraction for audit and debugging.
/// Callers receive either a fully-typed record or a single human-readable
/// error string; there is no partial-success mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ExtractionOutcome<T> {
    /// Raw-text mode: OCR output returned without structured extraction.
    OcrText {
        /// All page text joined with the page-break marker.
        raw_text: String,
    },
    /// Structured extraction succeeded.
    ChatExtraction {
        /// The normalized record.
        data: T,
        /// The OCR'd document text the record was extracted from.
        raw_text: String,
    },
    /// The pipeline failed at some stage.
    Error {
        /// Human-readable failure description.
        error: String,
    },
}

impl<T> ExtractionOutcome<T> {
    /// Build the error outcome for a stage failure.
    ///
    /// Malformed-output failures append the raw response text so the caller
    /// can diagnose what the model actually returned.
    #[must_use = "the outcome is created but not used"]
    pub fn failed(err: &TrialdocError) -> Self {
        let error = match err {
            TrialdocError::MalformedOutput { message, raw_text } => {
                format!("failed to parse extraction response: {message}; raw response: {raw_text}")
            }
            other => other.to_string(),
        };
        Self::Error { error }
    }

    /// The normalized record, when extraction succeeded.
    #[inline]
    #[must_use = "the extracted data reference is returned but not used"]
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::ChatExtraction { data, .. } => Some(data),
            _ => None,
        }
    }

    /// The failure message, when the pipeline failed.
    #[inline]
    #[must_use = "the error message reference is returned but not used"]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(error),
            _ => None,
        }
    }

    /// Whether this outcome is a failure.
    #[inline]
    #[must_use = "the failure check result is returned but not used"]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_tag_serialization() {
        let outcome: ExtractionOutcome<serde_json::Value> = ExtractionOutcome::Error {
            error: "service error: timeout".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["method"], "error");
        assert_eq!(json["error"], "service error: timeout");

        let outcome: ExtractionOutcome<serde_json::Value> = ExtractionOutcome::OcrText {
            raw_text: "page one".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["method"], "ocr_text");
    }

    #[test]
    fn test_failed_attaches_raw_response() {
        let err = TrialdocError::MalformedOutput {
            message: "expected value".to_string(),
            raw_text: "not json at all".to_string(),
        };
        let outcome: ExtractionOutcome<()> = ExtractionOutcome::failed(&err);
        let message = outcome.error_message().unwrap();
        assert!(message.contains("not json at all"));
    }

    #[test]
    fn test_accessors() {
        let ok: ExtractionOutcome<u32> = ExtractionOutcome::ChatExtraction {
            data: 7,
            raw_text: String::new(),
        };
        assert_eq!(ok.data(), Some(&7));
        assert!(!ok.is_error());
        assert!(ok.error_message().is_none());
    }
}
