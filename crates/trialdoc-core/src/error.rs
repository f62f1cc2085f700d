//! Error types for extraction pipeline operations.

use thiserror::Error;

/// Error types that can occur while running an extraction pipeline.
///
/// The variants follow the pipeline's failure taxonomy: configuration errors
/// are detected before any network call, service errors carry the upstream
/// provider's message undifferentiated, and malformed output is the only
/// failure that can occur after a successful upstream call.
#[derive(Error, Debug)]
pub enum TrialdocError {
    /// A required credential or setting is absent.
    ///
    /// Detected before any network call is attempted; the pipeline fails fast
    /// with a fixed message instead of sending an unauthenticated request.
    #[error("configuration error: {0}")]
    Config(String),

    /// The OCR or chat provider returned an error or was unreachable.
    ///
    /// Carries the provider's message verbatim. Not retried; quota, auth, and
    /// network failures are deliberately not distinguished.
    #[error("service error: {0}")]
    Service(String),

    /// OCR succeeded but produced no usable text.
    ///
    /// Kept distinct from [`TrialdocError::Service`] so the pipeline can stop
    /// before spending a chat-completion call on empty input.
    #[error("no text could be extracted from the document")]
    EmptyExtraction,

    /// The chat response could not be parsed as JSON even after repair.
    ///
    /// The raw response text is attached for diagnosis; it is surfaced to the
    /// caller rather than silently discarded.
    #[error("failed to parse extraction response: {message}")]
    MalformedOutput {
        /// Parse error description from the strict pass.
        message: String,
        /// The unmodified response text.
        raw_text: String,
    },

    /// The input document was rejected before extraction started.
    ///
    /// Oversized payloads, non-PDF media types, and undecodable base64 all
    /// land here; enforcement belongs to the calling layer.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error outside the lenient-repair path.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for [`Result<T, TrialdocError>`].
pub type Result<T> = std::result::Result<T, TrialdocError>;
