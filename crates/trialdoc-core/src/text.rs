//! Page-ordered OCR output.

use serde::{Deserialize, Serialize};

/// Literal separator inserted between page texts when pages are joined.
pub const PAGE_BREAK: &str = "\n\n--- PAGE BREAK ---\n\n";

/// Text extracted from a document by the OCR service, one markdown string per
/// page in page order.
///
/// Immutable once produced; it becomes the input to exactly one extractor call
/// (or the final output, in raw-text mode).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrText {
    /// Per-page markdown, in page order.
    pub pages: Vec<String>,
}

impl OcrText {
    /// Create from per-page strings.
    #[inline]
    #[must_use = "the OCR text is created but not used"]
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// All pages concatenated with the [`PAGE_BREAK`] marker.
    #[must_use = "the concatenated text is returned but not used"]
    pub fn text(&self) -> String {
        self.pages.join(PAGE_BREAK)
    }

    /// Number of pages.
    #[inline]
    #[must_use = "the page count is returned but not used"]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether no usable text was extracted (no pages, or only whitespace).
    #[must_use = "the blankness check result is returned but not used"]
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.trim().is_empty())
    }
}
