//! Pipeline orchestration: OCR, then schema-constrained extraction, then
//! normalization.
//!
//! One generic pipeline shape, instantiated three times - protocol, budget,
//! clinical trial agreement. Each instance is parameterized by a
//! [`DocumentProfile`]: the fixed prompt pair, the target schema, and the
//! normalizer function. The stages behind the pipeline are trait objects, so
//! tests drive the orchestration with in-memory stubs.
//!
//! Per invocation the flow is strictly sequential - the chat call depends on
//! the OCR output, so the two cannot overlap - and the orchestrator
//! short-circuits on the first failure: an OCR failure means the extractor
//! is never invoked, and a parse failure after a successful chat call is
//! terminal. There is no cross-call state, no caching, no retry, and no
//! partial-success mode.
//!
//! ## Example
//!
//! ```no_run
//! use trialdoc_core::ProviderConfig;
//! use trialdoc_pipeline::ExtractionPipeline;
//!
//! # async fn example() -> std::io::Result<()> {
//! let pipeline = ExtractionPipeline::protocol(&ProviderConfig::new("api-key"));
//! let outcome = pipeline.extract(&std::fs::read("protocol.pdf")?).await;
//!
//! match outcome.data() {
//!     Some(record) => println!("extracted: {}", record.name),
//!     None => eprintln!("extraction failed"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod profile;

pub use profile::DocumentProfile;

use std::sync::Arc;

use tracing::{info, warn};
use trialdoc_core::{
    BudgetData, CtaData, ExtractionOutcome, FieldExtractor, ProtocolData, ProviderConfig,
    TextSource,
};
use trialdoc_extract::{looks_censored, ChatExtractor};
use trialdoc_normalize::parse_lenient;
use trialdoc_ocr::OcrClient;

/// A configured extraction pipeline for one document kind.
pub struct ExtractionPipeline<R> {
    text_source: Arc<dyn TextSource>,
    extractor: Arc<dyn FieldExtractor>,
    profile: DocumentProfile<R>,
}

impl ExtractionPipeline<ProtocolData> {
    /// Pipeline for study protocols against the given provider.
    #[must_use = "the pipeline is created but not used"]
    pub fn protocol(config: &ProviderConfig) -> Self {
        Self::from_config(config, DocumentProfile::protocol())
    }
}

impl ExtractionPipeline<BudgetData> {
    /// Pipeline for study budgets against the given provider.
    #[must_use = "the pipeline is created but not used"]
    pub fn budget(config: &ProviderConfig) -> Self {
        Self::from_config(config, DocumentProfile::budget())
    }
}

impl ExtractionPipeline<CtaData> {
    /// Pipeline for clinical trial agreements against the given provider.
    #[must_use = "the pipeline is created but not used"]
    pub fn cta(config: &ProviderConfig) -> Self {
        Self::from_config(config, DocumentProfile::cta())
    }
}

impl<R> ExtractionPipeline<R> {
    /// Assemble a pipeline from explicit stages.
    ///
    /// This is the seam tests use to substitute in-memory stages.
    #[must_use = "the pipeline is created but not used"]
    pub fn new(
        text_source: Arc<dyn TextSource>,
        extractor: Arc<dyn FieldExtractor>,
        profile: DocumentProfile<R>,
    ) -> Self {
        Self {
            text_source,
            extractor,
            profile,
        }
    }

    fn from_config(config: &ProviderConfig, profile: DocumentProfile<R>) -> Self {
        Self::new(
            Arc::new(OcrClient::new(config.clone())),
            Arc::new(ChatExtractor::new(config.clone())),
            profile,
        )
    }

    /// The document kind this pipeline extracts.
    #[inline]
    #[must_use = "the document kind is returned but not used"]
    pub fn kind(&self) -> trialdoc_core::DocumentKind {
        self.profile.kind
    }

    /// Run the full pipeline: OCR, extract, normalize.
    pub async fn extract(&self, document: &[u8]) -> ExtractionOutcome<R> {
        let text = match self.text_source.get_text(document).await {
            Ok(text) => text,
            Err(e) => {
                warn!(kind = %self.profile.kind, error = %e, "text extraction failed");
                return ExtractionOutcome::failed(&e);
            }
        };
        let document_text = text.text();
        info!(
            kind = %self.profile.kind,
            pages = text.page_count(),
            chars = document_text.len(),
            "text extracted"
        );

        match self.extract_fields_with(self.extractor.as_ref(), &document_text).await {
            Ok(data) => ExtractionOutcome::ChatExtraction {
                data,
                raw_text: document_text,
            },
            Err(e) => {
                warn!(kind = %self.profile.kind, error = %e, "field extraction failed");
                ExtractionOutcome::failed(&e)
            }
        }
    }

    /// Raw-text mode: OCR only, no structured extraction.
    pub async fn ocr_only(&self, document: &[u8]) -> ExtractionOutcome<R> {
        match self.text_source.get_text(document).await {
            Ok(text) => ExtractionOutcome::OcrText {
                raw_text: text.text(),
            },
            Err(e) => {
                warn!(kind = %self.profile.kind, error = %e, "text extraction failed");
                ExtractionOutcome::failed(&e)
            }
        }
    }

    /// Run the pipeline with a one-shot fallback extractor.
    ///
    /// The strict pipeline never falls back; this combinator exists for the
    /// CLI. OCR runs once. If the primary extractor fails, returns
    /// unparseable output, or returns a censored-looking result, the same
    /// text is retried once through `fallback`; a fallback failure is final.
    pub async fn extract_with_fallback(
        &self,
        fallback: &dyn FieldExtractor,
        document: &[u8],
    ) -> ExtractionOutcome<R> {
        let text = match self.text_source.get_text(document).await {
            Ok(text) => text,
            Err(e) => {
                warn!(kind = %self.profile.kind, error = %e, "text extraction failed");
                return ExtractionOutcome::failed(&e);
            }
        };
        let document_text = text.text();

        match self.extract_value_with(self.extractor.as_ref(), &document_text).await {
            Ok(value) if !looks_censored(&value) => ExtractionOutcome::ChatExtraction {
                data: (self.profile.normalize)(&value),
                raw_text: document_text,
            },
            Ok(_) => {
                info!(kind = %self.profile.kind, "placeholder values detected, retrying with fallback provider");
                self.finish_with(fallback, document_text).await
            }
            Err(e) => {
                warn!(kind = %self.profile.kind, error = %e, "primary extraction failed, retrying with fallback provider");
                self.finish_with(fallback, document_text).await
            }
        }
    }

    async fn finish_with(
        &self,
        extractor: &dyn FieldExtractor,
        document_text: String,
    ) -> ExtractionOutcome<R> {
        match self.extract_fields_with(extractor, &document_text).await {
            Ok(data) => ExtractionOutcome::ChatExtraction {
                data,
                raw_text: document_text,
            },
            Err(e) => {
                warn!(kind = %self.profile.kind, error = %e, "fallback extraction failed");
                ExtractionOutcome::failed(&e)
            }
        }
    }

    async fn extract_fields_with(
        &self,
        extractor: &dyn FieldExtractor,
        document_text: &str,
    ) -> trialdoc_core::Result<R> {
        let value = self.extract_value_with(extractor, document_text).await?;
        Ok((self.profile.normalize)(&value))
    }

    async fn extract_value_with(
        &self,
        extractor: &dyn FieldExtractor,
        document_text: &str,
    ) -> trialdoc_core::Result<serde_json::Value> {
        let raw = extractor
            .extract_fields(
                document_text,
                &(self.profile.schema)(),
                self.profile.system_prompt,
            )
            .await?;
        parse_lenient(&raw)
    }
}
