//! Core types for the trialdoc extraction pipeline.
//!
//! This crate defines the shared vocabulary of the pipeline:
//!
//! - [`TrialdocError`] - error taxonomy for every pipeline stage
//! - [`ExtractionOutcome`] - the tagged result returned to callers
//! - [`ProtocolData`], [`BudgetData`], [`CtaData`] - the normalized record types
//! - [`DocumentKind`] - the three supported document types
//! - [`OcrText`] - page-ordered OCR output
//! - [`ProviderConfig`] - explicit, constructor-injected service configuration
//! - [`TextSource`], [`FieldExtractor`] - the stage traits the pipeline is built on
//!
//! ## Design
//!
//! Every stage returns a `Result` value rather than panicking or throwing past
//! its boundary; the orchestrator in `trialdoc-pipeline` short-circuits on the
//! first failure. Field-level defects inside an otherwise-successful response
//! are not errors - they are defaulted during normalization.
//!
//! Configuration is explicit: clients receive a [`ProviderConfig`] at
//! construction time and never read the process environment, so tests can
//! substitute fake credentials and in-memory stage implementations.

pub mod config;
pub mod document;
pub mod error;
pub mod outcome;
pub mod records;
pub mod text;
pub mod traits;

pub use config::ProviderConfig;
pub use document::{DocumentKind, RawDocument, MAX_DOCUMENT_BYTES, PDF_MEDIA_TYPE};
pub use error::{Result, TrialdocError};
pub use outcome::ExtractionOutcome;
pub use records::{
    BudgetData, CtaData, PaymentItem, PaymentTerms, ProtocolData, StudyArm, StudyDesign,
};
pub use text::{OcrText, PAGE_BREAK};
pub use traits::{FieldExtractor, TextSource};
