//! Schema-constrained LLM field extraction.
//!
//! This crate turns OCR'd document text into a raw JSON string by prompting a
//! chat-completion endpoint with a fixed instruction pair: a system message
//! carrying the extraction rules for the document kind, and a user message
//! carrying the target schema as JSON plus the full document text.
//!
//! The call is single-shot: non-streaming, non-chunked, the entire document
//! embedded in one prompt, no retry on truncated output. Whatever content
//! comes back is returned as-is; repair and coercion live in
//! `trialdoc-normalize`.
//!
//! ## Modules
//!
//! - [`client`] - primary chat-completion extractor
//! - [`fallback`] - OpenAI-compatible fallback client (smart-extract only)
//! - [`prompt`] - fixed system prompts and user-prompt construction
//! - [`schema`] - the three compile-time extraction schemas
//! - [`censor`] - placeholder-name detection for censored responses

pub mod censor;
pub mod client;
pub mod fallback;
pub mod prompt;
pub mod schema;

pub use censor::looks_censored;
pub use client::ChatExtractor;
pub use fallback::FallbackClient;
pub use schema::schema_for;
