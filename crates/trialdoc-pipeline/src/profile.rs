//! Per-document-kind pipeline parameterization.

use serde_json::Value;
use trialdoc_core::{BudgetData, CtaData, DocumentKind, ProtocolData};
use trialdoc_extract::{prompt, schema};
use trialdoc_normalize::{normalize_budget, normalize_cta, normalize_protocol};

/// Everything that distinguishes one document kind's pipeline from another:
/// the fixed prompt, the target schema, and the normalizer. The orchestration
/// around it is shared.
pub struct DocumentProfile<R> {
    /// The document kind this profile extracts.
    pub kind: DocumentKind,
    /// Fixed system prompt carrying the extraction rules.
    pub system_prompt: &'static str,
    /// Builds the schema rendered into the user prompt.
    pub schema: fn() -> Value,
    /// Coerces a parsed response into the record type.
    pub normalize: fn(&Value) -> R,
}

impl DocumentProfile<ProtocolData> {
    /// Profile for study protocols.
    #[must_use = "the profile is created but not used"]
    pub fn protocol() -> Self {
        Self {
            kind: DocumentKind::Protocol,
            system_prompt: prompt::PROTOCOL_SYSTEM_PROMPT,
            schema: schema::protocol_schema,
            normalize: normalize_protocol,
        }
    }
}

impl DocumentProfile<BudgetData> {
    /// Profile for study budgets.
    #[must_use = "the profile is created but not used"]
    pub fn budget() -> Self {
        Self {
            kind: DocumentKind::Budget,
            system_prompt: prompt::BUDGET_SYSTEM_PROMPT,
            schema: schema::budget_schema,
            normalize: normalize_budget,
        }
    }
}

impl DocumentProfile<CtaData> {
    /// Profile for clinical trial agreements.
    #[must_use = "the profile is created but not used"]
    pub fn cta() -> Self {
        Self {
            kind: DocumentKind::Cta,
            system_prompt: prompt::CTA_SYSTEM_PROMPT,
            schema: schema::cta_schema,
            normalize: normalize_cta,
        }
    }
}
