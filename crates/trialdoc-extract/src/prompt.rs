//! Fixed extraction prompts.
//!
//! Each document kind has its own system prompt; all three share the same
//! user-prompt shape: the target schema rendered as JSON, followed by the
//! full document text. The prompts instruct the model to return bare JSON,
//! but responses are still routed through the repair pass - markdown fences
//! and trailing commas show up regardless.

use trialdoc_core::DocumentKind;

/// System prompt for study protocol extraction.
pub const PROTOCOL_SYSTEM_PROMPT: &str = r#"You are an expert clinical research document analyst. Extract structured data from study protocol documents with high precision.

EXTRACTION RULES:
1. Copy values from the document text; never invent values that are not present
2. For list fields, return one array entry per criterion, visit, or endpoint
3. target_enrollment is the planned number of participants as an integer
4. phase should include the phase number as written (e.g. "Phase 2", "Phase 1/2")
5. Use "" for text fields the document does not state; use [] for lists with no entries
6. nct_number is the ClinicalTrials.gov identifier (NCT followed by 8 digits), if present

Return ONLY valid JSON. No markdown, no explanation."#;

/// System prompt for study budget extraction.
pub const BUDGET_SYSTEM_PROMPT: &str = r#"You are an expert clinical trial budget analyst. Extract payment and cost data from study budget documents with high precision.

EXTRACTION RULES:
1. Copy amounts exactly as stated; never estimate or invent figures
2. Each procedure, visit, and milestone payment is one array entry with its name and amount
3. Amounts are plain numbers without currency symbols or thousands separators
4. currency is the ISO code stated in the document (e.g. "USD", "EUR")
5. pass_through_costs are items reimbursed outside the per-patient budget
6. important_notes captures caveats a study coordinator must know about payment

Return ONLY valid JSON. No markdown, no explanation."#;

/// System prompt for clinical trial agreement extraction.
pub const CTA_SYSTEM_PROMPT: &str = r#"You are an expert clinical trial agreement analyst. Extract payment and invoicing terms from clinical trial agreements with high precision.

EXTRACTION RULES:
1. Copy terms from the agreement text; never invent terms that are not present
2. payment_info summarizes how and when the site is paid
3. timeline summarizes the agreement's effective dates and duration
4. invoice_requirements lists what an invoice must include to be payable, one entry each
5. payment_hold_conditions lists circumstances under which payment may be withheld
6. Use "" for text fields the agreement does not state; use [] for lists with no entries

Return ONLY valid JSON. No markdown, no explanation."#;

/// The system prompt for a document kind.
#[inline]
#[must_use = "returns the system prompt for the document kind"]
pub const fn system_prompt_for(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Protocol => PROTOCOL_SYSTEM_PROMPT,
        DocumentKind::Budget => BUDGET_SYSTEM_PROMPT,
        DocumentKind::Cta => CTA_SYSTEM_PROMPT,
    }
}

/// Build the user message: schema as JSON, then the document text.
#[must_use = "the prompt is built but not used"]
pub fn build_user_prompt(schema: &serde_json::Value, document_text: &str) -> String {
    let schema_json =
        serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());
    format!(
        "Extract the following fields from this document text.\n\n\
         RETURN ONLY JSON with these exact fields:\n{schema_json}\n\n\
         Document text:\n{document_text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_prompt_contains_schema_and_text() {
        let schema = serde_json::json!({"name": "", "phase": ""});
        let prompt = build_user_prompt(&schema, "A Phase 2 Study of Example Drug");

        assert!(prompt.contains("RETURN ONLY JSON"));
        assert!(prompt.contains("\"phase\""));
        assert!(prompt.contains("A Phase 2 Study of Example Drug"));
        // Schema comes before the document text.
        assert!(prompt.find("\"phase\"").unwrap() < prompt.find("Example Drug").unwrap());
    }

    #[test]
    fn test_each_kind_has_a_distinct_prompt() {
        let prompts = [
            system_prompt_for(DocumentKind::Protocol),
            system_prompt_for(DocumentKind::Budget),
            system_prompt_for(DocumentKind::Cta),
        ];
        assert_ne!(prompts[0], prompts[1]);
        assert_ne!(prompts[1], prompts[2]);
        for p in prompts {
            assert!(p.contains("Return ONLY valid JSON"));
        }
    }
}
