//! The three compile-time extraction schemas.
//!
//! A schema is a declarative mapping from field name to a placeholder value:
//! `""` for strings, `0` for numbers, `[""]` for string arrays, an array with
//! one template object for collections of structured records, and a nested
//! object for nested shapes. The schema is rendered into the user prompt
//! verbatim; it is documentation for the model, not a validator - the
//! normalizer owns conformance.

use serde_json::{json, Value};
use trialdoc_core::DocumentKind;

/// Schema for study protocol extraction.
#[must_use = "the schema is built but not used"]
pub fn protocol_schema() -> Value {
    json!({
        "name": "",
        "phase": "",
        "indication": "",
        "target_enrollment": 0,
        "inclusion_criteria": [""],
        "exclusion_criteria": [""],
        "visit_schedule": [""],
        "protocol_number": "",
        "sponsor_name": "",
        "nct_number": "",
        "study_design": {
            "design_type": "",
            "blinding": "",
            "randomization": "",
            "duration": ""
        },
        "study_arms": [{"name": "", "description": ""}],
        "investigational_product": "",
        "primary_endpoints": [""],
        "secondary_endpoints": [""],
        "concomitant_medications": ""
    })
}

/// Schema for study budget extraction.
#[must_use = "the schema is built but not used"]
pub fn budget_schema() -> Value {
    json!({
        "currency": "",
        "total_budget": 0,
        "per_patient_total": 0,
        "procedure_payments": [{"name": "", "amount": 0, "notes": ""}],
        "visit_payments": [{"name": "", "amount": 0, "notes": ""}],
        "milestone_payments": [{"name": "", "amount": 0, "notes": ""}],
        "payment_terms": {
            "schedule": "",
            "method": "",
            "notes": ""
        },
        "pass_through_costs": [""],
        "important_notes": [""]
    })
}

/// Schema for clinical trial agreement extraction.
#[must_use = "the schema is built but not used"]
pub fn cta_schema() -> Value {
    json!({
        "sponsor_name": "",
        "currency": "",
        "payment_info": "",
        "timeline": "",
        "invoice_requirements": [""],
        "payment_hold_conditions": [""],
        "important_notes": [""]
    })
}

/// The schema for a document kind.
#[must_use = "the schema is built but not used"]
pub fn schema_for(kind: DocumentKind) -> Value {
    match kind {
        DocumentKind::Protocol => protocol_schema(),
        DocumentKind::Budget => budget_schema(),
        DocumentKind::Cta => cta_schema(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_are_objects_with_expected_fields() {
        let protocol = protocol_schema();
        assert!(protocol.is_object());
        assert!(protocol.get("inclusion_criteria").unwrap().is_array());
        assert!(protocol.get("study_design").unwrap().is_object());

        let budget = budget_schema();
        assert!(budget.get("procedure_payments").unwrap()[0].is_object());
        assert!(budget.get("payment_terms").unwrap().is_object());

        let cta = cta_schema();
        assert!(cta.get("invoice_requirements").unwrap().is_array());
    }

    #[test]
    fn test_schema_for_dispatch() {
        assert_eq!(schema_for(DocumentKind::Protocol), protocol_schema());
        assert_eq!(schema_for(DocumentKind::Budget), budget_schema());
        assert_eq!(schema_for(DocumentKind::Cta), cta_schema());
    }
}
