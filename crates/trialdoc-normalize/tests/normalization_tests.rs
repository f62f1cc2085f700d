//! End-to-end normalization tests: raw model output through repair and
//! coercion into typed records.

use serde_json::json;
use trialdoc_core::TrialdocError;
use trialdoc_normalize::{normalize_budget, normalize_cta, normalize_protocol, parse_lenient};

#[test]
fn protocol_happy_path_from_fenced_response() {
    let response = r#"```json
{
    "name": "A Phase 2 Study of ACM-401",
    "phase": "Phase 2",
    "indication": "Rheumatoid Arthritis",
    "target_enrollment": 100,
    "inclusion_criteria": ["age >= 18"],
    "exclusion_criteria": ["pregnant"],
    "visit_schedule": ["Screening", "Week 4"]
}
```"#;

    let value = parse_lenient(response).unwrap();
    let record = normalize_protocol(&value);

    assert!(record.phase.contains('2'));
    assert_eq!(record.target_enrollment, 100);
    assert!(!record.inclusion_criteria.is_empty());
    assert!(!record.exclusion_criteria.is_empty());
}

#[test]
fn budget_zero_amount_line_item_is_excluded() {
    let response = r#"{
        "currency": "USD",
        "procedure_payments": [
            {"name": "MRI scan", "payment_amount": 450},
            {"name": "Waived assessment", "payment_amount": 0}
        ]
    }"#;

    let value = parse_lenient(response).unwrap();
    let record = normalize_budget(&value);

    assert_eq!(record.procedure_payments.len(), 1);
    assert!(record
        .procedure_payments
        .iter()
        .all(|p| p.amount > 0.0 && !p.name.is_empty()));
}

#[test]
fn malformed_beyond_repair_carries_raw_text() {
    let err = parse_lenient("not json at all").unwrap_err();
    match err {
        TrialdocError::MalformedOutput { raw_text, .. } => {
            assert_eq!(raw_text, "not json at all");
        }
        other => panic!("expected MalformedOutput, got {other:?}"),
    }
}

#[test]
fn repaired_response_with_all_four_defects_normalizes() {
    // Trailing comma, single quotes, bare keys, doubled quotes.
    let response = r#"{
        sponsor_name: ""Acme Therapeutics"",
        'payment_info': 'Net 45',
        invoice_requirements: ["study number", "site number",],
    }"#;

    let value = parse_lenient(response).unwrap();
    let record = normalize_cta(&value);

    assert_eq!(record.sponsor_name, "Acme Therapeutics");
    assert_eq!(record.payment_info, "Net 45");
    assert_eq!(record.invoice_requirements.len(), 2);
    assert_eq!(record.currency, "USD");
}

#[test]
fn normalization_is_idempotent_for_protocol() {
    let raw = json!({
        "name": "A Phase 2 Study",
        "phase": "Phase 2",
        "target_enrollment": "100",
        "inclusion_criteria": "age >= 18\nconfirmed diagnosis",
        "study_design": {"design_type": "randomized"},
        "study_arms": [{"name": "Active", "description": ""}]
    });

    let once = normalize_protocol(&raw);
    let reserialized = serde_json::to_value(&once).unwrap();
    let twice = normalize_protocol(&reserialized);

    assert_eq!(once, twice);
}

#[test]
fn normalization_is_idempotent_for_budget() {
    let raw = json!({
        "total_budget": "125,000",
        "procedure_payments": [
            {"procedure_name": "ECG", "payment_amount": "75.50"},
            {"name": "Dropped", "amount": 0}
        ],
        "important_notes": "single note"
    });

    let once = normalize_budget(&raw);
    let reserialized = serde_json::to_value(&once).unwrap();
    let twice = normalize_budget(&reserialized);

    assert_eq!(once, twice);
}

#[test]
fn normalization_is_idempotent_for_cta() {
    let raw = json!({
        "sponsor_name": "Acme Therapeutics",
        "invoice_requirements": ["study number", "", "site number"]
    });

    let once = normalize_cta(&raw);
    let reserialized = serde_json::to_value(&once).unwrap();
    let twice = normalize_cta(&reserialized);

    assert_eq!(once, twice);
}

#[test]
fn array_fields_are_total_for_all_record_types() {
    // Arrays must come back as arrays (possibly empty) for hostile shapes.
    for hostile in [
        json!({}),
        json!({"inclusion_criteria": null, "invoice_requirements": 7}),
        json!({"procedure_payments": "not an array", "important_notes": {"a": 1}}),
    ] {
        let protocol = normalize_protocol(&hostile);
        let json_value = serde_json::to_value(&protocol).unwrap();
        assert!(json_value["inclusion_criteria"].is_array());
        assert!(json_value["visit_schedule"].is_array());

        let budget = normalize_budget(&hostile);
        let json_value = serde_json::to_value(&budget).unwrap();
        assert!(json_value["procedure_payments"].is_array());
        assert!(json_value["important_notes"].is_array());

        let cta = normalize_cta(&hostile);
        let json_value = serde_json::to_value(&cta).unwrap();
        assert!(json_value["invoice_requirements"].is_array());
    }
}
