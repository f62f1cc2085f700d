//! Property-based tests for repair and normalization.
//!
//! Normalization sits behind an LLM whose output is adversarial by nature,
//! so these explore the input space automatically:
//! - repair and lenient parsing never panic on arbitrary text
//! - normalizers never panic and always uphold the record invariants
//! - the budget line-item filter holds for arbitrary JSON

use proptest::prelude::*;
use serde_json::json;
use trialdoc_normalize::{normalize_budget, normalize_protocol, parse_lenient};

/// Property: lenient parsing never panics, whatever the model returns.
#[test]
fn proptest_parse_lenient_no_panic() {
    proptest!(|(text in ".{0,400}")| {
        let _ = parse_lenient(&text);
    });
}

/// Property: when lenient parsing succeeds, the result is always an object.
#[test]
fn proptest_parse_lenient_yields_objects() {
    proptest!(|(text in ".{0,400}")| {
        if let Ok(value) = parse_lenient(&text) {
            prop_assert!(value.is_object());
        }
    });
}

/// Property: normalization never panics on arbitrary JSON shapes.
#[test]
fn proptest_normalize_no_panic_on_arbitrary_values() {
    proptest!(|(name in ".{0,50}", count in any::<i64>(), flag in any::<bool>())| {
        let hostile = json!({
            "name": name,
            "target_enrollment": count,
            "inclusion_criteria": flag,
            "study_design": count,
            "procedure_payments": name,
        });
        let _ = normalize_protocol(&hostile);
        let _ = normalize_budget(&hostile);
    });
}

/// Property: every retained budget line item is billable, for arbitrary
/// item names and amounts.
#[test]
fn proptest_budget_filter_invariant() {
    proptest!(|(items in proptest::collection::vec((".{0,20}", any::<f64>()), 0..10))| {
        let raw_items: Vec<_> = items
            .iter()
            .map(|(name, amount)| json!({"name": name, "amount": amount}))
            .collect();
        let record = normalize_budget(&json!({"procedure_payments": raw_items}));

        for item in &record.procedure_payments {
            prop_assert!(!item.name.trim().is_empty());
            prop_assert!(item.amount > 0.0);
        }
    });
}

/// Property: normalized protocols survive a serialize/normalize round trip
/// unchanged (idempotence).
#[test]
fn proptest_protocol_idempotence() {
    proptest!(|(name in "[a-zA-Z0-9 ]{0,40}", enrollment in 0u32..5000, criteria in proptest::collection::vec("[a-zA-Z0-9 >=]{1,30}", 0..5))| {
        let raw = json!({
            "name": name,
            "target_enrollment": enrollment,
            "inclusion_criteria": criteria,
        });

        let once = normalize_protocol(&raw);
        let reserialized = serde_json::to_value(&once).unwrap();
        let twice = normalize_protocol(&reserialized);
        prop_assert_eq!(once, twice);
    });
}
