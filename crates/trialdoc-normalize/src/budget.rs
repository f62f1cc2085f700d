//! Normalization into [`BudgetData`].

use serde_json::Value;
use trialdoc_core::records::DEFAULT_CURRENCY;
use trialdoc_core::{BudgetData, PaymentItem, PaymentTerms};

use crate::coerce;

// Key spellings seen in model output for payment line items.
const NAME_KEYS: &[&str] = &["name", "procedure_name", "visit_name", "milestone_name", "item"];
const AMOUNT_KEYS: &[&str] = &["amount", "payment_amount", "payment", "cost"];

/// Coerce a parsed extraction result into a [`BudgetData`] record.
///
/// Payment line items failing the minimum-validity predicate (non-empty name
/// and positive amount) are dropped: this is a data-quality gate, so
/// downstream consumers may assume every retained item is billable. This
/// function cannot fail.
#[must_use = "the normalized record is returned but not used"]
pub fn normalize_budget(value: &Value) -> BudgetData {
    let empty = serde_json::Map::new();
    let obj = coerce::object(Some(value)).unwrap_or(&empty);

    let terms = coerce::object(obj.get("payment_terms"));

    BudgetData {
        currency: coerce::optional_string(obj.get("currency"))
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        total_budget: coerce::lenient_f64(obj.get("total_budget")),
        per_patient_total: coerce::lenient_f64(obj.get("per_patient_total")),
        procedure_payments: payment_items(obj.get("procedure_payments")),
        visit_payments: payment_items(obj.get("visit_payments")),
        milestone_payments: payment_items(obj.get("milestone_payments")),
        payment_terms: PaymentTerms {
            schedule: coerce::lenient_string(terms.and_then(|t| t.get("schedule"))),
            method: coerce::lenient_string(terms.and_then(|t| t.get("method"))),
            notes: coerce::lenient_string(terms.and_then(|t| t.get("notes"))),
        },
        pass_through_costs: coerce::string_list(obj.get("pass_through_costs")),
        important_notes: coerce::string_list(obj.get("important_notes")),
    }
}

/// Map a raw collection into billable payment items, dropping invalid ones.
pub(crate) fn payment_items(value: Option<&Value>) -> Vec<PaymentItem> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let obj = coerce::object(Some(item))?;
            let payment = PaymentItem {
                name: coerce::lenient_string(coerce::first_field(obj, NAME_KEYS)),
                amount: coerce::lenient_f64(coerce::first_field(obj, AMOUNT_KEYS)).unwrap_or(0.0),
                notes: coerce::lenient_string(obj.get("notes")),
            };
            payment.is_billable().then_some(payment)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_budget() {
        let raw = json!({
            "currency": "EUR",
            "total_budget": "125000",
            "per_patient_total": 4850.0,
            "procedure_payments": [
                {"name": "MRI scan", "amount": 450},
                {"procedure_name": "ECG", "payment_amount": "75.50", "notes": "per occurrence"}
            ],
            "visit_payments": [{"name": "Screening visit", "amount": 320}],
            "milestone_payments": [{"name": "First patient enrolled", "amount": 2500}],
            "payment_terms": {"schedule": "quarterly in arrears", "method": "ACH"},
            "pass_through_costs": ["IRB fees", "pharmacy setup"],
            "important_notes": "Payments held until contract execution"
        });

        let record = normalize_budget(&raw);
        assert_eq!(record.currency, "EUR");
        assert_eq!(record.total_budget, Some(125_000.0));
        assert_eq!(record.procedure_payments.len(), 2);
        assert_eq!(record.procedure_payments[1].name, "ECG");
        assert_eq!(record.procedure_payments[1].amount, 75.5);
        assert_eq!(record.payment_terms.schedule, "quarterly in arrears");
        assert_eq!(record.payment_terms.notes, "");
        assert_eq!(
            record.important_notes,
            vec!["Payments held until contract execution"]
        );
    }

    #[test]
    fn test_invalid_line_items_are_dropped() {
        let raw = json!({
            "procedure_payments": [
                {"name": "MRI scan", "amount": 450},
                {"name": "Waived assessment", "payment_amount": 0},
                {"name": "", "amount": 100},
                {"name": "Negative adjustment", "amount": -50},
                {"name": "No amount at all"},
                "not an object"
            ]
        });

        let record = normalize_budget(&raw);
        assert_eq!(record.procedure_payments.len(), 1);
        assert_eq!(record.procedure_payments[0].name, "MRI scan");
        assert!(record.procedure_payments.iter().all(PaymentItem::is_billable));
    }

    #[test]
    fn test_currency_defaults_to_usd() {
        assert_eq!(normalize_budget(&json!({})).currency, "USD");
        assert_eq!(normalize_budget(&json!({"currency": ""})).currency, "USD");
        assert_eq!(normalize_budget(&json!({"currency": null})).currency, "USD");
    }

    #[test]
    fn test_absent_payment_terms_become_empty_object() {
        let record = normalize_budget(&json!({}));
        assert_eq!(record.payment_terms, PaymentTerms::default());
    }

    #[test]
    fn test_malformed_numbers_become_unset() {
        let raw = json!({"total_budget": "TBD", "per_patient_total": "four thousand"});
        let record = normalize_budget(&raw);
        assert_eq!(record.total_budget, None);
        assert_eq!(record.per_patient_total, None);
    }
}
