//! Normalization into [`CtaData`].

use serde_json::Value;
use trialdoc_core::records::DEFAULT_CURRENCY;
use trialdoc_core::CtaData;

use crate::coerce;

/// Coerce a parsed extraction result into a [`CtaData`] record.
///
/// This function cannot fail; missing and malformed fields default per the
/// record's invariants.
#[must_use = "the normalized record is returned but not used"]
pub fn normalize_cta(value: &Value) -> CtaData {
    let empty = serde_json::Map::new();
    let obj = coerce::object(Some(value)).unwrap_or(&empty);

    CtaData {
        sponsor_name: coerce::lenient_string(obj.get("sponsor_name")),
        currency: coerce::optional_string(obj.get("currency"))
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        payment_info: coerce::lenient_string(obj.get("payment_info")),
        timeline: coerce::lenient_string(obj.get("timeline")),
        invoice_requirements: coerce::string_list(obj.get("invoice_requirements")),
        payment_hold_conditions: coerce::string_list(obj.get("payment_hold_conditions")),
        important_notes: coerce::string_list(obj.get("important_notes")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_cta() {
        let raw = json!({
            "sponsor_name": "Acme Therapeutics",
            "currency": "USD",
            "payment_info": "Net 45 from receipt of a compliant invoice",
            "timeline": "Effective 2024-03-01 through last patient last visit",
            "invoice_requirements": ["study number", "site number", "PI name"],
            "payment_hold_conditions": ["unresolved data queries"],
            "important_notes": []
        });

        let record = normalize_cta(&raw);
        assert_eq!(record.sponsor_name, "Acme Therapeutics");
        assert_eq!(record.invoice_requirements.len(), 3);
        assert_eq!(record.payment_hold_conditions, vec!["unresolved data queries"]);
        assert!(record.important_notes.is_empty());
    }

    #[test]
    fn test_empty_object_defaults_everything() {
        let record = normalize_cta(&json!({}));
        assert_eq!(record, CtaData::default());
        assert_eq!(record.currency, "USD");
    }

    #[test]
    fn test_newline_delimited_requirements_are_split() {
        let raw = json!({
            "invoice_requirements": "study number\nsite number\nPI name"
        });
        let record = normalize_cta(&raw);
        assert_eq!(
            record.invoice_requirements,
            vec!["study number", "site number", "PI name"]
        );
    }
}
