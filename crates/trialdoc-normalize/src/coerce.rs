//! Field-level coercion helpers.
//!
//! These encode the defaulting policy in one place: every normalizer calls
//! through here, so the leniency rules are auditable rather than scattered
//! across call sites. Nothing in this module can fail; malformed values
//! coerce to the documented defaults.

use serde_json::{Map, Value};

/// Coerce a value into a list of non-empty trimmed strings.
///
/// - array: each element trimmed/stringified, empty entries dropped
/// - string containing newlines: split on newlines, trimmed, empties dropped
/// - any other non-empty string: wrapped as a single-element list
/// - anything else: empty list
#[must_use = "the coerced list is returned but not used"]
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let text = scalar_to_string(item);
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            })
            .collect(),
        Some(Value::String(s)) if s.contains('\n') => s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        _ => Vec::new(),
    }
}

/// Coerce a value into a string, defaulting to empty.
///
/// Numbers and booleans are stringified; objects, arrays, and null become
/// the empty string.
#[must_use = "the coerced string is returned but not used"]
pub fn lenient_string(value: Option<&Value>) -> String {
    value.map(|v| scalar_to_string(v).trim().to_string()).unwrap_or_default()
}

/// Coerce a value into a non-empty string, or `None`.
#[must_use = "the coerced string is returned but not used"]
pub fn optional_string(value: Option<&Value>) -> Option<String> {
    let text = lenient_string(value);
    (!text.is_empty()).then_some(text)
}

/// Coerce a value into a finite number, or `None`.
///
/// Accepts JSON numbers and numeric strings (with surrounding whitespace or
/// a leading currency symbol); anything else, including NaN and infinities,
/// is `None`.
#[must_use = "the coerced number is returned but not used"]
pub fn lenient_f64(value: Option<&Value>) -> Option<f64> {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let trimmed = s.trim().trim_start_matches('$').replace(',', "");
            trimmed.parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Coerce a value into a non-negative integer, defaulting to 0.
///
/// Fractional numbers are truncated; negative and malformed values become 0.
#[must_use = "the coerced count is returned but not used"]
pub fn count_or_zero(value: Option<&Value>) -> u32 {
    lenient_f64(value)
        .filter(|n| *n >= 0.0)
        .map_or(0, |n| n as u32)
}

/// View a value as an object, if it is one.
#[inline]
#[must_use = "the object reference is returned but not used"]
pub fn object(value: Option<&Value>) -> Option<&Map<String, Value>> {
    value.and_then(Value::as_object)
}

/// The first present field among `keys`, for defensively reading records
/// whose key spelling drifts (`amount` vs `payment_amount`).
#[must_use = "the field reference is returned but not used"]
pub fn first_field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| object.get(*key))
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
