//! Placeholder-name detection.
//!
//! Some models substitute placeholder values ("John Doe", "REDACTED",
//! "Sample Sponsor") instead of copying names from the document. The
//! smart-extract path uses this predicate to decide whether a structurally
//! valid response should be retried through the fallback provider.

use serde_json::Value;

/// Tokens that indicate a censored or invented name.
const PLACEHOLDER_TOKENS: &[&str] = &[
    "john",
    "jane",
    "doe",
    "smith",
    "patient",
    "redacted",
    "confidential",
    "example",
    "sample",
    "test",
];

/// Top-level fields whose values are checked for placeholders.
const NAME_FIELDS: &[&str] = &["name", "sponsor_name"];

/// Whether a parsed extraction result looks censored.
///
/// Checks the name-bearing top-level fields for placeholder tokens, matching
/// whole words case-insensitively so values like "Testosterone Study" are not
/// flagged by the `test` token.
#[must_use = "the censorship check result is returned but not used"]
pub fn looks_censored(value: &Value) -> bool {
    let Some(object) = value.as_object() else {
        return false;
    };

    NAME_FIELDS
        .iter()
        .filter_map(|field| object.get(*field).and_then(Value::as_str))
        .any(contains_placeholder_token)
}

fn contains_placeholder_token(text: &str) -> bool {
    text.to_lowercase()
        .split(|c: char| !c.is_alphabetic())
        .any(|word| PLACEHOLDER_TOKENS.contains(&word))
}
