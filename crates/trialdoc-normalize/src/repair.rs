//! Best-effort textual repair of model output.
//!
//! The repair pass is deliberately bounded to four transformations, applied
//! in order only after a strict parse has failed:
//!
//! 1. strip trailing commas before `}` / `]`
//! 2. convert single-quoted strings to double-quoted
//! 3. quote bare object keys (key position only, so colon-bearing values
//!    like timestamps and URLs survive)
//! 4. collapse doubled quotes
//!
//! If the repaired text still fails to parse, the extraction fails with the
//! raw text attached. No further heuristics are chained; open-ended repair
//! risks fabricating structure the model never produced.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use trialdoc_core::{Result, TrialdocError};

static TRAILING_COMMA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",\s*([}\]])").expect("trailing-comma pattern is valid"));

static SINGLE_QUOTED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"'([^'\n]*)'").expect("single-quote pattern is valid"));

// Bare word in key position: preceded by `{` or `,`, followed by `:`.
static BARE_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([{,]\s*)([A-Za-z_][A-Za-z0-9_\-]*)\s*:").expect("bare-key pattern is valid")
});

// Doubled quotes hugging a value, as in `""Phase 2""`. Scoped to quotes
// adjacent to a word character so legitimate empty-string values (`""`
// followed by `,` or `}`) are left alone.
static DOUBLED_OPEN_QUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"""([A-Za-z0-9])"#).expect("doubled-open-quote pattern is valid"));
static DOUBLED_CLOSE_QUOTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"([A-Za-z0-9])"""#).expect("doubled-close-quote pattern is valid"));

/// Locate the JSON payload inside model output: strip a markdown code fence
/// if present, then take the outermost `{...}` span and discard anything
/// before or after it.
#[must_use = "the extracted block is returned but not used"]
pub fn extract_json_block(text: &str) -> &str {
    let mut text = text.trim();

    // Handle ```json ... ``` wrappers.
    if text.starts_with("```") {
        if let Some(start) = text.find('\n') {
            let after_first_line = &text[start + 1..];
            if let Some(end) = after_first_line.rfind("```") {
                text = after_first_line[..end].trim();
            }
        }
    }

    // Greedy brace match: first `{` through last `}`.
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        if start < end {
            return &text[start..=end];
        }
    }

    text
}

/// Apply the four documented repairs, in order.
#[must_use = "the repaired text is returned but not used"]
pub fn repair(text: &str) -> String {
    let repaired = TRAILING_COMMA_RE.replace_all(text, "$1");
    let repaired = SINGLE_QUOTED_RE.replace_all(&repaired, |caps: &regex::Captures<'_>| {
        format!("\"{}\"", caps[1].replace('"', "\\\""))
    });
    let repaired = BARE_KEY_RE.replace_all(&repaired, "$1\"$2\":");
    let repaired = DOUBLED_OPEN_QUOTE_RE.replace_all(&repaired, "\"$1");
    DOUBLED_CLOSE_QUOTE_RE
        .replace_all(&repaired, "$1\"")
        .into_owned()
}

/// Parse model output into a JSON object, repairing once on failure.
///
/// # Errors
///
/// Returns [`TrialdocError::MalformedOutput`] carrying the unmodified input
/// when the text cannot be parsed as a JSON object even after repair.
pub fn parse_lenient(raw: &str) -> Result<Value> {
    let block = extract_json_block(raw);

    let parsed = serde_json::from_str::<Value>(block).or_else(|first_err| {
        serde_json::from_str::<Value>(&repair(block)).map_err(|_| {
            TrialdocError::MalformedOutput {
                message: format!("invalid JSON after repair: {first_err}"),
                raw_text: raw.to_string(),
            }
        })
    })?;

    if parsed.is_object() {
        Ok(parsed)
    } else {
        Err(TrialdocError::MalformedOutput {
            message: "response is not a JSON object".to_string(),
            raw_text: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_markdown_fences() {
        let fenced = "```json\n{\"name\": \"Study A\"}\n```";
        let value = parse_lenient(fenced).unwrap();
        assert_eq!(value["name"], "Study A");
    }

    #[test]
    fn test_discards_prose_around_object() {
        let noisy = "Here is the extracted data:\n{\"phase\": \"Phase 2\"}\nLet me know!";
        let value = parse_lenient(noisy).unwrap();
        assert_eq!(value["phase"], "Phase 2");
    }

    #[test]
    fn test_repairs_trailing_commas() {
        let value = parse_lenient(r#"{"items": ["a", "b",], "count": 2,}"#).unwrap();
        assert_eq!(value["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_repairs_single_quotes() {
        let value = parse_lenient(r#"{'name': 'Study A'}"#).unwrap();
        assert_eq!(value["name"], "Study A");
    }

    #[test]
    fn test_repairs_bare_keys() {
        let value = parse_lenient(r#"{name: "Study A", phase: "Phase 2"}"#).unwrap();
        assert_eq!(value["name"], "Study A");
        assert_eq!(value["phase"], "Phase 2");
    }

    #[test]
    fn test_bare_key_repair_is_scoped_to_key_position() {
        // A colon-bearing value must survive the bare-key repair.
        let value = parse_lenient(r#"{timeline: "enrollment opens 2024-01-15 09:00 UTC"}"#).unwrap();
        assert_eq!(value["timeline"], "enrollment opens 2024-01-15 09:00 UTC");

        let value = parse_lenient(r#"{link: "https://clinicaltrials.gov/study/NCT01234567",}"#).unwrap();
        assert_eq!(value["link"], "https://clinicaltrials.gov/study/NCT01234567");
    }

    #[test]
    fn test_repairs_doubled_quotes_around_values() {
        let value = parse_lenient(r#"{"phase": ""Phase 2"",}"#).unwrap();
        assert_eq!(value["phase"], "Phase 2");
    }

    #[test]
    fn test_empty_string_values_survive_repair() {
        // The trailing comma forces the repair pass; the empty string must
        // come through intact.
        let value = parse_lenient(r#"{"nct_number": "", "phase": "Phase 2",}"#).unwrap();
        assert_eq!(value["nct_number"], "");
    }

    #[test]
    fn test_unrepairable_input_is_terminal_and_carries_raw_text() {
        let err = parse_lenient("not json at all").unwrap_err();
        match err {
            TrialdocError::MalformedOutput { raw_text, .. } => {
                assert_eq!(raw_text, "not json at all");
            }
            other => panic!("expected MalformedOutput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(matches!(
            parse_lenient("[1, 2, 3]"),
            Err(TrialdocError::MalformedOutput { .. })
        ));
        assert!(matches!(
            parse_lenient("42"),
            Err(TrialdocError::MalformedOutput { .. })
        ));
    }

    #[test]
    fn test_valid_json_is_untouched() {
        let input = r#"{"note": "values like 'single quoted' and , commas stay intact"}"#;
        let value = parse_lenient(input).unwrap();
        assert_eq!(
            value["note"],
            "values like 'single quoted' and , commas stay intact"
        );
    }
}
