//! Staged parsing of service output into a detail record
//!
//! Responses are tried in order:
//!
//! 1. the greedy `{ ... }` span decoded as a JSON object
//! 2. `key: value` / `key - value` lines
//! 3. a synthesized record built from the document itself
//!
//! Nothing here fails: each stage that cannot produce a record hands over to
//! the next one.

use crate::types::{Extraction, ParseStage};
use lexdraft_domain::{DetailRecord, DEFAULT_DOCUMENT_TYPE, DOCUMENT_TYPE_KEY};
use serde_json::Value;
use tracing::{debug, warn};

/// Key used for the document excerpt in the fallback record
pub const CONTENT_PREVIEW_KEY: &str = "Content Preview";

/// Parse a service response, falling back stage by stage
pub fn parse_response(response: &str, document_content: &str, preview_chars: usize) -> Extraction {
    if let Some(details) = parse_strict(response) {
        debug!("Parsed {} details from JSON object", details.len());
        return Extraction {
            details,
            stage: ParseStage::StrictJson,
        };
    }

    let details = parse_lines(response);
    if !details.is_empty() {
        debug!("Parsed {} details from response lines", details.len());
        return Extraction {
            details,
            stage: ParseStage::HeuristicLines,
        };
    }

    warn!("Response had no recognisable details, using content preview");
    Extraction {
        details: fallback(document_content, preview_chars),
        stage: ParseStage::Fallback,
    }
}

/// Greedy span from the first `{` to the last `}`
pub fn find_json_candidate(response: &str) -> Option<&str> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    (end > start).then(|| &response[start..=end])
}

/// Decode the JSON candidate, if it is an object
pub fn parse_strict(response: &str) -> Option<DetailRecord> {
    let candidate = find_json_candidate(response)?;

    let value: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(e) => {
            debug!("JSON candidate did not parse: {}", e);
            return None;
        }
    };

    // The span starts with `{` and ends with `}`, so valid JSON here is an object
    let Value::Object(map) = value else {
        return None;
    };

    Some(
        map.into_iter()
            .filter_map(|(key, value)| render_value(value).map(|text| (key, text)))
            .collect(),
    )
}

/// Text form of a JSON value; `None` for null
fn render_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        // Compact JSON text for nested values
        other => Some(other.to_string()),
    }
}

/// Pick up `key: value` lines, then `key - value` lines
pub fn parse_lines(response: &str) -> DetailRecord {
    let mut details = DetailRecord::new();

    for line in response.lines() {
        if let Some((key, value)) = split_line(line) {
            details.insert(key, value);
        }
    }

    details
}

fn split_line(line: &str) -> Option<(&str, &str)> {
    // A matched colon decides the line even if trimming empties a side
    let (key, value) = split_at_first(line, ':').or_else(|| split_at_first(line, '-'))?;
    let (key, value) = (key.trim(), value.trim());
    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

/// Split at the first `separator`; matches only with text on both sides
fn split_at_first(line: &str, separator: char) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(separator)?;
    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

/// Record used when the response carries nothing usable
pub fn fallback(document_content: &str, preview_chars: usize) -> DetailRecord {
    let mut preview: String = document_content.chars().take(preview_chars).collect();
    preview.push_str("...");

    let mut details = DetailRecord::new();
    details.insert(DOCUMENT_TYPE_KEY, DEFAULT_DOCUMENT_TYPE);
    details.insert(CONTENT_PREVIEW_KEY, preview);
    details
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_object() {
        let response = r#"{"Document Type": "Lease", "Party 1 Name": "Alice", "Date": "2024-03-01"}"#;
        let extraction = parse_response(response, "doc", 100);

        assert_eq!(extraction.stage, ParseStage::StrictJson);
        let keys: Vec<_> = extraction.details.keys().collect();
        assert_eq!(keys, vec!["Document Type", "Party 1 Name", "Date"]);
        assert_eq!(extraction.details.get("Party 1 Name"), Some("Alice"));
    }

    #[test]
    fn test_json_with_surrounding_chatter() {
        let response = "Sure! Here you go:\n```json\n{\"Governing Law\": \"State of Texas\"}\n```\nAnything else?";
        let extraction = parse_response(response, "doc", 100);

        assert_eq!(extraction.stage, ParseStage::StrictJson);
        assert_eq!(extraction.details.len(), 1);
        assert_eq!(extraction.details.get("Governing Law"), Some("State of Texas"));
    }

    #[test]
    fn test_json_value_rendering() {
        let response = r#"{"Consideration": 100000, "Signed": true, "Witness": null, "Parties": ["A", "B"], "Meta": {"k": 1}}"#;
        let details = parse_strict(response).unwrap();

        assert_eq!(details.get("Consideration"), Some("100000"));
        assert_eq!(details.get("Signed"), Some("true"));
        assert!(!details.contains_key("Witness"));
        assert_eq!(details.get("Parties"), Some(r#"["A","B"]"#));
        assert_eq!(details.get("Meta"), Some(r#"{"k":1}"#));
    }

    #[test]
    fn test_greedy_span_covers_all_braces() {
        let response = "a {x} b {y} c";
        assert_eq!(find_json_candidate(response), Some("{x} b {y}"));
        assert_eq!(find_json_candidate("} before {"), None);
        assert_eq!(find_json_candidate("no braces"), None);
    }

    #[test]
    fn test_object_inside_array_is_found_by_greedy_span() {
        let response = "[{\"a\": 1}]\nDate: 2024-01-01";
        let extraction = parse_response(response, "doc", 100);
        assert_eq!(extraction.stage, ParseStage::StrictJson);
        assert_eq!(extraction.details.get("a"), Some("1"));
        assert!(!extraction.details.contains_key("Date"));
    }

    #[test]
    fn test_broken_json_falls_through_to_lines() {
        let response = "{ Party 1 Name: Alice,\nParty 2 Name: Bob }";
        let extraction = parse_response(response, "doc", 100);
        assert_eq!(extraction.stage, ParseStage::HeuristicLines);
        assert_eq!(extraction.details.get("Party 2 Name"), Some("Bob }"));
    }

    #[test]
    fn test_line_parsing() {
        let response = "Date: 2024-01-01\nParty 1 Name: John Smith\nGoverning Law - State of Oregon";
        let extraction = parse_response(response, "doc", 100);

        assert_eq!(extraction.stage, ParseStage::HeuristicLines);
        assert_eq!(extraction.details.get("Date"), Some("2024-01-01"));
        assert_eq!(extraction.details.get("Party 1 Name"), Some("John Smith"));
        assert_eq!(extraction.details.get("Governing Law"), Some("State of Oregon"));
    }

    #[test]
    fn test_line_splits_at_first_colon() {
        let details = parse_lines("Effective Time: 10:30 AM");
        assert_eq!(details.get("Effective Time"), Some("10:30 AM"));
    }

    #[test]
    fn test_unmatched_colon_retries_hyphen() {
        let details = parse_lines("Lease Term - see schedule:\n:ref - value\nkey only:");
        assert_eq!(details.get("Lease Term"), Some("see schedule:"));
        assert_eq!(details.get(":ref"), Some("value"));
        assert_eq!(details.len(), 2);
    }

    #[test]
    fn test_blank_colon_match_is_not_retried_as_hyphen() {
        // Both lines match the colon form, then trim to an empty side
        let details = parse_lines("Term - one year:   \n   : Notice - 30 days");
        assert!(details.is_empty());
    }

    #[test]
    fn test_lines_without_separator_are_skipped() {
        let details = parse_lines("Hello there\n\nConsideration: $5\n   \nthanks");
        assert_eq!(details.len(), 1);
    }

    #[test]
    fn test_repeated_key_later_wins() {
        let details = parse_lines("Date: 2024-01-01\nParty: A\nDate: 2025-06-30");
        assert_eq!(details.get("Date"), Some("2025-06-30"));
        assert_eq!(details.keys().next(), Some("Date"));
        assert_eq!(details.len(), 2);
    }

    #[test]
    fn test_malformed_response_uses_fallback() {
        let content = "PROPERTY TRANSFER AGREEMENT";
        let extraction = parse_response(
            "Sure! Here's the info you asked for with no structure.",
            content,
            100,
        );

        assert_eq!(extraction.stage, ParseStage::Fallback);
        assert_eq!(extraction.details.get("Document Type"), Some("Legal Document"));
        assert_eq!(
            extraction.details.get("Content Preview"),
            Some("PROPERTY TRANSFER AGREEMENT...")
        );
    }

    #[test]
    fn test_fallback_truncates_by_characters() {
        let content = "é".repeat(150);
        let details = fallback(&content, 100);
        let preview = details.get(CONTENT_PREVIEW_KEY).unwrap();

        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_empty_json_object_is_strict() {
        let extraction = parse_response("{}", "doc", 100);
        assert_eq!(extraction.stage, ParseStage::StrictJson);
        assert!(extraction.details.is_empty());
    }
}
