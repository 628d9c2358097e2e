use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

use crate::models::ParsedRecommendations;

static TRAILING_COMMA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",\s*([}\]])").expect("Invalid regex"));

/// Replaces typographic quotes the model sometimes emits with ASCII ones.
pub fn normalize_quotes(text: &str) -> String {
    text.replace(['\u{201C}', '\u{201D}'], "\"")
        .replace('\u{2019}', "'")
}

/// First `{` through last `}`, or `None` when there is no such span.
fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Recovers a JSON value from model output, degrading to the raw text instead of failing.
pub fn parse_json_block(text: &str) -> ParsedRecommendations {
    let normalized = normalize_quotes(text);
    let candidate = object_span(&normalized).unwrap_or(&normalized);
    let candidate = TRAILING_COMMA.replace_all(candidate, "$1");

    match serde_json::from_str::<Value>(&candidate) {
        Ok(value) => ParsedRecommendations::Structured(value),
        Err(e) => {
            debug!("Could not decode model output as JSON: {}", e);
            ParsedRecommendations::RawFallback {
                raw_text: normalized,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn structured(text: &str) -> Value {
        match parse_json_block(text) {
            ParsedRecommendations::Structured(value) => value,
            other => panic!("expected structured result, got {:?}", other),
        }
    }

    #[test]
    fn trailing_commas_are_removed() {
        let value = structured("{\"movies\": [{\"title\": \"X\",}], \"songs\": []}");
        assert_eq!(value, json!({"movies": [{"title": "X"}], "songs": []}));
    }

    #[test]
    fn trailing_comma_before_bracket_with_whitespace() {
        let value = structured("{\"songs\": [1, 2,\n  ],\n}");
        assert_eq!(value, json!({"songs": [1, 2]}));
    }

    #[test]
    fn text_without_json_falls_back() {
        assert_eq!(
            parse_json_block("no json here"),
            ParsedRecommendations::RawFallback {
                raw_text: "no json here".to_string()
            }
        );
    }

    #[test]
    fn smart_quotes_are_normalized() {
        let value =
            structured("{\u{201C}movies\u{201D}: [{\u{201C}title\u{201D}: \u{201C}X\u{201D}}]}");
        assert_eq!(value, json!({"movies": [{"title": "X"}]}));
    }

    #[test]
    fn fallback_carries_normalized_text() {
        let parsed = parse_json_block("It\u{2019}s {broken");
        assert_eq!(
            parsed,
            ParsedRecommendations::RawFallback {
                raw_text: "It's {broken".to_string()
            }
        );
    }

    #[test]
    fn surrounding_prose_and_fences_are_ignored() {
        let text = "Sure! Here you go:\n```json\n{\"movies\": [], \"songs\": []}\n```\nEnjoy.";
        assert_eq!(structured(text), json!({"movies": [], "songs": []}));
    }

    #[test]
    fn span_is_greedy_across_objects() {
        // Two objects side by side are not valid JSON together.
        let parsed = parse_json_block("{\"a\": 1} and {\"b\": 2}");
        assert!(matches!(parsed, ParsedRecommendations::RawFallback { .. }));
    }

    #[test]
    fn whole_text_is_tried_without_braces() {
        assert_eq!(structured("  [1, 2,]  "), json!([1, 2]));
    }

    #[test]
    fn reversed_braces_use_whole_text() {
        let parsed = parse_json_block("} nothing {");
        assert_eq!(
            parsed,
            ParsedRecommendations::RawFallback {
                raw_text: "} nothing {".to_string()
            }
        );
    }
}
