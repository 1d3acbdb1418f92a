//! Lenient JSON extraction from LLM output.
//!
//! Models wrap JSON in prose or markdown code fences despite instructions.
//! This is the single adapter every call site uses to recover the value;
//! failures are typed, never panics.

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
#[error("no JSON object found in response: {reason}")]
pub struct JsonExtractError {
    pub reason: String,
    pub raw: String,
}

/// Recover a JSON value from free-form model output: code fences are
/// stripped, surrounding prose is trimmed to the outermost braces.
pub fn extract_json(response: &str) -> Result<Value, JsonExtractError> {
    let candidate = isolate_json(response);
    serde_json::from_str(candidate).map_err(|e| JsonExtractError {
        reason: e.to_string(),
        raw: response.to_string(),
    })
}

/// Slice out the JSON-looking part of the response, handling markdown code
/// blocks and leading/trailing prose.
fn isolate_json(response: &str) -> &str {
    let trimmed = response.trim();

    // Handle ```json ... ``` blocks
    if let Some(start) = trimmed.find("```json") {
        let json_start = start + 7;
        if let Some(end) = trimmed[json_start..].find("```") {
            return trimmed[json_start..json_start + end].trim();
        }
    }

    // Handle ``` ... ``` blocks
    if let Some(start) = trimmed.find("```") {
        let json_start = start + 3;
        // Skip past any language identifier on the same line
        let after_tick = &trimmed[json_start..];
        let content_start = after_tick.find('\n').map_or(0, |n| n + 1);
        if let Some(end) = after_tick[content_start..].find("```") {
            return after_tick[content_start..content_start + end].trim();
        }
    }

    // Trim to the outermost braces
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if start < end {
                return &trimmed[start..=end];
            }
        }
    }

    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_raw_json() {
        let value = extract_json(r#"{"summary": "ok"}"#).unwrap();
        assert_eq!(value["summary"], "ok");
    }

    #[test]
    fn extract_from_json_code_block() {
        let input = "Here is the record:\n```json\n{\"summary\": \"ok\"}\n```\nDone.";
        let value = extract_json(input).unwrap();
        assert_eq!(value["summary"], "ok");
    }

    #[test]
    fn extract_from_bare_code_block() {
        let input = "```\n{\"summary\": \"ok\"}\n```";
        let value = extract_json(input).unwrap();
        assert_eq!(value["summary"], "ok");
    }

    #[test]
    fn extract_with_surrounding_prose() {
        let input = "Sure! Here's the data: {\"summary\": \"ok\"} Hope that helps.";
        let value = extract_json(input).unwrap();
        assert_eq!(value["summary"], "ok");
    }

    #[test]
    fn nested_braces_survive() {
        let input = r#"{"personal_info": {"name": "Ada"}, "summary": "ok"}"#;
        let value = extract_json(input).unwrap();
        assert_eq!(value["personal_info"]["name"], "Ada");
    }

    #[test]
    fn no_json_is_a_typed_failure() {
        let err = extract_json("I could not process this document.").unwrap_err();
        assert!(err.raw.contains("could not process"));
    }

    #[test]
    fn malformed_json_is_a_typed_failure() {
        let err = extract_json(r#"{"summary": "unterminated"#).unwrap_err();
        assert!(!err.reason.is_empty());
    }
}
