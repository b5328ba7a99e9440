use std::sync::LazyLock;

use regex::Regex;

use crate::domain::common::entities::app_errors::CoreError;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?").expect("static regex"));

/// Recover the first well-formed JSON document from free-form model text.
///
/// The upstream model is not guaranteed to emit pure JSON: responses
/// regularly arrive wrapped in code fences or surrounded by prose. Fence
/// markers are stripped, then the first balanced `{...}` or `[...]` span
/// is taken and parsed. Fails with `MalformedResponse` when no valid JSON
/// is recoverable.
pub fn extract_json(text: &str) -> Result<serde_json::Value, CoreError> {
    let cleaned = CODE_FENCE.replace_all(text, "");
    let cleaned = cleaned.trim();

    if let Some(span) = first_balanced_span(cleaned) {
        if let Ok(value) = serde_json::from_str(span) {
            return Ok(value);
        }
    }

    serde_json::from_str(cleaned)
        .map_err(|e| CoreError::MalformedResponse(format!("no valid JSON in model output: {e}")))
}

/// Locate the first `{...}` or `[...]` span with balanced delimiters,
/// ignoring delimiters inside JSON string literals.
fn first_balanced_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let bytes = text.as_bytes();
    let (open, close) = match bytes[start] {
        b'{' => (b'{', b'}'),
        _ => (b'[', b']'),
    };

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b if b == open => depth += 1,
            b if b == close => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_object_from_fenced_block_with_prose() {
        let text = "Here is the data you asked for:\n```json\n{\"productName\":\"Foo\"}\n```\nLet me know if you need more.";

        let value = extract_json(text).unwrap();
        assert_eq!(value, json!({"productName": "Foo"}));
    }

    #[test]
    fn extracts_first_balanced_array() {
        let text = "Sure! [{\"name\":\"Sugar\"},{\"name\":\"Salt\"}] trailing words";

        let value = extract_json(text).unwrap();
        assert_eq!(value, json!([{"name": "Sugar"}, {"name": "Salt"}]));
    }

    #[test]
    fn braces_inside_strings_do_not_end_the_span() {
        let text = "{\"reason\":\"uses {braces} and \\\"quotes\\\" freely\",\"ok\":true} extra";

        let value = extract_json(text).unwrap();
        assert_eq!(value["ok"], json!(true));
    }

    #[test]
    fn bare_json_without_fences_parses() {
        let value = extract_json("  {\"a\": [1, 2, 3]}  ").unwrap();
        assert_eq!(value, json!({"a": [1, 2, 3]}));
    }

    #[test]
    fn unrecoverable_text_is_malformed_response() {
        let err = extract_json("I could not read the label, sorry.").unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse(_)));
    }

    #[test]
    fn unterminated_object_is_malformed_response() {
        let err = extract_json("{\"productName\": \"Foo\"").unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse(_)));
    }
}
