//! Lenient decoding helpers.
//!
//! The upstream mixes strings and bare numbers for the same field depending on
//! the endpoint (`"dividend": "0.25"` vs `"dividend": 0.25`). Everything is kept
//! as display text, and rows may carry several names for the same field.

use serde_json::Value;

/// Render a scalar JSON value as trimmed display text.
///
/// Returns `None` for null, empty strings, arrays and objects.
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_as_text() {
        assert_eq!(value_as_text(&json!(" 0.25 ")), Some("0.25".to_string()));
        assert_eq!(value_as_text(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(value_as_text(&json!(12)), Some("12".to_string()));
        assert_eq!(value_as_text(&json!("")), None);
        assert_eq!(value_as_text(&json!(null)), None);
        assert_eq!(value_as_text(&json!(["a"])), None);
        assert_eq!(value_as_text(&json!({"a": 1})), None);
    }
}
