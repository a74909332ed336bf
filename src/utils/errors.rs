use serde_json::Value;

/// Extract the human-readable message from an error response body
///
/// Looks at `detail` first, then `message`. The backend's request validator
/// reports `detail` as a list like:
/// `[{"loc": ["body", "pin"], "msg": "String should match pattern", ...}]`
///
/// in which case every `msg` is joined with "; ".
///
/// Returns `None` for non-JSON bodies and bodies without a usable message.
pub fn extract_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    match json.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let joined = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>()
                .join("; ");
            if !joined.is_empty() {
                return Some(joined);
            }
        }
        _ => {}
    }

    json.get("message")
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(|m| m.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        let body = r#"{"detail": "Wrong PIN. 2 tries left."}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Wrong PIN. 2 tries left.")
        );
    }

    #[test]
    fn test_message_fallback() {
        let body = r#"{"success": false, "message": "Passwords do not match"}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Passwords do not match")
        );
    }

    #[test]
    fn test_validation_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "pin"], "msg": "String should match pattern '^\\d{4}$'"},
            {"loc": ["body", "amount"], "msg": "Input should be greater than 0"}
        ]}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("String should match pattern '^\\d{4}$'; Input should be greater than 0")
        );
    }

    #[test]
    fn test_unusable_bodies() {
        assert_eq!(extract_error_message("Internal Server Error"), None);
        assert_eq!(extract_error_message(r#"{"detail": ""}"#), None);
        assert_eq!(extract_error_message(r#"{"status": 500}"#), None);
    }
}
