//! Null leaf validator.

use jsonproc_core::{ProcessorError, ValidatorError};
use serde_json::Value;

use crate::keyword::SchemaNode;

/// Check that the content found at a `null`-typed position can be discarded,
/// and yield `null`.
///
/// `text` is the JSON rendering of the element. Scalar content, including an
/// explicit `null`, is tolerated: bridged documents often carry an empty
/// string or a placeholder where the schema expects nothing. Structured
/// content (an array or object) would silently lose data and is rejected.
/// The schema carries no null-specific keywords.
///
/// # Errors
///
/// `ValidatorError::ConstraintViolated` on the `type` keyword for structured content.
pub fn validate_null(_schema: &SchemaNode, text: &str) -> Result<Value, ProcessorError> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') || trimmed.starts_with('{') {
        return Err(ValidatorError::ConstraintViolated {
            keyword: "type",
            subject: format!("value {text}"),
            detail: "expected null or a discardable scalar".to_string(),
        }
        .into());
    }
    Ok(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    #[test]
    fn test_scalars_become_null() {
        let s = Map::new();
        for v in [json!(1), json!("x"), json!(true), json!(""), Value::Null] {
            assert_eq!(validate_null(&s, &v.to_string()).unwrap(), Value::Null);
        }
    }

    #[test]
    fn test_string_with_bracket_is_scalar() {
        let s = Map::new();
        assert!(validate_null(&s, &json!("[not structured").to_string()).is_ok());
    }

    #[test]
    fn test_structured_content_rejected() {
        let s = Map::new();
        assert!(validate_null(&s, &json!([1]).to_string()).is_err());
        assert!(validate_null(&s, &json!({"a": 1}).to_string()).is_err());
    }
}
