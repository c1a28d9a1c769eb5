//! Boolean leaf validator.

use jsonproc_core::coerce;
use jsonproc_core::{ProcessorError, ValidatorError};
use serde_json::Value;

use super::render_entries;
use crate::keyword::{entry_text, read_allowed, SchemaNode};

/// Coerce the textual form of a scalar to a boolean and check `enum`/`const`.
///
/// # Errors
///
/// `ValidatorError::Coercion` if the text is not `true`/`false`;
/// `ValidatorError::ConstraintViolated` if the value is not an allowed one.
pub fn validate_boolean(schema: &SchemaNode, text: &str) -> Result<Value, ProcessorError> {
    let value = coerce::to_boolean(text)?;

    for (keyword, allowed) in read_allowed(schema)? {
        let matched = allowed.iter().any(|entry| {
            entry_text(entry)
                .and_then(|t| coerce::to_boolean(&t).ok())
                .is_some_and(|b| b == value)
        });
        if !matched {
            return Err(ValidatorError::ConstraintViolated {
                keyword,
                subject: format!("boolean {value}"),
                detail: format!("expected one of {}", render_entries(&allowed)),
            }
            .into());
        }
    }

    Ok(Value::Bool(value))
}
