//! Nominal (string) leaf validator.

use jsonproc_core::{ProcessorError, ValidatorError};
use regex::Regex;
use serde_json::Value;

use super::render_entries;
use crate::keyword::{entry_text, read_allowed, read_count, read_string, SchemaNode};

/// Accept the textual form of a scalar as a string and check length,
/// `pattern`, `enum` and `const` constraints.
///
/// Lengths count characters, not bytes. `pattern` is an unanchored search.
///
/// # Errors
///
/// `ValidatorError::ConstraintViolated` if a constraint is violated;
/// `ValidatorError::InvalidSchema` if `pattern` is not a valid regex.
pub fn validate_nominal(schema: &SchemaNode, text: &str) -> Result<Value, ProcessorError> {
    let subject = || format!("string {text:?}");
    let length = text.chars().count();

    if let Some(min) = read_count(schema, "minLength")? {
        if length < min {
            return Err(violation(
                "minLength",
                subject(),
                format!("expected at least {min} characters, found {length}"),
            ));
        }
    }
    if let Some(max) = read_count(schema, "maxLength")? {
        if length > max {
            return Err(violation(
                "maxLength",
                subject(),
                format!("expected at most {max} characters, found {length}"),
            ));
        }
    }

    if let Some(pattern) = read_string(schema, "pattern")? {
        let re = Regex::new(&pattern).map_err(|e| {
            ValidatorError::InvalidSchema(format!("invalid pattern {pattern:?}: {e}"))
        })?;
        if !re.is_match(text) {
            return Err(violation(
                "pattern",
                subject(),
                format!("expected a match for {pattern:?}"),
            ));
        }
    }

    for (keyword, allowed) in read_allowed(schema)? {
        let matched = allowed
            .iter()
            .any(|entry| entry_text(entry).is_some_and(|t| t == text));
        if !matched {
            return Err(violation(
                keyword,
                subject(),
                format!("expected one of {}", render_entries(&allowed)),
            ));
        }
    }

    Ok(Value::String(text.to_string()))
}

fn violation(keyword: &'static str, subject: String, detail: String) -> ProcessorError {
    ValidatorError::ConstraintViolated {
        keyword,
        subject,
        detail,
    }
    .into()
}
