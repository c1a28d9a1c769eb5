//! Readers for constraint keywords on a schema node.
//!
//! Keyword values may be JSON numbers and booleans, or strings carrying the
//! same text (often wrapped in an extra pair of quotes). Every reader strips
//! enclosing quotes first; a present-but-empty string means the keyword is
//! absent.

use std::borrow::Cow;

use jsonproc_core::coerce::{self, strip_enclosing_quotes};
use jsonproc_core::{ParserError, ProcessorError, ValidatorError};
use serde_json::{Map, Value};

/// Schema node: the object variant of a JSON value.
pub type SchemaNode = Map<String, Value>;

/// Policy for elements (or properties) not covered by the positional tuple
/// (or by `properties`/`patternProperties`).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AdditionalPolicy {
    /// Accept without further validation. Used for `true`, `{}`, and absence.
    #[default]
    Allow,
    /// Reject. Used for `false`.
    Forbid,
    /// Validate against this schema.
    Schema(SchemaNode),
}

/// Quote-stripped text of a scalar keyword, or `None` when the keyword is
/// absent, `null`, or an empty string.
pub(crate) fn scalar_keyword<'a>(
    schema: &'a SchemaNode,
    keyword: &'static str,
) -> Result<Option<Cow<'a, str>>, ValidatorError> {
    let text = match schema.get(keyword) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => Cow::Borrowed(strip_enclosing_quotes(s)),
        Some(Value::Number(n)) => Cow::Owned(n.to_string()),
        Some(Value::Bool(b)) => Cow::Owned(b.to_string()),
        Some(other) => {
            return Err(ValidatorError::InvalidSchema(format!(
                "{keyword} must be a scalar value, found {other}"
            )))
        }
    };
    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

/// Read a non-negative count keyword such as `minItems` or `maxLength`.
///
/// # Errors
///
/// `ParserError::Keyword` if the value is not an integer (integral floats
/// such as `2.0` are accepted); `ValidatorError::InvalidSchema` if it is
/// negative.
pub(crate) fn read_count(
    schema: &SchemaNode,
    keyword: &'static str,
) -> Result<Option<usize>, ProcessorError> {
    let Some(text) = scalar_keyword(schema, keyword)? else {
        return Ok(None);
    };
    let unparseable = |expected: &'static str| ParserError::Keyword {
        keyword,
        value: text.to_string(),
        expected,
    };
    let n = coerce::to_integer(&text).map_err(|_| unparseable("an integer"))?;
    if let Some(negative) = n.as_i64().filter(|i| *i < 0) {
        return Err(ValidatorError::InvalidSchema(format!(
            "Invalid {keyword} constraint in the schema: {negative}"
        ))
        .into());
    }
    n.as_u64()
        .and_then(|u| usize::try_from(u).ok())
        .map(Some)
        .ok_or_else(|| ProcessorError::from(unparseable("an integer within the platform's size range")))
}

/// Read a boolean keyword such as `uniqueItems`. Absent means `false`.
pub(crate) fn read_flag(schema: &SchemaNode, keyword: &'static str) -> Result<bool, ProcessorError> {
    let Some(text) = scalar_keyword(schema, keyword)? else {
        return Ok(false);
    };
    coerce::to_boolean(&text).map_err(|_| {
        ParserError::Keyword {
            keyword,
            value: text.to_string(),
            expected: "a boolean",
        }
        .into()
    })
}

/// Read a string keyword such as `pattern`.
pub(crate) fn read_string(
    schema: &SchemaNode,
    keyword: &'static str,
) -> Result<Option<String>, ProcessorError> {
    Ok(scalar_keyword(schema, keyword)?.map(Cow::into_owned))
}

/// Read the allowed values of `enum` and `const`, if either is present.
///
/// `const: x` is read as a one-entry enum. When both are present both apply,
/// so the returned lists are checked independently.
pub(crate) fn read_allowed(schema: &SchemaNode) -> Result<Vec<(&'static str, Vec<&Value>)>, ValidatorError> {
    let mut lists = Vec::new();
    match schema.get("enum") {
        None => {}
        Some(Value::Array(entries)) => lists.push(("enum", entries.iter().collect())),
        Some(other) => {
            return Err(ValidatorError::InvalidSchema(format!(
                "enum must be an array, found {other}"
            )))
        }
    }
    if let Some(value) = schema.get("const") {
        lists.push(("const", vec![value]));
    }
    Ok(lists)
}

/// Quote-stripped text of an `enum`/`const` entry. Entries without scalar
/// text (null, arrays, objects) never match a coerced scalar.
pub(crate) fn entry_text(entry: &Value) -> Option<Cow<'_, str>> {
    match coerce::scalar_text(entry)? {
        Cow::Borrowed(s) => Some(Cow::Borrowed(strip_enclosing_quotes(s))),
        Cow::Owned(s) => Some(Cow::Owned(s)),
    }
}

/// Read an `additionalItems` / `additionalProperties` policy.
///
/// A string value is interpreted after quote stripping: `"true"`/`"false"`
/// select the boolean policies and text starting with `{` is parsed as a
/// schema node.
///
/// # Errors
///
/// `ParserError::Fragment` if a textual schema cannot be parsed,
/// `ParserError::Keyword` for other unparseable text, and
/// `ValidatorError::InvalidSchema` for numbers and arrays.
pub(crate) fn read_additional(
    schema: &SchemaNode,
    keyword: &'static str,
) -> Result<AdditionalPolicy, ProcessorError> {
    match schema.get(keyword) {
        None | Some(Value::Null) | Some(Value::Bool(true)) => Ok(AdditionalPolicy::Allow),
        Some(Value::Bool(false)) => Ok(AdditionalPolicy::Forbid),
        Some(Value::Object(node)) => Ok(policy_from_node(node.clone())),
        Some(Value::String(s)) => additional_from_text(strip_enclosing_quotes(s).trim(), keyword),
        Some(other) => Err(ValidatorError::InvalidSchema(format!(
            "{keyword} must be a boolean or a schema object, found {other}"
        ))
        .into()),
    }
}

fn additional_from_text(text: &str, keyword: &'static str) -> Result<AdditionalPolicy, ProcessorError> {
    if text.is_empty() {
        return Ok(AdditionalPolicy::Allow);
    }
    if let Ok(allowed) = coerce::to_boolean(text) {
        return Ok(if allowed {
            AdditionalPolicy::Allow
        } else {
            AdditionalPolicy::Forbid
        });
    }
    if text.starts_with('{') {
        let node: SchemaNode =
            serde_json::from_str(text).map_err(|source| ParserError::Fragment {
                keyword,
                fragment: text.to_string(),
                source,
            })?;
        return Ok(policy_from_node(node));
    }
    Err(ParserError::Keyword {
        keyword,
        value: text.to_string(),
        expected: "a boolean or a schema object",
    }
    .into())
}

fn policy_from_node(node: SchemaNode) -> AdditionalPolicy {
    if node.is_empty() {
        AdditionalPolicy::Allow
    } else {
        AdditionalPolicy::Schema(node)
    }
}

/// Borrow a keyword value as a schema node.
pub(crate) fn as_node<'a>(value: &'a Value, context: &str) -> Result<&'a SchemaNode, ValidatorError> {
    value.as_object().ok_or_else(|| {
        ValidatorError::InvalidSchema(format!(
            "{context} must be a schema object, found {value}"
        ))
    })
}
