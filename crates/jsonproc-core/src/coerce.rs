//! # Coercion Utility — Textual Scalars to Typed Primitives
//!
//! Input trees commonly come out of an XML-to-JSON bridge where every leaf is
//! a string. These functions convert the textual form of a scalar into the
//! primitive its schema declares, or report that the conversion is
//! impossible with `ValidatorError::Coercion`.
//!
//! Schema documents produced the same way may carry keyword values wrapped in
//! an extra pair of quotes (`"minItems": "\"2\""` or `"minItems": "'2'"`). `strip_enclosing_quotes`
//! removes those before a keyword value is interpreted.

use std::borrow::Cow;

use serde_json::{Number, Value};

use crate::error::ValidatorError;

/// Largest magnitude at which every integral `f64` is exactly representable.
const MAX_EXACT_F64_INT: f64 = 9_007_199_254_740_992.0;

/// Remove one matching pair of enclosing `"` or `'` quotes, if present.
pub fn strip_enclosing_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// The textual form of a scalar value, as handed to a leaf validator.
///
/// Strings are returned verbatim, numbers and booleans in their JSON
/// spelling. Returns `None` for `null`, arrays and objects, which have no
/// scalar text.
pub fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Convert text to a boolean. Accepts `true`/`false` in any ASCII case,
/// ignoring surrounding whitespace.
pub fn to_boolean(text: &str) -> Result<bool, ValidatorError> {
    let t = text.trim();
    if t.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if t.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(coercion(text, "boolean"))
    }
}

/// Convert text to an integral JSON number.
///
/// `"3"`, `"-7"` and `"3.0"` are accepted; `"3.5"` and non-finite values are not.
pub fn to_integer(text: &str) -> Result<Number, ValidatorError> {
    let t = text.trim();
    if let Ok(i) = t.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = t.parse::<u64>() {
        return Ok(Number::from(u));
    }
    match t.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_F64_INT => {
            // Exact: the magnitude bound keeps the cast lossless.
            Ok(Number::from(f as i64))
        }
        _ => Err(coercion(text, "integer")),
    }
}

/// Convert text to a JSON number, preferring an integer representation when
/// the text is integral.
pub fn to_number(text: &str) -> Result<Number, ValidatorError> {
    let t = text.trim();
    if let Ok(i) = t.parse::<i64>() {
        return Ok(Number::from(i));
    }
    if let Ok(u) = t.parse::<u64>() {
        return Ok(Number::from(u));
    }
    t.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
        .ok_or_else(|| coercion(text, "number"))
}

/// Convert text to a finite `f64`, for comparisons against numeric bounds.
pub fn to_f64(text: &str) -> Result<f64, ValidatorError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| coercion(text, "number"))
}

/// Lossy view of a JSON number as `f64`.
pub fn number_as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

fn coercion(text: &str, target: &'static str) -> ValidatorError {
    ValidatorError::Coercion {
        value: text.to_string(),
        target,
    }
}
