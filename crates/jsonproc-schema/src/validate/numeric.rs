//! Numeric leaf validator for the `number` and `integer` type tokens.
//!
//! Integral values and integral bounds are compared exactly, so integers
//! beyond 2^53 are not rounded before a bound check. Only comparisons that
//! involve a fractional operand fall back to `f64`.

use std::cmp::Ordering;
use std::fmt;

use jsonproc_core::coerce::{self, strip_enclosing_quotes};
use jsonproc_core::{ParserError, ProcessorError, ValidatorError, TYPE_KEY};
use serde_json::{Number, Value};

use super::render_entries;
use crate::keyword::{entry_text, read_allowed, scalar_keyword, SchemaNode};

/// Tolerance for `multipleOf` on fractional divisors.
const MULTIPLE_OF_EPSILON: f64 = 1e-9;

/// `i64::MIN` as an `f64` (exact).
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
/// `u64::MAX + 1` as an `f64` (exact).
const U64_END_F64: f64 = 18_446_744_073_709_551_616.0;

/// `exclusiveMinimum`/`exclusiveMaximum` come in two shapes: a boolean that
/// makes `minimum`/`maximum` exclusive, or a bound of their own.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Exclusive {
    Absent,
    Flag(bool),
    Bound(Magnitude),
}

/// A value or bound, exact when integral.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Magnitude {
    Integral(i128),
    Fractional(f64),
}

impl Magnitude {
    fn of_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            Self::Integral(i128::from(i))
        } else if let Some(u) = n.as_u64() {
            Self::Integral(i128::from(u))
        } else {
            Self::of_f64(coerce::number_as_f64(n))
        }
    }

    /// Integral floats in the `i64`..`u64` range become exact integers.
    fn of_f64(f: f64) -> Self {
        if f.fract() == 0.0 && (I64_MIN_F64..U64_END_F64).contains(&f) {
            Self::Integral(f as i128)
        } else {
            Self::Fractional(f)
        }
    }

    fn parse(text: &str) -> Option<Self> {
        let t = text.trim();
        if let Ok(i) = t.parse::<i128>() {
            return Some(Self::Integral(i));
        }
        coerce::to_f64(t).ok().map(Self::of_f64)
    }

    fn as_f64(self) -> f64 {
        match self {
            Self::Integral(i) => i as f64,
            Self::Fractional(f) => f,
        }
    }

    fn compare(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integral(a), Self::Integral(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }

    /// `divisor` must be positive.
    fn is_multiple_of(self, divisor: Self) -> bool {
        match (self, divisor) {
            (Self::Integral(a), Self::Integral(d)) => a % d == 0,
            _ => {
                let quotient = self.as_f64() / divisor.as_f64();
                (quotient - quotient.round()).abs() <= MULTIPLE_OF_EPSILON
            }
        }
    }
}

impl fmt::Display for Magnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integral(i) => write!(f, "{i}"),
            Self::Fractional(x) => write!(f, "{x}"),
        }
    }
}

/// Coerce the textual form of a scalar to a number and check numeric bounds.
///
/// A schema whose `type` is `integer` requires an integral value; `number`
/// accepts any finite value and keeps integral text as an integer.
///
/// # Errors
///
/// `ValidatorError::Coercion` if the text is not a (suitable) number,
/// `ValidatorError::ConstraintViolated` if a bound is violated, and
/// `ParserError::Keyword` / `ValidatorError::InvalidSchema` for malformed
/// bound keywords.
pub fn validate_numeric(schema: &SchemaNode, text: &str) -> Result<Value, ProcessorError> {
    let number = if wants_integer(schema) {
        coerce::to_integer(text)?
    } else {
        coerce::to_number(text)?
    };
    let v = Magnitude::of_number(&number);
    let subject = || format!("number {number}");

    let minimum = read_bound(schema, "minimum")?;
    let maximum = read_bound(schema, "maximum")?;
    let exclusive_min = read_exclusive(schema, "exclusiveMinimum")?;
    let exclusive_max = read_exclusive(schema, "exclusiveMaximum")?;

    if let Some(min) = minimum {
        let order = v.compare(min);
        if exclusive_min == Exclusive::Flag(true) {
            if order != Some(Ordering::Greater) {
                return Err(violation("minimum", subject(), format!("expected a value > {min}")));
            }
        } else if order == Some(Ordering::Less) {
            return Err(violation("minimum", subject(), format!("expected a value >= {min}")));
        }
    }
    if let Some(max) = maximum {
        let order = v.compare(max);
        if exclusive_max == Exclusive::Flag(true) {
            if order != Some(Ordering::Less) {
                return Err(violation("maximum", subject(), format!("expected a value < {max}")));
            }
        } else if order == Some(Ordering::Greater) {
            return Err(violation("maximum", subject(), format!("expected a value <= {max}")));
        }
    }
    if let Exclusive::Bound(min) = exclusive_min {
        if v.compare(min) != Some(Ordering::Greater) {
            return Err(violation(
                "exclusiveMinimum",
                subject(),
                format!("expected a value > {min}"),
            ));
        }
    }
    if let Exclusive::Bound(max) = exclusive_max {
        if v.compare(max) != Some(Ordering::Less) {
            return Err(violation(
                "exclusiveMaximum",
                subject(),
                format!("expected a value < {max}"),
            ));
        }
    }

    if let Some(divisor) = read_bound(schema, "multipleOf")? {
        if divisor.compare(Magnitude::Integral(0)) != Some(Ordering::Greater) {
            return Err(ValidatorError::InvalidSchema(format!(
                "multipleOf must be greater than 0, found {divisor}"
            ))
            .into());
        }
        if !v.is_multiple_of(divisor) {
            return Err(violation(
                "multipleOf",
                subject(),
                format!("expected a multiple of {divisor}"),
            ));
        }
    }

    for (keyword, allowed) in read_allowed(schema)? {
        let matched = allowed.iter().any(|entry| {
            entry_text(entry)
                .and_then(|t| Magnitude::parse(&t))
                .is_some_and(|candidate| candidate.compare(v) == Some(Ordering::Equal))
        });
        if !matched {
            return Err(violation(
                keyword,
                subject(),
                format!("expected one of {}", render_entries(&allowed)),
            ));
        }
    }

    Ok(Value::Number(number))
}

fn wants_integer(schema: &SchemaNode) -> bool {
    matches!(
        schema.get(TYPE_KEY),
        Some(Value::String(s)) if strip_enclosing_quotes(s) == "integer"
    )
}

fn read_bound(schema: &SchemaNode, keyword: &'static str) -> Result<Option<Magnitude>, ProcessorError> {
    let Some(text) = scalar_keyword(schema, keyword)? else {
        return Ok(None);
    };
    match Magnitude::parse(&text) {
        Some(bound) => Ok(Some(bound)),
        None => Err(ParserError::Keyword {
            keyword,
            value: text.to_string(),
            expected: "a finite number",
        }
        .into()),
    }
}

fn read_exclusive(schema: &SchemaNode, keyword: &'static str) -> Result<Exclusive, ProcessorError> {
    let Some(text) = scalar_keyword(schema, keyword)? else {
        return Ok(Exclusive::Absent);
    };
    if let Ok(flag) = coerce::to_boolean(&text) {
        return Ok(Exclusive::Flag(flag));
    }
    match Magnitude::parse(&text) {
        Some(bound) => Ok(Exclusive::Bound(bound)),
        None => Err(ParserError::Keyword {
            keyword,
            value: text.to_string(),
            expected: "a boolean or a finite number",
        }
        .into()),
    }
}

fn violation(keyword: &'static str, subject: String, detail: String) -> ProcessorError {
    ValidatorError::ConstraintViolated {
        keyword,
        subject,
        detail,
    }
    .into()
}
