//! # Canonical Structural Keys
//!
//! `uniqueItems` compares array elements by deep structural equality. JSON
//! values are not `Hash`, and two equal objects may list their keys in a
//! different order when insertion order is preserved, so elements are
//! compared through a canonical rendering instead.
//!
//! ## Canonical Form
//!
//! 1. Object keys are sorted lexicographically.
//! 2. Numbers with an integral value render as integers, so `1` and `1.0`
//!    produce the same key.
//! 3. Strings and keys use JSON escaping; separators are compact.
//!
//! Two values produce equal keys exactly when they are structurally equal
//! under these rules.

use std::fmt::Write;

use serde_json::{Number, Value};

/// `i64::MIN` as an `f64` (exact).
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
/// `i64::MAX + 1` as an `f64` (exact).
const I64_END_F64: f64 = 9_223_372_036_854_775_808.0;
/// `u64::MAX + 1` as an `f64` (exact).
const U64_END_F64: f64 = 18_446_744_073_709_551_616.0;

/// Canonical rendering of a JSON value, usable as a set or map key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructuralKey(String);

impl StructuralKey {
    /// Build the canonical key of a value.
    pub fn new(value: &Value) -> Self {
        let mut out = String::new();
        write_canonical(value, &mut out);
        Self(out)
    }

    /// The canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => write_number(n, out),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (k, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(k, out);
                out.push(':');
                write_canonical(v, out);
            }
            out.push('}');
        }
    }
}

fn write_number(n: &Number, out: &mut String) {
    if let Some(f) = n.as_f64().filter(|f| n.is_f64() && f.fract() == 0.0) {
        // An integral float is exactly its integer value; render it the way
        // the equal `i64`/`u64` renders.
        if (I64_MIN_F64..I64_END_F64).contains(&f) {
            let _ = write!(out, "{}", f as i64);
            return;
        }
        if (0.0..U64_END_F64).contains(&f) {
            let _ = write!(out, "{}", f as u64);
            return;
        }
    }
    let _ = write!(out, "{n}");
}

fn write_string(s: &str, out: &mut String) {
    // Display of a JSON string value applies JSON escaping.
    let _ = write!(out, "{}", Value::String(s.to_string()));
}
