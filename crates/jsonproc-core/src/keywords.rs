//! # Keyword Tables — Schema Type Families
//!
//! Static classification of the string tokens a schema's `type` keyword may
//! carry. Every validator consults these tables to route dispatch; the
//! mapping is total over the six families and an unrecognized token is a
//! schema error, never a silent no-op.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::coerce::strip_enclosing_quotes;
use crate::error::ValidatorError;

/// The schema keyword naming a node's type family.
pub const TYPE_KEY: &str = "type";

/// Tokens denoting the boolean family.
pub const BOOLEAN_KEYS: &[&str] = &["boolean"];
/// Tokens denoting the numeric family.
pub const NUMERIC_KEYS: &[&str] = &["number", "integer"];
/// Tokens denoting the nominal (string) family.
pub const NOMINAL_KEYS: &[&str] = &["string"];
/// Tokens denoting the array family.
pub const ARRAY_KEYS: &[&str] = &["array"];
/// Tokens denoting the object family.
pub const OBJECT_KEYS: &[&str] = &["object"];
/// Tokens denoting the null family.
pub const NULL_KEYS: &[&str] = &["null"];

/// One of the six schema type families.
///
/// Adding a family forces every `match` in the dispatch path to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFamily {
    Boolean,
    Numeric,
    Nominal,
    Array,
    Object,
    Null,
}

impl TypeFamily {
    /// All families, in table order.
    pub const ALL: [TypeFamily; 6] = [
        TypeFamily::Boolean,
        TypeFamily::Numeric,
        TypeFamily::Nominal,
        TypeFamily::Array,
        TypeFamily::Object,
        TypeFamily::Null,
    ];

    /// The tokens that select this family.
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            Self::Boolean => BOOLEAN_KEYS,
            Self::Numeric => NUMERIC_KEYS,
            Self::Nominal => NOMINAL_KEYS,
            Self::Array => ARRAY_KEYS,
            Self::Object => OBJECT_KEYS,
            Self::Null => NULL_KEYS,
        }
    }

    /// Resolve a `type` token to its family. Returns `None` for tokens in no table.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|family| family.tokens().contains(&token))
    }

    /// Read and resolve the `type` keyword of a schema node.
    ///
    /// Returns `Ok(None)` when the node has no `type` keyword.
    ///
    /// # Errors
    ///
    /// Returns `ValidatorError::InvalidSchema` if `type` is not a string or
    /// names no known family.
    pub fn of_schema(schema: &Map<String, Value>) -> Result<Option<Self>, ValidatorError> {
        let Some(raw) = schema.get(TYPE_KEY) else {
            return Ok(None);
        };
        let token = match raw {
            Value::String(s) => strip_enclosing_quotes(s),
            other => {
                return Err(ValidatorError::InvalidSchema(format!(
                    "type keyword must be a single string token, found {other}"
                )))
            }
        };
        Self::from_token(token).map(Some).ok_or_else(|| {
            ValidatorError::InvalidSchema(format!("unrecognized type token {token:?}"))
        })
    }
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Boolean => "boolean",
            Self::Numeric => "numeric",
            Self::Nominal => "nominal",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_tables_are_disjoint() {
        for a in TypeFamily::ALL {
            for b in TypeFamily::ALL {
                if a != b {
                    assert!(a.tokens().iter().all(|t| !b.tokens().contains(t)));
                }
            }
        }
    }

    #[test]
    fn test_from_token() {
        assert_eq!(TypeFamily::from_token("integer"), Some(TypeFamily::Numeric));
        assert_eq!(TypeFamily::from_token("number"), Some(TypeFamily::Numeric));
        assert_eq!(TypeFamily::from_token("string"), Some(TypeFamily::Nominal));
        assert_eq!(TypeFamily::from_token("null"), Some(TypeFamily::Null));
        assert_eq!(TypeFamily::from_token("String"), None);
        assert_eq!(TypeFamily::from_token("date"), None);
    }

    #[test]
    fn test_of_schema_strips_quotes() {
        let schema = node(json!({"type": "\"boolean\""}));
        assert_eq!(
            TypeFamily::of_schema(&schema).unwrap(),
            Some(TypeFamily::Boolean)
        );
        let schema = node(json!({"type": "'number'"}));
        assert_eq!(
            TypeFamily::of_schema(&schema).unwrap(),
            Some(TypeFamily::Numeric)
        );
    }

    #[test]
    fn test_of_schema_absent_type() {
        let schema = node(json!({"minItems": 1}));
        assert_eq!(TypeFamily::of_schema(&schema).unwrap(), None);
    }

    #[test]
    fn test_of_schema_unknown_token_is_schema_error() {
        let schema = node(json!({"type": "tuple"}));
        assert!(matches!(
            TypeFamily::of_schema(&schema),
            Err(ValidatorError::InvalidSchema(_))
        ));
    }

    #[test]
    fn test_of_schema_non_string_type() {
        let schema = node(json!({"type": ["string", "null"]}));
        assert!(TypeFamily::of_schema(&schema).is_err());
    }

    #[test]
    fn test_family_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(TypeFamily::Nominal).unwrap(),
            json!("nominal")
        );
    }
}
