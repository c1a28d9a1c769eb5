//! # Error Types — Validation and Parse Failures
//!
//! Defines the two failure kinds surfaced by the validation engine. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - `ValidatorError` covers everything a caller can attribute to the data
//!   or to the schema's declared constraints: violated bounds, failed scalar
//!   coercion, type mismatches, and malformed schema keywords.
//! - `ParserError` covers schema fragments that cannot be parsed into their
//!   schema meaning at all.
//! - Both are terminal for the call that raised them. Child failures are
//!   propagated unchanged through every recursion level.

use thiserror::Error;

/// Top-level error type returned by every validator entry point.
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// The value (or the schema's constraints) failed validation.
    #[error("validation error: {0}")]
    Validator(#[from] ValidatorError),

    /// A schema fragment could not be parsed.
    #[error("parse error: {0}")]
    Parser(#[from] ParserError),
}

impl ProcessorError {
    /// Returns the inner validation error, if this is one.
    pub fn as_validator(&self) -> Option<&ValidatorError> {
        match self {
            Self::Validator(e) => Some(e),
            Self::Parser(_) => None,
        }
    }

    /// Returns true if the failure was caused by a malformed schema rather
    /// than by the candidate value.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::Parser(_) | Self::Validator(ValidatorError::InvalidSchema(_))
        )
    }
}

/// A constraint, coercion, or schema-authoring failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidatorError {
    /// A value violated a constraint keyword declared by its schema.
    #[error("{subject} violated the {keyword} constraint: {detail}")]
    ConstraintViolated {
        /// The schema keyword whose constraint was violated (e.g. `minItems`).
        keyword: &'static str,
        /// Rendering of the offending value, prefixed with its label when known.
        subject: String,
        /// What the constraint required.
        detail: String,
    },

    /// A scalar could not be converted into the primitive type its schema declares.
    #[error("cannot convert {value:?} to {target}")]
    Coercion {
        /// The raw textual scalar.
        value: String,
        /// Name of the target primitive type.
        target: &'static str,
    },

    /// A value had a shape the validator cannot accept at all
    /// (e.g. an object where a scalar was required).
    #[error("{label}: expected {expected} but found {found}")]
    TypeMismatch {
        /// Diagnostic label of the value.
        label: String,
        /// What the schema required.
        expected: &'static str,
        /// Rendering of the offending value.
        found: String,
    },

    /// The schema itself is malformed.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

impl ValidatorError {
    /// Returns the violated keyword for constraint violations.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::ConstraintViolated { keyword, .. } => Some(keyword),
            _ => None,
        }
    }
}

/// A schema fragment that could not be parsed into its schema meaning.
#[derive(Error, Debug)]
pub enum ParserError {
    /// A keyword value could not be parsed into the type the keyword requires.
    #[error("schema keyword {keyword} has value {value:?}, expected {expected}")]
    Keyword {
        /// The schema keyword (e.g. `minItems`).
        keyword: &'static str,
        /// The keyword's textual value after quote stripping.
        value: String,
        /// Description of the accepted form.
        expected: &'static str,
    },

    /// A textual sub-schema could not be parsed into a schema node.
    #[error("cannot parse {keyword} schema fragment {fragment:?}: {source}")]
    Fragment {
        /// The schema keyword carrying the fragment.
        keyword: &'static str,
        /// The fragment text.
        fragment: String,
        /// Underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_display_names_keyword() {
        let e = ValidatorError::ConstraintViolated {
            keyword: "minItems",
            subject: "array items [1]".to_string(),
            detail: "expected at least 2 items, found 1".to_string(),
        };
        let s = e.to_string();
        assert!(s.contains("minItems"));
        assert!(s.contains("[1]"));
        assert_eq!(e.keyword(), Some("minItems"));
    }

    #[test]
    fn test_schema_error_classification() {
        let schema: ProcessorError = ValidatorError::InvalidSchema("bad".into()).into();
        assert!(schema.is_schema_error());

        let data: ProcessorError = ValidatorError::Coercion {
            value: "abc".into(),
            target: "boolean",
        }
        .into();
        assert!(!data.is_schema_error());
        assert!(data.as_validator().is_some());

        let parse: ProcessorError = ParserError::Keyword {
            keyword: "maxItems",
            value: "ten".into(),
            expected: "a non-negative integer",
        }
        .into();
        assert!(parse.is_schema_error());
        assert!(parse.as_validator().is_none());
    }
}
