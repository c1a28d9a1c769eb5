//! # Schema Validation — Type Dispatch
//!
//! Routes a candidate value to the validator for its schema's type family.
//! Array and object validators recurse back through [`dispatch`]; the four
//! leaf validators are terminal.
//!
//! ## Ownership
//!
//! Every validator takes the candidate `Value` by value and returns its
//! validated replacement. Composite validators move each child out of its
//! slot, validate it, and move the result back, so no part of the tree is
//! aliased while it is being rewritten. Schemas are only ever borrowed.
//!
//! ## Failure Propagation
//!
//! The first failure aborts the whole call and is returned unchanged through
//! every recursion level.

pub mod array;
pub mod boolean;
pub mod nominal;
pub mod null;
pub mod numeric;
pub mod object;

use std::borrow::Cow;

use jsonproc_core::coerce::scalar_text;
use jsonproc_core::{ProcessorError, TypeFamily, ValidatorError};
use serde_json::Value;

use crate::keyword::SchemaNode;

pub use array::{validate_array, ArrayConstraints};
pub use boolean::validate_boolean;
pub use nominal::validate_nominal;
pub use null::validate_null;
pub use numeric::validate_numeric;
pub use object::{validate_object, ObjectConstraints};

/// Validate a value against a root schema.
///
/// The schema must be a JSON object. An empty schema accepts the value
/// unchanged; any other schema must declare a `type`.
///
/// # Errors
///
/// Any `ValidatorError` or `ParserError` raised while validating the tree.
pub fn validate(label: &str, value: Value, schema: &Value) -> Result<Value, ProcessorError> {
    let node = schema.as_object().ok_or_else(|| {
        ValidatorError::InvalidSchema(format!("schema must be an object, found {schema}"))
    })?;
    validate_node(label, value, node)
}

/// Validate against a schema node that is either empty (no constraint) or
/// declares a `type`.
pub(crate) fn validate_node(
    label: &str,
    value: Value,
    schema: &SchemaNode,
) -> Result<Value, ProcessorError> {
    if schema.is_empty() {
        return Ok(value);
    }
    let family = require_family(schema, label)?;
    dispatch(family, label, value, schema)
}

/// Resolve the type family of a non-empty schema node, which must declare one.
pub(crate) fn require_family(schema: &SchemaNode, label: &str) -> Result<TypeFamily, ValidatorError> {
    TypeFamily::of_schema(schema)?.ok_or_else(|| {
        ValidatorError::InvalidSchema(format!(
            "schema for {label} must contain a type declaration: {}",
            Value::Object(schema.clone())
        ))
    })
}

/// Route one value to the validator for `family`.
///
/// Scalars reach the leaf validators as their textual form. Null-typed
/// positions always come back as `null`.
pub fn dispatch(
    family: TypeFamily,
    label: &str,
    value: Value,
    schema: &SchemaNode,
) -> Result<Value, ProcessorError> {
    tracing::trace!(label = %label, family = %family, "dispatching value");
    match family {
        TypeFamily::Boolean => validate_boolean(schema, &scalar(label, &value)?),
        TypeFamily::Numeric => validate_numeric(schema, &scalar(label, &value)?),
        TypeFamily::Nominal => validate_nominal(schema, &scalar(label, &value)?),
        TypeFamily::Array => validate_array(label, value, schema),
        TypeFamily::Object => validate_object(label, value, schema),
        TypeFamily::Null => validate_null(schema, &value.to_string()),
    }
}

fn scalar<'v>(label: &str, value: &'v Value) -> Result<Cow<'v, str>, ValidatorError> {
    scalar_text(value).ok_or_else(|| ValidatorError::TypeMismatch {
        label: label.to_string(),
        expected: "a scalar value",
        found: value.to_string(),
    })
}

/// Render `enum`/`const` entries for diagnostics.
pub(crate) fn render_entries(entries: &[&Value]) -> String {
    let parts: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
