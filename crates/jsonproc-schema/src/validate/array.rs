//! # Array Validator
//!
//! Validates an array-shaped (or promotable-to-array) value against an
//! `array` schema node.
//!
//! ## Order of Checks
//!
//! 1. Constraint keywords are read from the schema.
//! 2. A non-array value is promoted to a single-element array, tolerating
//!    upstream formats that collapse a repeated element occurring once.
//! 3. Structural validation (`minItems`, `maxItems`, `uniqueItems`) runs
//!    before any element is touched.
//! 4. Elements are dispatched according to `items`:
//!    - an object is a uniform schema applied to every element;
//!    - an array is a tuple schema applied positionally, with elements past
//!      the tuple governed by `additionalItems`.
//!
//! The array's length never changes: elements are replaced in place.

use std::collections::HashSet;

use jsonproc_core::{ProcessorError, StructuralKey, TypeFamily, ValidatorError, TYPE_KEY};
use serde_json::Value;

use super::{dispatch, require_family};
use crate::keyword::{as_node, read_additional, read_count, read_flag, AdditionalPolicy, SchemaNode};

const ITEMS: &str = "items";
const ADDITIONAL_ITEMS: &str = "additionalItems";
const MIN_ITEMS: &str = "minItems";
const MAX_ITEMS: &str = "maxItems";
const UNIQUE_ITEMS: &str = "uniqueItems";

/// Structural constraints of an `array` schema node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayConstraints {
    /// Inclusive lower bound on length; `None` when unconstrained.
    pub min_items: Option<usize>,
    /// Inclusive upper bound on length; `None` when unconstrained.
    pub max_items: Option<usize>,
    /// Whether all elements must be structurally distinct.
    pub unique_items: bool,
    /// Policy for elements beyond a tuple schema.
    pub additional_items: AdditionalPolicy,
}

impl ArrayConstraints {
    /// Read the array constraint keywords of a schema node.
    ///
    /// # Errors
    ///
    /// `ValidatorError::InvalidSchema` for negative bounds, `ParserError` for
    /// keyword values that cannot be parsed.
    pub fn from_schema(schema: &SchemaNode) -> Result<Self, ProcessorError> {
        Ok(Self {
            min_items: read_count(schema, MIN_ITEMS)?,
            max_items: read_count(schema, MAX_ITEMS)?,
            unique_items: read_flag(schema, UNIQUE_ITEMS)?,
            additional_items: read_additional(schema, ADDITIONAL_ITEMS)?,
        })
    }
}

/// Validate a value against an `array` schema node.
///
/// `label` names the value in diagnostics (e.g. the enclosing property).
/// Returns an array whose elements are the validated, coerced forms of the
/// input's elements.
///
/// # Errors
///
/// `ValidatorError` for violated constraints and malformed schema keywords,
/// `ParserError` for unparseable keyword values or sub-schema fragments.
pub fn validate_array(label: &str, input: Value, schema: &SchemaNode) -> Result<Value, ProcessorError> {
    let items = match input {
        Value::Array(items) => items,
        other => {
            tracing::debug!(label = %label, "promoting non-array value to a single-element array");
            vec![other]
        }
    };
    validate_items(label, items, schema).map(Value::Array)
}

fn validate_items(
    label: &str,
    mut items: Vec<Value>,
    schema: &SchemaNode,
) -> Result<Vec<Value>, ProcessorError> {
    let constraints = ArrayConstraints::from_schema(schema)?;
    tracing::debug!(label = %label, len = items.len(), "validating array");

    check_structure(label, &items, &constraints)?;

    match schema.get(ITEMS) {
        None => {}
        Some(Value::Array(tuple)) => {
            validate_tuple(label, &mut items, tuple, &constraints.additional_items)?
        }
        Some(Value::Object(uniform)) => validate_uniform(label, &mut items, uniform)?,
        Some(other) => {
            return Err(ValidatorError::InvalidSchema(format!(
                "Schema for array {label} is invalid: items should be either a schema object \
                 or an array of schema objects, found {other}"
            ))
            .into())
        }
    }

    Ok(items)
}

/// Check size bounds and uniqueness. Runs before any element is validated.
fn check_structure(
    label: &str,
    items: &[Value],
    constraints: &ArrayConstraints,
) -> Result<(), ValidatorError> {
    let len = items.len();
    if let Some(min) = constraints.min_items {
        if len < min {
            return Err(structural(
                MIN_ITEMS,
                label,
                items,
                format!("expected at least {min} items, found {len}"),
            ));
        }
    }
    if let Some(max) = constraints.max_items {
        if len > max {
            return Err(structural(
                MAX_ITEMS,
                label,
                items,
                format!("expected at most {max} items, found {len}"),
            ));
        }
    }
    if constraints.unique_items {
        let mut seen = HashSet::with_capacity(len);
        for item in items {
            if !seen.insert(StructuralKey::new(item)) {
                return Err(structural(
                    UNIQUE_ITEMS,
                    label,
                    items,
                    format!("duplicate item {item}"),
                ));
            }
        }
    }
    Ok(())
}

/// Positional validation against a tuple schema.
fn validate_tuple(
    label: &str,
    items: &mut Vec<Value>,
    tuple: &[Value],
    additional: &AdditionalPolicy,
) -> Result<(), ProcessorError> {
    if *additional == AdditionalPolicy::Forbid && items.len() > tuple.len() {
        return Err(structural(
            ADDITIONAL_ITEMS,
            label,
            items,
            format!(
                "has more items than allowed in the schema ({} > {})",
                items.len(),
                tuple.len()
            ),
        )
        .into());
    }

    for (i, slot) in tuple.iter().enumerate() {
        let slot = as_node(slot, &format!("tuple item {i} of array {label}"))?;
        if slot.is_empty() {
            continue;
        }
        let family = TypeFamily::of_schema(slot)?.ok_or_else(|| {
            ValidatorError::InvalidSchema(format!(
                "Array items should contain a type declaration: {TYPE_KEY} missing at tuple item {i} of array {label}"
            ))
        })?;
        let Some(item) = items.get_mut(i) else {
            continue;
        };
        let current = std::mem::take(item);
        *item = dispatch(family, &element_label(label, i), current, slot)?;
    }

    if let AdditionalPolicy::Schema(extra) = additional {
        if items.len() > tuple.len() {
            let overflow = items.split_off(tuple.len());
            tracing::debug!(
                label = %label,
                count = overflow.len(),
                "validating items beyond the tuple against additionalItems"
            );
            let wrapper = wrap_items(extra);
            let validated = validate_items(&format!("{label}[{}..]", tuple.len()), overflow, &wrapper)?;
            items.extend(validated);
        }
    }
    Ok(())
}

/// Validation of every element against one schema.
fn validate_uniform(
    label: &str,
    items: &mut [Value],
    schema: &SchemaNode,
) -> Result<(), ProcessorError> {
    if schema.is_empty() {
        return Ok(());
    }
    let family = require_family(schema, &format!("items of array {label}"))?;
    for (i, item) in items.iter_mut().enumerate() {
        let current = std::mem::take(item);
        *item = dispatch(family, &element_label(label, i), current, schema)?;
    }
    Ok(())
}

/// One-off `{type: array, items: <schema>}` node for the overflow elements.
fn wrap_items(schema: &SchemaNode) -> SchemaNode {
    let mut wrapper = SchemaNode::new();
    wrapper.insert(TYPE_KEY.to_string(), Value::String("array".to_string()));
    wrapper.insert(ITEMS.to_string(), Value::Object(schema.clone()));
    wrapper
}

fn element_label(label: &str, index: usize) -> String {
    format!("{label}[{index}]")
}

fn structural(keyword: &'static str, label: &str, items: &[Value], detail: String) -> ValidatorError {
    tracing::debug!(label = %label, keyword, "array failed structural validation");
    ValidatorError::ConstraintViolated {
        keyword,
        subject: format!("array {label} {}", Value::Array(items.to_vec())),
        detail,
    }
}
