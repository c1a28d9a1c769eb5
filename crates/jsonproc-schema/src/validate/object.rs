//! # Object Validator
//!
//! Validates an object value against an `object` schema node. Structural
//! checks (`minProperties`, `maxProperties`, `required`) run before any
//! property value is validated. Property values are then validated in input
//! order:
//!
//! - a property listed in `properties` is validated against its schema;
//! - every `patternProperties` entry whose regex matches the name applies;
//! - a property matched by neither falls under `additionalProperties`.
//!
//! Key order of the input is preserved in the result.

use jsonproc_core::coerce::strip_enclosing_quotes;
use jsonproc_core::{ProcessorError, ValidatorError};
use regex::Regex;
use serde_json::{Map, Value};

use super::validate_node;
use crate::keyword::{as_node, read_additional, read_count, AdditionalPolicy, SchemaNode};

const PROPERTIES: &str = "properties";
const PATTERN_PROPERTIES: &str = "patternProperties";
const ADDITIONAL_PROPERTIES: &str = "additionalProperties";
const REQUIRED: &str = "required";
const MIN_PROPERTIES: &str = "minProperties";
const MAX_PROPERTIES: &str = "maxProperties";

/// Structural constraints of an `object` schema node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjectConstraints {
    /// Inclusive lower bound on property count.
    pub min_properties: Option<usize>,
    /// Inclusive upper bound on property count.
    pub max_properties: Option<usize>,
    /// Property names that must be present.
    pub required: Vec<String>,
    /// Policy for properties matched by neither `properties` nor `patternProperties`.
    pub additional_properties: AdditionalPolicy,
}

impl ObjectConstraints {
    /// Read the object constraint keywords of a schema node.
    ///
    /// # Errors
    ///
    /// `ValidatorError::InvalidSchema` for negative bounds or a malformed
    /// `required` list, `ParserError` for unparseable keyword values.
    pub fn from_schema(schema: &SchemaNode) -> Result<Self, ProcessorError> {
        Ok(Self {
            min_properties: read_count(schema, MIN_PROPERTIES)?,
            max_properties: read_count(schema, MAX_PROPERTIES)?,
            required: read_required(schema)?,
            additional_properties: read_additional(schema, ADDITIONAL_PROPERTIES)?,
        })
    }
}

/// Validate a value against an `object` schema node.
///
/// # Errors
///
/// `ValidatorError::TypeMismatch` if the value is not an object, and any
/// failure raised by a property's validator, unchanged.
pub fn validate_object(label: &str, input: Value, schema: &SchemaNode) -> Result<Value, ProcessorError> {
    let constraints = ObjectConstraints::from_schema(schema)?;
    let properties = match schema.get(PROPERTIES) {
        None => None,
        Some(value) => Some(as_node(value, &format!("{PROPERTIES} of object {label}"))?),
    };
    let patterns = compile_patterns(schema, label)?;

    let object = match input {
        Value::Object(object) => object,
        other => {
            return Err(ValidatorError::TypeMismatch {
                label: label.to_string(),
                expected: "an object",
                found: other.to_string(),
            }
            .into())
        }
    };
    tracing::debug!(label = %label, len = object.len(), "validating object");

    check_structure(label, &object, &constraints)?;

    let mut validated = Map::with_capacity(object.len());
    for (key, mut value) in object {
        let child = format!("{label}.{key}");
        let mut matched = false;

        if let Some(declared) = properties.and_then(|p| p.get(&key)) {
            matched = true;
            let node = as_node(declared, &format!("property {child}"))?;
            value = validate_node(&child, value, node)?;
        }
        for (re, node) in &patterns {
            if re.is_match(&key) {
                matched = true;
                value = validate_node(&child, value, node)?;
            }
        }
        if !matched {
            match &constraints.additional_properties {
                AdditionalPolicy::Allow => {}
                AdditionalPolicy::Forbid => {
                    return Err(ValidatorError::ConstraintViolated {
                        keyword: ADDITIONAL_PROPERTIES,
                        subject: format!("object {label}"),
                        detail: format!("property {key:?} is not allowed by the schema"),
                    }
                    .into())
                }
                AdditionalPolicy::Schema(node) => value = validate_node(&child, value, node)?,
            }
        }

        validated.insert(key, value);
    }

    Ok(Value::Object(validated))
}

fn check_structure(
    label: &str,
    object: &Map<String, Value>,
    constraints: &ObjectConstraints,
) -> Result<(), ValidatorError> {
    let len = object.len();
    let subject = || format!("object {label} {}", Value::Object(object.clone()));
    if let Some(min) = constraints.min_properties {
        if len < min {
            return Err(ValidatorError::ConstraintViolated {
                keyword: MIN_PROPERTIES,
                subject: subject(),
                detail: format!("expected at least {min} properties, found {len}"),
            });
        }
    }
    if let Some(max) = constraints.max_properties {
        if len > max {
            return Err(ValidatorError::ConstraintViolated {
                keyword: MAX_PROPERTIES,
                subject: subject(),
                detail: format!("expected at most {max} properties, found {len}"),
            });
        }
    }
    if let Some(missing) = constraints.required.iter().find(|name| !object.contains_key(*name)) {
        return Err(ValidatorError::ConstraintViolated {
            keyword: REQUIRED,
            subject: subject(),
            detail: format!("missing required property {missing:?}"),
        });
    }
    Ok(())
}

fn read_required(schema: &SchemaNode) -> Result<Vec<String>, ValidatorError> {
    match schema.get(REQUIRED) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(names)) => names
            .iter()
            .map(|name| match name {
                Value::String(s) => Ok(strip_enclosing_quotes(s).to_string()),
                other => Err(ValidatorError::InvalidSchema(format!(
                    "{REQUIRED} entries must be property names, found {other}"
                ))),
            })
            .collect(),
        Some(other) => Err(ValidatorError::InvalidSchema(format!(
            "{REQUIRED} must be an array of property names, found {other}"
        ))),
    }
}

fn compile_patterns<'s>(
    schema: &'s SchemaNode,
    label: &str,
) -> Result<Vec<(Regex, &'s SchemaNode)>, ValidatorError> {
    let Some(raw) = schema.get(PATTERN_PROPERTIES) else {
        return Ok(Vec::new());
    };
    let entries = as_node(raw, &format!("{PATTERN_PROPERTIES} of object {label}"))?;
    entries
        .iter()
        .map(|(pattern, node)| -> Result<(Regex, &'s SchemaNode), ValidatorError> {
            let re = Regex::new(pattern).map_err(|e| {
                ValidatorError::InvalidSchema(format!("invalid property pattern {pattern:?}: {e}"))
            })?;
            let node = as_node(node, &format!("{PATTERN_PROPERTIES} entry {pattern:?}"))?;
            Ok((re, node))
        })
        .collect()
}
