//! # jsonproc-schema — Schema-Driven Validation & Coercion
//!
//! Validates loosely-typed JSON trees against schema nodes and returns a
//! coerced copy: textual numbers become numbers, textual booleans become
//! booleans, a scalar supplied where an array is expected becomes a
//! one-element array, and null-typed positions become `null`.
//!
//! ## Validation (`validate`)
//!
//! [`validate()`] is the entry point. It resolves the root schema's type
//! family and hands the value to [`dispatch`], which routes it to one of:
//!
//! - [`validate_array`]: `items` (uniform or tuple), `additionalItems`,
//!   `minItems`, `maxItems`, `uniqueItems`;
//! - [`validate_object`]: `properties`, `patternProperties`,
//!   `additionalProperties`, `required`, `minProperties`, `maxProperties`;
//! - the leaf validators [`validate_boolean`], [`validate_numeric`],
//!   [`validate_nominal`] and [`validate_null`].
//!
//! ## Registry (`registry`)
//!
//! [`SchemaRegistry`] loads `*.schema.json` / `*.schema.yaml` documents from
//! a directory and validates values against them by name.
//!
//! ## Crate Policy
//!
//! - Depends only on `jsonproc-core` internally.
//! - A failed validation never yields a partially validated tree: the first
//!   failure is returned unchanged and the input is consumed.
//! - Schema problems surface as `InvalidSchema` or `ParserError`, never as
//!   constraint violations of the candidate value.

pub mod keyword;
pub mod registry;
pub mod validate;

pub use keyword::{AdditionalPolicy, SchemaNode};
pub use registry::{load_document, schema_depth, RegistryError, SchemaRegistry, SchemaSummary};
pub use validate::{
    dispatch, validate, validate_array, validate_boolean, validate_nominal, validate_null,
    validate_numeric, validate_object, ArrayConstraints, ObjectConstraints,
};
