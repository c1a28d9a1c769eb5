//! # jsonproc-core — Foundational Types for jsonproc
//!
//! This crate holds the pieces every validator shares: the error taxonomy,
//! the keyword tables that classify `type` tokens into type families, the
//! coercion utility that turns loosely-typed text into JSON primitives, and
//! the canonical structural keys used for uniqueness checks. It depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed type-family enum.** `TypeFamily` has one variant per schema
//!    family. Dispatch matches on it exhaustively; an unknown `type` token is
//!    a schema error, never a silent skip.
//!
//! 2. **Two failure kinds.** `ValidatorError` for anything attributable to
//!    the data or the schema's constraints, `ParserError` for schema
//!    fragments that cannot be parsed. `ProcessorError` unifies them so `?`
//!    composes across recursion levels.
//!
//! 3. **Coercion is explicit.** Every text-to-primitive conversion goes
//!    through `coerce`, which reports impossible conversions instead of
//!    guessing.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `jsonproc-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod coerce;
pub mod error;
pub mod keywords;

pub use canonical::StructuralKey;
pub use error::{ParserError, ProcessorError, ValidatorError};
pub use keywords::{TypeFamily, TYPE_KEY};
