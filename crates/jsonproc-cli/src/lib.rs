//! # jsonproc-cli — Command-Line Host for the Validation Engine
//!
//! Provides the `jsonproc` binary. The engine itself lives in
//! `jsonproc-schema`; this crate only resolves schemas and documents,
//! applies host limits, and reports outcomes.
//!
//! ## Subcommands
//!
//! - `jsonproc validate`: validate and coerce one document, printing the result.
//! - `jsonproc schemas`: list the schemas in the schema directory.
//!
//! ```bash
//! jsonproc validate --schema order.schema.json --input order.json --pretty
//! cat order.json | jsonproc --schema-dir ./schemas validate --schema order
//! ```
//!
//! ## Exit Codes
//!
//! `0` when the document is valid, `1` when validation fails, `2` on an
//! operational error (unreadable files, bad configuration, depth limit).

pub mod config;
pub mod schemas;
pub mod validate;

use anyhow::{bail, Result};
use serde_json::Value;

use jsonproc_schema::schema_depth;

/// Refuse schemas nested deeper than `max_depth`.
pub fn check_depth(name: &str, schema: &Value, max_depth: usize) -> Result<usize> {
    let depth = schema_depth(schema);
    if depth > max_depth {
        bail!("schema {name} is nested {depth} levels deep, limit is {max_depth}");
    }
    Ok(depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn depth_within_limit() {
        let schema = json!({"type": "array", "items": {"type": "number"}});
        assert_eq!(check_depth("s", &schema, 2).unwrap(), 2);
    }

    #[test]
    fn depth_over_limit() {
        let schema = json!({"type": "array", "items": {"type": "array", "items": {"type": "null"}}});
        let err = check_depth("nested", &schema, 2).unwrap_err();
        assert!(err.to_string().contains("limit is 2"));
    }
}
