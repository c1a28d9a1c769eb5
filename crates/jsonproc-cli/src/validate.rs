//! # Validate Subcommand
//!
//! Validates one document against one schema and prints the coerced result
//! to stdout. Diagnostics go to stderr so the output can be piped.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

use jsonproc_schema::{load_document, validate, SchemaRegistry};

use crate::check_depth;
use crate::config::ProcessorConfig;

/// Suffixes tried when a schema is named without one.
const NAME_SUFFIXES: [&str; 3] = [".schema.json", ".schema.yaml", ".schema.yml"];

/// Arguments for the `jsonproc validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file, or the name of a schema in the schema directory
    /// (`order` resolves to `order.schema.json` and friends).
    #[arg(long, short, value_name = "PATH|NAME")]
    pub schema: String,

    /// Document to validate, JSON or YAML by extension. Reads JSON from stdin if omitted.
    #[arg(long, short, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Label naming the root value in diagnostics.
    #[arg(long)]
    pub label: Option<String>,

    /// Pretty-print the validated document.
    #[arg(long)]
    pub pretty: bool,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if the document is valid, 1 if validation fails.
/// Operational problems are returned as errors.
pub fn run_validate(args: &ValidateArgs, config: &ProcessorConfig) -> Result<u8> {
    let (name, schema) = resolve_schema(&args.schema, &config.schema_dir)?;
    let depth = check_depth(&name, &schema, config.max_depth)?;
    tracing::debug!(schema = %name, depth, "resolved schema");

    let document = read_document(args.input.as_deref())?;
    let label = args.label.as_deref().unwrap_or(&config.label);

    match validate(label, document, &schema) {
        Ok(validated) => {
            println!("{}", render(&validated, args.pretty)?);
            Ok(0)
        }
        Err(e) => {
            let kind = if e.is_schema_error() { "SCHEMA ERROR" } else { "FAIL" };
            eprintln!("{kind}: {name}: {e}");
            Ok(1)
        }
    }
}

/// Resolve `schema_ref` to a schema: an existing file is loaded directly, anything
/// else is looked up by name in `schema_dir`.
pub fn resolve_schema(schema_ref: &str, schema_dir: &Path) -> Result<(String, Value)> {
    let path = Path::new(schema_ref);
    if path.is_file() {
        let schema = load_document(path).with_context(|| format!("failed to load schema {schema_ref}"))?;
        return Ok((schema_ref.to_string(), schema));
    }

    let registry = SchemaRegistry::new(schema_dir)
        .with_context(|| format!("failed to load schemas from {}", schema_dir.display()))?;
    tracing::info!(schema_count = registry.schema_count(), "loaded schema registry");

    let candidates = std::iter::once(schema_ref.to_string())
        .chain(NAME_SUFFIXES.iter().map(|suffix| format!("{schema_ref}{suffix}")));
    for candidate in candidates {
        if let Some(schema) = registry.get_schema(&candidate) {
            return Ok((candidate, schema.clone()));
        }
    }
    bail!(
        "schema {schema_ref:?} is neither a file nor a schema in {}",
        schema_dir.display()
    )
}

fn read_document(input: Option<&Path>) -> Result<Value> {
    match input {
        Some(path) => Ok(load_document(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read document from stdin")?;
            serde_json::from_str(&text).context("stdin is not a valid JSON document")
        }
    }
}

fn render(value: &Value, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
