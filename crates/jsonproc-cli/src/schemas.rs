//! # Schemas Subcommand
//!
//! Lists the schemas in the schema directory with their root type family
//! and nesting depth.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use jsonproc_core::TypeFamily;
use jsonproc_schema::{SchemaRegistry, SchemaSummary};

use crate::config::ProcessorConfig;

/// Arguments for the `jsonproc schemas` subcommand.
#[derive(Args, Debug)]
pub struct SchemasArgs {
    /// Print the listing as a JSON array.
    #[arg(long)]
    pub json: bool,
}

/// One row of the schema listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaListing {
    pub name: String,
    pub family: Option<TypeFamily>,
    pub depth: usize,
    /// Whether the schema is within the configured depth limit.
    pub within_limit: bool,
}

/// Summarize every schema in the registry, sorted by name.
pub fn list_schemas(registry: &SchemaRegistry, max_depth: usize) -> Vec<SchemaListing> {
    registry
        .schema_names()
        .into_iter()
        .filter_map(|name| {
            let summary = SchemaSummary::of(registry.get_schema(name)?);
            Some(SchemaListing {
                name: name.to_string(),
                family: summary.family,
                depth: summary.depth,
                within_limit: summary.depth <= max_depth,
            })
        })
        .collect()
}

/// Execute the schemas subcommand.
pub fn run_schemas(args: &SchemasArgs, config: &ProcessorConfig) -> Result<u8> {
    let registry = SchemaRegistry::new(&config.schema_dir).with_context(|| {
        format!("failed to load schemas from {}", config.schema_dir.display())
    })?;
    let listing = list_schemas(&registry, config.max_depth);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(0);
    }

    println!("Schemas: {} in {}", listing.len(), registry.schema_dir().display());
    for row in &listing {
        let family = row
            .family
            .map(|f| f.to_string())
            .unwrap_or_else(|| "-".to_string());
        let marker = if row.within_limit { "" } else { "  (exceeds depth limit)" };
        println!("  {:<40} {:<8} depth {}{}", row.name, family, row.depth, marker);
    }
    Ok(0)
}
