//! # jsonproc CLI entry point
//!
//! Parses command-line arguments, merges them over the environment
//! configuration, and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jsonproc_cli::config::ProcessorConfig;
use jsonproc_cli::schemas::{run_schemas, SchemasArgs};
use jsonproc_cli::validate::{run_validate, ValidateArgs};

/// Schema-driven validation and coercion of JSON and YAML documents.
#[derive(Parser, Debug)]
#[command(name = "jsonproc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory containing `*.schema.json` / `*.schema.yaml` files.
    #[arg(long, global = true)]
    schema_dir: Option<PathBuf>,

    /// Refuse schemas nested deeper than this.
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document against a schema and print the coerced result.
    Validate(ValidateArgs),

    /// List the schemas in the schema directory.
    Schemas(SchemasArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match ProcessorConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };
    if let Some(dir) = cli.schema_dir {
        config.schema_dir = dir;
    }
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    tracing::debug!(?config, "jsonproc starting");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Schemas(args) => run_schemas(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
