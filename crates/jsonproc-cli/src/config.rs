//! Processor configuration.
//!
//! Defaults suit a project with a `schemas/` directory next to the working
//! directory. Override via environment variables; command-line flags take
//! precedence over both.

use std::path::PathBuf;

/// Default directory scanned for schema documents.
pub const DEFAULT_SCHEMA_DIR: &str = "schemas";
/// Default maximum schema nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;
/// Default diagnostic label for the root value.
pub const DEFAULT_LABEL: &str = "root";

/// Host-side settings for a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Directory the schema registry is loaded from.
    pub schema_dir: PathBuf,
    /// Schemas nested deeper than this are refused before validation.
    pub max_depth: usize,
    /// Label naming the root value in diagnostics.
    pub label: String,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from(DEFAULT_SCHEMA_DIR),
            max_depth: DEFAULT_MAX_DEPTH,
            label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl ProcessorConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `JSONPROC_SCHEMA_DIR` (default: `schemas`)
    /// - `JSONPROC_MAX_DEPTH` (default: 64)
    /// - `JSONPROC_LABEL` (default: `root`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let max_depth = match lookup("JSONPROC_MAX_DEPTH") {
            None => defaults.max_depth,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => depth,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "JSONPROC_MAX_DEPTH".to_string(),
                        format!("expected a positive integer, found {raw:?}"),
                    ))
                }
            },
        };
        Ok(Self {
            schema_dir: lookup("JSONPROC_SCHEMA_DIR")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.schema_dir),
            max_depth,
            label: lookup("JSONPROC_LABEL")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.label),
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
