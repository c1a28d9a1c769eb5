//! # Schema Registry
//!
//! Loads schema documents from a directory and validates values against
//! them by name. Schemas may be written as JSON (`*.schema.json`) or YAML
//! (`*.schema.yaml`, `*.schema.yml`); YAML documents are converted to the
//! equivalent JSON value tree at load time.
//!
//! The registry is read-only after construction and can be shared across
//! threads: validation borrows schemas immutably.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use jsonproc_core::{ProcessorError, TypeFamily};
use serde_json::Value;
use thiserror::Error;

use crate::validate::validate;

/// File suffixes recognized as schema documents.
const SCHEMA_SUFFIXES: [&str; 3] = [".schema.json", ".schema.yaml", ".schema.yml"];

/// Error while loading schemas or documents, or while validating through the registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// A schema file could not be loaded.
    #[error("schema load error for '{schema_name}': {reason}")]
    SchemaLoad {
        /// Schema filename or directory.
        schema_name: String,
        /// Reason the schema could not be loaded.
        reason: String,
    },

    /// No schema with the requested name is loaded.
    #[error("schema '{schema_name}' not found in {schema_dir}")]
    SchemaNotFound {
        /// Requested schema name.
        schema_name: String,
        /// Directory the registry was loaded from.
        schema_dir: String,
    },

    /// A document could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path to the document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The value failed validation.
    #[error(transparent)]
    Processor(#[from] ProcessorError),

    /// IO error reading the schema directory.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A set of named schema nodes loaded from one directory.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    /// Directory the schemas were loaded from.
    schema_dir: PathBuf,
    /// Map from schema filename (e.g. `"order.schema.json"`) to the schema node.
    schemas: HashMap<String, Value>,
}

impl SchemaRegistry {
    /// Load every schema document in `schema_dir`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaLoad` if the directory cannot be read,
    /// or if any schema file fails to parse or is not a JSON object.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = HashMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| RegistryError::SchemaLoad {
            schema_name: schema_dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !SCHEMA_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
                continue;
            }
            let value = load_document(&path).map_err(|e| RegistryError::SchemaLoad {
                schema_name: name.to_string(),
                reason: e.to_string(),
            })?;
            if !value.is_object() {
                return Err(RegistryError::SchemaLoad {
                    schema_name: name.to_string(),
                    reason: "schema root must be a JSON object".to_string(),
                });
            }
            tracing::trace!(schema = name, "loaded schema");
            schemas.insert(name.to_string(), value);
        }

        tracing::debug!(
            schema_dir = %schema_dir.display(),
            schema_count = schemas.len(),
            "loaded schema registry"
        );
        Ok(Self { schema_dir, schemas })
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Returns the names of all loaded schemas, sorted alphabetically.
    pub fn schema_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Look up a loaded schema by filename.
    pub fn get_schema(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Validate `value` against the named schema and return its validated form.
    ///
    /// # Errors
    ///
    /// `RegistryError::SchemaNotFound` for an unknown name,
    /// `RegistryError::Processor` if validation fails.
    pub fn validate(&self, name: &str, label: &str, value: Value) -> Result<Value, RegistryError> {
        let schema = self
            .get_schema(name)
            .ok_or_else(|| RegistryError::SchemaNotFound {
                schema_name: name.to_string(),
                schema_dir: self.schema_dir.display().to_string(),
            })?;
        Ok(validate(label, value, schema)?)
    }
}

/// Root type family and nesting depth of a schema, for listings and host-side
/// depth limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaSummary {
    /// Type family of the root node, if it declares a recognized one.
    pub family: Option<TypeFamily>,
    /// Nesting depth as computed by [`schema_depth`].
    pub depth: usize,
}

impl SchemaSummary {
    /// Summarize a schema node.
    pub fn of(schema: &Value) -> Self {
        let family = schema
            .as_object()
            .and_then(|node| TypeFamily::of_schema(node).ok().flatten());
        Self {
            family,
            depth: schema_depth(schema),
        }
    }
}

/// Nesting depth of a schema: the length of the longest chain of schema
/// nodes reachable through `items`, `additionalItems`, `properties`,
/// `patternProperties` and `additionalProperties`.
///
/// A leaf schema has depth 1; anything that is not a schema node has depth 0.
/// Validation recursion never goes deeper than this.
pub fn schema_depth(schema: &Value) -> usize {
    let Some(node) = schema.as_object() else {
        return 0;
    };
    let mut deepest = 0;
    for (keyword, child) in node {
        let child_depth = match (keyword.as_str(), child) {
            ("items", Value::Array(tuple)) => tuple.iter().map(schema_depth).max().unwrap_or(0),
            ("items" | "additionalItems" | "additionalProperties", _) => schema_depth(child),
            ("properties" | "patternProperties", Value::Object(children)) => {
                children.values().map(schema_depth).max().unwrap_or(0)
            }
            _ => 0,
        };
        deepest = deepest.max(child_depth);
    }
    deepest + 1
}

/// Load a JSON or YAML document, choosing the format by file extension
/// (`.yaml`/`.yml` for YAML, anything else JSON).
///
/// # Errors
///
/// Returns `RegistryError::DocumentLoad` if the file cannot be read or parsed.
pub fn load_document(path: &Path) -> Result<Value, RegistryError> {
    let content = std::fs::read_to_string(path).map_err(|e| RegistryError::DocumentLoad {
        path: path.display().to_string(),
        reason: format!("cannot read file: {e}"),
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => parse_yaml(&content).map_err(|reason| RegistryError::DocumentLoad {
            path: path.display().to_string(),
            reason,
        }),
        _ => serde_json::from_str(&content).map_err(|e| RegistryError::DocumentLoad {
            path: path.display().to_string(),
            reason: format!("invalid JSON: {e}"),
        }),
    }
}

/// Parse YAML text into a JSON value tree.
pub fn parse_yaml(content: &str) -> Result<Value, String> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?;
    yaml_to_json_value(&yaml).map_err(|e| format!("YAML-to-JSON conversion failed: {e}"))
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Mapping order is preserved. Non-string keys are stringified; tags are
/// dropped in favour of the tagged value.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_loads_json_and_yaml_schemas() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.schema.json", r#"{"type": "array", "items": {"type": "number"}}"#);
        write(dir.path(), "b.schema.yaml", "type: object\nrequired: [id]\n");
        write(dir.path(), "notes.txt", "ignored");

        let registry = SchemaRegistry::new(dir.path()).unwrap();
        assert_eq!(registry.schema_count(), 2);
        assert_eq!(registry.schema_names(), vec!["a.schema.json", "b.schema.yaml"]);
        assert_eq!(
            registry.get_schema("b.schema.yaml").unwrap(),
            &json!({"type": "object", "required": ["id"]})
        );
        assert_eq!(registry.schema_dir(), dir.path());
    }

    #[test]
    fn test_validate_by_name() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.schema.json", r#"{"type": "array", "items": {"type": "number"}}"#);
        let registry = SchemaRegistry::new(dir.path()).unwrap();

        assert_eq!(
            registry.validate("a.schema.json", "root", json!("45")).unwrap(),
            json!([45])
        );
        assert!(matches!(
            registry.validate("missing.schema.json", "root", json!(1)),
            Err(RegistryError::SchemaNotFound { .. })
        ));
        assert!(matches!(
            registry.validate("a.schema.json", "root", json!(["x"])),
            Err(RegistryError::Processor(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "bad.schema.json", "{ not json");
        assert!(matches!(
            SchemaRegistry::new(dir.path()),
            Err(RegistryError::SchemaLoad { .. })
        ));
    }

    #[test]
    fn test_rejects_non_object_schema() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "list.schema.json", "[1, 2]");
        let err = SchemaRegistry::new(dir.path()).unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SchemaRegistry::new(dir.path().join("nope")).is_err());
    }

    #[test]
    fn test_schema_depth() {
        assert_eq!(schema_depth(&json!({"type": "number"})), 1);
        assert_eq!(schema_depth(&json!({})), 1);
        assert_eq!(schema_depth(&json!("number")), 0);
        assert_eq!(
            schema_depth(&json!({
                "type": "array",
                "items": [{"type": "boolean"}, {"type": "array", "items": {"type": "null"}}],
                "additionalItems": {"type": "number"}
            })),
            3
        );
        assert_eq!(
            schema_depth(&json!({
                "type": "object",
                "properties": {"a": {"type": "object", "properties": {"b": {"type": "string"}}}},
                "additionalProperties": false
            })),
            3
        );
    }

    #[test]
    fn test_summary() {
        let summary = SchemaSummary::of(&json!({"type": "array", "items": {"type": "string"}}));
        assert_eq!(summary.family, Some(TypeFamily::Array));
        assert_eq!(summary.depth, 2);
        assert_eq!(SchemaSummary::of(&json!({"type": "bogus"})).family, None);
    }

    #[test]
    fn test_yaml_preserves_key_order() {
        let value = parse_yaml("z: 1\na: two\nm: [true, null]\n").unwrap();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(value["m"], json!([true, null]));
    }

    #[test]
    fn test_load_document_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "doc.yml", "qty: \"3\"\n");
        write(dir.path(), "doc.json", r#"{"qty": "3"}"#);
        assert_eq!(load_document(&dir.path().join("doc.yml")).unwrap(), json!({"qty": "3"}));
        assert_eq!(load_document(&dir.path().join("doc.json")).unwrap(), json!({"qty": "3"}));
        assert!(matches!(
            load_document(&dir.path().join("absent.json")),
            Err(RegistryError::DocumentLoad { .. })
        ));
    }
}
