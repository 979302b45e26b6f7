//! Directory-backed store of JSON-schema documents keyed by file stem.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::types::{McpError, McpResult};

/// Immutable set of named JSON-schema documents.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Value>,
}

impl SchemaRegistry {
    /// Load every `*.json` document in `dir`.
    ///
    /// Any problem is fatal: a missing or empty directory, an unreadable
    /// file, invalid JSON, or a document that is not a JSON object.
    pub fn load_dir(dir: impl AsRef<Path>) -> McpResult<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| {
            McpError::Schema(format!(
                "cannot read schema directory {}: {e}",
                dir.display()
            ))
        })?;

        let mut schemas = BTreeMap::new();
        for entry in entries {
            let path = entry
                .map_err(|e| McpError::Schema(format!("cannot list {}: {e}", dir.display())))?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| {
                    McpError::Schema(format!("non UTF-8 schema file name: {}", path.display()))
                })?
                .to_string();

            let text = fs::read_to_string(&path).map_err(|e| {
                McpError::Schema(format!("cannot read {}: {e}", path.display()))
            })?;
            let document: Value = serde_json::from_str(&text).map_err(|e| {
                McpError::Schema(format!("{} is not valid JSON: {e}", path.display()))
            })?;

            tracing::debug!("Loaded schema '{name}' from {}", path.display());
            schemas.insert(name, document);
        }

        if schemas.is_empty() {
            return Err(McpError::Schema(format!(
                "no schema documents found in {}",
                dir.display()
            )));
        }

        let registry = Self::from_documents(schemas)?;
        tracing::info!(
            "Loaded {} schema documents from {}",
            registry.len(),
            dir.display()
        );
        Ok(registry)
    }

    /// Build a registry from in-memory `(name, document)` pairs.
    pub fn from_documents<I, S>(documents: I) -> McpResult<Self>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        let mut schemas = BTreeMap::new();
        for (name, document) in documents {
            let name = name.into();
            if !document.is_object() {
                return Err(McpError::Schema(format!(
                    "schema '{name}' must be a JSON object"
                )));
            }
            schemas.insert(name, document);
        }
        Ok(Self { schemas })
    }

    /// Fetch a schema by name.
    pub fn get(&self, name: &str) -> McpResult<&Value> {
        self.schemas
            .get(name)
            .ok_or_else(|| McpError::Schema(format!("schema '{name}' is not loaded")))
    }

    /// Schema names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Number of loaded schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no schemas are loaded.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
