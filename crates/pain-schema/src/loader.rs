//! Field schema loader with inheritance support

use crate::builtin;
use crate::inheritance::{detect_circular_dependency, merge_field_schemas};
use crate::model::{FieldDefinition, FieldSchema, FieldType};
use crate::registry::FieldSchemaRegistry;
use crate::variant::MessageVariant;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Serializable field table as stored in YAML/JSON files
#[derive(Debug, Deserialize)]
struct FieldSchemaFile {
    name: String,
    #[serde(default)]
    extends: Option<String>,
    #[serde(default)]
    fields: Vec<FieldFile>,
}

#[derive(Debug, Deserialize)]
struct FieldFile {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
}

/// Loads field tables from search paths, falling back to the built-in set
pub struct FieldSchemaLoader {
    registry: Arc<FieldSchemaRegistry>,
    search_paths: Vec<PathBuf>,
}

impl FieldSchemaLoader {
    /// Loader that only knows the built-in tables
    #[must_use]
    pub fn new() -> Self {
        Self::with_paths(Vec::new())
    }

    /// Loader that checks `search_paths` before the built-in tables
    #[must_use]
    pub fn with_paths(search_paths: Vec<PathBuf>) -> Self {
        Self {
            registry: Arc::new(FieldSchemaRegistry::new()),
            search_paths,
        }
    }

    /// Loader sharing an existing registry
    #[must_use]
    pub fn with_registry(registry: Arc<FieldSchemaRegistry>, search_paths: Vec<PathBuf>) -> Self {
        Self {
            registry,
            search_paths,
        }
    }

    /// Resolved field table for a message variant
    ///
    /// # Errors
    ///
    /// Returns an error when the table or one of its parents cannot be found
    /// or parsed, or when the inheritance chain is circular.
    pub fn load_variant(&self, variant: MessageVariant) -> Result<FieldSchema> {
        self.load(variant.as_str())
    }

    /// Resolved field table by name, with parents merged in
    ///
    /// # Errors
    ///
    /// See [`FieldSchemaLoader::load_variant`].
    pub fn load(&self, name: &str) -> Result<FieldSchema> {
        if let Some(cached) = self.registry.get(name) {
            debug!("Cache hit for field schema: {}", name);
            return Ok(cached);
        }

        trace!("Cache miss for field schema: {}", name);

        let leaf = self.load_unresolved(name)?;
        let chain = self.resolve_inheritance_chain(leaf)?;
        let resolved = merge_chain(chain)?;

        info!(
            "Resolved field schema {} ({} fields)",
            resolved.name,
            resolved.len()
        );
        self.registry.register(name, resolved.clone());

        Ok(resolved)
    }

    /// Load a table from a file without resolving its parent
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load_from_file(&self, path: &Path) -> Result<FieldSchema> {
        trace!("Loading field schema from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;

        if path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            Self::load_from_yaml(&content)
        } else {
            Self::load_from_json(&content)
        }
    }

    /// Parse a table from YAML
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] on malformed input.
    pub fn load_from_yaml(yaml: &str) -> Result<FieldSchema> {
        let file: FieldSchemaFile = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidFormat(format!("YAML parse error: {e}")))?;
        Ok(convert_schema_file(file))
    }

    /// Parse a table from JSON
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`] on malformed input.
    pub fn load_from_json(json: &str) -> Result<FieldSchema> {
        let file: FieldSchemaFile = serde_json::from_str(json)
            .map_err(|e| Error::InvalidFormat(format!("JSON parse error: {e}")))?;
        Ok(convert_schema_file(file))
    }

    /// Add a search path for table files
    pub fn add_path(&mut self, path: PathBuf) {
        self.search_paths.push(path);
    }

    /// Get the registry (for testing/debugging)
    #[must_use]
    pub fn registry(&self) -> &FieldSchemaRegistry {
        &self.registry
    }

    fn load_unresolved(&self, name: &str) -> Result<FieldSchema> {
        for dir in &self.search_paths {
            for ext in ["yaml", "yml", "json"] {
                let file_path = dir.join(format!("{name}.{ext}"));
                if file_path.is_file() {
                    trace!("Found field schema file: {:?}", file_path);
                    return self.load_from_file(&file_path);
                }
            }
        }

        match builtin::source(name) {
            Some(yaml) => Self::load_from_yaml(yaml),
            None => Err(Error::NotFound(format!(
                "{name} (search paths: {:?})",
                self.search_paths
            ))),
        }
    }

    /// Walk `extends` links up to the root table; returns base first
    fn resolve_inheritance_chain(&self, leaf: FieldSchema) -> Result<Vec<FieldSchema>> {
        let mut visited = HashSet::new();
        visited.insert(leaf.name.clone());

        let mut chain = vec![leaf];
        while let Some(parent_name) = chain
            .last()
            .and_then(|s| s.inheritance.parent.clone())
        {
            let child_name = chain.last().map(|s| s.name.clone()).unwrap_or_default();
            if detect_circular_dependency(&child_name, &parent_name, &visited) {
                return Err(Error::Inheritance(format!(
                    "Circular dependency detected: {child_name} -> {parent_name}"
                )));
            }

            let parent = match self.load_unresolved(&parent_name) {
                Ok(s) => s,
                Err(Error::NotFound(_)) => {
                    return Err(Error::Inheritance(format!(
                        "Parent field schema not found: {parent_name} (referenced by {child_name})"
                    )));
                }
                Err(e) => return Err(e),
            };

            visited.insert(parent_name);
            chain.push(parent);
        }

        chain.reverse();
        trace!(
            "Resolved inheritance chain: {:?}",
            chain.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
        );
        Ok(chain)
    }
}

impl Default for FieldSchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn convert_schema_file(file: FieldSchemaFile) -> FieldSchema {
    let fields = file
        .fields
        .into_iter()
        .map(|f| FieldDefinition::new(f.name, f.field_type))
        .collect();

    let schema = FieldSchema::new(file.name).with_fields(fields);
    match file.extends {
        Some(parent) => schema.with_parent(parent),
        None => schema,
    }
}

/// Merge a base-first chain into a single table named after the leaf
fn merge_chain(chain: Vec<FieldSchema>) -> Result<FieldSchema> {
    let names: Vec<String> = chain.iter().map(|s| s.name.clone()).collect();
    let mut iter = chain.into_iter();
    let mut result = iter
        .next()
        .ok_or_else(|| Error::Inheritance("Cannot merge empty chain".to_string()))?;

    let mut merged_any = false;
    for child in iter {
        result = merge_field_schemas(&result, &child);
        merged_any = true;
    }

    result.inheritance.chain = names;
    result.inheritance.is_merged = merged_any;
    Ok(result)
}
