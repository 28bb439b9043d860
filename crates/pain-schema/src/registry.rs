//! Concurrent cache of resolved field schemas

use crate::model::FieldSchema;
use dashmap::DashMap;

/// Thread-safe registry of resolved (merged) field schemas keyed by name
#[derive(Debug, Default)]
pub struct FieldSchemaRegistry {
    schemas: DashMap<String, FieldSchema>,
}

impl FieldSchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            schemas: DashMap::new(),
        }
    }

    /// Register a schema, replacing any previous entry
    pub fn register(&self, name: impl Into<String>, schema: FieldSchema) {
        self.schemas.insert(name.into(), schema);
    }

    /// Get a copy of a schema by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<FieldSchema> {
        self.schemas.get(name).map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn clear(&self) {
        self.schemas.clear();
    }
}
