//! Field schema model definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a record column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Decimal,
    Boolean,
    /// ISO-8601 date or date-time
    Date,
    Text,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Integer => "integer",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// A required column and its expected type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Inheritance bookkeeping for a field schema
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaInheritance {
    /// Parent table name, if the table extends another
    pub parent: Option<String>,
    /// Resolved chain from base to this table
    pub chain: Vec<String>,
    /// Whether parent fields were merged in
    pub is_merged: bool,
}

/// Ordered table of required fields for one message variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
    pub inheritance: SchemaInheritance,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            inheritance: SchemaInheritance::default(),
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.inheritance.parent = Some(parent.into());
        self
    }

    /// Look up a field definition by column name
    pub fn get(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
