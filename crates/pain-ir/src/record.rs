//! Flat payment records as produced by the loaders
#![allow(clippy::must_use_candidate)]

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// One payment transaction row
///
/// Columns keep source order. Every value is raw text: loaders render
/// numbers and NULLs to strings before building a record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Record {
    /// 1-based data row number (header excluded)
    pub row: usize,

    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record for a data row
    pub fn new(row: usize) -> Self {
        Self {
            row,
            fields: Vec::new(),
        }
    }

    /// Build a record from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(row: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new(row);
        for (key, value) in pairs {
            record.insert(key, value);
        }
        record
    }

    /// Set a column value; an existing column keeps its position
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Soft lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Lookup that fails when the column is absent.
    ///
    /// Builders use this so that a field schema that drifted away from the
    /// builder's expectations surfaces as an error instead of an empty element.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| Error::missing_field(self.row, key))
    }

    /// Required value with surrounding whitespace removed
    pub fn require_trimmed(&self, key: &str) -> Result<&str> {
        self.require(key).map(str::trim)
    }

    /// Whether the column is absent or contains only whitespace
    pub fn is_blank(&self, key: &str) -> bool {
        self.get(key).is_none_or(|v| v.trim().is_empty())
    }

    /// Column names in source order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// `(column, value)` pairs in source order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
