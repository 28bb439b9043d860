//! Relational source options

use serde::Deserialize;

/// Table read when none is configured
pub const DEFAULT_TABLE: &str = "pain001";

/// Options for reading records from a SQLite file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DbSourceConfig {
    /// Table holding one payment per row
    pub table: String,
    /// Upper bound for opening the database file
    pub timeout_ms: u64,
}

impl Default for DbSourceConfig {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            timeout_ms: 5_000,
        }
    }
}

impl DbSourceConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
