//! # pain-adapter-db
//!
//! Reads payment records from a table in a local SQLite file.
//!
//! Each row becomes a [`pain_ir::Record`] keyed by column name with values
//! rendered as text, so that database and CSV sources feed the field
//! validator identically.

pub mod config;
pub mod reader;
mod sql;

pub use config::{DEFAULT_TABLE, DbSourceConfig};
pub use reader::DbReader;
pub use sql::sanitize_table_name;

use pain_ir::Record;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when reading from the database.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {details}")]
    Config { details: String },

    #[error("Database file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Connection error: {details}")]
    Connection { details: String },

    #[error("Libsql error during {context}: {source}")]
    Libsql {
        context: String,
        #[source]
        source: libsql::Error,
    },

    #[error("SQL error executing `{statement}`: {source}")]
    Sql {
        statement: String,
        #[source]
        source: libsql::Error,
    },

    #[error("Query error on `{table}`: {details}")]
    Query { table: String, details: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Load every row of `config.table` from the SQLite file at `path`
///
/// # Errors
///
/// See [`DbReader::read_path`].
pub async fn load_records(path: impl AsRef<Path>, config: &DbSourceConfig) -> Result<Vec<Record>> {
    DbReader::new()
        .with_config(config.clone())
        .read_path(path)
        .await
}
