//! Table reader producing [`Record`]s

use crate::config::DbSourceConfig;
use crate::sql::{quote_identifier, sanitize_table_name};
use crate::{Error, Result};
use libsql::{Builder, Connection, Database};
use pain_ir::Record;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Reads every row of one table from a local SQLite file
#[derive(Debug, Clone, Default)]
pub struct DbReader {
    config: DbSourceConfig,
}

impl DbReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: DbSourceConfig) -> Self {
        self.config = config;
        self
    }

    /// Read all rows of the configured table, in storage order.
    ///
    /// Values are rendered as text: `NULL` becomes the empty string,
    /// numbers use their shortest decimal form and blobs are decoded as
    /// UTF-8 (lossy).
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for an unusable table name, [`Error::NotFound`]
    /// when the file is absent, and libsql errors for an unreadable file or
    /// a missing table.
    pub async fn read_path(&self, path: impl AsRef<Path>) -> Result<Vec<Record>> {
        let path = path.as_ref();
        let table = sanitize_table_name(&self.config.table)?;
        if !path.is_file() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }

        let database = self.open(path).await?;
        let connection = database.connect().map_err(|source| Error::Libsql {
            context: "connect database".to_string(),
            source,
        })?;

        let records = read_table(&connection, &table).await?;
        debug!(
            "Read {} record(s) from table '{}' in {}",
            records.len(),
            table,
            path.display()
        );
        Ok(records)
    }

    async fn open(&self, path: &Path) -> Result<Database> {
        if self.config.timeout_ms == 0 {
            return Err(Error::Config {
                details: "timeout_ms must be greater than zero".to_string(),
            });
        }

        let build = Builder::new_local(path).build();
        tokio::time::timeout(Duration::from_millis(self.config.timeout_ms), build)
            .await
            .map_err(|_| Error::Connection {
                details: format!(
                    "Timed out after {}ms while opening {}",
                    self.config.timeout_ms,
                    path.display()
                ),
            })?
            .map_err(|source| Error::Libsql {
                context: "open local database".to_string(),
                source,
            })
    }
}

async fn read_table(connection: &Connection, table: &str) -> Result<Vec<Record>> {
    let sql = format!("SELECT * FROM {}", quote_identifier(table));
    let mut rows = connection
        .query(&sql, ())
        .await
        .map_err(|source| Error::Sql {
            statement: sql.clone(),
            source,
        })?;

    let mut records = Vec::new();
    while let Some(row) = rows.next().await.map_err(|source| Error::Sql {
        statement: sql.clone(),
        source,
    })? {
        records.push(row_to_record(table, &row, records.len() + 1)?);
    }
    Ok(records)
}

fn row_to_record(table: &str, row: &libsql::Row, index: usize) -> Result<Record> {
    let mut record = Record::new(index);
    for idx in 0..row.column_count() {
        let column_name = row.column_name(idx).ok_or_else(|| Error::Query {
            table: table.to_string(),
            details: format!("Missing column name for index {idx}"),
        })?;
        let value = row.get_value(idx).map_err(|source| Error::Query {
            table: table.to_string(),
            details: format!("Failed to read column '{column_name}': {source}"),
        })?;
        record.insert(column_name, value_to_text(value));
    }
    Ok(record)
}

fn value_to_text(value: libsql::Value) -> String {
    match value {
        libsql::Value::Null => String::new(),
        libsql::Value::Integer(value) => value.to_string(),
        libsql::Value::Real(value) => value.to_string(),
        libsql::Value::Text(value) => value,
        libsql::Value::Blob(value) => String::from_utf8_lossy(&value).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(libsql::Value::Null), "");
        assert_eq!(value_to_text(libsql::Value::Integer(42)), "42");
        assert_eq!(value_to_text(libsql::Value::Real(10.5)), "10.5");
        assert_eq!(value_to_text(libsql::Value::Real(100.0)), "100");
        assert_eq!(value_to_text(libsql::Value::Text("EUR".into())), "EUR");
        assert_eq!(value_to_text(libsql::Value::Blob(b"abc".to_vec())), "abc");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = DbReader::new()
            .read_path("/definitely/not/here.db")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_invalid_table_is_rejected_before_io() {
        let reader = DbReader::new().with_config(DbSourceConfig::new().with_table(";--"));
        let err = reader.read_path("/definitely/not/here.db").await.unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
