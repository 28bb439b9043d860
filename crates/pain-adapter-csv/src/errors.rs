//! Error types for the CSV adapter with context

use std::path::PathBuf;
use thiserror::Error;

/// Whether a row length mismatch is due to missing or extra columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLengthMismatchKind {
    Missing,
    Extra,
}

impl std::fmt::Display for RowLengthMismatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing values"),
            Self::Extra => write!(f, "extra values"),
        }
    }
}

/// Errors that can occur when loading CSV data
#[derive(Error, Debug, Clone)]
pub enum CsvError {
    /// The data file does not exist
    #[error("CSV file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// CSV read error with context
    #[error("CSV read error at line {line}: {message}")]
    Read { line: usize, message: String },

    /// Header row is absent or unusable
    #[error("Invalid CSV header: {0}")]
    Header(String),

    /// Row-length mismatch against the header width
    #[error(
        "Row length mismatch at line {line}: expected {expected} columns, got {actual} ({kind})"
    )]
    RowLengthMismatch {
        line: usize,
        expected: usize,
        actual: usize,
        kind: RowLengthMismatchKind,
    },

    /// I/O error
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CsvError {
    /// Create a read error at a specific line
    pub fn read_at(line: usize, message: impl Into<String>) -> Self {
        Self::Read {
            line,
            message: message.into(),
        }
    }

    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a row-length mismatch error.
    #[must_use]
    pub fn row_length_mismatch(line: usize, expected: usize, actual: usize) -> Self {
        let kind = if actual < expected {
            RowLengthMismatchKind::Missing
        } else {
            RowLengthMismatchKind::Extra
        };
        Self::RowLengthMismatch {
            line,
            expected,
            actual,
            kind,
        }
    }

    pub fn header(message: impl Into<String>) -> Self {
        Self::Header(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Get the line number if available
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::Read { line, .. } | Self::RowLengthMismatch { line, .. } if *line > 0 => {
                Some(*line)
            }
            _ => None,
        }
    }
}

impl From<std::io::Error> for CsvError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<csv::Error> for CsvError {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map_or(0, |p| usize::try_from(p.line()).unwrap_or(0));
        match e.kind() {
            csv::ErrorKind::Io(io) => Self::Io(io.to_string()),
            _ => Self::read_at(line, e.to_string()),
        }
    }
}

/// Result type alias for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;
