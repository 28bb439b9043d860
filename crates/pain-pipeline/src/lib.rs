#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # pain-pipeline
//!
//! Generation orchestration for `pain.001` documents.
//!
//! A [`Generator`] takes a [`GenerationRequest`] naming the message variant,
//! the template, the XSD and the data source, and runs the whole chain:
//! load records, validate fields, bind the namespace, build the tree,
//! serialize, then write and schema-validate according to the configured
//! [`OutputPolicy`].

pub mod generator;
pub mod output;
pub mod policies;
pub mod state;

pub use generator::{GenerationReport, GenerationRequest, Generator, GeneratorConfig};
pub use output::derive_output_path;
pub use policies::OutputPolicy;
pub use state::{GenerationState, Lifecycle, SchemaOutcome};

use pain_validation::{FieldReport, XsdViolation, XsdViolations};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which input of a request was absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Template,
    Schema,
    Data,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Template => "template",
            Self::Schema => "schema",
            Self::Data => "data file",
        })
    }
}

/// Problems with the payment data itself
#[derive(Error, Debug)]
pub enum DataError {
    #[error("empty")]
    Empty { origin: PathBuf },

    #[error("{0}")]
    Fields(FieldReport),

    #[error("failed to load '{}': {message}", origin.display())]
    Load { origin: PathBuf, message: String },
}

impl DataError {
    pub fn load(origin: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            origin: origin.into(),
            message: message.into(),
        }
    }
}

/// Errors that can occur while generating a document
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Missing {kind}: '{}'", path.display())]
    MissingResource { kind: ResourceKind, path: PathBuf },

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Schema violation for '{}': {violations}", path.display())]
    SchemaViolation {
        path: PathBuf,
        violations: XsdViolations,
    },

    #[error("Build error: {0}")]
    Build(#[from] pain_message::Error),

    #[error("IO error during {operation} for '{path}': {message}")]
    Io {
        operation: String,
        path: String,
        message: String,
    },
}

impl Error {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn missing(kind: ResourceKind, path: impl Into<PathBuf>) -> Self {
        Self::MissingResource {
            kind,
            path: path.into(),
        }
    }

    /// A violation list holding a single document-level message, used when
    /// the schema or the document cannot be read at all.
    pub fn unreadable(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SchemaViolation {
            path: path.into(),
            violations: XsdViolations(vec![XsdViolation {
                path: "/".to_string(),
                message: message.into(),
            }]),
        }
    }

    /// Create a structured I/O error with operation/path context.
    pub fn io(
        operation: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Io {
            operation: operation.into(),
            path: path.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::io("io", "<unknown>", e.to_string())
    }
}

impl From<pain_schema::Error> for Error {
    fn from(e: pain_schema::Error) -> Self {
        Error::configuration(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_data_displays_as_empty() {
        let error = Error::from(DataError::Empty {
            origin: PathBuf::from("/tmp/data.csv"),
        });
        assert_eq!(error.to_string(), "Data error: empty");
    }

    #[test]
    fn missing_resource_names_kind_and_path() {
        let error = Error::missing(ResourceKind::Schema, "/tmp/pain.xsd");
        assert_eq!(error.to_string(), "Missing schema: '/tmp/pain.xsd'");
    }

    #[test]
    fn unsupported_variant_is_a_configuration_error() {
        let error: Error = "unsupported.999"
            .parse::<pain_schema::MessageVariant>()
            .map_err(Error::from)
            .unwrap_err();
        match error {
            Error::Configuration { message } => assert!(message.contains("unsupported.999")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn io_error_from_std_error_has_fallback_context() {
        let io_error = std::fs::File::open("/path/that/does/not/exist")
            .map_err(Error::from)
            .expect_err("open should fail");

        match io_error {
            Error::Io {
                operation,
                path,
                message,
            } => {
                assert_eq!(operation, "io");
                assert_eq!(path, "<unknown>");
                assert!(!message.is_empty());
            }
            _ => panic!("expected io variant"),
        }
    }

    #[test]
    fn unreadable_schema_is_a_single_violation() {
        match Error::unreadable("/tmp/out.xml", "schema could not be parsed") {
            Error::SchemaViolation { violations, .. } => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations.0[0].path, "/");
            }
            other => panic!("expected schema violation, got {other:?}"),
        }
    }
}
