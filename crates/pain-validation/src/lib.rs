#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # pain-validation
//!
//! The two validation stages of the generator:
//!
//! - [`FieldValidator`] checks loaded records against a variant's field
//!   schema and reports every (row, column) problem in one pass.
//! - [`xsd`] checks a serialized document against an XML Schema definition.
//!
//! ## Example Usage
//!
//! ```rust
//! use pain_ir::Record;
//! use pain_schema::{FieldDefinition, FieldSchema, FieldType};
//! use pain_validation::FieldValidator;
//!
//! let schema = FieldSchema::new("demo")
//!     .with_fields(vec![FieldDefinition::new("id", FieldType::Integer)]);
//! let records = vec![Record::from_pairs(1, [("id", "7")])];
//!
//! assert!(FieldValidator::new().validate(&records, &schema).is_ok());
//! ```

pub mod fields;
pub mod report;
pub mod rules;
pub mod xsd;

pub use fields::FieldValidator;
pub use report::{FieldIssue, FieldReport, IssueKind};
pub use rules::{
    RuleResult, parse_boolean, parse_decimal, parse_timestamp, validate_field_type,
    validate_required,
};
pub use xsd::{XsdSchema, XsdViolation, XsdViolations, validate_file_against, validate_via_xsd};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during validation
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid records: {0}")]
    Fields(FieldReport),

    #[error("Invalid schema definition: {message}")]
    Schema { message: String },

    #[error("Malformed XML document: {message}")]
    Xml { message: String },

    #[error("Document does not conform to schema: {0}")]
    Violations(XsdViolations),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
