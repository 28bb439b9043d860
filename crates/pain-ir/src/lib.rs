#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # pain-ir
//!
//! Shared data structures for the pain001 generator.
//!
//! Two shapes flow through the pipeline: flat [`Record`]s as loaded from a
//! delimited file or a database table, and the [`Element`] tree that message
//! builders assemble before it is serialized to XML.

/// Document container and generation metadata.
pub mod document;
/// Ordered XML element tree.
pub mod element;
/// Loaded payment records.
pub mod record;
/// Cursor-based navigation over element trees.
pub mod traversal;

pub use document::{Document, DocumentMetadata};
pub use element::Element;
pub use record::Record;
pub use traversal::{Cursor, Traversal, walk};

use thiserror::Error;

/// Errors raised while reading records or navigating trees
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Element not found at path: {path}")]
    NodeNotFound { path: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Record {row} has no field '{field}'")]
    MissingField { row: usize, field: String },

    #[error("Conversion error in {context}: {message}")]
    Conversion { context: String, message: String },
}

impl Error {
    /// Build a node-not-found error with path context.
    pub fn node_not_found(path: impl Into<String>) -> Self {
        Self::NodeNotFound { path: path.into() }
    }

    /// Build an invalid-path error with input path and parsing reason.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Build a missing-field error for a record row.
    pub fn missing_field(row: usize, field: impl Into<String>) -> Self {
        Self::MissingField {
            row,
            field: field.into(),
        }
    }

    /// Build a conversion error with conversion context.
    pub fn conversion(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, Error>;
