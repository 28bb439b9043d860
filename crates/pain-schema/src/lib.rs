#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # pain-schema
//!
//! Message variants and the declarative field schemas that drive record
//! validation.
//!
//! Every supported `pain.001` variant has a YAML field table shipped with the
//! crate. Tables may extend a parent table, so the fields shared by all
//! variants live in a single `base` document:
//!
//! ```yaml
//! name: pain.001.001.05
//! extends: base
//! fields:
//!   - name: forwarding_agent_BIC
//!     type: text
//! ```
//!
//! Additional search paths let deployments override or add tables without
//! recompiling.

mod builtin;
pub mod inheritance;
pub mod loader;
pub mod model;
pub mod registry;
pub mod variant;

pub use loader::FieldSchemaLoader;
pub use model::{FieldDefinition, FieldSchema, FieldType};
pub use registry::FieldSchemaRegistry;
pub use variant::MessageVariant;

use thiserror::Error;

/// Errors that can occur when working with variants and field schemas
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported message variant: '{value}'")]
    UnsupportedVariant { value: String },

    #[error("Field schema not found: {0}")]
    NotFound(String),

    #[error("Invalid field schema format: {0}")]
    InvalidFormat(String),

    #[error("Inheritance error: {0}")]
    Inheritance(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an unsupported-variant error naming the received value.
    pub fn unsupported_variant(value: impl Into<String>) -> Self {
        Self::UnsupportedVariant {
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
