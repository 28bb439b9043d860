#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # pain-message
//!
//! Turns validated payment records into `pain.001` documents.
//!
//! A generation run binds the variant's namespace once, creates the
//! `Document` root, dispatches to the [`MessageBuilder`] registered for the
//! variant and finally renders the tree with [`serialize`].
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pain_message::{BuildContext, BuilderRegistry, build_document, serialize};
//! use pain_schema::{FieldSchemaLoader, MessageVariant};
//!
//! # fn run(records: &[pain_ir::Record]) -> Result<(), Box<dyn std::error::Error>> {
//! let variant = MessageVariant::V09;
//! let schema = FieldSchemaLoader::new().load_variant(variant)?;
//! let ctx = BuildContext::new(variant, schema);
//!
//! let document = build_document(&BuilderRegistry::default(), &ctx, records)?;
//! let xml = serialize(&document)?;
//! # Ok(())
//! # }
//! ```

pub mod assemble;
pub mod builders;
pub mod context;
pub mod namespace;
pub mod root;
pub mod serializer;

pub use assemble::build_document;
pub use builders::{
    BuilderRegistry, MessageBuilder, Pain001V03, Pain001V04, Pain001V05, Pain001V06, Pain001V07,
    Pain001V08, Pain001V09, Pain001V10,
};
pub use context::BuildContext;
pub use namespace::NamespaceBinding;
pub use root::create_root;
pub use serializer::{serialize, serialize_element};

use pain_schema::MessageVariant;
use thiserror::Error;

/// Errors that can occur while building or rendering a message
#[derive(Error, Debug)]
pub enum Error {
    #[error("No builder registered for {variant}")]
    NoBuilder { variant: MessageVariant },

    #[error("Cannot build a message from zero records")]
    NoRecords,

    #[error("Row {row}: invalid {field} value '{value}'")]
    InvalidValue {
        row: usize,
        field: String,
        value: String,
    },

    #[error(transparent)]
    Record(#[from] pain_ir::Error),

    #[error("XML serialization failed: {message}")]
    Serialization { message: String },
}

impl Error {
    pub fn invalid_value(row: usize, field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            row,
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
