#![deny(warnings)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # pain-adapter-csv
//!
//! Reads payment records from header-first CSV files.
//!
//! Every data row becomes a [`pain_ir::Record`] keyed by the header names,
//! with values kept exactly as written. Type checks happen later, in the
//! field validator.
//!
//! ## Example Usage
//!
//! ```rust
//! use pain_adapter_csv::{CsvConfig, CsvReader};
//! use std::io::Cursor;
//!
//! let config = CsvConfig::new().delimiter(';');
//! let records = CsvReader::new()
//!     .with_config(config)
//!     .read(Cursor::new("id;currency\n1;EUR\n"))
//!     .unwrap();
//!
//! assert_eq!(records[0].get("currency"), Some("EUR"));
//! ```

pub mod config;
pub mod errors;
pub mod reader;

pub use config::CsvConfig;
pub use errors::{CsvError, CsvResult, RowLengthMismatchKind};
pub use reader::CsvReader;

use pain_ir::Record;
use std::path::Path;

/// Load every record from the CSV file at `path`
///
/// # Errors
///
/// See [`CsvReader::read_path`].
pub fn load_records(path: impl AsRef<Path>, config: &CsvConfig) -> CsvResult<Vec<Record>> {
    CsvReader::new()
        .with_config(config.clone())
        .read_path(path)
}
