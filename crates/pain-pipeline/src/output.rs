//! Output location

use pain_schema::MessageVariant;
use std::path::{Path, PathBuf};

/// Path of the generated document: `<variant>.xml` next to `template`.
///
/// A template without a parent directory yields a bare file name.
#[must_use]
pub fn derive_output_path(template: impl AsRef<Path>, variant: MessageVariant) -> PathBuf {
    let file_name = format!("{}.xml", variant.as_str());
    match template.as_ref().parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}
