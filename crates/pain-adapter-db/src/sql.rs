//! Identifier handling

use crate::{Error, Result};

pub(crate) fn quote_identifier(value: &str) -> String {
    let escaped = value.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

/// Reduce a user-supplied table name to `[A-Za-z0-9_]`, starting with a letter.
///
/// Characters outside the set are dropped, then any leading characters
/// that are not ASCII letters.
///
/// # Errors
///
/// Returns [`Error::Config`] when nothing usable remains.
pub fn sanitize_table_name(raw: &str) -> Result<String> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .skip_while(|c| !c.is_ascii_alphabetic())
        .collect();

    if kept.is_empty() {
        return Err(Error::Config {
            details: format!("table name '{raw}' has no usable characters"),
        });
    }
    Ok(kept)
}
