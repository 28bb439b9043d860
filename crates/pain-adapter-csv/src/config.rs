//! CSV configuration options

use crate::errors::{CsvError, CsvResult};
use serde::Deserialize;

/// Configuration for reading payment CSV files
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Field delimiter character (default: comma)
    pub delimiter: char,
    /// Quote character for fields containing special characters (default: double quote)
    pub quote_char: char,
    /// Escape character for escaping quotes (default: doubling the quote)
    pub escape_char: Option<char>,
    /// Strip whitespace around header names (default: true)
    pub trim_headers: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote_char: '"',
            escape_char: None,
            trim_headers: true,
        }
    }
}

impl CsvConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiter character
    #[must_use]
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the quote character
    #[must_use]
    pub fn quote_char(mut self, quote_char: char) -> Self {
        self.quote_char = quote_char;
        self
    }

    /// Set the escape character
    #[must_use]
    pub fn escape_char(mut self, escape_char: char) -> Self {
        self.escape_char = Some(escape_char);
        self
    }

    /// Keep header names exactly as written
    #[must_use]
    pub fn keep_header_whitespace(mut self) -> Self {
        self.trim_headers = false;
        self
    }

    /// Check that every configured character fits in a single byte
    ///
    /// # Errors
    ///
    /// Returns [`CsvError::Config`] naming the offending option.
    pub fn validate(&self) -> CsvResult<()> {
        let mut chars = vec![("delimiter", self.delimiter), ("quote_char", self.quote_char)];
        if let Some(escape) = self.escape_char {
            chars.push(("escape_char", escape));
        }
        for (option, c) in chars {
            if !c.is_ascii() {
                return Err(CsvError::config(format!(
                    "{option} '{c}' is not a single-byte ASCII character"
                )));
            }
        }
        if self.delimiter == self.quote_char {
            return Err(CsvError::config("delimiter and quote_char must differ"));
        }
        Ok(())
    }

    /// Delimiter as a byte for the csv crate
    pub(crate) fn delimiter_u8(&self) -> u8 {
        ascii_byte(self.delimiter)
    }

    /// Quote char as a byte for the csv crate
    pub(crate) fn quote_char_u8(&self) -> u8 {
        ascii_byte(self.quote_char)
    }

    /// Escape char as a byte, if set
    pub(crate) fn escape_char_u8(&self) -> Option<u8> {
        self.escape_char.map(ascii_byte)
    }
}

fn ascii_byte(c: char) -> u8 {
    u8::try_from(c).unwrap_or(b'?')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CsvConfig::default();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.quote_char, '"');
        assert_eq!(config.escape_char, None);
        assert!(config.trim_headers);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = CsvConfig::new()
            .delimiter(';')
            .quote_char('\'')
            .escape_char('\\')
            .keep_header_whitespace();

        assert_eq!(config.delimiter_u8(), b';');
        assert_eq!(config.quote_char_u8(), b'\'');
        assert_eq!(config.escape_char_u8(), Some(b'\\'));
        assert!(!config.trim_headers);
    }

    #[test]
    fn test_rejects_multibyte_delimiter() {
        let err = CsvConfig::new().delimiter('§').validate().unwrap_err();
        assert!(err.to_string().contains("delimiter"));
    }

    #[test]
    fn test_rejects_delimiter_equal_to_quote() {
        assert!(CsvConfig::new().delimiter('"').validate().is_err());
    }
}
