//! Output policies

use serde::Deserialize;

/// When the generated document is checked against its XSD, relative to
/// writing it to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputPolicy {
    /// Validate the serialized text in memory, write only when it passes
    ValidateThenWrite,

    /// Write first, then validate the file
    WriteThenValidate {
        /// Leave a failing file on disk instead of removing it
        #[serde(default)]
        keep_invalid: bool,
    },
}

impl Default for OutputPolicy {
    fn default() -> Self {
        Self::ValidateThenWrite
    }
}

impl OutputPolicy {
    /// Whether a document that failed validation should stay on disk
    #[must_use]
    pub fn keeps_invalid(self) -> bool {
        matches!(self, Self::WriteThenValidate { keep_invalid: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates_before_writing() {
        assert_eq!(OutputPolicy::default(), OutputPolicy::ValidateThenWrite);
        assert!(!OutputPolicy::default().keeps_invalid());
    }

    #[test]
    fn test_keeps_invalid() {
        assert!(OutputPolicy::WriteThenValidate { keep_invalid: true }.keeps_invalid());
        assert!(!OutputPolicy::WriteThenValidate { keep_invalid: false }.keeps_invalid());
    }
}
