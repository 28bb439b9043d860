//! Document container for a generated message
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

use crate::element::Element;
use serde::{Deserialize, Serialize};

/// A generated message tree with its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Root element (`Document`)
    pub root: Element,

    /// Generation metadata
    pub metadata: DocumentMetadata,
}

/// Metadata recorded while building a document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Message variant identifier (e.g. `pain.001.001.03`)
    pub variant: Option<String>,

    /// Number of credit transfer transactions in the tree
    pub transaction_count: usize,

    /// Control sum rendered with two fraction digits
    pub control_sum: Option<String>,

    /// Generation timestamp
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            root,
            metadata: DocumentMetadata::default(),
        }
    }

    pub fn with_metadata(root: Element, metadata: DocumentMetadata) -> Self {
        Self { root, metadata }
    }

    /// Set the variant identifier
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.metadata.variant = Some(variant.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new(Element::new("Document"));

        assert_eq!(doc.root.name, "Document");
        assert!(doc.metadata.variant.is_none());
        assert_eq!(doc.metadata.transaction_count, 0);
    }

    #[test]
    fn test_document_with_metadata() {
        let metadata = DocumentMetadata {
            variant: Some("pain.001.001.09".to_string()),
            transaction_count: 3,
            control_sum: Some("30.00".to_string()),
            created_at: Some(chrono::DateTime::UNIX_EPOCH),
        };

        let doc = Document::with_metadata(Element::new("Document"), metadata);

        assert_eq!(doc.metadata.variant.as_deref(), Some("pain.001.001.09"));
        assert_eq!(doc.metadata.transaction_count, 3);
        assert_eq!(doc.metadata.control_sum.as_deref(), Some("30.00"));
        assert_eq!(doc.metadata.created_at, Some(chrono::DateTime::UNIX_EPOCH));
    }

    #[test]
    fn test_with_variant() {
        let doc = Document::new(Element::new("Document")).with_variant("pain.001.001.03");
        assert_eq!(doc.metadata.variant.as_deref(), Some("pain.001.001.03"));
    }
}
