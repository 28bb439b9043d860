//! XML element tree
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

use serde::{Deserialize, Serialize};

/// A node in the output document tree
///
/// Attributes keep insertion order so that serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Element {
    /// Tag name (e.g. `GrpHdr`)
    pub name: String,

    /// Attributes in insertion order
    pub attributes: Vec<(String, String)>,

    /// Text content, if this is a leaf
    pub text: Option<String>,

    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a leaf element carrying text
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Set an attribute, replacing an existing value with the same key in place
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
        self
    }

    /// Append a child and return a mutable reference to it
    pub fn append(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Append a text leaf
    pub fn append_leaf(&mut self, name: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.children.push(Element::leaf(name, text));
        self
    }

    /// Look up an attribute value
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Text content as `&str`
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Find the first child by name
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Find all children by name
    pub fn find_children(&self, name: &str) -> Vec<&Element> {
        self.children.iter().filter(|c| c.name == name).collect()
    }

    /// Count descendants (excluding self) with the given name
    pub fn count_descendants(&self, name: &str) -> usize {
        self.children
            .iter()
            .map(|c| usize::from(c.name == name) + c.count_descendants(name))
            .sum()
    }

    /// Whether this element has neither children nor text
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_order_is_preserved() {
        let el = Element::new("Document")
            .with_attribute("xmlns", "urn:a")
            .with_attribute("xmlns:xsi", "urn:b")
            .with_attribute("xsi:schemaLocation", "urn:a a.xsd");

        let keys: Vec<&str> = el.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["xmlns", "xmlns:xsi", "xsi:schemaLocation"]);
    }

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut el = Element::new("Amt")
            .with_attribute("Ccy", "EUR")
            .with_attribute("x", "1");
        el.set_attribute("Ccy", "CHF");

        assert_eq!(el.attribute("Ccy"), Some("CHF"));
        assert_eq!(el.attributes[0].0, "Ccy");
        assert_eq!(el.attributes.len(), 2);
    }

    #[test]
    fn test_append_returns_child() {
        let mut root = Element::new("PmtInf");
        root.append(Element::new("Dbtr")).append_leaf("Nm", "ACME");

        let dbtr = root.find_child("Dbtr").unwrap();
        assert_eq!(dbtr.find_child("Nm").unwrap().text(), Some("ACME"));
    }

    #[test]
    fn test_count_descendants() {
        let mut root = Element::new("CstmrCdtTrfInitn");
        for _ in 0..2 {
            let pmt = root.append(Element::new("PmtInf"));
            pmt.append(Element::new("CdtTrfTxInf"));
            pmt.append(Element::new("CdtTrfTxInf"));
        }

        assert_eq!(root.count_descendants("CdtTrfTxInf"), 4);
        assert_eq!(root.count_descendants("PmtInf"), 2);
        assert_eq!(root.count_descendants("Missing"), 0);
    }

    #[test]
    fn test_serde_roundtrip() {
        let el = Element::new("Amt").with_child(
            Element::leaf("InstdAmt", "10.00").with_attribute("Ccy", "EUR"),
        );
        let json = serde_json::to_string(&el).unwrap();
        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(el, back);
    }
}
