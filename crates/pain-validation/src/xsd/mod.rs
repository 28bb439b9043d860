//! XML Schema conformance checks.
//!
//! Covers the subset of XSD 1.0 that ISO 20022 message schemas are written
//! in: global and local element declarations, named and anonymous
//! complex/simple types, `sequence`/`choice` with occurrence bounds,
//! `xs:any`, simple content with attributes, and restriction facets.
//! Schemas that use other constructs are rejected when parsed.

mod builtins;
pub mod model;
mod parse;
mod validate;

pub use model::XsdSchema;
pub use validate::{XsdViolation, XsdViolations};

use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, warn};
use validate::InstanceValidator;

impl XsdSchema {
    /// Parse a schema definition from text
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when the text is not a well-formed schema or
    /// uses unsupported constructs.
    pub fn parse(text: &str) -> Result<Self> {
        parse::parse_schema(text)
    }

    /// Read and parse a schema definition file
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, otherwise as
    /// [`XsdSchema::parse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&text)
    }

    /// Collect every violation in `xml`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Xml`] when the document is not well-formed.
    pub fn check(&self, xml: &str) -> Result<XsdViolations> {
        let doc = roxmltree::Document::parse(xml).map_err(|e| Error::xml(e.to_string()))?;
        Ok(InstanceValidator::new(self).run(&doc))
    }

    /// Validate a serialized document
    ///
    /// # Errors
    ///
    /// Returns [`Error::Xml`] for malformed input and [`Error::Violations`]
    /// when the document does not conform.
    pub fn validate(&self, xml: &str) -> Result<()> {
        let violations = self.check(xml)?;
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Error::Violations(violations))
        }
    }

    /// Validate a document file
    ///
    /// # Errors
    ///
    /// As [`XsdSchema::validate`], plus [`Error::Io`] when the file cannot
    /// be read.
    pub fn validate_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.validate(&xml)
    }
}

/// Validate an XML file against a schema file, reporting the cause on failure
///
/// # Errors
///
/// Any read, parse or conformance failure of either input.
pub fn validate_file_against(xml_path: impl AsRef<Path>, xsd_path: impl AsRef<Path>) -> Result<()> {
    XsdSchema::from_file(xsd_path)?.validate_file(xml_path)
}

/// `true` when the XML file conforms to the schema file.
///
/// Unreadable or malformed inputs (either side) yield `false`; the cause is
/// logged at `warn`.
pub fn validate_via_xsd(xml_path: impl AsRef<Path>, xsd_path: impl AsRef<Path>) -> bool {
    let xml_path = xml_path.as_ref();
    match validate_file_against(xml_path, xsd_path.as_ref()) {
        Ok(()) => {
            debug!("{} is valid", xml_path.display());
            true
        }
        Err(e) => {
            warn!("{} failed schema validation: {}", xml_path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const XSD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" xmlns="urn:test" targetNamespace="urn:test" elementFormDefault="qualified">
  <xs:element name="Document" type="Document"/>
  <xs:complexType name="Document">
    <xs:sequence>
      <xs:element name="Hdr" type="Header"/>
      <xs:element name="Item" type="Item" maxOccurs="unbounded"/>
    </xs:sequence>
  </xs:complexType>
  <xs:complexType name="Header">
    <xs:sequence>
      <xs:element name="Id" type="Max35Text"/>
      <xs:element name="Sum" type="DecimalNumber" minOccurs="0"/>
    </xs:sequence>
  </xs:complexType>
  <xs:complexType name="Item">
    <xs:sequence>
      <xs:choice>
        <xs:element name="Dt" type="xs:date"/>
        <xs:element name="DtTm" type="xs:dateTime"/>
      </xs:choice>
      <xs:element name="Amt" type="Amount"/>
      <xs:element name="Code" type="Code" minOccurs="0"/>
      <xs:element name="Extra" minOccurs="0">
        <xs:complexType>
          <xs:sequence><xs:any processContents="lax"/></xs:sequence>
        </xs:complexType>
      </xs:element>
    </xs:sequence>
  </xs:complexType>
  <xs:complexType name="Amount">
    <xs:simpleContent>
      <xs:extension base="AmountValue">
        <xs:attribute name="Ccy" type="CurrencyCode" use="required"/>
      </xs:extension>
    </xs:simpleContent>
  </xs:complexType>
  <xs:simpleType name="AmountValue">
    <xs:restriction base="xs:decimal">
      <xs:fractionDigits value="2"/>
      <xs:totalDigits value="8"/>
      <xs:minInclusive value="0"/>
    </xs:restriction>
  </xs:simpleType>
  <xs:simpleType name="DecimalNumber">
    <xs:restriction base="xs:decimal"/>
  </xs:simpleType>
  <xs:simpleType name="CurrencyCode">
    <xs:restriction base="xs:string">
      <xs:pattern value="[A-Z]{3,3}"/>
    </xs:restriction>
  </xs:simpleType>
  <xs:simpleType name="Code">
    <xs:restriction base="xs:string">
      <xs:enumeration value="CRED"/>
      <xs:enumeration value="DEBT"/>
    </xs:restriction>
  </xs:simpleType>
  <xs:simpleType name="Max35Text">
    <xs:restriction base="xs:string">
      <xs:minLength value="1"/>
      <xs:maxLength value="35"/>
    </xs:restriction>
  </xs:simpleType>
</xs:schema>"#;

    fn doc(items: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Document xmlns="urn:test" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="urn:test test.xsd">
  <Hdr>
    <Id>MSG-1</Id>
    <Sum>30.5</Sum>
  </Hdr>
{items}
</Document>"#
        )
    }

    const ITEM: &str = r#"<Item><Dt>2024-01-02</Dt><Amt Ccy="EUR">10.25</Amt></Item>"#;

    fn schema() -> XsdSchema {
        XsdSchema::parse(XSD).unwrap()
    }

    fn violations(xml: &str) -> XsdViolations {
        schema().check(xml).unwrap()
    }

    #[test]
    fn test_valid_document() {
        let xml = doc(&format!(
            r#"{ITEM}<Item><DtTm>2024-01-02T10:00:00</DtTm><Amt Ccy="CHF">0.5</Amt><Code>CRED</Code><Extra><Anything xmlns="urn:other">x</Anything></Extra></Item>"#
        ));
        let found = violations(&xml);
        assert!(found.is_empty(), "{found}");
        assert!(schema().validate(&xml).is_ok());
    }

    #[test]
    fn test_missing_required_element() {
        let found = violations(&doc(r#"<Item><Amt Ccy="EUR">1</Amt></Item>"#));
        assert_eq!(found.len(), 1);
        assert!(found.0[0].path.ends_with("/Item[0]"), "{found}");
        assert!(found.0[0].message.contains("'Dt'"), "{found}");
    }

    #[test]
    fn test_wrong_order() {
        let found = violations(&doc(
            r#"<Item><Amt Ccy="EUR">1</Amt><Dt>2024-01-02</Dt></Item>"#,
        ));
        assert!(!found.is_empty());
    }

    #[test]
    fn test_at_least_one_item() {
        let found = violations(&doc(""));
        assert!(found.0[0].message.contains("'Item'"), "{found}");
    }

    #[test]
    fn test_unexpected_trailing_element() {
        let found = violations(&doc(&format!("{ITEM}<Bogus/>")));
        assert_eq!(found.len(), 1);
        assert!(found.0[0].message.contains("unexpected element 'Bogus'"));
    }

    #[test]
    fn test_facets() {
        let cases = [
            r#"<Item><Dt>2024-01-02</Dt><Amt Ccy="EUR">10.255</Amt></Item>"#,
            r#"<Item><Dt>2024-01-02</Dt><Amt Ccy="EUR">123456789</Amt></Item>"#,
            r#"<Item><Dt>2024-01-02</Dt><Amt Ccy="EUR">-1</Amt></Item>"#,
            r#"<Item><Dt>2024-01-02</Dt><Amt Ccy="eur">1</Amt></Item>"#,
            r#"<Item><Dt>2024-01-02</Dt><Amt Ccy="EUR">1</Amt><Code>XXX</Code></Item>"#,
            r#"<Item><Dt>2024-13-02</Dt><Amt Ccy="EUR">1</Amt></Item>"#,
            r#"<Item><Dt>2024-01-02</Dt><Amt Ccy="EUR">ten</Amt></Item>"#,
        ];
        for case in cases {
            let found = violations(&doc(case));
            assert_eq!(found.len(), 1, "{case}: {found}");
        }
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_fraction_digits() {
        let found = violations(&doc(
            r#"<Item><Dt>2024-01-02</Dt><Amt Ccy="EUR">10.2500</Amt></Item>"#,
        ));
        assert!(found.is_empty(), "{found}");
    }

    #[test]
    fn test_missing_required_attribute() {
        let found = violations(&doc(r#"<Item><Dt>2024-01-02</Dt><Amt>1</Amt></Item>"#));
        assert_eq!(found.len(), 1);
        assert!(found.0[0].message.contains("'Ccy'"));
    }

    #[test]
    fn test_undeclared_attribute() {
        let found = violations(&doc(
            r#"<Item><Dt>2024-01-02</Dt><Amt Ccy="EUR" Rate="2">1</Amt></Item>"#,
        ));
        assert_eq!(found.len(), 1);
        assert!(found.0[0].path.ends_with("/@Rate"));
    }

    #[test]
    fn test_empty_text_violates_min_length() {
        let xml = doc(ITEM).replace("<Id>MSG-1</Id>", "<Id></Id>");
        let found = violations(&xml);
        assert_eq!(found.len(), 1);
        assert!(found.0[0].path.ends_with("/Hdr/Id"));
    }

    #[test]
    fn test_wrong_namespace() {
        let xml = doc(ITEM).replace("xmlns=\"urn:test\"", "xmlns=\"urn:other\"");
        let found = violations(&xml);
        assert!(found.0[0].message.contains("target namespace"), "{found}");
    }

    #[test]
    fn test_unqualified_child() {
        let xml = doc(&format!(r#"{ITEM}<Item xmlns=""><Dt>2024-01-02</Dt><Amt Ccy="EUR">1</Amt></Item>"#));
        let found = violations(&xml);
        assert_eq!(found.len(), 1, "{found}");
        assert!(found.0[0].message.contains("namespace"));
    }

    #[test]
    fn test_unknown_root() {
        let found = violations(r#"<Other xmlns="urn:test"/>"#);
        assert!(found.0[0].message.contains("no global declaration"));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(matches!(schema().check("<Document>"), Err(Error::Xml { .. })));
        assert!(matches!(schema().validate("not xml"), Err(Error::Xml { .. })));
    }

    #[test]
    fn test_validate_via_xsd_files() {
        let dir = TempDir::new().unwrap();
        let xsd_path = dir.path().join("test.xsd");
        let xml_path = dir.path().join("doc.xml");
        let bad_path = dir.path().join("bad.xml");
        fs::write(&xsd_path, XSD).unwrap();
        fs::write(&xml_path, doc(ITEM)).unwrap();
        fs::write(&bad_path, doc("")).unwrap();

        assert!(validate_via_xsd(&xml_path, &xsd_path));
        assert!(!validate_via_xsd(&bad_path, &xsd_path));
    }

    #[test]
    fn test_validate_via_xsd_never_raises() {
        let dir = TempDir::new().unwrap();
        let xsd_path = dir.path().join("test.xsd");
        let xml_path = dir.path().join("doc.xml");
        let broken_xsd = dir.path().join("broken.xsd");
        let broken_xml = dir.path().join("broken.xml");
        fs::write(&xsd_path, XSD).unwrap();
        fs::write(&xml_path, doc(ITEM)).unwrap();
        fs::write(&broken_xsd, "<xs:schema").unwrap();
        fs::write(&broken_xml, "<Document><Hdr>").unwrap();

        assert!(!validate_via_xsd(&broken_xml, &xsd_path));
        assert!(!validate_via_xsd(&xml_path, &broken_xsd));
        assert!(!validate_via_xsd(dir.path().join("missing.xml"), &xsd_path));
        assert!(!validate_via_xsd(&xml_path, dir.path().join("missing.xsd")));
    }
}
