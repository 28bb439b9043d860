//! XML rendering of element trees

use crate::{Error, Result};
use pain_ir::{Document, Element, Traversal, walk};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::trace;

const INDENT_WIDTH: usize = 4;

/// Render a document as UTF-8 text with an XML declaration
///
/// # Errors
///
/// Returns [`Error::Serialization`] when the writer rejects an event.
pub fn serialize(document: &Document) -> Result<String> {
    let xml = serialize_element(&document.root)?;
    trace!(
        "Serialized {} ({} bytes)",
        document.metadata.variant.as_deref().unwrap_or("document"),
        xml.len()
    );
    Ok(xml)
}

/// Render a single element tree with an XML declaration
///
/// # Errors
///
/// Returns [`Error::Serialization`] when the writer rejects an event.
pub fn serialize_element(root: &Element) -> Result<String> {
    let mut emitter = XmlEmitter::new();
    emitter.emit(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)));
    walk(root, &mut emitter);
    emitter.finish()
}

/// Visitor that streams the tree into an indenting writer
struct XmlEmitter {
    writer: Writer<Vec<u8>>,
    error: Option<String>,
}

impl XmlEmitter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH),
            error: None,
        }
    }

    fn emit(&mut self, event: Event<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.write_event(event) {
            self.error = Some(e.to_string());
        }
    }

    fn start_tag(node: &Element) -> BytesStart<'_> {
        BytesStart::new(node.name.as_str()).with_attributes(
            node.attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )
    }

    fn finish(self) -> Result<String> {
        if let Some(message) = self.error {
            return Err(Error::serialization(message));
        }
        let mut xml = String::from_utf8(self.writer.into_inner())
            .map_err(|e| Error::serialization(e.to_string()))?;
        xml.push('\n');
        Ok(xml)
    }
}

impl Traversal for XmlEmitter {
    fn visit(&mut self, node: &Element, _path: &[String]) {
        if !node.children.is_empty() {
            return;
        }
        match node.text.as_deref() {
            Some(text) => {
                self.emit(Event::Start(Self::start_tag(node)));
                self.emit(Event::Text(BytesText::new(text)));
                self.emit(Event::End(BytesEnd::new(node.name.as_str())));
            }
            None => self.emit(Event::Empty(Self::start_tag(node))),
        }
    }

    fn enter(&mut self, node: &Element, _path: &[String]) {
        self.emit(Event::Start(Self::start_tag(node)));
        if let Some(text) = node.text.as_deref() {
            self.emit(Event::Text(BytesText::new(text)));
        }
    }

    fn leave(&mut self, node: &Element, _path: &[String]) {
        self.emit(Event::End(BytesEnd::new(node.name.as_str())));
    }

    fn should_continue(&self) -> bool {
        self.error.is_none()
    }
}
