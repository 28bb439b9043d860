//! `Document` root element

use crate::namespace::NamespaceBinding;
use pain_ir::Element;
use pain_schema::MessageVariant;

/// Root tag of every pain.001 message
pub const ROOT_TAG: &str = "Document";

/// Create the `Document` root for `variant`.
///
/// Attributes are emitted in this order: `xmlns`, `xmlns:xsi`,
/// `xsi:schemaLocation`.
#[must_use]
pub fn create_root(binding: &NamespaceBinding, variant: MessageVariant) -> Element {
    Element::new(ROOT_TAG)
        .with_attribute("xmlns", binding.default.as_str())
        .with_attribute("xmlns:xsi", binding.xsi.as_str())
        .with_attribute("xsi:schemaLocation", binding.schema_location(variant))
}
