//! Namespace binding for a generation run

use pain_schema::MessageVariant;
use pain_validation::xsd::model::XSI_NAMESPACE;

/// Prefix of every ISO 20022 message namespace
pub const ISO_NAMESPACE_PREFIX: &str = "urn:iso:std:iso:20022:tech:xsd:";

/// Namespaces in effect for one document.
///
/// Built once per generation call and handed to the root factory and
/// builders by value, so concurrent runs for different variants never
/// observe each other's bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceBinding {
    /// Default namespace, `urn:iso:std:iso:20022:tech:xsd:<variant>`
    pub default: String,

    /// XML Schema instance namespace
    pub xsi: String,
}

impl NamespaceBinding {
    /// Binding for `variant`
    #[must_use]
    pub fn for_variant(variant: MessageVariant) -> Self {
        Self {
            default: format!("{ISO_NAMESPACE_PREFIX}{}", variant.as_str()),
            xsi: XSI_NAMESPACE.to_string(),
        }
    }

    /// `xsi:schemaLocation` value, `"<namespace> <variant>.xsd"`
    #[must_use]
    pub fn schema_location(&self, variant: MessageVariant) -> String {
        format!("{} {}.xsd", self.default, variant.as_str())
    }
}
