//! XSD document to [`XsdSchema`]

use super::model::{
    AttributeDecl, ComplexContent, ComplexType, ElementDecl, Facets, MaxOccurs, Occurs, Particle,
    SimpleType, TypeRef, XS_NAMESPACE, XsdSchema,
};
use crate::{Error, Result};
use regex::Regex;
use roxmltree::Node;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

pub(crate) fn parse_schema(text: &str) -> Result<XsdSchema> {
    let doc = roxmltree::Document::parse(text)
        .map_err(|e| Error::schema(format!("not well-formed XML: {e}")))?;
    let root = doc.root_element();
    if !is_xs(root, "schema") {
        return Err(Error::schema(format!(
            "root element is '{}', expected xs:schema",
            root.tag_name().name()
        )));
    }

    let mut schema = XsdSchema {
        target_namespace: root.attribute("targetNamespace").map(str::to_string),
        qualified: root.attribute("elementFormDefault") == Some("qualified"),
        ..XsdSchema::default()
    };

    for child in xs_children(root) {
        match child.tag_name().name() {
            "element" => {
                let decl = parse_element(child)?;
                schema.elements.insert(decl.name.clone(), decl);
            }
            "complexType" => {
                let name = required_attribute(child, "name")?;
                schema
                    .complex_types
                    .insert(name.to_string(), parse_complex_type(child)?);
            }
            "simpleType" => {
                let name = required_attribute(child, "name")?;
                schema
                    .simple_types
                    .insert(name.to_string(), parse_simple_type(child)?);
            }
            other => return Err(unsupported(other)),
        }
    }

    trace!(
        "Parsed schema: {} element(s), {} complex type(s), {} simple type(s)",
        schema.elements.len(),
        schema.complex_types.len(),
        schema.simple_types.len()
    );
    Ok(schema)
}

fn is_xs(node: Node<'_, '_>, local: &str) -> bool {
    node.is_element()
        && node.tag_name().namespace() == Some(XS_NAMESPACE)
        && node.tag_name().name() == local
}

/// Schema-namespace element children, annotations skipped
fn xs_children<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|c| {
        c.is_element()
            && c.tag_name().namespace() == Some(XS_NAMESPACE)
            && c.tag_name().name() != "annotation"
    })
}

fn unsupported(construct: &str) -> Error {
    Error::schema(format!("unsupported construct xs:{construct}"))
}

fn required_attribute<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        Error::schema(format!(
            "xs:{} is missing attribute '{}'",
            node.tag_name().name(),
            name
        ))
    })
}

/// Resolve a `prefix:local` reference against the in-scope namespaces
fn resolve_type_name<'a>(node: Node<'a, '_>, qname: &'a str) -> TypeRef {
    let (prefix, local) = match qname.split_once(':') {
        Some((p, l)) => (Some(p), l),
        None => (None, qname),
    };

    if node.lookup_namespace_uri(prefix) == Some(XS_NAMESPACE) {
        TypeRef::Builtin(local.to_string())
    } else {
        TypeRef::Named(local.to_string())
    }
}

fn parse_occurs(node: Node<'_, '_>) -> Result<Occurs> {
    let min = match node.attribute("minOccurs") {
        Some(v) => v
            .parse()
            .map_err(|_| Error::schema(format!("invalid minOccurs '{v}'")))?,
        None => 1,
    };
    let max = match node.attribute("maxOccurs") {
        Some("unbounded") => MaxOccurs::Unbounded,
        Some(v) => MaxOccurs::Bounded(
            v.parse()
                .map_err(|_| Error::schema(format!("invalid maxOccurs '{v}'")))?,
        ),
        None => MaxOccurs::Bounded(1),
    };
    Ok(Occurs { min, max })
}

fn parse_element(node: Node<'_, '_>) -> Result<ElementDecl> {
    if node.has_attribute("ref") {
        return Err(Error::schema("element references (ref=) are not supported"));
    }
    let name = required_attribute(node, "name")?.to_string();
    let occurs = parse_occurs(node)?;

    let type_ref = if let Some(qname) = node.attribute("type") {
        resolve_type_name(node, qname)
    } else if let Some(inline) = xs_children(node).next() {
        match inline.tag_name().name() {
            "complexType" => TypeRef::Complex(Box::new(parse_complex_type(inline)?)),
            "simpleType" => TypeRef::Simple(Box::new(parse_simple_type(inline)?)),
            other => return Err(unsupported(other)),
        }
    } else {
        TypeRef::Builtin("anyType".to_string())
    };

    Ok(ElementDecl {
        name,
        type_ref,
        occurs,
    })
}

fn parse_attribute(node: Node<'_, '_>) -> Result<AttributeDecl> {
    let name = required_attribute(node, "name")?.to_string();
    let type_ref = match node.attribute("type") {
        Some(qname) => resolve_type_name(node, qname),
        None => match xs_children(node).find(|c| c.tag_name().name() == "simpleType") {
            Some(inline) => TypeRef::Simple(Box::new(parse_simple_type(inline)?)),
            None => TypeRef::Builtin("anySimpleType".to_string()),
        },
    };

    Ok(AttributeDecl {
        name,
        type_ref,
        required: node.attribute("use") == Some("required"),
    })
}

fn parse_group(node: Node<'_, '_>) -> Result<Particle> {
    let occurs = parse_occurs(node)?;
    let mut items = Vec::new();

    for child in xs_children(node) {
        let particle = match child.tag_name().name() {
            "element" => Particle::Element(parse_element(child)?),
            "sequence" | "choice" => parse_group(child)?,
            "any" => Particle::Any {
                occurs: parse_occurs(child)?,
            },
            other => return Err(unsupported(other)),
        };
        items.push(particle);
    }

    match node.tag_name().name() {
        "sequence" => Ok(Particle::Sequence { items, occurs }),
        "choice" => Ok(Particle::Choice { items, occurs }),
        other => Err(unsupported(other)),
    }
}

fn parse_complex_type(node: Node<'_, '_>) -> Result<ComplexType> {
    let mut complex = ComplexType {
        content: ComplexContent::Empty,
        attributes: Vec::new(),
    };

    for child in xs_children(node) {
        match child.tag_name().name() {
            "sequence" | "choice" => complex.content = ComplexContent::Elements(parse_group(child)?),
            "attribute" => complex.attributes.push(parse_attribute(child)?),
            "simpleContent" => {
                let extension = xs_children(child)
                    .find(|c| c.tag_name().name() == "extension")
                    .ok_or_else(|| unsupported("simpleContent without xs:extension"))?;
                let base = resolve_type_name(extension, required_attribute(extension, "base")?);
                for attr in xs_children(extension) {
                    if attr.tag_name().name() != "attribute" {
                        return Err(unsupported(attr.tag_name().name()));
                    }
                    complex.attributes.push(parse_attribute(attr)?);
                }
                complex.content = ComplexContent::Simple { base };
            }
            other => return Err(unsupported(other)),
        }
    }

    Ok(complex)
}

fn parse_simple_type(node: Node<'_, '_>) -> Result<SimpleType> {
    let restriction = xs_children(node).next().ok_or_else(|| unsupported("empty simpleType"))?;
    if restriction.tag_name().name() != "restriction" {
        return Err(unsupported(restriction.tag_name().name()));
    }

    let base = resolve_type_name(restriction, required_attribute(restriction, "base")?);
    let mut facets = Facets::default();

    for facet in xs_children(restriction) {
        let value = required_attribute(facet, "value")?;
        match facet.tag_name().name() {
            "enumeration" => facets.enumeration.push(value.to_string()),
            "pattern" => facets.patterns.push(
                Regex::new(&format!("^(?:{value})$"))
                    .map_err(|e| Error::schema(format!("invalid pattern '{value}': {e}")))?,
            ),
            "length" => facets.length = Some(parse_number(value)?),
            "minLength" => facets.min_length = Some(parse_number(value)?),
            "maxLength" => facets.max_length = Some(parse_number(value)?),
            "totalDigits" => facets.total_digits = Some(parse_number(value)?),
            "fractionDigits" => facets.fraction_digits = Some(parse_number(value)?),
            "minInclusive" => facets.min_inclusive = Some(parse_bound(value)?),
            "maxInclusive" => facets.max_inclusive = Some(parse_bound(value)?),
            "minExclusive" => facets.min_exclusive = Some(parse_bound(value)?),
            "maxExclusive" => facets.max_exclusive = Some(parse_bound(value)?),
            "whiteSpace" => {}
            other => return Err(unsupported(other)),
        }
    }

    Ok(SimpleType { base, facets })
}

fn parse_number<T: FromStr>(value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::schema(format!("invalid facet value '{value}'")))
}

fn parse_bound(value: &str) -> Result<Decimal> {
    Decimal::from_str(value)
        .map_err(|_| Error::schema(format!("invalid numeric bound '{value}'")))
}
