//! Instance validation against a parsed schema

use super::builtins::{check_builtin, preserves_whitespace};
use super::model::{
    AttributeDecl, ComplexContent, ComplexType, ElementDecl, Facets, Particle, SimpleType,
    TypeRef, XSI_NAMESPACE, XsdSchema,
};
use roxmltree::Node;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// One schema violation at a document path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XsdViolation {
    /// Slash-separated element path, e.g. `/Document/CstmrCdtTrfInitn/GrpHdr`
    pub path: String,
    pub message: String,
}

impl fmt::Display for XsdViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// All violations found in a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XsdViolations(pub Vec<XsdViolation>);

impl XsdViolations {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &XsdViolation> {
        self.0.iter()
    }
}

impl fmt::Display for XsdViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHOWN: usize = 5;
        write!(f, "{} violation(s)", self.0.len())?;
        for v in self.0.iter().take(SHOWN) {
            write!(f, "; {v}")?;
        }
        if self.0.len() > SHOWN {
            write!(f, "; ...")?;
        }
        Ok(())
    }
}

pub(crate) struct InstanceValidator<'s> {
    schema: &'s XsdSchema,
    violations: Vec<XsdViolation>,
}

impl<'s> InstanceValidator<'s> {
    pub(crate) fn new(schema: &'s XsdSchema) -> Self {
        Self {
            schema,
            violations: Vec::new(),
        }
    }

    pub(crate) fn run(mut self, doc: &roxmltree::Document<'_>) -> XsdViolations {
        let schema = self.schema;
        let root = doc.root_element();
        let name = root.tag_name().name();
        let path = format!("/{name}");

        if root.tag_name().namespace() != schema.target_namespace.as_deref() {
            self.report(
                &path,
                format!(
                    "namespace '{}' does not match target namespace '{}'",
                    root.tag_name().namespace().unwrap_or_default(),
                    schema.target_namespace.as_deref().unwrap_or_default()
                ),
            );
        }

        match schema.elements.get(name) {
            Some(decl) => self.validate_element(root, &decl.type_ref, &path),
            None => self.report(&path, format!("no global declaration for element '{name}'")),
        }

        XsdViolations(self.violations)
    }

    fn report(&mut self, path: &str, message: impl Into<String>) {
        self.violations.push(XsdViolation {
            path: path.to_string(),
            message: message.into(),
        });
    }

    fn validate_element(&mut self, node: Node<'_, '_>, type_ref: &TypeRef, path: &str) {
        let schema = self.schema;
        match type_ref {
            TypeRef::Builtin(name) if name == "anyType" => {}
            TypeRef::Builtin(_) | TypeRef::Simple(_) => {
                self.validate_simple_element(node, type_ref, path);
            }
            TypeRef::Complex(complex) => self.validate_complex(node, complex, path),
            TypeRef::Named(name) => {
                if let Some(complex) = schema.complex_types.get(name) {
                    self.validate_complex(node, complex, path);
                } else if schema.simple_types.contains_key(name) {
                    self.validate_simple_element(node, type_ref, path);
                } else {
                    self.report(path, format!("unknown type '{name}'"));
                }
            }
        }
    }

    fn validate_simple_element(&mut self, node: Node<'_, '_>, type_ref: &TypeRef, path: &str) {
        if let Some(child) = node.children().find(Node::is_element) {
            self.report(
                path,
                format!(
                    "element '{}' not allowed in simple content",
                    child.tag_name().name()
                ),
            );
            return;
        }
        self.validate_attributes(node, &[], path);
        self.check_simple_value(type_ref, &node_text(node), path);
    }

    fn validate_complex(&mut self, node: Node<'_, '_>, complex: &ComplexType, path: &str) {
        self.validate_attributes(node, &complex.attributes, path);

        match &complex.content {
            ComplexContent::Empty => {
                if node.children().any(|c| c.is_element()) || !node_text(node).trim().is_empty() {
                    self.report(path, "element must be empty");
                }
            }
            ComplexContent::Simple { base } => {
                if node.children().any(|c| c.is_element()) {
                    self.report(path, "child elements not allowed in simple content");
                    return;
                }
                self.check_simple_value(base, &node_text(node), path);
            }
            ComplexContent::Elements(particle) => {
                if !node_text(node).trim().is_empty() {
                    self.report(path, "character content not allowed in element-only content");
                }
                self.validate_children(node, particle, path);
            }
        }
    }

    fn validate_children(&mut self, node: Node<'_, '_>, particle: &Particle, path: &str) {
        let children: Vec<Node<'_, '_>> = node.children().filter(Node::is_element).collect();
        let mut assigned = Vec::new();

        match match_particle(particle, &children, 0, &mut assigned) {
            Some(end) if end == children.len() => {}
            Some(end) => self.report(
                path,
                format!(
                    "unexpected element '{}' at child position {}",
                    children[end].tag_name().name(),
                    end + 1
                ),
            ),
            None => {
                let message = diagnose(particle, &children);
                self.report(path, message);
                return;
            }
        }

        let schema = self.schema;
        let expected_ns = if schema.qualified {
            schema.target_namespace.as_deref()
        } else {
            None
        };

        for (index, decl) in assigned {
            let child = children[index];
            let name = child.tag_name().name();
            let ordinal = children[..index]
                .iter()
                .filter(|c| c.tag_name().name() == name)
                .count();
            let child_path = if decl.occurs.max.allows(2) {
                format!("{path}/{name}[{ordinal}]")
            } else {
                format!("{path}/{name}")
            };

            if child.tag_name().namespace() != expected_ns {
                self.report(
                    &child_path,
                    format!(
                        "element is in namespace '{}', expected '{}'",
                        child.tag_name().namespace().unwrap_or_default(),
                        expected_ns.unwrap_or_default()
                    ),
                );
                continue;
            }

            self.validate_element(child, &decl.type_ref, &child_path);
        }
    }

    fn validate_attributes(&mut self, node: Node<'_, '_>, decls: &[AttributeDecl], path: &str) {
        for decl in decls.iter().filter(|d| d.required) {
            if node.attribute(decl.name.as_str()).is_none() {
                self.report(path, format!("missing required attribute '{}'", decl.name));
            }
        }

        for attr in node.attributes() {
            if attr.namespace() == Some(XSI_NAMESPACE) {
                continue;
            }
            let attr_path = format!("{path}/@{}", attr.name());
            match decls
                .iter()
                .find(|d| d.name == attr.name() && attr.namespace().is_none())
            {
                Some(decl) => self.check_simple_value(&decl.type_ref, attr.value(), &attr_path),
                None => self.report(&attr_path, "attribute not declared"),
            }
        }
    }

    fn check_simple_value(&mut self, type_ref: &TypeRef, raw: &str, path: &str) {
        let schema = self.schema;
        match type_ref {
            TypeRef::Builtin(name) => {
                let value = if preserves_whitespace(name) { raw } else { raw.trim() };
                if let Err(message) = check_builtin(name, value) {
                    self.report(path, message);
                }
            }
            TypeRef::Named(name) => match schema.simple_types.get(name) {
                Some(simple) => self.check_simple_type(simple, raw, path),
                None => self.report(path, format!("'{name}' is not a simple type")),
            },
            TypeRef::Simple(simple) => self.check_simple_type(simple, raw, path),
            TypeRef::Complex(_) => {
                self.report(path, "complex type used where a simple type is required");
            }
        }
    }

    fn check_simple_type(&mut self, simple: &SimpleType, raw: &str, path: &str) {
        let before = self.violations.len();
        self.check_simple_value(&simple.base, raw, path);
        if self.violations.len() > before {
            return;
        }

        let value = match builtin_root(self.schema, &simple.base) {
            Some(name) if preserves_whitespace(name) => raw,
            _ => raw.trim(),
        };
        if let Err(message) = check_facets(&simple.facets, value) {
            self.report(path, message);
        }
    }
}

fn node_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(Node::is_text)
        .filter_map(|c| c.text())
        .collect()
}

/// Follow restriction bases down to the built-in type
fn builtin_root<'a>(schema: &'a XsdSchema, type_ref: &'a TypeRef) -> Option<&'a str> {
    let mut current = type_ref;
    // bounded walk guards against self-referential restrictions
    for _ in 0..32 {
        current = match current {
            TypeRef::Builtin(name) => return Some(name.as_str()),
            TypeRef::Named(name) => &schema.simple_types.get(name)?.base,
            TypeRef::Simple(simple) => &simple.base,
            TypeRef::Complex(_) => return None,
        };
    }
    None
}

fn check_facets(facets: &Facets, value: &str) -> Result<(), String> {
    if !facets.enumeration.is_empty() && !facets.enumeration.iter().any(|e| e == value) {
        return Err(format!(
            "'{value}' is not one of [{}]",
            facets.enumeration.join(", ")
        ));
    }

    if !facets.patterns.is_empty() && !facets.patterns.iter().any(|p| p.is_match(value)) {
        let patterns: Vec<&str> = facets.patterns.iter().map(regex::Regex::as_str).collect();
        return Err(format!("'{value}' does not match {}", patterns.join(" | ")));
    }

    let length = value.chars().count();
    if facets.length.is_some_and(|l| length != l) {
        return Err(format!("'{value}' must have length {}", facets.length.unwrap_or_default()));
    }
    if let Some(min) = facets.min_length.filter(|&min| length < min) {
        return Err(format!("'{value}' is shorter than {min}"));
    }
    if let Some(max) = facets.max_length.filter(|&max| length > max) {
        return Err(format!("'{value}' is longer than {max}"));
    }

    let numeric = facets.total_digits.is_some()
        || facets.fraction_digits.is_some()
        || facets.min_inclusive.is_some()
        || facets.max_inclusive.is_some()
        || facets.min_exclusive.is_some()
        || facets.max_exclusive.is_some();
    if !numeric {
        return Ok(());
    }

    let number = Decimal::from_str(value).map_err(|_| format!("'{value}' is not numeric"))?;
    let normalized = number.normalize();

    if let Some(max) = facets.fraction_digits {
        if normalized.scale() > max {
            return Err(format!("'{value}' has more than {max} fraction digit(s)"));
        }
    }
    if let Some(max) = facets.total_digits {
        let digits = normalized.mantissa().unsigned_abs().to_string().len();
        if digits > max as usize {
            return Err(format!("'{value}' has more than {max} digit(s)"));
        }
    }
    if facets.min_inclusive.is_some_and(|b| number < b) {
        return Err(format!("'{value}' is below the minimum"));
    }
    if facets.max_inclusive.is_some_and(|b| number > b) {
        return Err(format!("'{value}' is above the maximum"));
    }
    if facets.min_exclusive.is_some_and(|b| number <= b) {
        return Err(format!("'{value}' must be greater than the exclusive minimum"));
    }
    if facets.max_exclusive.is_some_and(|b| number >= b) {
        return Err(format!("'{value}' must be less than the exclusive maximum"));
    }

    Ok(())
}

/// Structural match of `particle` against `children[pos..]`.
///
/// Returns the position after the consumed children, recording which
/// declaration each consumed child matched. Matching is greedy, which is
/// exact for schemas that satisfy the unique particle attribution rule.
fn match_particle<'p>(
    particle: &'p Particle,
    children: &[Node<'_, '_>],
    pos: usize,
    out: &mut Vec<(usize, &'p ElementDecl)>,
) -> Option<usize> {
    match particle {
        Particle::Element(decl) => {
            let mut count = 0;
            let mut p = pos;
            while p < children.len()
                && decl.occurs.max.allows(count + 1)
                && children[p].tag_name().name() == decl.name
            {
                out.push((p, decl));
                p += 1;
                count += 1;
            }
            (count >= decl.occurs.min).then_some(p)
        }
        Particle::Any { occurs } => {
            let mut count = 0;
            let mut p = pos;
            while p < children.len() && occurs.max.allows(count + 1) {
                p += 1;
                count += 1;
            }
            (count >= occurs.min).then_some(p)
        }
        Particle::Sequence { items, occurs } => {
            let mut reps = 0;
            let mut p = pos;
            while occurs.max.allows(reps + 1) {
                let saved = out.len();
                let mut q = Some(p);
                for item in items {
                    q = q.and_then(|at| match_particle(item, children, at, out));
                }
                let Some(q) = q else {
                    out.truncate(saved);
                    break;
                };
                reps += 1;
                if q == p {
                    reps = reps.max(occurs.min);
                    break;
                }
                p = q;
            }
            (reps >= occurs.min).then_some(p)
        }
        Particle::Choice { items, occurs } => {
            let mut reps = 0;
            let mut p = pos;
            while occurs.max.allows(reps + 1) {
                let mut advanced = None;
                let mut empty_ok = false;
                for item in items {
                    let saved = out.len();
                    match match_particle(item, children, p, out) {
                        Some(next) if next > p => {
                            advanced = Some(next);
                            break;
                        }
                        Some(_) => {
                            out.truncate(saved);
                            empty_ok = true;
                        }
                        None => out.truncate(saved),
                    }
                }
                if let Some(next) = advanced {
                    p = next;
                    reps += 1;
                } else {
                    if empty_ok {
                        reps = reps.max(occurs.min);
                    }
                    break;
                }
            }
            (reps >= occurs.min).then_some(p)
        }
    }
}

/// Human-readable reason a content model did not match
fn diagnose(particle: &Particle, children: &[Node<'_, '_>]) -> String {
    if let Particle::Sequence { items, .. } = particle {
        let mut scratch = Vec::new();
        let mut pos = 0;
        for item in items {
            match match_particle(item, children, pos, &mut scratch) {
                Some(next) => pos = next,
                None => {
                    let found = children
                        .get(pos)
                        .map_or_else(|| "end of content".to_string(), |c| {
                            format!("'{}'", c.tag_name().name())
                        });
                    return format!("expected {} but found {found}", describe(item));
                }
            }
        }
    }
    format!("content does not match {}", describe(particle))
}

fn describe(particle: &Particle) -> String {
    match particle {
        Particle::Element(decl) => format!("'{}'", decl.name),
        Particle::Any { .. } => "any element".to_string(),
        Particle::Sequence { items, .. } => {
            let parts: Vec<String> = items.iter().map(describe).collect();
            format!("({})", parts.join(", "))
        }
        Particle::Choice { items, .. } => {
            let parts: Vec<String> = items.iter().map(describe).collect();
            format!("one of ({})", parts.join(" | "))
        }
    }
}
