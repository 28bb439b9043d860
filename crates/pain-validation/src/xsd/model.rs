//! In-memory form of the supported XML Schema subset

use regex::Regex;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// `http://www.w3.org/2001/XMLSchema`
pub const XS_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// `http://www.w3.org/2001/XMLSchema-instance`
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxOccurs {
    Bounded(u32),
    Unbounded,
}

impl MaxOccurs {
    /// Whether `count` occurrences stay within the bound
    #[must_use]
    pub fn allows(self, count: u32) -> bool {
        match self {
            Self::Bounded(max) => count <= max,
            Self::Unbounded => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurs {
    pub min: u32,
    pub max: MaxOccurs,
}

impl Default for Occurs {
    fn default() -> Self {
        Self {
            min: 1,
            max: MaxOccurs::Bounded(1),
        }
    }
}

/// Reference to a type, either by name or inline
#[derive(Debug, Clone)]
pub enum TypeRef {
    /// Type in the XML Schema namespace (`xs:string`, ...)
    Builtin(String),
    /// Global type declared in this schema
    Named(String),
    Complex(Box<ComplexType>),
    Simple(Box<SimpleType>),
}

#[derive(Debug, Clone)]
pub struct ElementDecl {
    pub name: String,
    pub type_ref: TypeRef,
    pub occurs: Occurs,
}

#[derive(Debug, Clone)]
pub enum Particle {
    Element(ElementDecl),
    Sequence { items: Vec<Particle>, occurs: Occurs },
    Choice { items: Vec<Particle>, occurs: Occurs },
    /// `xs:any`, matched without validating the content
    Any { occurs: Occurs },
}

#[derive(Debug, Clone)]
pub struct AttributeDecl {
    pub name: String,
    pub type_ref: TypeRef,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub enum ComplexContent {
    Empty,
    Elements(Particle),
    /// `xs:simpleContent` extension of a simple base type
    Simple { base: TypeRef },
}

#[derive(Debug, Clone)]
pub struct ComplexType {
    pub content: ComplexContent,
    pub attributes: Vec<AttributeDecl>,
}

/// Restriction facets; patterns are stored already anchored
#[derive(Debug, Clone, Default)]
pub struct Facets {
    pub enumeration: Vec<String>,
    pub patterns: Vec<Regex>,
    pub length: Option<usize>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub total_digits: Option<u32>,
    pub fraction_digits: Option<u32>,
    pub min_inclusive: Option<Decimal>,
    pub max_inclusive: Option<Decimal>,
    pub min_exclusive: Option<Decimal>,
    pub max_exclusive: Option<Decimal>,
}

#[derive(Debug, Clone)]
pub struct SimpleType {
    pub base: TypeRef,
    pub facets: Facets,
}

/// A parsed schema definition
#[derive(Debug, Clone, Default)]
pub struct XsdSchema {
    pub target_namespace: Option<String>,
    /// `elementFormDefault="qualified"`
    pub qualified: bool,
    pub elements: HashMap<String, ElementDecl>,
    pub complex_types: HashMap<String, ComplexType>,
    pub simple_types: HashMap<String, SimpleType>,
}
