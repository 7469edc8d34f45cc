//! Element descriptors and instances.
//!
//! A descriptor tree is the schema: what elements *may* appear, with which
//! attributes and values. An instance tree is produced per document read by
//! stamping descriptors with [`Element::instantiate`] and filling the fresh
//! copies in; the descriptor tree itself is never mutated by a read and can
//! be shared read-only across any number of parses.

use std::fmt;

use crate::attribute::Attribute;
use crate::error::SchemaError;
use crate::value::{Param, TypeTag, Value, ValueError};

/// How many document occurrences of an element the schema accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Required {
    /// `"0"`: optional, at most one.
    Optional,
    /// `"1"`: required, exactly one.
    One,
    /// `"+"`: required, one or more.
    OneOrMore,
    /// `"*"`: optional, zero or more.
    ZeroOrMore,
}

impl Required {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "0" => Some(Self::Optional),
            "1" => Some(Self::One),
            "+" => Some(Self::OneOrMore),
            "*" => Some(Self::ZeroOrMore),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Optional => "0",
            Self::One => "1",
            Self::OneOrMore => "+",
            Self::ZeroOrMore => "*",
        }
    }

    /// True when at least one occurrence must be present.
    pub fn is_required(self) -> bool {
        matches!(self, Self::One | Self::OneOrMore)
    }

    /// True when more than one occurrence is accepted.
    pub fn is_multiple(self) -> bool {
        matches!(self, Self::OneOrMore | Self::ZeroOrMore)
    }
}

impl fmt::Display for Required {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A schema-tree node, and (after [`instantiate`](Element::instantiate) and
/// a document read) an instance node.
///
/// `descriptions` is the schema side: the child elements that may appear.
/// `children` is the instance side: the document occurrences actually
/// matched, in descriptor declaration order and document order. Descriptor
/// trees built by the schema loader always have empty `children`.
#[derive(Clone, Debug)]
pub struct Element {
    name: String,
    required: Required,
    value: Option<Param>,
    attributes: Vec<Attribute>,
    descriptions: Vec<Element>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>, required: Required) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.is_empty() {
            return Err(SchemaError::EmptyName);
        }
        Ok(Self {
            name,
            required,
            value: None,
            attributes: Vec::new(),
            descriptions: Vec::new(),
            children: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required(&self) -> Required {
        self.required
    }

    /// Attaches the inline value cell. At most one per element; the schema
    /// loader calls this once when the element declares a `type`.
    pub fn set_value(
        &mut self,
        tag: TypeTag,
        default_literal: Option<&str>,
    ) -> Result<(), ValueError> {
        self.value = Some(Param::new(tag, default_literal)?);
        Ok(())
    }

    pub fn value(&self) -> Option<&Param> {
        self.value.as_ref()
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut Param> {
        self.value.as_mut()
    }

    /// Appends an attribute declaration. Keys must be unique per element.
    pub fn add_attribute(&mut self, attribute: Attribute) -> Result<(), SchemaError> {
        if self.attributes.iter().any(|a| a.key() == attribute.key()) {
            return Err(SchemaError::DuplicateAttribute {
                element: self.name.clone(),
                key: attribute.key().to_string(),
            });
        }
        self.attributes.push(attribute);
        Ok(())
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.key() == key)
    }

    pub(crate) fn attribute_mut(&mut self, key: &str) -> Option<&mut Attribute> {
        self.attributes.iter_mut().find(|a| a.key() == key)
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attribute(key).is_some()
    }

    pub fn attribute_value(&self, key: &str) -> Option<&Value> {
        self.attribute(key).map(Attribute::value)
    }

    /// Appends a child descriptor. Same-named children are legal schema;
    /// the cardinality token governs how many occurrences are accepted.
    pub fn add_description(&mut self, child: Element) {
        self.descriptions.push(child);
    }

    pub fn descriptions(&self) -> &[Element] {
        &self.descriptions
    }

    /// Matched instance children, in descriptor declaration order and
    /// document order within a descriptor.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn children_named<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'n> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.children_named(name).next()
    }

    pub(crate) fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Deep-copies this descriptor into a fresh instance node: every value
    /// cell is reset to its default and marked unset, and the matched
    /// children list starts empty. The copy shares no state with the
    /// source, so one schema tree can stamp out independent instances.
    pub fn instantiate(&self) -> Element {
        let mut copy = self.clone();
        copy.reset_values();
        copy.children.clear();
        copy
    }

    fn reset_values(&mut self) {
        if let Some(value) = self.value.as_mut() {
            value.reset();
        }
        for attribute in &mut self.attributes {
            attribute.reset();
        }
        for description in &mut self.descriptions {
            description.reset_values();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized_element() -> Element {
        let mut element = Element::new("box", Required::One).unwrap();
        element
            .add_attribute(Attribute::new("size", TypeTag::Vector3, "1 1 1", false).unwrap())
            .unwrap();
        element.set_value(TypeTag::Double, Some("0.5")).unwrap();
        element
    }

    #[test]
    fn cardinality_tokens_parse() {
        assert_eq!(Required::from_token("0"), Some(Required::Optional));
        assert_eq!(Required::from_token("1"), Some(Required::One));
        assert_eq!(Required::from_token("+"), Some(Required::OneOrMore));
        assert_eq!(Required::from_token("*"), Some(Required::ZeroOrMore));
        assert_eq!(Required::from_token("2"), None);
        assert_eq!(Required::from_token(""), None);
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!(matches!(
            Element::new("", Required::One),
            Err(SchemaError::EmptyName)
        ));
    }

    #[test]
    fn duplicate_attribute_is_rejected() {
        let mut element = sized_element();
        let dup = Attribute::new("size", TypeTag::Vector3, "2 2 2", false).unwrap();
        assert!(matches!(
            element.add_attribute(dup),
            Err(SchemaError::DuplicateAttribute { .. })
        ));
    }

    #[test]
    fn instances_are_independent_of_their_descriptor() {
        let descriptor = sized_element();

        let mut instance = descriptor.instantiate();
        instance
            .attribute_mut("size")
            .unwrap()
            .set_from_string("9 9 9")
            .unwrap();
        instance.value_mut().unwrap().set_from_string("7.5").unwrap();

        let size = descriptor.attribute("size").unwrap();
        assert!(!size.was_set());
        assert_eq!(size.param().as_vector3().unwrap().x, 1.0);
        assert!(!descriptor.value().unwrap().was_set());
        assert_eq!(descriptor.value().unwrap().as_double(), Some(0.5));

        // and mutating a second instance never leaks into the first
        let mut other = descriptor.instantiate();
        other
            .attribute_mut("size")
            .unwrap()
            .set_from_string("3 3 3")
            .unwrap();
        assert_eq!(
            instance.attribute("size").unwrap().param().as_vector3().unwrap().x,
            9.0
        );
    }

    #[test]
    fn instantiate_resets_set_values() {
        let mut descriptor = sized_element();
        descriptor
            .attribute_mut("size")
            .unwrap()
            .set_from_string("4 4 4")
            .unwrap();

        let instance = descriptor.instantiate();
        let size = instance.attribute("size").unwrap();
        assert!(!size.was_set());
        assert_eq!(size.param().as_vector3().unwrap().x, 1.0);
    }
}
