//! Named, typed attributes of an element descriptor.

use crate::value::{Param, TypeTag, Value, ValueError};

/// An attribute declaration and, once a document has been read into an
/// instance, its resolved value. Keys are unique within their owning
/// element; uniqueness is enforced by [`Element::add_attribute`].
///
/// [`Element::add_attribute`]: crate::Element::add_attribute
#[derive(Clone, Debug)]
pub struct Attribute {
    key: String,
    required: bool,
    param: Param,
}

impl Attribute {
    /// Parses the default literal against `tag`; fails if it cannot be
    /// interpreted as that type.
    pub fn new(
        key: impl Into<String>,
        tag: TypeTag,
        default_literal: &str,
        required: bool,
    ) -> Result<Self, ValueError> {
        Ok(Self {
            key: key.into(),
            required,
            param: Param::new(tag, Some(default_literal))?,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn was_set(&self) -> bool {
        self.param.was_set()
    }

    pub fn param(&self) -> &Param {
        &self.param
    }

    pub fn value(&self) -> &Value {
        self.param.get()
    }

    pub fn set_from_string(&mut self, text: &str) -> Result<(), ValueError> {
        self.param.set_from_string(text)
    }

    /// True if the attribute is optional, or required and explicitly set.
    pub fn is_satisfied(&self) -> bool {
        !self.required || self.param.was_set()
    }

    pub(crate) fn reset(&mut self) {
        self.param.reset();
    }
}
