//! Element and field descriptors.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::compiler::compile;
use crate::utils::{sanitize_identifier, validate_field_name, InvalidNameError};

/// A `(tag, attrs)` pair identifying an element or element family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementDescriptor {
    /// Element tag, used verbatim (after trimming) as the selector head.
    #[serde(default)]
    pub tag: String,
    /// Free-form `key=value` attrs string.
    #[serde(default)]
    pub attrs: String,
}

impl ElementDescriptor {
    /// Creates a new descriptor.
    #[must_use]
    pub fn new(tag: impl Into<String>, attrs: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: attrs.into(),
        }
    }

    /// Creates a descriptor with a tag and no attrs.
    #[must_use]
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::new(tag, "")
    }

    /// Whether the tag is non-empty after trimming.
    #[must_use]
    pub fn has_tag(&self) -> bool {
        !self.tag.trim().is_empty()
    }

    /// Compiles the descriptor into a CSS selector.
    #[must_use]
    pub fn selector(&self) -> String {
        compile(&self.tag, &self.attrs)
    }
}

impl fmt::Display for ElementDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.attrs.trim().is_empty() {
            write!(f, "<{}>", self.tag.trim())
        } else {
            write!(f, "<{} {}>", self.tag.trim(), self.attrs.trim())
        }
    }
}

/// Opaque, stable identifier of a field descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(Uuid);

impl FieldId {
    /// Generates a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// The underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for FieldId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named field extracted from each container (or from the whole page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable identifier, used to key cached test results.
    #[serde(default)]
    pub id: FieldId,
    /// Identifier-safe record key.
    pub name: String,
    /// Element tag.
    #[serde(default)]
    pub tag: String,
    /// Free-form attrs string.
    #[serde(default)]
    pub attrs: String,
}

impl FieldDescriptor {
    /// Creates a new field with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, tag: impl Into<String>, attrs: impl Into<String>) -> Self {
        Self {
            id: FieldId::new(),
            name: name.into(),
            tag: tag.into(),
            attrs: attrs.into(),
        }
    }

    /// Creates a field whose name is sanitized into an identifier-safe form.
    #[must_use]
    pub fn sanitized(raw_name: &str, tag: impl Into<String>, attrs: impl Into<String>) -> Self {
        Self::new(sanitize_identifier(raw_name, "field"), tag, attrs)
    }

    /// Sets a specific id.
    #[must_use]
    pub fn with_id(mut self, id: FieldId) -> Self {
        self.id = id;
        self
    }

    /// The `(tag, attrs)` part of the field.
    #[must_use]
    pub fn element(&self) -> ElementDescriptor {
        ElementDescriptor::new(self.tag.clone(), self.attrs.clone())
    }

    /// Whether the tag is non-empty after trimming.
    #[must_use]
    pub fn has_tag(&self) -> bool {
        !self.tag.trim().is_empty()
    }

    /// Compiles the field's descriptor into a CSS selector.
    #[must_use]
    pub fn selector(&self) -> String {
        compile(&self.tag, &self.attrs)
    }

    /// Validates the field name.
    pub fn validate_name(&self) -> Result<(), InvalidNameError> {
        validate_field_name(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_descriptor_selector() {
        let item = ElementDescriptor::new("div", "class=\"item\"");
        assert!(item.has_tag());
        assert_eq!(item.selector(), "div.item");
        assert_eq!(item.to_string(), "<div class=\"item\">");
        assert!(!ElementDescriptor::tag("  ").has_tag());
    }

    #[test]
    fn test_field_ids_are_unique() {
        let a = FieldDescriptor::new("title", "h2", "");
        let b = FieldDescriptor::new("title", "h2", "");
        assert_ne!(a.id, b.id);
        assert_eq!(a.element(), b.element());
    }

    #[test]
    fn test_sanitized_field_name() {
        let field = FieldDescriptor::sanitized("Unit Price", "span", "class=price");
        assert_eq!(field.name, "Unit_Price");
        assert!(field.validate_name().is_ok());
        assert_eq!(field.selector(), "span.price");
    }

    #[test]
    fn test_field_deserializes_without_id() {
        let field: FieldDescriptor =
            serde_json::from_str(r#"{"name": "title", "tag": "h2"}"#).unwrap();
        assert_eq!(field.attrs, "");
        assert_eq!(field.selector(), "h2");
    }
}
