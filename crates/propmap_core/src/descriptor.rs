//! Property tables: the metadata a type exposes for introspection.
//!
//! A [`TypeInfo`] is what `#[derive(Introspect)]` emits (or what a caller builds by hand): the type's registered
//! name, an optional ancestor, and its directly declared properties in declaration order.

use std::borrow::Cow;

use crate::attributes::property_encoding;
use crate::encoding::{self, NormalizedType, Shape};

/// One declared property: its name and its raw type signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyDescriptor {
    name: Cow<'static, str>,
    signature: Cow<'static, str>,
}

impl PropertyDescriptor {
    /// Create a descriptor. `signature` is a type encoding or a property attribute string.
    pub fn new(name: impl Into<Cow<'static, str>>, signature: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw signature as registered.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The type encoding carried by the signature.
    pub fn encoding(&self) -> &str {
        property_encoding(&self.signature)
    }

    pub fn shape(&self) -> Shape<'_> {
        encoding::shape(self.encoding())
    }

    /// Normalize the property's type. Never fails.
    pub fn normalized(&self) -> NormalizedType {
        encoding::normalize(self.encoding())
    }
}

/// Property table of one type.
///
/// ## Notes
/// - `properties` holds only the type's own declarations; ancestors are linked by name through `parent`.
/// - Duplicate property names are allowed here; lookups resolve them last-write-wins.
///
/// ## Examples
/// ```rust
/// use propmap_core::TypeInfo;
///
/// let info = TypeInfo::new("Person")
///     .extends("Entity")
///     .property("age", "i")
///     .property("name", "@\"PersonName\"");
///
/// assert_eq!(info.name(), "Person");
/// assert_eq!(info.parent(), Some("Entity"));
/// assert_eq!(info.find("name").map(|p| p.normalized().to_string()), Some("PersonName".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeInfo {
    name: Cow<'static, str>,
    parent: Option<Cow<'static, str>>,
    properties: Vec<PropertyDescriptor>,
}

impl TypeInfo {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            properties: Vec::new(),
        }
    }

    /// Declare the ancestor type, by its registered name.
    pub fn extends(mut self, parent: impl Into<Cow<'static, str>>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Append a property declaration.
    pub fn property(self, name: impl Into<Cow<'static, str>>, signature: impl Into<Cow<'static, str>>) -> Self {
        self.with_property(PropertyDescriptor::new(name, signature))
    }

    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Directly declared properties, in declaration order.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Find a directly declared property. With duplicate names the last declaration wins.
    pub fn find(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().rev().find(|p| p.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalars::ScalarKind;

    #[test]
    fn descriptor_accepts_static_and_owned_strings() {
        let a = PropertyDescriptor::new("age", "i");
        let b = PropertyDescriptor::new(String::from("age"), String::from("i"));
        assert_eq!(a, b);
    }

    #[test]
    fn descriptor_normalizes_attribute_strings() {
        let p = PropertyDescriptor::new("name", "T@\"PersonName\",&,N,V_name");
        assert_eq!(p.encoding(), "@\"PersonName\"");
        assert_eq!(p.shape(), Shape::Object(Some("PersonName")));
        assert_eq!(p.normalized(), NormalizedType::Class("PersonName".into()));
    }

    #[test]
    fn descriptor_normalizes_bare_encodings() {
        let p = PropertyDescriptor::new("count", "Q");
        assert_eq!(p.normalized(), NormalizedType::Scalar(ScalarKind::UnsignedLongLong));
    }

    #[test]
    fn type_info_keeps_declaration_order() {
        let info = TypeInfo::new("Point").property("x", "d").property("y", "d").property("label", "@");
        let names: Vec<_> = info.properties().iter().map(PropertyDescriptor::name).collect();
        assert_eq!(names, ["x", "y", "label"]);
        assert_eq!(info.parent(), None);
    }

    #[test]
    fn find_is_last_write_wins() {
        let info = TypeInfo::new("Dup").property("v", "i").property("v", "d");
        assert_eq!(info.find("v").map(PropertyDescriptor::signature), Some("d"));
        assert!(info.find("missing").is_none());
    }
}
