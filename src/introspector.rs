//! Property introspection over a [`TypeRegistry`].
//!
//! [`PropertyIntrospector`] answers three questions about a registered type:
//!
//! - which properties does it declare ([`PropertyIntrospector::property_names`]),
//! - what is the normalized type label of each ([`PropertyIntrospector::property_type_map`]),
//! - what is the label of one named property ([`PropertyIntrospector::property_type`]).
//!
//! Names and map are derived from the same enumeration pass ([`PropertyIntrospector::describe`]), so they always
//! cover the same properties in the same order. Nothing is cached: every call re-reads the registry.
//!
//! ## Examples
//! ```
//! use propmap::{PropertyIntrospector, TypeHandle, TypeInfo, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_info(
//!     TypeInfo::new("Person")
//!         .property("age", "i")
//!         .property("name", "@\"PersonName\"")
//!         .property("origin", "{CGPoint=dd}"),
//! )?;
//!
//! let introspector = PropertyIntrospector::new(&registry);
//! let person = TypeHandle::named("Person");
//!
//! assert_eq!(introspector.property_names(&person)?, ["age", "name", "origin"]);
//! assert_eq!(introspector.property_type("name", &person)?, "PersonName");
//! assert_eq!(introspector.property_type_map(&person)?["origin"], "unknown");
//! # Ok::<(), propmap::IntrospectError>(())
//! ```

use indexmap::IndexMap;
use propmap_core::{PropertyDescriptor, TypeInfo};

use crate::config::{Inheritance, IntrospectConfig};
use crate::errors::{IntrospectError, Result};
use crate::registry::{TypeHandle, TypeRegistry};

/// Property name → normalized type label, in enumeration order.
pub type PropertyTypeMap = IndexMap<String, String>;

/// Stateless query front-end over a registry.
#[derive(Debug, Clone)]
pub struct PropertyIntrospector<'r> {
    registry: &'r TypeRegistry,
    config: IntrospectConfig,
}

impl<'r> PropertyIntrospector<'r> {
    /// Create an introspector with the default configuration (declared properties only, `"unknown"` sentinel).
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self::with_config(registry, IntrospectConfig::default())
    }

    pub fn with_config(registry: &'r TypeRegistry, config: IntrospectConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &IntrospectConfig {
        &self.config
    }

    /// Enumerate the properties of a type once.
    ///
    /// With [`Inheritance::IncludeAncestors`], ancestors are enumerated root first; a name declared again keeps
    /// its first position and takes the later declaration.
    ///
    /// ## Errors
    /// - [`IntrospectError::InvalidType`] if the handle (or a declared ancestor) is not registered.
    /// - [`IntrospectError::InheritanceCycle`] if ancestors loop.
    pub fn describe(&self, handle: &TypeHandle) -> Result<Vec<&'r PropertyDescriptor>> {
        Ok(self.enumerate(handle)?.into_values().collect())
    }

    /// List property names in enumeration order. A type without properties yields an empty list.
    #[tracing::instrument(skip_all, fields(handle = %handle))]
    pub fn property_names(&self, handle: &TypeHandle) -> Result<Vec<String>> {
        Ok(self.enumerate(handle)?.into_keys().map(str::to_string).collect())
    }

    /// Map every property name to its normalized type label.
    ///
    /// Properties with unrecognized encodings map to the configured sentinel; they never fail the call.
    #[tracing::instrument(skip_all, fields(handle = %handle))]
    pub fn property_type_map(&self, handle: &TypeHandle) -> Result<PropertyTypeMap> {
        let properties = self.enumerate(handle)?;
        Ok(properties
            .into_iter()
            .map(|(name, property)| (name.to_string(), self.label(property)))
            .collect())
    }

    /// Look up the normalized type label of a single property without building the full map.
    ///
    /// ## Errors
    /// - [`IntrospectError::InvalidType`] if the handle is not registered.
    /// - [`IntrospectError::PropertyNotFound`] if no covered declaration has that name.
    #[tracing::instrument(skip_all, fields(handle = %handle, property = name))]
    pub fn property_type(&self, name: &str, handle: &TypeHandle) -> Result<String> {
        let info = self.registry.resolve(handle)?;
        let found = match self.config.inheritance {
            Inheritance::DeclaredOnly => info.find(name),
            Inheritance::IncludeAncestors => {
                // Most-derived declaration wins, so search leaf first.
                self.lineage(info)?.into_iter().rev().find_map(|ty| ty.find(name))
            }
        };
        found
            .map(|property| self.label(property))
            .ok_or_else(|| IntrospectError::property_not_found(name, info.name()))
    }

    /// [`property_names`](Self::property_names) for a registered Rust type.
    pub fn names_of<T: ?Sized + 'static>(&self) -> Result<Vec<String>> {
        self.property_names(&TypeHandle::of::<T>())
    }

    /// [`property_type_map`](Self::property_type_map) for a registered Rust type.
    pub fn type_map_of<T: ?Sized + 'static>(&self) -> Result<PropertyTypeMap> {
        self.property_type_map(&TypeHandle::of::<T>())
    }

    /// [`property_type`](Self::property_type) for a registered Rust type.
    pub fn type_of<T: ?Sized + 'static>(&self, name: &str) -> Result<String> {
        self.property_type(name, &TypeHandle::of::<T>())
    }

    /// Render [`property_type_map`](Self::property_type_map) as a JSON object, preserving order.
    #[cfg(feature = "json")]
    pub fn property_type_map_json(&self, handle: &TypeHandle) -> Result<serde_json::Value> {
        let map = self.property_type_map(handle)?;
        Ok(serde_json::Value::Object(
            map.into_iter()
                .map(|(name, label)| (name, serde_json::Value::String(label)))
                .collect(),
        ))
    }

    /// The single enumeration pass every view is derived from.
    fn enumerate(&self, handle: &TypeHandle) -> Result<IndexMap<&'r str, &'r PropertyDescriptor>> {
        let info = self.registry.resolve(handle)?;
        let mut properties = IndexMap::new();
        for ty in self.lineage(info)? {
            for property in ty.properties() {
                // `insert` keeps the original slot for a repeated key: last write wins, first position stays.
                properties.insert(property.name(), property);
            }
        }
        tracing::debug!(type_name = info.name(), count = properties.len(), "enumerated properties");
        Ok(properties)
    }

    /// Types whose declarations are covered, root ancestor first.
    fn lineage(&self, info: &'r TypeInfo) -> Result<Vec<&'r TypeInfo>> {
        let mut chain = vec![info];
        if self.config.inheritance == Inheritance::IncludeAncestors {
            let mut current = info;
            while let Some(parent) = current.parent() {
                if chain.iter().any(|ty| ty.name() == parent) {
                    return Err(IntrospectError::InheritanceCycle {
                        type_name: info.name().to_string(),
                    });
                }
                current = self
                    .registry
                    .get(parent)
                    .ok_or_else(|| IntrospectError::invalid_type(parent))?;
                chain.push(current);
            }
            chain.reverse();
        }
        Ok(chain)
    }

    fn label(&self, property: &PropertyDescriptor) -> String {
        let normalized = property.normalized();
        if !normalized.is_recognized() {
            tracing::debug!(
                property = property.name(),
                encoding = property.encoding(),
                shape = ?property.shape(),
                "unrecognized type encoding; reporting sentinel label"
            );
        }
        normalized.label_or(&self.config.unrecognized_label).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TypeRegistry {
        let mut registry = TypeRegistry::new();
        registry
            .register_info(
                TypeInfo::new("Person")
                    .extends("Entity")
                    .property("age", "i")
                    .property("name", "T@\"PersonName\",&,N,V_name")
                    .property("origin", "{CGPoint=dd}")
                    .property("id", "Q"),
            )
            .unwrap()
            .register_info(TypeInfo::new("Entity").property("id", "q").property("createdAt", "@\"NSDate\""))
            .unwrap()
            .register_info(TypeInfo::new("Empty"))
            .unwrap()
            .register_info(TypeInfo::new("A").extends("B"))
            .unwrap()
            .register_info(TypeInfo::new("B").extends("A"))
            .unwrap()
            .register_info(TypeInfo::new("Orphan").extends("Missing").property("x", "i"))
            .unwrap();
        registry
    }

    fn ancestors(registry: &TypeRegistry) -> PropertyIntrospector<'_> {
        PropertyIntrospector::with_config(
            registry,
            IntrospectConfig::new().with_inheritance(Inheritance::IncludeAncestors),
        )
    }

    #[test]
    fn declared_only_ignores_ancestors() {
        let registry = registry();
        let introspector = PropertyIntrospector::new(&registry);
        let person = TypeHandle::named("Person");

        assert_eq!(introspector.property_names(&person).unwrap(), ["age", "name", "origin", "id"]);
        let map = introspector.property_type_map(&person).unwrap();
        assert_eq!(map["age"], "int");
        assert_eq!(map["name"], "PersonName");
        assert_eq!(map["origin"], "unknown");
        assert_eq!(map["id"], "unsignedLongLong");
        assert!(matches!(
            introspector.property_type("createdAt", &person),
            Err(IntrospectError::PropertyNotFound { .. })
        ));
    }

    #[test]
    fn ancestors_come_first_and_redeclarations_win() {
        let registry = registry();
        let introspector = ancestors(&registry);
        let person = TypeHandle::named("Person");

        assert_eq!(
            introspector.property_names(&person).unwrap(),
            ["id", "createdAt", "age", "name", "origin"]
        );
        let map = introspector.property_type_map(&person).unwrap();
        assert_eq!(map["id"], "unsignedLongLong");
        assert_eq!(map["createdAt"], "NSDate");
        assert_eq!(introspector.property_type("id", &person).unwrap(), "unsignedLongLong");
        assert_eq!(introspector.property_type("createdAt", &person).unwrap(), "NSDate");
    }

    #[test]
    fn ancestor_cycles_fail() {
        let registry = registry();
        let introspector = ancestors(&registry);

        let err = introspector.property_names(&TypeHandle::named("A")).unwrap_err();
        assert_eq!(err, IntrospectError::InheritanceCycle { type_name: "A".into() });
        let err = introspector.property_type("x", &TypeHandle::named("B")).unwrap_err();
        assert!(matches!(err, IntrospectError::InheritanceCycle { .. }));

        // Declared-only enumeration never follows the links.
        assert!(PropertyIntrospector::new(&registry).property_names(&TypeHandle::named("A")).unwrap().is_empty());
    }

    #[test]
    fn missing_ancestor_is_invalid_type() {
        let registry = registry();
        let err = ancestors(&registry).property_type_map(&TypeHandle::named("Orphan")).unwrap_err();
        assert_eq!(err, IntrospectError::invalid_type("Missing"));
    }

    #[test]
    fn sentinel_label_is_configurable() {
        let registry = registry();
        let introspector =
            PropertyIntrospector::with_config(&registry, IntrospectConfig::new().with_unrecognized_label(""));
        let person = TypeHandle::named("Person");

        assert_eq!(introspector.property_type("origin", &person).unwrap(), "");
        assert_eq!(introspector.property_type_map(&person).unwrap()["age"], "int");
    }

    #[test]
    fn duplicate_declarations_are_last_write_wins() {
        let mut registry = TypeRegistry::new();
        registry
            .register_info(TypeInfo::new("Dup").property("v", "i").property("w", "B").property("v", "d"))
            .unwrap();
        let introspector = PropertyIntrospector::new(&registry);
        let dup = TypeHandle::named("Dup");

        assert_eq!(introspector.property_names(&dup).unwrap(), ["v", "w"]);
        assert_eq!(introspector.property_type_map(&dup).unwrap()["v"], "double");
        assert_eq!(introspector.property_type("v", &dup).unwrap(), "double");
        assert_eq!(introspector.describe(&dup).unwrap().len(), 2);
    }

    #[test]
    fn empty_type_yields_empty_views() {
        let registry = registry();
        let introspector = PropertyIntrospector::new(&registry);
        let empty = TypeHandle::named("Empty");

        assert!(introspector.property_names(&empty).unwrap().is_empty());
        assert!(introspector.property_type_map(&empty).unwrap().is_empty());
        assert!(introspector.describe(&empty).unwrap().is_empty());
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_export_preserves_order() {
        let registry = registry();
        let json = PropertyIntrospector::new(&registry)
            .property_type_map_json(&TypeHandle::named("Person"))
            .unwrap();
        assert_eq!(
            json.to_string(),
            r#"{"age":"int","name":"PersonName","origin":"unknown","id":"unsignedLongLong"}"#
        );
    }
}
