//! Type registry and handles.
//!
//! Rust has no runtime type registry, so `propmap` keeps one explicitly: a [`TypeRegistry`] maps registered
//! class names to their property tables, and a [`TypeHandle`] is the opaque reference callers pass to the
//! introspector. A handle that does not resolve against the registry is the "invalid type" case.
//!
//! ## Notes
//! - Registration is the only mutation; introspection borrows the registry immutably.
//! - Re-registering a class name replaces the previous table, unless the name belongs to a different Rust type.

use std::any::{TypeId, type_name};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use propmap_core::TypeInfo;

use crate::errors::{IntrospectError, Result};
use crate::reflection::Introspect;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum HandleRepr {
    Type { id: TypeId, rust_name: &'static str },
    Named(Cow<'static, str>),
}

/// Opaque reference to a type, resolved against a [`TypeRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeHandle(HandleRepr);

impl TypeHandle {
    /// Handle for a Rust type. Resolves if `T` was registered with [`TypeRegistry::register`].
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(HandleRepr::Type {
            id: TypeId::of::<T>(),
            rust_name: type_name::<T>(),
        })
    }

    /// Handle for a registered class name.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self(HandleRepr::Named(name.into()))
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            HandleRepr::Type { rust_name, .. } => f.write_str(rust_name),
            HandleRepr::Named(name) => f.write_str(name),
        }
    }
}

/// Registered property tables, keyed by class name in registration order.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, TypeInfo>,
    by_type_id: HashMap<TypeId, String>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type through its [`Introspect`] implementation.
    ///
    /// The type becomes reachable both through [`TypeHandle::of`] and through [`TypeHandle::named`] with its
    /// class name.
    ///
    /// ## Errors
    /// - [`IntrospectError::InvalidDescriptor`] if the table is malformed, or if its class name is already held
    ///   by a different Rust type.
    pub fn register<T: Introspect + 'static>(&mut self) -> Result<&mut Self> {
        let id = TypeId::of::<T>();
        let info = T::type_info();
        let name = info.name().to_string();
        self.insert(info, Some(id))?;
        self.by_type_id.insert(id, name);
        Ok(self)
    }

    /// Register a hand-built property table, reachable through [`TypeHandle::named`].
    ///
    /// ## Errors
    /// - [`IntrospectError::InvalidDescriptor`] if the table is malformed, or if its class name is held by a type
    ///   registered with [`register`](Self::register).
    pub fn register_info(&mut self, info: TypeInfo) -> Result<&mut Self> {
        self.insert(info, None)?;
        Ok(self)
    }

    fn insert(&mut self, info: TypeInfo, owner: Option<TypeId>) -> Result<()> {
        validate(&info)?;
        self.check_owner(info.name(), owner)?;
        tracing::trace!(
            type_name = info.name(),
            properties = info.properties().len(),
            parent = ?info.parent(),
            "registered type"
        );
        self.types.insert(info.name().to_string(), info);
        Ok(())
    }

    /// A class name held by one Rust type cannot be taken over by another type or by a hand-built table.
    fn check_owner(&self, name: &str, owner: Option<TypeId>) -> Result<()> {
        let held_by_other = self
            .by_type_id
            .iter()
            .any(|(id, held)| held == name && Some(*id) != owner);
        if held_by_other {
            return Err(IntrospectError::InvalidDescriptor {
                type_name: name.to_string(),
                reason: "class name is already registered for another Rust type".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve a handle to its property table.
    ///
    /// ## Errors
    /// - [`IntrospectError::InvalidType`] if the handle names no registered type.
    pub fn resolve(&self, handle: &TypeHandle) -> Result<&TypeInfo> {
        let found = match &handle.0 {
            HandleRepr::Type { id, .. } => self.by_type_id.get(id).and_then(|name| self.types.get(name)),
            HandleRepr::Named(name) => self.types.get(name.as_ref()),
        };
        found.ok_or_else(|| IntrospectError::invalid_type(handle))
    }

    /// Look up a property table by class name.
    pub fn get(&self, name: &str) -> Option<&TypeInfo> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered class names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn validate(info: &TypeInfo) -> Result<()> {
    let reject = |reason: &str| IntrospectError::InvalidDescriptor {
        type_name: info.name().to_string(),
        reason: reason.to_string(),
    };
    if info.name().is_empty() {
        return Err(reject("class name is empty"));
    }
    if info.parent() == Some(info.name()) {
        return Err(reject("type extends itself"));
    }
    if info.properties().iter().any(|p| p.name().is_empty()) {
        return Err(reject("property name is empty"));
    }
    Ok(())
}
