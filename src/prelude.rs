//! Prelude module for common imports.
//!
//! ```ignore
//! use propmap::prelude::*;
//! ```

// Registry, handles and the query front-end
pub use crate::config::{Inheritance, IntrospectConfig};
pub use crate::errors::IntrospectError;
pub use crate::introspector::{PropertyIntrospector, PropertyTypeMap};
pub use crate::registry::{TypeHandle, TypeRegistry};
// Trait and derive macro share the name `Introspect`
pub use crate::reflection::Introspect;
pub use propmap_derive::Introspect;
// Property tables
pub use propmap_core::{PropertyDescriptor, TypeInfo};
