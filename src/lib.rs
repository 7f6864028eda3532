#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
//! Property introspection for serialization layers.
//!
//! Given a type, `propmap` reports the properties it declares for external representation (XML/JSON binding)
//! as an ordered list of names and as a map from name to a normalized type label (`"int"`, `"double"`,
//! `"BOOL"`, a class name such as `"PersonName"`, or the `"unknown"` sentinel).
//!
//! Rust has no runtime reflection, so property tables come from `#[derive(Introspect)]` or from hand-built
//! [`TypeInfo`]s, registered in a [`TypeRegistry`] and queried through a [`PropertyIntrospector`].
//!
//! ## Panic Policy
//!
//! - **Library code**: errors are returned as [`IntrospectError`]; the crate denies `clippy::unwrap_used` and
//!   `clippy::expect_used`.
//! - **Unrecognized type encodings** are not errors: they degrade to the sentinel label for that property only.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Example
//!
//! ```
//! use propmap::prelude::*;
//!
//! #[derive(Introspect)]
//! struct PersonName {
//!     first: String,
//!     last: String,
//! }
//!
//! #[derive(Introspect)]
//! struct Person {
//!     age: i32,
//!     name: PersonName,
//! }
//!
//! let mut registry = TypeRegistry::new();
//! registry.register::<Person>()?.register::<PersonName>()?;
//!
//! let introspector = PropertyIntrospector::new(&registry);
//! let map = introspector.type_map_of::<Person>()?;
//! assert_eq!(map["age"], "int");
//! assert_eq!(map["name"], "PersonName");
//! # Ok::<(), propmap::IntrospectError>(())
//! ```

pub mod config;
pub mod errors;
pub mod introspector;
pub mod prelude;
pub mod reflection;
pub mod registry;

pub use config::{Inheritance, IntrospectConfig};
pub use errors::{IntrospectError, Result};
pub use introspector::{PropertyIntrospector, PropertyTypeMap};
pub use reflection::Introspect;
pub use registry::{TypeHandle, TypeRegistry};

// Vocabulary shared with the derive macro
pub use propmap_core::{
    ANY_OBJECT_LABEL, NormalizedType, PropertyDescriptor, ScalarKind, Shape, TypeInfo, UNRECOGNIZED_LABEL,
    attributes, encoding, scalars,
};

// Derive macro (lives in the macro namespace, alongside the trait of the same name)
pub use propmap_derive::Introspect;
