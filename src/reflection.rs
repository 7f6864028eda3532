//! Reflection support for introspectable types.
//!
//! The `Introspect` trait is how a Rust type exposes the property table a runtime with built-in reflection
//! would report on its own.

use propmap_core::TypeInfo;

/// Provides the property table of a type.
///
/// This trait is typically derived using `#[derive(Introspect)]`, but can be implemented by hand for types whose
/// table does not follow from their fields.
///
/// # Examples
///
/// ```
/// use propmap::{Introspect, TypeInfo};
///
/// struct Person {
///     age: i32,
/// }
///
/// impl Introspect for Person {
///     fn class_name() -> &'static str {
///         "Person"
///     }
///
///     fn type_info() -> TypeInfo {
///         TypeInfo::new(Self::class_name()).property("age", "i")
///     }
/// }
///
/// assert_eq!(Person::type_info().properties().len(), 1);
/// ```
pub trait Introspect {
    /// Returns the name the type registers under.
    fn class_name() -> &'static str;

    /// Returns the type's directly declared properties.
    fn type_info() -> TypeInfo;
}
