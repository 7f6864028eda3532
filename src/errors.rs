//! Errors raised by introspection.
//!
//! An unrecognized type encoding is *not* an error: it degrades to the sentinel label (see
//! [`crate::config::IntrospectConfig::unrecognized_label`]). Only unresolvable handles, missing properties and
//! malformed registrations fail.

use miette::Diagnostic;
use thiserror::Error;

/// Errors that occur while registering or introspecting types
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum IntrospectError {
    /// The handle does not resolve to a registered type.
    #[error("type `{handle}` is not registered")]
    #[diagnostic(
        code(propmap::invalid_type),
        help("register the type with `TypeRegistry::register` or `TypeRegistry::register_info` first")
    )]
    InvalidType { handle: String },

    /// The single-property lookup found no declaration with that name.
    #[error("type `{type_name}` declares no property named `{property}`")]
    #[diagnostic(code(propmap::property_not_found))]
    PropertyNotFound { property: String, type_name: String },

    /// Following `extends` links led back to a type already visited.
    #[error("inheritance chain of `{type_name}` loops back on itself")]
    #[diagnostic(
        code(propmap::inheritance_cycle),
        help("check the `extends` declarations of the types in this chain")
    )]
    InheritanceCycle { type_name: String },

    /// A property table was rejected at registration.
    #[error("cannot register `{type_name}`: {reason}")]
    #[diagnostic(code(propmap::invalid_descriptor))]
    InvalidDescriptor { type_name: String, reason: String },
}

impl IntrospectError {
    pub fn invalid_type(handle: impl ToString) -> Self {
        Self::InvalidType {
            handle: handle.to_string(),
        }
    }

    pub fn property_not_found(property: &str, type_name: &str) -> Self {
        Self::PropertyNotFound {
            property: property.to_string(),
            type_name: type_name.to_string(),
        }
    }
}

/// Result type for introspection operations.
pub type Result<T, E = IntrospectError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_item() {
        let err = IntrospectError::invalid_type("Ghost");
        assert_eq!(err.to_string(), "type `Ghost` is not registered");

        let err = IntrospectError::property_not_found("doesNotExist", "Person");
        assert_eq!(err.to_string(), "type `Person` declares no property named `doesNotExist`");
    }

    #[test]
    fn diagnostics_carry_codes() {
        let err = IntrospectError::invalid_type("Ghost");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("propmap::invalid_type"));
        assert!(err.help().is_some());

        let err = IntrospectError::property_not_found("x", "T");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("propmap::property_not_found"));
    }
}
