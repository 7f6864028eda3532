//! Introspection configuration.

use std::borrow::Cow;

use propmap_core::UNRECOGNIZED_LABEL;

/// Which declarations enumeration covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inheritance {
    /// Only properties declared directly on the type.
    #[default]
    DeclaredOnly,
    /// Ancestor properties too, root ancestor first. A redeclared name keeps its first position and takes the
    /// most-derived declaration's type.
    IncludeAncestors,
}

/// Introspection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntrospectConfig {
    /// Declarations covered by enumeration and lookup
    pub inheritance: Inheritance,
    /// Label reported for properties whose type encoding is not recognized
    pub unrecognized_label: Cow<'static, str>,
}

impl Default for IntrospectConfig {
    fn default() -> Self {
        Self {
            inheritance: Inheritance::DeclaredOnly,
            unrecognized_label: Cow::Borrowed(UNRECOGNIZED_LABEL),
        }
    }
}

impl IntrospectConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inheritance policy
    pub fn with_inheritance(mut self, inheritance: Inheritance) -> Self {
        self.inheritance = inheritance;
        self
    }

    /// Set the sentinel label (the empty string is allowed)
    pub fn with_unrecognized_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.unrecognized_label = label.into();
        self
    }
}
