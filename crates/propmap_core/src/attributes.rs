//! Property attribute strings.
//!
//! A runtime property description is a comma-separated list of attributes: `T<encoding>` first, followed by
//! flags such as `R` (readonly), `C` (copy), `&` (retain), `N` (nonatomic) and `V<ivar>`. Signatures registered
//! with `propmap` may be given either as a bare type encoding or as such an attribute string.
//!
//! ## Examples
//! ```rust
//! use propmap_core::attributes::{self, PropertyAttributes};
//!
//! assert_eq!(attributes::property_encoding("T@\"NSString\",C,N,V_name"), "@\"NSString\"");
//! assert_eq!(attributes::property_encoding("d"), "d");
//!
//! let attrs = PropertyAttributes::parse("Ti,R,N,V_age");
//! assert_eq!(attrs.encoding, "i");
//! assert!(attrs.readonly && attrs.nonatomic);
//! assert_eq!(attrs.ivar, Some("_age"));
//! ```

/// Ownership semantics declared for an object property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    #[default]
    Assign,
    Retain,
    Copy,
    Weak,
}

/// Parsed property attribute string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropertyAttributes<'a> {
    /// Type encoding (the `T` attribute).
    pub encoding: &'a str,
    pub readonly: bool,
    pub ownership: Ownership,
    pub nonatomic: bool,
    pub dynamic: bool,
    pub getter: Option<&'a str>,
    pub setter: Option<&'a str>,
    /// Backing instance variable (the `V` attribute).
    pub ivar: Option<&'a str>,
}

impl<'a> PropertyAttributes<'a> {
    /// Parse an attribute string.
    ///
    /// A string that does not start with `T` is treated as a bare type encoding with no flags. Unknown
    /// attributes are ignored.
    pub fn parse(signature: &'a str) -> Self {
        let Some(attrs) = signature.strip_prefix('T') else {
            return Self {
                encoding: signature,
                ..Self::default()
            };
        };

        let mut parts = attrs.split(',');
        let mut parsed = Self {
            encoding: parts.next().unwrap_or_default(),
            ..Self::default()
        };
        for part in parts {
            let mut chars = part.chars();
            let Some(flag) = chars.next() else { continue };
            let value = chars.as_str();
            match flag {
                'R' => parsed.readonly = true,
                'C' => parsed.ownership = Ownership::Copy,
                '&' => parsed.ownership = Ownership::Retain,
                'W' => parsed.ownership = Ownership::Weak,
                'N' => parsed.nonatomic = true,
                'D' => parsed.dynamic = true,
                'G' => parsed.getter = Some(value),
                'S' => parsed.setter = Some(value),
                'V' => parsed.ivar = Some(value),
                _ => {}
            }
        }
        parsed
    }
}

/// Extract the type encoding from a signature.
///
/// ## Parameters
/// - `signature`: A bare type encoding (`"i"`) or an attribute string (`"Ti,N,V_age"`).
///
/// ## Returns
/// - The type encoding. For attribute strings this is the text between `T` and the first comma.
///
/// ## Notes
/// - `T` is not a type-encoding character, so the two forms never overlap.
pub fn property_encoding(signature: &str) -> &str {
    match signature.strip_prefix('T') {
        Some(attrs) => attrs.split(',').next().unwrap_or(attrs),
        None => signature,
    }
}
