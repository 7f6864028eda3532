//! Scalar type vocabulary.
//!
//! This registry covers the primitive types a property can carry without referring to an object: integers of
//! every width, floating point, booleans, characters and raw pointers. Each entry ties together the encoding
//! character, the canonical label handed to serialization layers, and the Rust spellings that produce it.
//!
//! ## Notes
//! - Lookup via [`from_encoding`] is exact (encodings are case-sensitive: `i` is `int`, `I` is `unsignedInt`).
//! - Lookup via [`from_rust_type`] matches the last path segment of a Rust type (`i32`, `std::ffi::c_int`).
//! - This module is vocabulary only. Parsing compound encodings lives in [`crate::encoding`].
//!
//! ## Examples
//! ```rust
//! use propmap_core::scalars::{self, ScalarKind};
//!
//! assert_eq!(scalars::from_encoding('i'), Some(ScalarKind::Int));
//! assert_eq!(scalars::from_rust_type("f64"), Some(ScalarKind::Double));
//! assert_eq!(scalars::as_str(ScalarKind::UnsignedInt), "unsignedInt");
//! ```

/// Stable identifier for scalar property types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Char,
    UnsignedChar,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Long,
    UnsignedLong,
    LongLong,
    UnsignedLongLong,
    Float,
    Double,
    Bool,
    /// `char *`
    CString,
    /// Any raw pointer other than `char *` and function pointers.
    Pointer,
}

/// Metadata for a scalar type.
#[derive(Debug, Clone, Copy)]
pub struct ScalarTypeInfo {
    pub kind: ScalarKind,
    /// Label reported for properties of this type.
    pub canonical: &'static str,
    /// Leading character of the type encoding.
    pub encoding: char,
    /// Rust spellings (last path segment) that encode to this scalar.
    pub rust_spellings: &'static [&'static str],
    pub description: &'static str,
}

/// Registry of scalar types.
pub const SCALAR_TYPES: &[ScalarTypeInfo] = &[
    info(
        ScalarKind::Char,
        "char",
        'c',
        &["i8", "char", "c_char", "c_schar"],
        "Single character or signed byte.",
    ),
    info(
        ScalarKind::UnsignedChar,
        "unsignedChar",
        'C',
        &["u8", "c_uchar"],
        "Unsigned byte.",
    ),
    info(ScalarKind::Short, "short", 's', &["i16", "c_short"], "Signed 16-bit integer."),
    info(
        ScalarKind::UnsignedShort,
        "unsignedShort",
        'S',
        &["u16", "c_ushort"],
        "Unsigned 16-bit integer.",
    ),
    info(ScalarKind::Int, "int", 'i', &["i32", "c_int"], "Signed 32-bit integer."),
    info(
        ScalarKind::UnsignedInt,
        "unsignedInt",
        'I',
        &["u32", "c_uint"],
        "Unsigned 32-bit integer.",
    ),
    info(ScalarKind::Long, "long", 'l', &["isize", "c_long"], "Pointer-sized signed integer."),
    info(
        ScalarKind::UnsignedLong,
        "unsignedLong",
        'L',
        &["usize", "c_ulong"],
        "Pointer-sized unsigned integer.",
    ),
    info(
        ScalarKind::LongLong,
        "longLong",
        'q',
        &["i64", "c_longlong"],
        "Signed 64-bit integer.",
    ),
    info(
        ScalarKind::UnsignedLongLong,
        "unsignedLongLong",
        'Q',
        &["u64", "c_ulonglong"],
        "Unsigned 64-bit integer.",
    ),
    info(ScalarKind::Float, "float", 'f', &["f32", "c_float"], "Single-precision float."),
    info(ScalarKind::Double, "double", 'd', &["f64", "c_double"], "Double-precision float."),
    info(ScalarKind::Bool, "BOOL", 'B', &["bool"], "Boolean."),
    info(ScalarKind::CString, "cString", '*', &[], "NUL-terminated C string (`char *`)."),
    info(ScalarKind::Pointer, "pointer", '^', &[], "Raw pointer to a non-function type."),
];

/// Resolve a single encoding character to a [`ScalarKind`].
///
/// ## Parameters
/// - `encoding`: Leading character of a type encoding.
///
/// ## Returns
/// - `Some(ScalarKind)` if the character names a scalar.
/// - `None` otherwise (objects, structs, unknown characters).
///
/// ## Notes
/// - `^` resolves to [`ScalarKind::Pointer`]; callers are responsible for checking the pointee, since `^?`
///   (function pointer) is not a scalar.
pub fn from_encoding(encoding: char) -> Option<ScalarKind> {
    SCALAR_TYPES.iter().find(|t| t.encoding == encoding).map(|t| t.kind)
}

/// Resolve a Rust type spelling to a [`ScalarKind`].
///
/// ## Parameters
/// - `name`: Last path segment of a Rust type (e.g. `"u16"`, `"c_double"`).
///
/// ## Returns
/// - `Some(ScalarKind)` if the spelling is a known scalar.
/// - `None` otherwise.
pub fn from_rust_type(name: &str) -> Option<ScalarKind> {
    SCALAR_TYPES
        .iter()
        .find(|t| t.rust_spellings.contains(&name))
        .map(|t| t.kind)
}

/// Return the canonical label for a scalar type.
pub fn as_str(kind: ScalarKind) -> &'static str {
    info_for(kind).canonical
}

/// Return the encoding character for a scalar type.
pub fn encoding_of(kind: ScalarKind) -> char {
    info_for(kind).encoding
}

/// Return the full metadata entry for a scalar type.
///
/// ## Panics
/// - If the registry is missing an entry for `kind` (this indicates a programming error).
pub fn info_for(kind: ScalarKind) -> &'static ScalarTypeInfo {
    SCALAR_TYPES
        .iter()
        .find(|t| t.kind == kind)
        .expect("INVARIANT: every ScalarKind has a SCALAR_TYPES entry")
}

const fn info(
    kind: ScalarKind,
    canonical: &'static str,
    encoding: char,
    rust_spellings: &'static [&'static str],
    description: &'static str,
) -> ScalarTypeInfo {
    ScalarTypeInfo {
        kind,
        canonical,
        encoding,
        rust_spellings,
        description,
    }
}
