//! Type-encoding parsing and normalization.
//!
//! A property's raw type signature is a type encoding: a compact string where the first character selects the
//! kind of type (`i` int, `d` double, `@` object, `{` struct, `^` pointer, ...). This module classifies an
//! encoding into a [`Shape`] and reduces it to the [`NormalizedType`] that serialization layers consume.
//!
//! ## Normalization
//!
//! 1. Leading qualifiers (`r` const, `n` in, `N` inout, `o` out, `O` bycopy, `R` byref, `V` oneway, `A` atomic,
//!    `j` complex) are stripped.
//! 2. An object reference `@"Name"` normalizes to the class name `Name` (protocol lists are dropped); a bare `@`
//!    normalizes to [`ANY_OBJECT_LABEL`].
//! 3. A scalar encoding normalizes to the scalar's canonical label (see [`crate::scalars`]); raw pointers to
//!    anything but a function are scalars too.
//! 4. Everything else (structs, unions, arrays, bitfields, `void`, classes, selectors, function pointers,
//!    blocks, unknown or malformed encodings) normalizes to [`NormalizedType::Unrecognized`].
//!
//! Normalization never fails: an encoding that cannot be classified degrades to the sentinel label.
//!
//! ## Examples
//! ```rust
//! use propmap_core::encoding::{self, Shape};
//!
//! assert_eq!(encoding::normalize("Q").label(), "unsignedLongLong");
//! assert_eq!(encoding::normalize("@\"NSObject<NSCopying>\"").label(), "NSObject");
//! assert_eq!(encoding::shape("^?"), Shape::FunctionPointer);
//! assert_eq!(encoding::normalize("ix").label(), "unknown");
//! ```

use std::fmt;

use crate::scalars::{self, ScalarKind};

/// Label reported for properties whose type encoding is not recognized.
pub const UNRECOGNIZED_LABEL: &str = "unknown";

/// Label reported for untyped object references (`@`, `@"<Protocol>"`).
pub const ANY_OBJECT_LABEL: &str = "id";

const QUALIFIERS: &[char] = &['r', 'n', 'N', 'o', 'O', 'R', 'V', 'A', 'j'];

/// Structural classification of a type encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'a> {
    /// Object reference, with the class name when the encoding carries one.
    Object(Option<&'a str>),
    Scalar(ScalarKind),
    Struct,
    Union,
    Array,
    Bitfield,
    Void,
    /// Class object (`#`).
    Class,
    /// Selector (`:`).
    Selector,
    /// `^?`
    FunctionPointer,
    /// `@?`
    Block,
    /// `?`
    Unknown,
    /// Empty, truncated, or followed by trailing characters.
    Malformed,
}

impl Shape<'_> {
    /// Whether this shape normalizes to something other than the sentinel.
    pub fn is_recognized(&self) -> bool {
        matches!(self, Shape::Object(_) | Shape::Scalar(_))
    }
}

/// Normalized type of a property, ready to be rendered as a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NormalizedType {
    /// Object reference to a named class.
    Class(String),
    /// Object reference without a class name.
    AnyObject,
    Scalar(ScalarKind),
    Unrecognized,
}

impl NormalizedType {
    /// Reduce a [`Shape`] to its normalized type.
    pub fn from_shape(shape: Shape<'_>) -> Self {
        match shape {
            Shape::Object(Some(class)) => NormalizedType::Class(class.to_string()),
            Shape::Object(None) => NormalizedType::AnyObject,
            Shape::Scalar(kind) => NormalizedType::Scalar(kind),
            _ => NormalizedType::Unrecognized,
        }
    }

    /// Render the label, using [`UNRECOGNIZED_LABEL`] as the sentinel.
    pub fn label(&self) -> &str {
        self.label_or(UNRECOGNIZED_LABEL)
    }

    /// Render the label, using `unrecognized` as the sentinel.
    pub fn label_or<'a>(&'a self, unrecognized: &'a str) -> &'a str {
        match self {
            NormalizedType::Class(name) => name,
            NormalizedType::AnyObject => ANY_OBJECT_LABEL,
            NormalizedType::Scalar(kind) => scalars::as_str(*kind),
            NormalizedType::Unrecognized => unrecognized,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, NormalizedType::Unrecognized)
    }
}

impl fmt::Display for NormalizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a complete type encoding.
///
/// ## Parameters
/// - `encoding`: A single type encoding (not an attribute string; see
///   [`crate::attributes::property_encoding`]).
///
/// ## Returns
/// - The [`Shape`] of the encoding. [`Shape::Malformed`] if the encoding is empty, truncated, or has
///   characters left over after one complete type.
pub fn shape(encoding: &str) -> Shape<'_> {
    match parse_one(encoding.trim_start_matches(QUALIFIERS)) {
        Some((shape, "")) => shape,
        _ => Shape::Malformed,
    }
}

/// Normalize a type encoding. Never fails; see the module docs for the rules.
pub fn normalize(encoding: &str) -> NormalizedType {
    NormalizedType::from_shape(shape(encoding))
}

/// Parse one type off the front of `s`, returning its shape and the unparsed remainder.
fn parse_one(s: &str) -> Option<(Shape<'_>, &str)> {
    let mut chars = s.chars();
    let first = chars.next()?;
    let rest = chars.as_str();
    match first {
        '@' => parse_object(rest),
        '^' => {
            if let Some(after) = rest.strip_prefix('?') {
                return Some((Shape::FunctionPointer, after));
            }
            // Pointer-to-pointer chains collapse to one pointer; only the innermost pointee is parsed.
            let mut pointee = rest.trim_start_matches(QUALIFIERS);
            while let Some(inner) = pointee.strip_prefix('^') {
                pointee = inner.trim_start_matches(QUALIFIERS);
            }
            let (_, after) = parse_one(pointee)?;
            Some((Shape::Scalar(ScalarKind::Pointer), after))
        }
        '{' => skip_group(rest, '}').map(|after| (Shape::Struct, after)),
        '(' => skip_group(rest, ')').map(|after| (Shape::Union, after)),
        '[' => skip_group(rest, ']').map(|after| (Shape::Array, after)),
        'b' => {
            let after = rest.trim_start_matches(|c: char| c.is_ascii_digit());
            (after.len() < rest.len()).then_some((Shape::Bitfield, after))
        }
        'v' => Some((Shape::Void, rest)),
        '#' => Some((Shape::Class, rest)),
        ':' => Some((Shape::Selector, rest)),
        '?' => Some((Shape::Unknown, rest)),
        c => scalars::from_encoding(c).map(|kind| (Shape::Scalar(kind), rest)),
    }
}

/// Parse what follows `@`: `?` (block), `"Class<Proto>"`, or nothing.
fn parse_object(rest: &str) -> Option<(Shape<'_>, &str)> {
    if let Some(after) = rest.strip_prefix('?') {
        return Some((Shape::Block, after));
    }
    let Some(quoted) = rest.strip_prefix('"') else {
        return Some((Shape::Object(None), rest));
    };
    let end = quoted.find('"')?;
    let name = &quoted[..end];
    let class = match name.find('<') {
        Some(i) => &name[..i],
        None => name,
    }
    .trim();
    let class = (!class.is_empty()).then_some(class);
    Some((Shape::Object(class), &quoted[end + 1..]))
}

/// Skip to just past the bracket that closes an already-opened group.
///
/// Nested groups of any bracket kind must balance; quoted field names are skipped verbatim.
fn skip_group(s: &str, close: char) -> Option<&str> {
    let mut stack = vec![close];
    let mut in_quote = false;
    for (i, c) in s.char_indices() {
        if in_quote {
            in_quote = c != '"';
            continue;
        }
        match c {
            '"' => in_quote = true,
            '{' => stack.push('}'),
            '(' => stack.push(')'),
            '[' => stack.push(']'),
            '}' | ')' | ']' => {
                if stack.pop() != Some(c) {
                    return None;
                }
                if stack.is_empty() {
                    return Some(&s[i + c.len_utf8()..]);
                }
            }
            _ => {}
        }
    }
    None
}
