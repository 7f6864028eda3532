//! Provide the dependency-free vocabulary behind `propmap`: scalar type labels, type-encoding parsing and
//! normalization, and the descriptor types that registered property tables are made of.
//!
//! This crate is intentionally small. The derive macro (`propmap_derive`) uses it at expansion time to pick
//! encodings for Rust field types, and the `propmap` runtime uses it to turn those encodings back into labels.
//!
//! ## Notes
//!
//! - This is a “vocabulary” crate: **no IO**, no global state, no logging.
//! - Raw type signatures use the Objective-C style type-encoding alphabet (`i`, `d`, `@"Name"`, `{Point=dd}`).
//!   A signature may also be a full property attribute string (`T@"NSString",&,N,V_name`).
//!
//! ## Examples
//! ```rust
//! use propmap_core::encoding::{self, NormalizedType};
//! use propmap_core::scalars::ScalarKind;
//!
//! assert_eq!(encoding::normalize("i"), NormalizedType::Scalar(ScalarKind::Int));
//! assert_eq!(encoding::normalize("@\"PersonName\"").label(), "PersonName");
//! assert_eq!(encoding::normalize("{CGPoint=dd}").label(), "unknown");
//! ```

pub mod attributes;
pub mod descriptor;
pub mod encoding;
pub mod scalars;

pub use descriptor::{PropertyDescriptor, TypeInfo};
pub use encoding::{ANY_OBJECT_LABEL, NormalizedType, Shape, UNRECOGNIZED_LABEL};
pub use scalars::ScalarKind;
