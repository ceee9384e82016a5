//! Shared foundational types used across the Weft board assembly crates.
//!
//! This crate provides interned identifiers for component and port names,
//! integral clock frequencies, content fingerprints, and the internal error type.

#![warn(missing_docs)]

pub mod frequency;
pub mod hash;
pub mod ident;
pub mod result;

pub use frequency::{Frequency, ParseFrequencyError};
pub use hash::{ContentHash, ContentHasher};
pub use ident::{Ident, Interner};
pub use result::InternalError;
