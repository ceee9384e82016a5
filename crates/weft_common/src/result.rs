//! The internal error type.

use std::fmt;

/// A broken internal invariant: a bug in Weft, never a problem with the
/// board being assembled.
///
/// Board problems are reported through the typed assembly and configuration
/// errors instead.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// What went wrong.
    pub message: String,
}

impl InternalError {
    /// Creates an internal error with the given message.
    pub fn new(message: impl fmt::Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }

    /// A lookup table pointed at an entry that does not exist.
    pub fn dangling(what: impl fmt::Display) -> Self {
        Self::new(format_args!("`{what}` maps to a missing entry"))
    }
}
