//! Error types for board description loading and validation.

/// Errors that can occur when loading or validating a `board.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the board file.
    #[error("failed to read board description: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse board description: {0}")]
    ParseError(String),

    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A referenced variant does not exist.
    #[error("unknown variant '{0}'")]
    UnknownVariant(String),

    /// A value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
