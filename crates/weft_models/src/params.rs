//! Typed reads of factory parameters with defaults and bounds.

use std::ops::RangeInclusive;

use weft_assemble::{ConfigDescriptor, FactoryError};

/// Reads an integer parameter, applying `default` and checking `range`.
pub(crate) fn integer_in(
    config: &ConfigDescriptor,
    key: &str,
    default: i64,
    range: RangeInclusive<i64>,
) -> Result<i64, FactoryError> {
    let value = config.integer(key)?.unwrap_or(default);
    if !range.contains(&value) {
        return Err(FactoryError::invalid(
            key,
            format!(
                "must be between {} and {}, got {value}",
                range.start(),
                range.end()
            ),
        ));
    }
    Ok(value)
}

/// Reads a string parameter, applying `default`.
pub(crate) fn string_or(
    config: &ConfigDescriptor,
    key: &str,
    default: &str,
) -> Result<String, FactoryError> {
    Ok(config.string(key)?.unwrap_or(default).to_string())
}
