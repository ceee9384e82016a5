//! Board description loading and validation.

use crate::error::ConfigError;
use crate::types::BoardConfig;
use std::collections::BTreeSet;
use std::path::Path;

/// The conventional board description file name.
pub const BOARD_FILE: &str = "board.toml";

/// Loads and validates `<board_dir>/board.toml`.
pub fn load_board(board_dir: &Path) -> Result<BoardConfig, ConfigError> {
    load_board_file(&board_dir.join(BOARD_FILE))
}

/// Loads and validates a board description from an explicit file path.
pub fn load_board_file(path: &Path) -> Result<BoardConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_board_from_str(&content)
}

/// Parses and validates a board description from a string.
pub fn load_board_from_str(content: &str) -> Result<BoardConfig, ConfigError> {
    let config: BoardConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_board(&config)?;
    Ok(config)
}

/// Checks that names are present and usable in `component.port` endpoints.
///
/// Name collisions between declarations are left to assembly, which reports
/// them with the declaration that collides.
fn validate_board(config: &BoardConfig) -> Result<(), ConfigError> {
    if config.board.name.is_empty() {
        return Err(ConfigError::MissingField("board.name".to_string()));
    }
    for (i, clock) in config.clocks.iter().enumerate() {
        check_name(&clock.name, &format!("clocks[{i}].name"))?;
    }
    for (i, sub) in config.subsystems.iter().enumerate() {
        check_name(&sub.name, &format!("subsystems[{i}].name"))?;
        if sub.type_tag.is_empty() {
            return Err(ConfigError::MissingField(format!("subsystems[{i}].type")));
        }
    }

    let clock_names: BTreeSet<&str> = config.clocks.iter().map(|c| c.name.as_str()).collect();
    let subsystem_names: BTreeSet<&str> =
        config.subsystems.iter().map(|s| s.name.as_str()).collect();
    for (variant_name, variant) in &config.variants {
        for clock in variant.clocks.keys() {
            if !clock_names.contains(clock.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "variant '{variant_name}' overrides unknown clock '{clock}'"
                )));
            }
        }
        for sub in variant.params.keys() {
            if !subsystem_names.contains(sub.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "variant '{variant_name}' overrides params of unknown subsystem '{sub}'"
                )));
            }
        }
    }
    Ok(())
}

fn check_name(name: &str, field: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::MissingField(field.to_string()));
    }
    if name.contains('.') {
        return Err(ConfigError::ValidationError(format!(
            "{field} '{name}' must not contain '.'"
        )));
    }
    Ok(())
}
