//! Variant resolution: applying a named variant over the base board.

use crate::error::ConfigError;
use crate::types::{BindingDecl, BoardConfig, ClockDecl, SubsystemDecl};

/// A board description with at most one variant applied.
///
/// Clock overrides replace the frequency of the named clock. Parameter
/// overrides are merged key by key over the subsystem's base parameters; a
/// key present in the variant wins. Declaration order is unchanged.
#[derive(Debug, Clone)]
pub struct ResolvedBoard {
    /// The board name.
    pub name: String,
    /// The applied variant, if any.
    pub variant: Option<String>,
    /// Clock domains, in declaration order.
    pub clocks: Vec<ClockDecl>,
    /// Subsystems, in construction order.
    pub subsystems: Vec<SubsystemDecl>,
    /// Bindings, in wiring order.
    pub bindings: Vec<BindingDecl>,
}

/// Resolves the board with the given variant, or the base board for `None`.
pub fn resolve_variant(
    config: &BoardConfig,
    variant: Option<&str>,
) -> Result<ResolvedBoard, ConfigError> {
    let mut clocks = config.clocks.clone();
    let mut subsystems = config.subsystems.clone();

    if let Some(name) = variant {
        let overrides = config
            .variants
            .get(name)
            .ok_or_else(|| ConfigError::UnknownVariant(name.to_string()))?;

        for clock in &mut clocks {
            if let Some(freq) = overrides.clocks.get(&clock.name) {
                clock.frequency = *freq;
            }
        }
        for sub in &mut subsystems {
            if let Some(params) = overrides.params.get(&sub.name) {
                for (key, value) in params {
                    sub.params.insert(key.clone(), value.clone());
                }
            }
        }
    }

    Ok(ResolvedBoard {
        name: config.board.name.clone(),
        variant: variant.map(str::to_string),
        clocks,
        subsystems,
        bindings: config.bindings.clone(),
    })
}
