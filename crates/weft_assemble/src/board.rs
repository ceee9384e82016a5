//! Assembling a platform from a resolved board description.

use tracing::info_span;
use weft_config::ResolvedBoard;
use weft_diagnostics::Diagnostic;
use weft_topology::PlatformGraph;

use crate::assembler::Assembler;
use crate::errors::AssembleError;
use crate::factory::{ConfigDescriptor, FactoryRegistry};
use crate::scope::Scope;

/// An assembly error annotated with the declaration that caused it.
#[derive(Debug, thiserror::Error)]
#[error("{origin}: {error}")]
pub struct BoardError {
    /// The offending declaration, e.g. `bindings[2]` or `subsystems[hostd]`.
    pub origin: String,
    /// The underlying error.
    #[source]
    pub error: AssembleError,
}

impl BoardError {
    fn at(origin: impl Into<String>) -> impl FnOnce(AssembleError) -> Self {
        let origin = origin.into();
        move |error| Self { origin, error }
    }

    /// Converts the error into a diagnostic pointing at its declaration.
    pub fn to_diagnostic(&self) -> Diagnostic {
        self.error.to_diagnostic().with_origin(&self.origin)
    }
}

/// Assembles `board` in `scope`: clocks, then subsystems, then bindings, each
/// in declaration order, then finalize.
pub fn assemble_board(
    board: &ResolvedBoard,
    factories: &FactoryRegistry,
    scope: Scope,
) -> Result<PlatformGraph, BoardError> {
    let span = info_span!("assemble_board", board = %board.name, variant = ?board.variant);
    let _guard = span.enter();

    let mut asm = Assembler::new(scope, factories);

    for clock in &board.clocks {
        asm.add_clock_domain(&clock.name, clock.frequency)
            .map_err(BoardError::at(format!("clocks[{}]", clock.name)))?;
    }
    for sub in &board.subsystems {
        let config = ConfigDescriptor::new(sub.params.clone());
        asm.add_subsystem(&sub.name, &sub.type_tag, &config)
            .map_err(BoardError::at(format!("subsystems[{}]", sub.name)))?;
    }
    for (i, binding) in board.bindings.iter().enumerate() {
        asm.bind(
            &binding.from.component,
            &binding.from.port,
            &binding.to.component,
            &binding.to.port,
        )
        .map_err(BoardError::at(format!("bindings[{i}]")))?;
    }

    asm.finalize().map_err(|error| {
        let origin = match &error {
            AssembleError::UnboundRequiredPort { subsystem, .. } => {
                format!("subsystems[{subsystem}]")
            }
            _ => "board".to_string(),
        };
        BoardError { origin, error }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{BuildContext, FactoryError, SubsystemFactory};
    use weft_config::{load_board_from_str, resolve_variant};
    use weft_topology::{PortKind, PortSpec, Subsystem};

    #[derive(Debug)]
    struct Ram(Vec<PortSpec>);

    impl Subsystem for Ram {
        fn ports(&self) -> &[PortSpec] {
            &self.0
        }
    }

    struct RamFactory;

    impl SubsystemFactory for RamFactory {
        fn type_tag(&self) -> &str {
            "ram"
        }

        fn construct(
            &self,
            _ctx: &BuildContext<'_>,
            _name: &str,
            config: &ConfigDescriptor,
        ) -> Result<Box<dyn Subsystem>, FactoryError> {
            if config.integer("size")? == Some(0) {
                return Err(FactoryError::invalid("size", "must be positive"));
            }
            Ok(Box::new(Ram(vec![
                PortSpec::clock_input(),
                PortSpec::input("input", PortKind::Interconnect),
            ])))
        }
    }

    fn factories() -> FactoryRegistry {
        let mut reg = FactoryRegistry::new();
        reg.register(Box::new(RamFactory));
        reg
    }

    fn assemble(toml: &str) -> Result<PlatformGraph, BoardError> {
        let config = load_board_from_str(toml).unwrap();
        let board = resolve_variant(&config, None).unwrap();
        assemble_board(&board, &factories(), Scope::root(&board.name))
    }

    #[test]
    fn assembles_in_declaration_order() {
        let graph = assemble(
            r#"
[board]
name = "mini"

[[clocks]]
name = "soc"
frequency = "10MHz"

[[subsystems]]
name = "ddr"
type = "ram"

[[bindings]]
from = "soc.out"
to = "ddr.clock"
"#,
        )
        .unwrap();
        assert_eq!(graph.scope(), "mini");
        assert_eq!(graph.clock_count(), 1);
        assert_eq!(graph.subsystem_count(), 1);
        assert_eq!(graph.binding_count(), 1);
    }

    #[test]
    fn binding_errors_point_at_index() {
        let err = assemble(
            r#"
[board]
name = "mini"

[[clocks]]
name = "soc"
frequency = "10MHz"

[[subsystems]]
name = "ddr"
type = "ram"

[[bindings]]
from = "soc.out"
to = "ddr.clock"

[[bindings]]
from = "soc.out"
to = "ddr.input"
"#,
        )
        .unwrap_err();
        assert_eq!(err.origin, "bindings[1]");
        let diag = err.to_diagnostic();
        assert_eq!(diag.code.to_string(), "E304");
        assert_eq!(diag.origin.as_deref(), Some("bindings[1]"));
    }

    #[test]
    fn unbound_port_points_at_subsystem() {
        let err = assemble(
            r#"
[board]
name = "mini"

[[subsystems]]
name = "ddr"
type = "ram"
"#,
        )
        .unwrap_err();
        assert_eq!(err.origin, "subsystems[ddr]");
        assert!(matches!(err.error, AssembleError::UnboundRequiredPort { .. }));
        assert_eq!(
            err.to_string(),
            "subsystems[ddr]: required input `clock` of `ddr` is not bound"
        );
    }

    #[test]
    fn factory_rejection_points_at_subsystem() {
        let err = assemble(
            r#"
[board]
name = "mini"

[[subsystems]]
name = "ddr"
type = "ram"
[subsystems.params]
size = 0
"#,
        )
        .unwrap_err();
        assert_eq!(err.origin, "subsystems[ddr]");
        assert!(matches!(
            err.error,
            AssembleError::SubsystemConstruction { .. }
        ));
    }

    #[test]
    fn zero_clock_points_at_clock() {
        let err = assemble(
            r#"
[board]
name = "mini"

[[clocks]]
name = "dead"
frequency = 0
"#,
        )
        .unwrap_err();
        assert_eq!(err.origin, "clocks[dead]");
        assert!(matches!(err.error, AssembleError::InvalidFrequency { .. }));
    }
}
