//! Processing cores.

use tracing::debug;
use weft_assemble::{BuildContext, ConfigDescriptor, FactoryError, SubsystemFactory};
use weft_topology::{PortKind, PortSpec, Subsystem};

use crate::params::string_or;

/// ISA of a core when none is given.
pub const DEFAULT_ISA: &str = "rv64imafdc";

/// A single processing core: a clock, a data master port, an interrupt line.
#[derive(Debug)]
pub struct Core {
    isa: String,
    ports: Vec<PortSpec>,
}

impl Core {
    /// Creates a core implementing `isa`.
    pub fn new(isa: impl Into<String>) -> Self {
        Self {
            isa: isa.into(),
            ports: vec![
                PortSpec::clock_input(),
                PortSpec::output("data", PortKind::Interconnect),
                PortSpec::input("irq", PortKind::Interrupt),
            ],
        }
    }

    /// The instruction set string, e.g. `rv64imafdc`.
    pub fn isa(&self) -> &str {
        &self.isa
    }
}

impl Subsystem for Core {
    fn ports(&self) -> &[PortSpec] {
        &self.ports
    }
}

/// Builds [`Core`]s from an optional `isa` parameter.
pub struct CoreFactory;

impl SubsystemFactory for CoreFactory {
    fn type_tag(&self) -> &str {
        "core"
    }

    fn construct(
        &self,
        ctx: &BuildContext<'_>,
        name: &str,
        config: &ConfigDescriptor,
    ) -> Result<Box<dyn Subsystem>, FactoryError> {
        let isa = string_or(config, "isa", DEFAULT_ISA)?;
        if !(isa.starts_with("rv32") || isa.starts_with("rv64")) {
            return Err(FactoryError::invalid(
                "isa",
                format!("expected an rv32 or rv64 ISA string, got `{isa}`"),
            ));
        }
        debug!(scope = %ctx.scope, core = name, isa = %isa, "core built");
        Ok(Box::new(Core::new(isa)))
    }
}
