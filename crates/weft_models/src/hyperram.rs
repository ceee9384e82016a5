//! HyperRAM memory devices.

use tracing::debug;
use weft_assemble::{BuildContext, ConfigDescriptor, FactoryError, SubsystemFactory};
use weft_topology::{PortKind, PortSpec, Subsystem};

use crate::params::integer_in;

/// Capacity of a HyperRAM when no `size` is given: 8 MiB.
pub const DEFAULT_SIZE: u64 = 8 << 20;

/// An external memory device with a single interconnect slave port.
#[derive(Debug)]
pub struct HyperRam {
    size: u64,
    ports: Vec<PortSpec>,
}

impl HyperRam {
    /// Creates a device of `size` bytes.
    pub fn new(size: u64) -> Self {
        Self {
            size,
            ports: vec![
                PortSpec::clock_input(),
                PortSpec::input("input", PortKind::Interconnect),
            ],
        }
    }

    /// Capacity in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Subsystem for HyperRam {
    fn ports(&self) -> &[PortSpec] {
        &self.ports
    }
}

/// Builds [`HyperRam`] devices; `size` must be positive.
pub struct HyperRamFactory;

impl SubsystemFactory for HyperRamFactory {
    fn type_tag(&self) -> &str {
        "hyperram"
    }

    fn construct(
        &self,
        ctx: &BuildContext<'_>,
        name: &str,
        config: &ConfigDescriptor,
    ) -> Result<Box<dyn Subsystem>, FactoryError> {
        let size = integer_in(config, "size", DEFAULT_SIZE as i64, 1..=i64::MAX)? as u64;
        debug!(scope = %ctx.scope, memory = name, size, "hyperram built");
        Ok(Box::new(HyperRam::new(size)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_factories;
    use weft_assemble::{AssembleError, Assembler, Scope};

    #[test]
    fn default_size_is_8_mib() {
        assert_eq!(DEFAULT_SIZE, 8_388_608);
        assert_eq!(HyperRam::new(DEFAULT_SIZE).ports().len(), 2);
    }

    #[test]
    fn zero_size_rejected() {
        let factories = default_factories();
        let mut asm = Assembler::new(Scope::root("b"), &factories);
        let err = asm
            .add_subsystem("ddr", "hyperram", &ConfigDescriptor::empty().with("size", 0))
            .unwrap_err();
        let AssembleError::SubsystemConstruction { source, .. } = err else {
            panic!("expected a construction error");
        };
        assert!(matches!(source, FactoryError::InvalidParam { ref param, .. } if param == "size"));
    }
}
