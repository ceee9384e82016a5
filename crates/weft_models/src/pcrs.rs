//! Platform control registers.

use weft_assemble::{BuildContext, ConfigDescriptor, FactoryError, SubsystemFactory};
use weft_topology::{PortKind, PortSpec, Subsystem};

use crate::params::integer_in;

/// Base address of the control registers when none is given.
pub const DEFAULT_PCRS_BASE: u64 = 0x2001_0000;

/// A memory-mapped register block answering on one interconnect input.
#[derive(Debug)]
pub struct Pcrs {
    base: u64,
    ports: Vec<PortSpec>,
}

impl Pcrs {
    /// Creates a register block mapped at `base`.
    pub fn new(base: u64) -> Self {
        Self {
            base,
            ports: vec![
                PortSpec::clock_input(),
                PortSpec::input("input", PortKind::Interconnect),
            ],
        }
    }

    /// The mapped base address.
    pub fn base(&self) -> u64 {
        self.base
    }
}

impl Subsystem for Pcrs {
    fn ports(&self) -> &[PortSpec] {
        &self.ports
    }
}

/// Builds [`Pcrs`] blocks from an optional `base` parameter.
pub struct PcrsFactory;

impl SubsystemFactory for PcrsFactory {
    fn type_tag(&self) -> &str {
        "pcrs"
    }

    fn construct(
        &self,
        _ctx: &BuildContext<'_>,
        _name: &str,
        config: &ConfigDescriptor,
    ) -> Result<Box<dyn Subsystem>, FactoryError> {
        let base = integer_in(config, "base", DEFAULT_PCRS_BASE as i64, 0..=i64::MAX)?;
        Ok(Box::new(Pcrs::new(base as u64)))
    }
}
