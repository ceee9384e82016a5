//! The host compute domain.
//!
//! A composite of one application core (`cpu`) and the platform control
//! registers (`pcrs`). The core's data port fans out to the registers and to
//! both exported interconnect outputs; the cluster's DMA interrupt lands on
//! the core.

use tracing::debug;
use weft_assemble::{
    BuildContext, Composite, ConfigDescriptor, FactoryError, SubsystemFactory, BOUNDARY_NAME,
};
use weft_topology::{PortKind, PortSpec, Subsystem};

use crate::params::integer_in;
use crate::pcrs::DEFAULT_PCRS_BASE;
use crate::processor::DEFAULT_ISA;

/// Ports the host domain exports.
pub fn host_ports() -> Vec<PortSpec> {
    vec![
        PortSpec::clock_input(),
        PortSpec::output("to_cluster", PortKind::Interconnect),
        PortSpec::input("cluster_in", PortKind::Interconnect),
        PortSpec::input("cluster_dma_irq", PortKind::Interrupt),
        PortSpec::output("system_axi", PortKind::Interconnect),
    ]
}

/// Builds host domains; `pcrs_base` places the control registers.
pub struct HostFactory;

impl SubsystemFactory for HostFactory {
    fn type_tag(&self) -> &str {
        "host"
    }

    fn construct(
        &self,
        ctx: &BuildContext<'_>,
        name: &str,
        config: &ConfigDescriptor,
    ) -> Result<Box<dyn Subsystem>, FactoryError> {
        let pcrs_base = integer_in(config, "pcrs_base", DEFAULT_PCRS_BASE as i64, 0..=i64::MAX)?;
        debug!(scope = %ctx.scope, host = name, pcrs_base, "assembling host domain");

        let host = Composite::assemble(ctx, name, host_ports(), |asm| {
            asm.add_subsystem(
                "cpu",
                "core",
                &ConfigDescriptor::empty().with("isa", DEFAULT_ISA),
            )?;
            asm.add_subsystem("pcrs", "pcrs", &ConfigDescriptor::empty().with("base", pcrs_base))?;

            asm.bind(BOUNDARY_NAME, "clock", "cpu", "clock")?;
            asm.bind(BOUNDARY_NAME, "clock", "pcrs", "clock")?;
            asm.bind("cpu", "data", "pcrs", "input")?;
            asm.bind("cpu", "data", BOUNDARY_NAME, "to_cluster")?;
            asm.bind("cpu", "data", BOUNDARY_NAME, "system_axi")?;
            asm.bind(BOUNDARY_NAME, "cluster_dma_irq", "cpu", "irq")
        })?;
        Ok(Box::new(host))
    }
}
