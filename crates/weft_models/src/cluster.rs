//! The parallel-processing cluster domain.
//!
//! A composite of `nb_pe` processing elements (`pe0`, `pe1`, ...) and an
//! `l1` scratchpad. Requests entering on the exported `input` port land in
//! the scratchpad; `pe0` masters both exported interconnect outputs.

use tracing::debug;
use weft_assemble::{
    BuildContext, Composite, ConfigDescriptor, FactoryError, SubsystemFactory, BOUNDARY_NAME,
};
use weft_topology::{PortKind, PortSpec, Subsystem};

use crate::params::integer_in;

/// ISA of the cluster's processing elements.
pub const PE_ISA: &str = "rv32imfc";

/// Size of the L1 scratchpad in bytes.
pub const L1_SIZE: i64 = 256 << 10;

/// Ports the cluster domain exports.
pub fn cluster_ports() -> Vec<PortSpec> {
    vec![
        PortSpec::clock_input(),
        PortSpec::input("input", PortKind::Interconnect),
        PortSpec::output("soc", PortKind::Interconnect),
        PortSpec::output("dma_irq", PortKind::Interrupt),
        PortSpec::output("system_axi", PortKind::Interconnect),
    ]
}

/// Builds cluster domains.
///
/// `config_file` names a persisted cluster description and is passed through
/// untouched; `cid` is the cluster index and `nb_pe` the number of processing
/// elements (1 to 32).
pub struct ClusterFactory;

impl SubsystemFactory for ClusterFactory {
    fn type_tag(&self) -> &str {
        "cluster"
    }

    fn construct(
        &self,
        ctx: &BuildContext<'_>,
        name: &str,
        config: &ConfigDescriptor,
    ) -> Result<Box<dyn Subsystem>, FactoryError> {
        let config_file = config.string("config_file")?;
        let cid = integer_in(config, "cid", 0, 0..=i64::from(u16::MAX))?;
        let nb_pe = integer_in(config, "nb_pe", 8, 1..=32)?;
        debug!(
            scope = %ctx.scope,
            cluster = name,
            cid,
            nb_pe,
            config_file = config_file.unwrap_or("<none>"),
            "assembling cluster domain"
        );

        let cluster = Composite::assemble(ctx, name, cluster_ports(), |asm| {
            let pe_config = ConfigDescriptor::empty().with("isa", PE_ISA);
            let pes: Vec<String> = (0..nb_pe).map(|i| format!("pe{i}")).collect();
            for pe in &pes {
                asm.add_subsystem(pe, "core", &pe_config)?;
            }
            asm.add_subsystem("l1", "hyperram", &ConfigDescriptor::empty().with("size", L1_SIZE))?;

            for pe in &pes {
                asm.bind(BOUNDARY_NAME, "clock", pe, "clock")?;
            }
            asm.bind(BOUNDARY_NAME, "clock", "l1", "clock")?;
            asm.bind(BOUNDARY_NAME, "input", "l1", "input")?;
            asm.bind("pe0", "data", BOUNDARY_NAME, "soc")?;
            asm.bind("pe0", "data", BOUNDARY_NAME, "system_axi")
        })?;
        Ok(Box::new(cluster))
    }
}
