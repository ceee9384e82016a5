//! Built-in subsystem models.
//!
//! Primitive models ([`Core`], [`Pcrs`], [`HyperRam`], [`Generic`]) only
//! declare ports. The host and cluster domains are composites that assemble
//! their internals from the primitives through the same factory registry.

#![warn(missing_docs)]

pub mod cluster;
pub mod generic;
pub mod host;
pub mod hyperram;
mod params;
pub mod pcrs;
pub mod processor;

pub use cluster::{cluster_ports, ClusterFactory};
pub use generic::{Generic, GenericFactory};
pub use host::{host_ports, HostFactory};
pub use hyperram::{HyperRam, HyperRamFactory};
pub use pcrs::{Pcrs, PcrsFactory};
pub use processor::{Core, CoreFactory};

use weft_assemble::FactoryRegistry;

/// A registry holding every built-in factory.
pub fn default_factories() -> FactoryRegistry {
    let mut registry = FactoryRegistry::new();
    registry
        .register(Box::new(HostFactory))
        .register(Box::new(ClusterFactory))
        .register(Box::new(HyperRamFactory))
        .register(Box::new(CoreFactory))
        .register(Box::new(PcrsFactory))
        .register(Box::new(GenericFactory));
    registry
}
