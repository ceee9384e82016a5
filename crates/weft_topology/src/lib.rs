//! Typed board topology: ports, clock sources, subsystem handles, bindings.
//!
//! This crate holds the vocabulary every other Weft crate speaks. A
//! [`Subsystem`] declares [`PortSpec`]s; once registered under a name it
//! becomes a [`SubsystemHandle`] with interned [`Port`]s. The
//! [`BindingRegistry`] validates and records directed connections, and a
//! finalized [`PlatformGraph`] bundles clocks, subsystems, and bindings for an
//! execution engine to read.

#![warn(missing_docs)]

pub mod arena;
pub mod clock;
pub mod graph;
pub mod ids;
pub mod port;
pub mod registry;
pub mod subsystem;

pub use clock::{ClockSource, CLOCK_OUT_PORT};
pub use graph::{
    BindingSummary, ClockSummary, ComponentRef, GraphSummary, PlatformGraph, SubsystemSummary,
};
pub use ids::{BindingId, ClockId, SubsystemId};
pub use port::{Port, PortDirection, PortKind, PortRef, PortSpec};
pub use registry::{BindError, Binding, BindingRegistry};
pub use subsystem::{Subsystem, SubsystemHandle};
