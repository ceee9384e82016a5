//! Platform assembly: turning clocks, subsystems, and bindings into a
//! validated [`PlatformGraph`](weft_topology::PlatformGraph).
//!
//! The [`Assembler`] is the only state machine in Weft. It constructs clock
//! domains, asks [`SubsystemFactory`] implementations for subsystems, issues
//! bindings through the binding registry, and on [`finalize`](Assembler::finalize)
//! checks that every mandatory input is driven. [`assemble_board`] drives it
//! from a `board.toml` description; composites use [`Composite::assemble`] to
//! build their internals in a nested scope.

#![warn(missing_docs)]

pub mod assembler;
pub mod board;
pub mod composite;
pub mod engine;
pub mod errors;
pub mod factory;
pub mod scope;
pub mod warnings;

pub use assembler::{Assembler, Phase};
pub use board::{assemble_board, BoardError};
pub use composite::{Composite, BOUNDARY_NAME, BOUNDARY_TYPE};
pub use engine::ExecutionEngine;
pub use errors::{config_diagnostic, AssembleError};
pub use factory::{BuildContext, ConfigDescriptor, FactoryError, FactoryRegistry, SubsystemFactory};
pub use scope::Scope;
pub use warnings::report_warnings;
