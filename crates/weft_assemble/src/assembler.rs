//! The platform assembler: the phase-ordered builder of a [`PlatformGraph`].
//!
//! Construction proceeds clocks first, then subsystems, then bindings, then
//! finalize. Each phase can be entered only from the one before it (or
//! re-entered by repeating the same kind of call); a call out of order fails
//! with [`AssembleError::PhaseViolation`] and leaves the assembler unchanged.
//! Inside a composite the `self` boundary is registered up front, so its
//! clock domains may be bound to the boundary without further subsystems.

use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};
use weft_common::{Frequency, Ident, InternalError, Interner};
use weft_topology::arena::Arena;
use weft_topology::{
    BindingRegistry, ClockId, ClockSource, ComponentRef, PlatformGraph, Port, PortSpec, Subsystem,
    SubsystemHandle, SubsystemId, CLOCK_OUT_PORT,
};

use crate::composite::{Boundary, BOUNDARY_NAME, BOUNDARY_TYPE};
use crate::engine::ExecutionEngine;
use crate::errors::AssembleError;
use crate::factory::{BuildContext, ConfigDescriptor, FactoryRegistry};
use crate::scope::Scope;

/// The construction phase of an [`Assembler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Nothing added yet.
    Created,
    /// At least one clock domain added.
    Clocked,
    /// At least one subsystem added.
    SubsystemsBuilt,
    /// At least one binding issued.
    Wired,
    /// The graph has been handed out; no further calls are accepted.
    Finalized,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Created => write!(f, "created"),
            Phase::Clocked => write!(f, "clocked"),
            Phase::SubsystemsBuilt => write!(f, "subsystems-built"),
            Phase::Wired => write!(f, "wired"),
            Phase::Finalized => write!(f, "finalized"),
        }
    }
}

/// Sequences clocks, subsystems, and bindings into one consistent graph.
///
/// Names are resolved lazily at [`bind`](Self::bind) time, so a board can be
/// declared top-down while still wiring a child's output back to a sibling.
pub struct Assembler<'f> {
    scope: Scope,
    interner: Arc<Interner>,
    factories: &'f FactoryRegistry,
    phase: Phase,
    clocks: Arena<ClockId, ClockSource>,
    subsystems: Arena<SubsystemId, SubsystemHandle>,
    registry: BindingRegistry,
    names: HashMap<Ident, ComponentRef>,
}

impl<'f> Assembler<'f> {
    /// Creates an assembler with a fresh interner.
    pub fn new(scope: Scope, factories: &'f FactoryRegistry) -> Self {
        Self::with_interner(scope, Arc::new(Interner::new()), factories)
    }

    /// Creates an assembler sharing an existing interner.
    pub fn with_interner(
        scope: Scope,
        interner: Arc<Interner>,
        factories: &'f FactoryRegistry,
    ) -> Self {
        Self {
            scope,
            registry: BindingRegistry::new(Arc::clone(&interner)),
            interner,
            factories,
            phase: Phase::Created,
            clocks: Arena::new(),
            subsystems: Arena::new(),
            names: HashMap::new(),
        }
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The scope this assembler builds in.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// The shared interner.
    pub fn interner(&self) -> &Arc<Interner> {
        &self.interner
    }

    /// Number of bindings issued so far.
    pub fn binding_count(&self) -> usize {
        self.registry.len()
    }

    fn expect_phase(&self, operation: &'static str, allowed: &[Phase]) -> Result<(), AssembleError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(AssembleError::PhaseViolation {
                operation,
                phase: self.phase,
            })
        }
    }

    fn lookup(&self, name: &str) -> Option<ComponentRef> {
        let ident = self.interner.lookup(name)?;
        self.names.get(&ident).copied()
    }

    /// Adds a clock domain.
    ///
    /// Valid only before any subsystem is added.
    pub fn add_clock_domain(
        &mut self,
        name: &str,
        frequency: Frequency,
    ) -> Result<ClockId, AssembleError> {
        self.expect_phase("add_clock_domain", &[Phase::Created, Phase::Clocked])?;
        if self.lookup(name).is_some() {
            return Err(AssembleError::DuplicateClockName {
                name: name.to_string(),
            });
        }
        if frequency.is_zero() {
            return Err(AssembleError::InvalidFrequency {
                clock: name.to_string(),
            });
        }

        let ident = self.interner.intern(name);
        let id = self.clocks.next_id();
        self.clocks
            .alloc(ClockSource::new(id, ident, frequency, &self.interner));
        self.names.insert(ident, ComponentRef::Clock(id));
        self.phase = Phase::Clocked;
        debug!(scope = %self.scope, clock = name, %frequency, "clock domain added");
        Ok(id)
    }

    /// Constructs a subsystem through the factory registered for `type_tag`
    /// and registers it under `name`.
    ///
    /// Valid only before the first binding.
    pub fn add_subsystem(
        &mut self,
        name: &str,
        type_tag: &str,
        config: &ConfigDescriptor,
    ) -> Result<SubsystemId, AssembleError> {
        self.expect_phase(
            "add_subsystem",
            &[Phase::Created, Phase::Clocked, Phase::SubsystemsBuilt],
        )?;
        self.check_subsystem_name(name)?;

        let factory =
            self.factories
                .get(type_tag)
                .ok_or_else(|| AssembleError::UnknownSubsystemType {
                    subsystem: name.to_string(),
                    type_tag: type_tag.to_string(),
                })?;
        let ctx = BuildContext {
            scope: &self.scope,
            interner: &self.interner,
            factories: self.factories,
        };
        let model = factory.construct(&ctx, name, config).map_err(|source| {
            AssembleError::SubsystemConstruction {
                subsystem: name.to_string(),
                type_tag: type_tag.to_string(),
                source,
            }
        })?;

        let id = self.register(name, type_tag, model)?;
        self.phase = Phase::SubsystemsBuilt;
        debug!(scope = %self.scope, subsystem = name, type_tag, "subsystem added");
        Ok(id)
    }

    /// Registers an already constructed subsystem under `name`.
    ///
    /// Follows the same phase and naming rules as
    /// [`add_subsystem`](Self::add_subsystem).
    pub fn add_instance(
        &mut self,
        name: &str,
        type_tag: &str,
        model: Box<dyn Subsystem>,
    ) -> Result<SubsystemId, AssembleError> {
        self.expect_phase(
            "add_instance",
            &[Phase::Created, Phase::Clocked, Phase::SubsystemsBuilt],
        )?;
        self.check_subsystem_name(name)?;
        let id = self.register(name, type_tag, model)?;
        self.phase = Phase::SubsystemsBuilt;
        debug!(scope = %self.scope, subsystem = name, type_tag, "instance added");
        Ok(id)
    }

    /// Registers the `self` component of a composite's inner assembly.
    ///
    /// Does not advance the phase, so the composite may still declare its
    /// own clock domains.
    pub(crate) fn add_boundary(&mut self, exported: &[PortSpec]) -> Result<(), AssembleError> {
        self.expect_phase("add_boundary", &[Phase::Created])?;
        self.check_subsystem_name(BOUNDARY_NAME)?;
        let model = Boundary::mirroring(exported);
        self.register(BOUNDARY_NAME, BOUNDARY_TYPE, Box::new(model))?;
        Ok(())
    }

    fn check_subsystem_name(&self, name: &str) -> Result<(), AssembleError> {
        if self.lookup(name).is_some() {
            return Err(AssembleError::DuplicateSubsystemName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn register(
        &mut self,
        name: &str,
        type_tag: &str,
        model: Box<dyn Subsystem>,
    ) -> Result<SubsystemId, AssembleError> {
        let mut seen = HashSet::new();
        for spec in model.ports() {
            if !seen.insert(spec.name.as_str()) {
                return Err(AssembleError::DuplicatePort {
                    subsystem: name.to_string(),
                    port: spec.name.clone(),
                });
            }
        }

        let ident = self.interner.intern(name);
        let ports = model
            .ports()
            .iter()
            .map(|spec| Port {
                owner: ident,
                name: self.interner.intern(&spec.name),
                direction: spec.direction,
                kind: spec.kind,
                required: spec.required,
            })
            .collect();
        let type_ident = self.interner.intern(type_tag);
        let id = self.subsystems.next_id();
        self.subsystems
            .alloc(SubsystemHandle::new(id, ident, type_ident, ports, model));
        self.names.insert(ident, ComponentRef::Subsystem(id));
        Ok(id)
    }

    fn resolve_port(&self, component: &str, port: &str) -> Result<Port, AssembleError> {
        let found = self
            .lookup(component)
            .ok_or_else(|| AssembleError::UnknownSubsystem {
                name: component.to_string(),
            })?;
        let unknown_port = || AssembleError::UnknownPort {
            component: component.to_string(),
            port: port.to_string(),
        };
        let port_ident = self.interner.lookup(port).ok_or_else(unknown_port)?;
        let dangling = || InternalError::dangling(component);
        let resolved = match found {
            ComponentRef::Clock(id) => self.clocks.get(id).ok_or_else(dangling)?.port(port_ident),
            ComponentRef::Subsystem(id) => {
                self.subsystems.get(id).ok_or_else(dangling)?.port(port_ident)
            }
        };
        resolved.copied().ok_or_else(unknown_port)
    }

    /// Binds `from_component.from_port` to `to_component.to_port`.
    ///
    /// Component and port names are resolved first; the registry then checks
    /// kind, direction, and sink uniqueness. Valid once any subsystem exists,
    /// a composite's `self` boundary included.
    pub fn bind(
        &mut self,
        from_component: &str,
        from_port: &str,
        to_component: &str,
        to_port: &str,
    ) -> Result<(), AssembleError> {
        if self.subsystems.is_empty() || self.phase == Phase::Finalized {
            return Err(AssembleError::PhaseViolation {
                operation: "bind",
                phase: self.phase,
            });
        }
        let from = self.resolve_port(from_component, from_port)?;
        let to = self.resolve_port(to_component, to_port)?;
        self.registry.bind(&from, &to)?;
        self.phase = Phase::Wired;
        debug!(
            scope = %self.scope,
            from_component,
            from_port,
            to_component,
            to_port,
            "bound"
        );
        Ok(())
    }

    /// Binds the `out` port of `clock` to `subsystem.port`.
    pub fn bind_clock(
        &mut self,
        clock: &str,
        subsystem: &str,
        port: &str,
    ) -> Result<(), AssembleError> {
        self.bind(clock, CLOCK_OUT_PORT, subsystem, port)
    }

    /// Checks every mandatory input and produces the platform graph.
    ///
    /// Fails with [`AssembleError::UnboundRequiredPort`] for the first unbound
    /// mandatory input in declaration order; the assembler is then left as it
    /// was. On success the assembler is `Finalized` and empty.
    pub fn finalize(&mut self) -> Result<PlatformGraph, AssembleError> {
        self.expect_phase(
            "finalize",
            &[
                Phase::Created,
                Phase::Clocked,
                Phase::SubsystemsBuilt,
                Phase::Wired,
            ],
        )?;
        for sub in self.subsystems.values() {
            if let Some(port) = sub
                .required_inputs()
                .find(|p| self.registry.resolve(p.address()).is_none())
            {
                return Err(AssembleError::UnboundRequiredPort {
                    subsystem: self.interner.resolve(sub.name).to_string(),
                    port: self.interner.resolve(port.name).to_string(),
                });
            }
        }

        let clocks = std::mem::take(&mut self.clocks);
        let subsystems = std::mem::take(&mut self.subsystems);
        let registry = std::mem::replace(
            &mut self.registry,
            BindingRegistry::new(Arc::clone(&self.interner)),
        );
        self.names.clear();
        self.phase = Phase::Finalized;

        let graph = PlatformGraph::from_parts(
            Arc::clone(&self.interner),
            self.scope.path(),
            clocks,
            subsystems,
            registry,
        );
        info!(
            scope = %self.scope,
            clocks = graph.clock_count(),
            subsystems = graph.subsystem_count(),
            bindings = graph.binding_count(),
            fingerprint = %graph.fingerprint().short(),
            "platform finalized"
        );
        Ok(graph)
    }

    /// Finalizes and hands the graph to `engine` in one step.
    ///
    /// The engine receives a shared handle; the same handle is returned.
    pub fn finalize_into<E: ExecutionEngine + ?Sized>(
        &mut self,
        engine: &mut E,
    ) -> Result<Arc<PlatformGraph>, AssembleError> {
        let graph = Arc::new(self.finalize()?);
        engine.attach(Arc::clone(&graph));
        Ok(graph)
    }
}

impl fmt::Debug for Assembler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Assembler")
            .field("scope", &self.scope.path())
            .field("phase", &self.phase)
            .field("clocks", &self.clocks.len())
            .field("subsystems", &self.subsystems.len())
            .field("bindings", &self.registry.len())
            .finish()
    }
}
