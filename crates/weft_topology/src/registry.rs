//! The binding registry: validated, write-once directed connections.
//!
//! Every input port can be fed by at most one binding; an output port may
//! drive any number. The registry has no removal operation, so a sink that is
//! bound stays bound for the lifetime of the platform.

use std::collections::HashMap;
use std::sync::Arc;

use crate::arena::Arena;
use crate::ids::BindingId;
use crate::port::{Port, PortDirection, PortKind, PortRef};
use weft_common::Interner;

/// A directed connection from an output port to an input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    /// The ID of this binding, in wiring order.
    pub id: BindingId,
    /// The driving output port.
    pub from: PortRef,
    /// The driven input port.
    pub to: PortRef,
    /// The shared kind of both ports.
    pub kind: PortKind,
}

/// Errors raised when a binding violates port compatibility.
///
/// Endpoints are rendered as `component.port`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The two ports carry different kinds of signal.
    #[error("cannot bind {from} ({from_kind}) to {to} ({to_kind}): port kinds differ")]
    IncompatiblePortKind {
        /// The driving endpoint.
        from: String,
        /// Kind of the driving port.
        from_kind: PortKind,
        /// The driven endpoint.
        to: String,
        /// Kind of the driven port.
        to_kind: PortKind,
    },

    /// A port is used against its direction.
    #[error("{port} is an {actual} port and cannot be used as the {role} of a binding")]
    InvalidDirection {
        /// The offending endpoint.
        port: String,
        /// Its declared direction.
        actual: PortDirection,
        /// `"source"` or `"sink"`.
        role: &'static str,
    },

    /// The sink is already fed by another binding.
    #[error("{to} is already bound from {existing}; cannot also bind it from {from}")]
    DuplicateBinding {
        /// The driven endpoint.
        to: String,
        /// The endpoint already feeding it.
        existing: String,
        /// The endpoint in the rejected call.
        from: String,
    },
}

/// Records directed bindings and validates them at bind time.
#[derive(Debug)]
pub struct BindingRegistry {
    interner: Arc<Interner>,
    bindings: Arena<BindingId, Binding>,
    by_sink: HashMap<PortRef, BindingId>,
}

impl BindingRegistry {
    /// Creates an empty registry resolving names through `interner`.
    pub fn new(interner: Arc<Interner>) -> Self {
        Self {
            interner,
            bindings: Arena::new(),
            by_sink: HashMap::new(),
        }
    }

    /// Validates and records a binding from `from` to `to`.
    ///
    /// Checks, in order: matching kinds, an output driving an input, and a
    /// sink not already bound. A rejected call leaves the registry untouched.
    pub fn bind(&mut self, from: &Port, to: &Port) -> Result<(), BindError> {
        if from.kind != to.kind {
            return Err(BindError::IncompatiblePortKind {
                from: self.endpoint(from.address()),
                from_kind: from.kind,
                to: self.endpoint(to.address()),
                to_kind: to.kind,
            });
        }
        if from.direction != PortDirection::Output {
            return Err(BindError::InvalidDirection {
                port: self.endpoint(from.address()),
                actual: from.direction,
                role: "source",
            });
        }
        if to.direction != PortDirection::Input {
            return Err(BindError::InvalidDirection {
                port: self.endpoint(to.address()),
                actual: to.direction,
                role: "sink",
            });
        }
        if let Some(existing) = self.resolve(to.address()) {
            return Err(BindError::DuplicateBinding {
                to: self.endpoint(to.address()),
                existing: self.endpoint(existing.from),
                from: self.endpoint(from.address()),
            });
        }

        let id = self.bindings.next_id();
        self.bindings.alloc(Binding {
            id,
            from: from.address(),
            to: to.address(),
            kind: from.kind,
        });
        self.by_sink.insert(to.address(), id);
        Ok(())
    }

    /// Returns the binding feeding `sink`, or `None` if it is not bound.
    pub fn resolve(&self, sink: PortRef) -> Option<&Binding> {
        self.by_sink.get(&sink).map(|id| &self.bindings[*id])
    }

    /// All bindings driven by `source`, in wiring order.
    pub fn fanout(&self, source: PortRef) -> impl Iterator<Item = &Binding> {
        self.bindings.values().filter(move |b| b.from == source)
    }

    /// All bindings in wiring order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.values()
    }

    /// Returns the number of recorded bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Renders a port address as `component.port`.
    pub fn endpoint(&self, port: PortRef) -> String {
        format!(
            "{}.{}",
            self.interner.resolve(port.component),
            self.interner.resolve(port.port)
        )
    }
}
