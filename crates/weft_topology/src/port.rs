//! Port descriptors: the attachment points subsystems expose.
//!
//! A subsystem declares [`PortSpec`]s with plain string names. When the
//! subsystem is registered, each spec becomes a [`Port`] whose names are
//! interned and whose owner is the registered component.

use serde::{Deserialize, Serialize};
use std::fmt;
use weft_common::Ident;

/// The direction of a port on a component boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    /// The port receives a signal; it can be the sink of one binding.
    Input,
    /// The port produces a signal; it can drive any number of bindings.
    Output,
}

impl PortDirection {
    /// Returns the direction seen from the other side of a boundary.
    pub fn flipped(self) -> Self {
        match self {
            PortDirection::Input => PortDirection::Output,
            PortDirection::Output => PortDirection::Input,
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Input => write!(f, "input"),
            PortDirection::Output => write!(f, "output"),
        }
    }
}

/// What travels through a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    /// A clock signal.
    Clock,
    /// Memory-mapped requests over an interconnect.
    Interconnect,
    /// An interrupt line.
    Interrupt,
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortKind::Clock => write!(f, "clock"),
            PortKind::Interconnect => write!(f, "interconnect"),
            PortKind::Interrupt => write!(f, "interrupt"),
        }
    }
}

/// A port as declared by a subsystem implementation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// Port name, unique within the subsystem.
    pub name: String,
    /// Signal direction.
    pub direction: PortDirection,
    /// Signal kind.
    pub kind: PortKind,
    /// Whether the platform is invalid while this input is unbound.
    #[serde(default)]
    pub required: bool,
}

impl PortSpec {
    /// A mandatory input port.
    pub fn required_input(name: &str, kind: PortKind) -> Self {
        Self {
            name: name.to_string(),
            direction: PortDirection::Input,
            kind,
            required: true,
        }
    }

    /// An input port that may stay unbound.
    pub fn input(name: &str, kind: PortKind) -> Self {
        Self {
            name: name.to_string(),
            direction: PortDirection::Input,
            kind,
            required: false,
        }
    }

    /// An output port.
    pub fn output(name: &str, kind: PortKind) -> Self {
        Self {
            name: name.to_string(),
            direction: PortDirection::Output,
            kind,
            required: false,
        }
    }

    /// The conventional mandatory clock input named `clock`.
    pub fn clock_input() -> Self {
        Self::required_input("clock", PortKind::Clock)
    }
}

/// A port attached to a registered component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Port {
    /// The clock or subsystem owning this port.
    pub owner: Ident,
    /// The port name.
    pub name: Ident,
    /// Signal direction.
    pub direction: PortDirection,
    /// Signal kind.
    pub kind: PortKind,
    /// Whether the platform is invalid while this input is unbound.
    pub required: bool,
}

impl Port {
    /// Returns the `(owner, name)` address of this port.
    pub fn address(&self) -> PortRef {
        PortRef {
            component: self.owner,
            port: self.name,
        }
    }
}

/// The address of a port: component name plus port name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PortRef {
    /// Clock or subsystem name.
    pub component: Ident,
    /// Port name on that component.
    pub port: Ident,
}
