//! Clock sources.

use crate::ids::ClockId;
use crate::port::{Port, PortDirection, PortKind};
use weft_common::{Frequency, Ident, Interner};

/// Name of the single output port every clock source exposes.
pub const CLOCK_OUT_PORT: &str = "out";

/// A named clock signal at a fixed frequency.
///
/// Clock sources are leaf components: they have no inputs and exactly one
/// output, `out`, of kind [`PortKind::Clock`], which may fan out to any number
/// of clock inputs.
#[derive(Debug, Clone)]
pub struct ClockSource {
    /// The ID of this clock within its graph.
    pub id: ClockId,
    /// The clock domain name.
    pub name: Ident,
    /// The clock frequency.
    pub frequency: Frequency,
    out: Port,
}

impl ClockSource {
    /// Creates a clock source, interning its `out` port name.
    pub fn new(id: ClockId, name: Ident, frequency: Frequency, interner: &Interner) -> Self {
        let out = Port {
            owner: name,
            name: interner.intern(CLOCK_OUT_PORT),
            direction: PortDirection::Output,
            kind: PortKind::Clock,
            required: false,
        };
        Self {
            id,
            name,
            frequency,
            out,
        }
    }

    /// The clock's output port.
    pub fn out(&self) -> &Port {
        &self.out
    }

    /// Looks up a port by name; only `out` exists.
    pub fn port(&self, name: Ident) -> Option<&Port> {
        (self.out.name == name).then_some(&self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_exposes_single_output() {
        let interner = Interner::new();
        let name = interner.intern("soc_clock_domain");
        let clock = ClockSource::new(ClockId::from_raw(0), name, Frequency::from_mhz(10), &interner);
        assert_eq!(clock.out().owner, name);
        assert_eq!(clock.out().direction, PortDirection::Output);
        assert_eq!(clock.out().kind, PortKind::Clock);
        assert_eq!(interner.resolve(clock.out().name), "out");
        assert_eq!(clock.frequency.hz(), 10_000_000);
    }

    #[test]
    fn port_lookup_by_name() {
        let interner = Interner::new();
        let name = interner.intern("c0");
        let clock = ClockSource::new(ClockId::from_raw(0), name, Frequency::from_mhz(1), &interner);
        assert!(clock.port(interner.intern("out")).is_some());
        assert!(clock.port(interner.intern("clock")).is_none());
    }
}
