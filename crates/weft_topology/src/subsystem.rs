//! The subsystem capability interface and registered subsystem handles.

use std::fmt;

use crate::graph::PlatformGraph;
use crate::ids::SubsystemId;
use crate::port::{Port, PortDirection, PortSpec};
use weft_common::Ident;

/// A pre-built simulated component that exposes named ports.
///
/// Primitive models and composite assemblies implement this identically, so
/// the code wiring them never depends on how deep a subsystem's own
/// composition goes. Everything beyond the port list is opaque to assembly.
pub trait Subsystem: fmt::Debug + Send + Sync {
    /// Ports this subsystem exposes, in declaration order.
    fn ports(&self) -> &[PortSpec];

    /// The finalized inner topology of a composite subsystem.
    fn inner(&self) -> Option<&PlatformGraph> {
        None
    }
}

/// A subsystem registered under a name in a platform.
#[derive(Debug)]
pub struct SubsystemHandle {
    /// The ID of this subsystem within its graph.
    pub id: SubsystemId,
    /// The instance name.
    pub name: Ident,
    /// The type tag of the factory that built it.
    pub type_tag: Ident,
    ports: Vec<Port>,
    model: Box<dyn Subsystem>,
}

impl SubsystemHandle {
    /// Wraps a constructed subsystem, attaching interned ports to `name`.
    ///
    /// `ports` must be the interned form of `model.ports()`, in the same order.
    pub fn new(
        id: SubsystemId,
        name: Ident,
        type_tag: Ident,
        ports: Vec<Port>,
        model: Box<dyn Subsystem>,
    ) -> Self {
        Self {
            id,
            name,
            type_tag,
            ports,
            model,
        }
    }

    /// All ports in declaration order.
    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Looks up a port by name.
    pub fn port(&self, name: Ident) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Mandatory input ports, in declaration order.
    pub fn required_inputs(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .iter()
            .filter(|p| p.required && p.direction == PortDirection::Input)
    }

    /// The underlying model.
    pub fn model(&self) -> &dyn Subsystem {
        self.model.as_ref()
    }

    /// The inner topology if this subsystem is a composite.
    pub fn inner(&self) -> Option<&PlatformGraph> {
        self.model.inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortKind;
    use weft_common::Interner;

    #[derive(Debug)]
    struct Ram {
        ports: Vec<PortSpec>,
    }

    impl Subsystem for Ram {
        fn ports(&self) -> &[PortSpec] {
            &self.ports
        }
    }

    fn make_handle(interner: &Interner) -> SubsystemHandle {
        let model = Ram {
            ports: vec![
                PortSpec::clock_input(),
                PortSpec::input("input", PortKind::Interconnect),
            ],
        };
        let name = interner.intern("ddr");
        let ports = model
            .ports()
            .iter()
            .map(|spec| Port {
                owner: name,
                name: interner.intern(&spec.name),
                direction: spec.direction,
                kind: spec.kind,
                required: spec.required,
            })
            .collect();
        SubsystemHandle::new(
            SubsystemId::from_raw(0),
            name,
            interner.intern("hyperram"),
            ports,
            Box::new(model),
        )
    }

    #[test]
    fn port_lookup() {
        let interner = Interner::new();
        let handle = make_handle(&interner);
        let clock = handle.port(interner.intern("clock")).unwrap();
        assert_eq!(clock.kind, PortKind::Clock);
        assert!(handle.port(interner.intern("missing")).is_none());
        assert_eq!(handle.ports().len(), 2);
    }

    #[test]
    fn required_inputs_only_mandatory() {
        let interner = Interner::new();
        let handle = make_handle(&interner);
        let required: Vec<_> = handle
            .required_inputs()
            .map(|p| interner.resolve(p.name).to_string())
            .collect();
        assert_eq!(required, vec!["clock"]);
    }

    #[test]
    fn primitive_has_no_inner_graph() {
        let interner = Interner::new();
        let handle = make_handle(&interner);
        assert!(handle.inner().is_none());
        assert_eq!(handle.model().ports().len(), 2);
    }
}
