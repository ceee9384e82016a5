//! Composite subsystems: subsystems that assemble their own inner platform.
//!
//! Inside a composite, its exported ports are visible as the component
//! `self` with every direction flipped. A boundary input `clock` is an output
//! inside, fanning out to the internal components; a boundary output
//! `to_cluster` is an input inside, driven by one internal output.

use weft_topology::{PlatformGraph, PortSpec, Subsystem};

use crate::assembler::Assembler;
use crate::errors::AssembleError;
use crate::factory::{BuildContext, FactoryError};

/// Name of the boundary component inside a composite.
pub const BOUNDARY_NAME: &str = "self";

/// Type tag of the boundary component.
pub const BOUNDARY_TYPE: &str = "boundary";

/// The inward-facing view of a composite's exported ports.
#[derive(Debug)]
pub(crate) struct Boundary {
    ports: Vec<PortSpec>,
}

impl Boundary {
    /// Mirrors `exported` with flipped directions and nothing required.
    pub(crate) fn mirroring(exported: &[PortSpec]) -> Self {
        let ports = exported
            .iter()
            .map(|p| PortSpec {
                name: p.name.clone(),
                direction: p.direction.flipped(),
                kind: p.kind,
                required: false,
            })
            .collect();
        Self { ports }
    }
}

impl Subsystem for Boundary {
    fn ports(&self) -> &[PortSpec] {
        &self.ports
    }
}

/// A subsystem whose behavior is a finalized inner platform.
#[derive(Debug)]
pub struct Composite {
    ports: Vec<PortSpec>,
    inner: PlatformGraph,
}

impl Composite {
    /// Assembles a composite named `name` exporting `ports`.
    ///
    /// `build` receives a child assembler in scope `<parent>/<name>` that
    /// already holds the `self` boundary; it declares the internals and their
    /// wiring. The child is then finalized with the usual invariants.
    pub fn assemble<F>(
        ctx: &BuildContext<'_>,
        name: &str,
        ports: Vec<PortSpec>,
        build: F,
    ) -> Result<Self, FactoryError>
    where
        F: FnOnce(&mut Assembler<'_>) -> Result<(), AssembleError>,
    {
        let mut child = ctx.nested(name, &ports)?;
        let scope = child.scope().path();
        let inner = build(&mut child)
            .and_then(|()| child.finalize())
            .map_err(|e| FactoryError::Inner {
                scope,
                source: Box::new(e),
            })?;
        Ok(Self { ports, inner })
    }

    /// The finalized inner platform.
    pub fn graph(&self) -> &PlatformGraph {
        &self.inner
    }
}

impl Subsystem for Composite {
    fn ports(&self) -> &[PortSpec] {
        &self.ports
    }

    fn inner(&self) -> Option<&PlatformGraph> {
        Some(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::{ConfigDescriptor, FactoryRegistry, SubsystemFactory};
    use crate::scope::Scope;
    use weft_common::Frequency;
    use weft_topology::{PortDirection, PortKind};

    #[derive(Debug)]
    struct Leaf(Vec<PortSpec>);

    impl Subsystem for Leaf {
        fn ports(&self) -> &[PortSpec] {
            &self.0
        }
    }

    struct CoreFactory;

    impl SubsystemFactory for CoreFactory {
        fn type_tag(&self) -> &str {
            "core"
        }

        fn construct(
            &self,
            _ctx: &BuildContext<'_>,
            _name: &str,
            _config: &ConfigDescriptor,
        ) -> Result<Box<dyn Subsystem>, FactoryError> {
            Ok(Box::new(Leaf(vec![
                PortSpec::clock_input(),
                PortSpec::output("data", PortKind::Interconnect),
            ])))
        }
    }

    /// One core behind a boundary exporting `clock` and `data`.
    struct WrapperFactory {
        wire_clock: bool,
    }

    impl SubsystemFactory for WrapperFactory {
        fn type_tag(&self) -> &str {
            "wrapper"
        }

        fn construct(
            &self,
            ctx: &BuildContext<'_>,
            name: &str,
            _config: &ConfigDescriptor,
        ) -> Result<Box<dyn Subsystem>, FactoryError> {
            let ports = vec![
                PortSpec::clock_input(),
                PortSpec::output("data", PortKind::Interconnect),
            ];
            let wire_clock = self.wire_clock;
            let composite = Composite::assemble(ctx, name, ports, |asm| {
                asm.add_subsystem("cpu", "core", &ConfigDescriptor::empty())?;
                if wire_clock {
                    asm.bind("self", "clock", "cpu", "clock")?;
                }
                asm.bind("cpu", "data", "self", "data")
            })?;
            Ok(Box::new(composite))
        }
    }

    fn factories(wire_clock: bool) -> FactoryRegistry {
        let mut reg = FactoryRegistry::new();
        reg.register(Box::new(CoreFactory))
            .register(Box::new(WrapperFactory { wire_clock }));
        reg
    }

    #[test]
    fn boundary_flips_directions() {
        let b = Boundary::mirroring(&[
            PortSpec::clock_input(),
            PortSpec::output("soc", PortKind::Interconnect),
        ]);
        assert_eq!(b.ports()[0].direction, PortDirection::Output);
        assert!(!b.ports()[0].required);
        assert_eq!(b.ports()[1].direction, PortDirection::Input);
    }

    #[test]
    fn composite_inner_graph_is_nested() {
        let reg = factories(true);
        let mut asm = Assembler::new(Scope::root("board"), &reg);
        asm.add_clock_domain("clk", Frequency::from_mhz(10)).unwrap();
        asm.add_subsystem("wrap", "wrapper", &ConfigDescriptor::empty())
            .unwrap();
        asm.bind_clock("clk", "wrap", "clock").unwrap();
        let graph = asm.finalize().unwrap();

        let wrap = graph.subsystem("wrap").unwrap();
        let inner = wrap.inner().unwrap();
        assert_eq!(inner.scope(), "board/wrap");
        assert_eq!(inner.subsystem_count(), 2);
        assert_eq!(inner.binding_count(), 2);
        assert_eq!(inner.name(inner.subsystem("self").unwrap().type_tag), "boundary");
        // The parent only sees the exported ports.
        assert_eq!(wrap.ports().len(), 2);
    }

    #[test]
    fn inner_failure_is_wrapped_with_scope() {
        let reg = factories(false);
        let mut asm = Assembler::new(Scope::root("board"), &reg);
        let err = asm
            .add_subsystem("wrap", "wrapper", &ConfigDescriptor::empty())
            .unwrap_err();
        let AssembleError::SubsystemConstruction { source, .. } = err else {
            panic!("expected SubsystemConstruction");
        };
        let FactoryError::Inner { scope, source } = source else {
            panic!("expected an inner failure");
        };
        assert_eq!(scope, "board/wrap");
        assert!(matches!(
            *source,
            AssembleError::UnboundRequiredPort { ref subsystem, .. } if subsystem == "cpu"
        ));
    }

    #[test]
    fn self_name_is_reserved_inside() {
        let reg = factories(true);
        let scope = Scope::root("board");
        let interner = std::sync::Arc::new(weft_common::Interner::new());
        let ctx = BuildContext {
            scope: &scope,
            interner: &interner,
            factories: &reg,
        };
        let mut child = ctx.nested("wrap", &[PortSpec::clock_input()]).unwrap();
        assert!(matches!(
            child.add_subsystem("self", "core", &ConfigDescriptor::empty()),
            Err(AssembleError::DuplicateSubsystemName { .. })
        ));
    }
}
