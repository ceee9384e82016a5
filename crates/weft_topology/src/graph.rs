//! The finalized platform graph handed to execution engines.
//!
//! A [`PlatformGraph`] is produced exactly once, by a successful finalize, and
//! exposes only read access. Engines receive it behind an `Arc` and may query
//! it from any thread.

use std::collections::HashMap;
use std::sync::Arc;

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::arena::Arena;
use crate::clock::ClockSource;
use crate::ids::{ClockId, SubsystemId};
use crate::port::{Port, PortDirection, PortKind, PortRef, PortSpec};
use crate::registry::{Binding, BindingRegistry};
use crate::subsystem::SubsystemHandle;
use weft_common::{ContentHash, ContentHasher, Ident, Interner};

/// A named component of a platform: either a clock source or a subsystem.
///
/// Clocks and subsystems share one namespace, so a name resolves to at most
/// one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentRef {
    /// A clock source.
    Clock(ClockId),
    /// A subsystem handle.
    Subsystem(SubsystemId),
}

/// The immutable aggregate of clocks, subsystems, and bindings.
#[derive(Debug)]
pub struct PlatformGraph {
    interner: Arc<Interner>,
    scope: String,
    clocks: Arena<ClockId, ClockSource>,
    subsystems: Arena<SubsystemId, SubsystemHandle>,
    bindings: BindingRegistry,
    by_name: HashMap<Ident, ComponentRef>,
}

impl PlatformGraph {
    /// Bundles validated parts into a graph.
    ///
    /// Callers are expected to have already enforced the platform invariants;
    /// the assembler's finalize step is the only producer in this workspace.
    pub fn from_parts(
        interner: Arc<Interner>,
        scope: impl Into<String>,
        clocks: Arena<ClockId, ClockSource>,
        subsystems: Arena<SubsystemId, SubsystemHandle>,
        bindings: BindingRegistry,
    ) -> Self {
        let mut by_name = HashMap::new();
        for (id, clock) in clocks.iter() {
            by_name.insert(clock.name, ComponentRef::Clock(id));
        }
        for (id, sub) in subsystems.iter() {
            by_name.insert(sub.name, ComponentRef::Subsystem(id));
        }
        Self {
            interner,
            scope: scope.into(),
            clocks,
            subsystems,
            bindings,
            by_name,
        }
    }

    /// The hierarchical scope this graph was assembled in, e.g. `carfield/hostd`.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The interner resolving every [`Ident`] in this graph.
    pub fn interner(&self) -> &Arc<Interner> {
        &self.interner
    }

    /// Resolves an interned name.
    pub fn name(&self, ident: Ident) -> &str {
        self.interner.resolve(ident)
    }

    /// Number of clock domains.
    pub fn clock_count(&self) -> usize {
        self.clocks.len()
    }

    /// Number of subsystems.
    pub fn subsystem_count(&self) -> usize {
        self.subsystems.len()
    }

    /// Number of bindings.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Looks up a component by name.
    pub fn component(&self, name: &str) -> Option<ComponentRef> {
        let ident = self.interner.lookup(name)?;
        self.by_name.get(&ident).copied()
    }

    /// Looks up a clock source by name.
    pub fn clock(&self, name: &str) -> Option<&ClockSource> {
        match self.component(name)? {
            ComponentRef::Clock(id) => self.clocks.get(id),
            ComponentRef::Subsystem(_) => None,
        }
    }

    /// Looks up a subsystem by name.
    pub fn subsystem(&self, name: &str) -> Option<&SubsystemHandle> {
        match self.component(name)? {
            ComponentRef::Subsystem(id) => self.subsystems.get(id),
            ComponentRef::Clock(_) => None,
        }
    }

    /// Clock sources in declaration order.
    pub fn clocks(&self) -> impl Iterator<Item = &ClockSource> {
        self.clocks.values()
    }

    /// Subsystems in construction order.
    pub fn subsystems(&self) -> impl Iterator<Item = &SubsystemHandle> {
        self.subsystems.values()
    }

    /// Bindings in wiring order.
    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    /// Looks up a port by `component` and `port` name.
    pub fn port(&self, component: &str, port: &str) -> Option<&Port> {
        let port = self.interner.lookup(port)?;
        match self.component(component)? {
            ComponentRef::Clock(id) => self.clocks.get(id)?.port(port),
            ComponentRef::Subsystem(id) => self.subsystems.get(id)?.port(port),
        }
    }

    /// The binding feeding `sink`, if any.
    pub fn resolve(&self, sink: PortRef) -> Option<&Binding> {
        self.bindings.resolve(sink)
    }

    /// All bindings driven by `source`, in wiring order.
    pub fn fanout(&self, source: PortRef) -> impl Iterator<Item = &Binding> {
        self.bindings.fanout(source)
    }

    /// Renders a port address as `component.port`.
    pub fn endpoint(&self, port: PortRef) -> String {
        self.bindings.endpoint(port)
    }

    /// Optional subsystem inputs that nothing drives, in declaration order.
    pub fn unconnected_inputs(&self) -> Vec<&Port> {
        self.subsystems
            .values()
            .flat_map(|s| s.ports())
            .filter(|p| p.direction == PortDirection::Input && !p.required)
            .filter(|p| self.resolve(p.address()).is_none())
            .collect()
    }

    /// Outputs, of clocks or subsystems, that drive no binding.
    pub fn undriven_outputs(&self) -> Vec<&Port> {
        let clock_outs = self.clocks.values().map(ClockSource::out);
        let sub_outs = self
            .subsystems
            .values()
            .flat_map(|s| s.ports())
            .filter(|p| p.direction == PortDirection::Output);
        clock_outs
            .chain(sub_outs)
            .filter(|p| self.fanout(p.address()).next().is_none())
            .collect()
    }

    /// A deterministic XXH3-128 fingerprint of the topology.
    ///
    /// Covers clock names and frequencies, subsystem names, types, and ports,
    /// the inner graphs of composites, and bindings in order. The scope is
    /// not included, so the same board assembled under another root name
    /// fingerprints identically.
    pub fn fingerprint(&self) -> ContentHash {
        let mut hasher = ContentHasher::new();
        self.hash_into(&mut hasher);
        hasher.finish()
    }

    fn hash_into(&self, hasher: &mut ContentHasher) {
        hasher.write_tag(b'C').write_u64(self.clocks.len() as u64);
        for clock in self.clocks.values() {
            hasher
                .write_str(self.name(clock.name))
                .write_u64(clock.frequency.hz());
        }

        hasher.write_tag(b'S').write_u64(self.subsystems.len() as u64);
        for sub in self.subsystems.values() {
            hasher
                .write_str(self.name(sub.name))
                .write_str(self.name(sub.type_tag))
                .write_u64(sub.ports().len() as u64);
            for port in sub.ports() {
                hasher
                    .write_str(self.name(port.name))
                    .write_tag(direction_tag(port.direction))
                    .write_tag(kind_tag(port.kind))
                    .write_tag(u8::from(port.required));
            }
            match sub.inner() {
                Some(inner) => {
                    hasher.write_tag(1);
                    inner.hash_into(hasher);
                }
                None => {
                    hasher.write_tag(0);
                }
            }
        }

        hasher.write_tag(b'B').write_u64(self.bindings.len() as u64);
        for binding in self.bindings.iter() {
            hasher
                .write_str(&self.endpoint(binding.from))
                .write_str(&self.endpoint(binding.to));
        }
    }

    /// Builds a `petgraph` view: one node per component, one edge per binding.
    ///
    /// Edges are labelled `from_port -> to_port`.
    pub fn to_petgraph(&self) -> DiGraph<String, String> {
        let mut graph = DiGraph::new();
        let mut nodes: HashMap<Ident, NodeIndex> = HashMap::new();
        for clock in self.clocks.values() {
            let label = format!("{} ({})", self.name(clock.name), clock.frequency);
            nodes.insert(clock.name, graph.add_node(label));
        }
        for sub in self.subsystems.values() {
            let label = format!("{}: {}", self.name(sub.name), self.name(sub.type_tag));
            nodes.insert(sub.name, graph.add_node(label));
        }
        for binding in self.bindings.iter() {
            let (Some(&a), Some(&b)) = (
                nodes.get(&binding.from.component),
                nodes.get(&binding.to.component),
            ) else {
                continue;
            };
            let label = format!(
                "{} -> {}",
                self.name(binding.from.port),
                self.name(binding.to.port)
            );
            graph.add_edge(a, b, label);
        }
        graph
    }

    /// Renders the topology as Graphviz DOT.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.to_petgraph()))
    }

    /// A serializable description of the graph, recursing into composites.
    pub fn summary(&self) -> GraphSummary {
        GraphSummary {
            scope: self.scope.clone(),
            fingerprint: self.fingerprint().to_string(),
            clocks: self
                .clocks
                .values()
                .map(|c| ClockSummary {
                    name: self.name(c.name).to_string(),
                    frequency_hz: c.frequency.hz(),
                    frequency: c.frequency.to_string(),
                })
                .collect(),
            subsystems: self
                .subsystems
                .values()
                .map(|s| SubsystemSummary {
                    name: self.name(s.name).to_string(),
                    type_tag: self.name(s.type_tag).to_string(),
                    ports: s.ports().iter().map(|p| self.port_spec(p)).collect(),
                    inner: s.inner().map(|g| Box::new(g.summary())),
                })
                .collect(),
            bindings: self
                .bindings
                .iter()
                .map(|b| BindingSummary {
                    from: self.endpoint(b.from),
                    to: self.endpoint(b.to),
                    kind: b.kind,
                })
                .collect(),
        }
    }

    fn port_spec(&self, port: &Port) -> PortSpec {
        PortSpec {
            name: self.name(port.name).to_string(),
            direction: port.direction,
            kind: port.kind,
            required: port.required,
        }
    }
}

fn direction_tag(direction: PortDirection) -> u8 {
    match direction {
        PortDirection::Input => 0,
        PortDirection::Output => 1,
    }
}

fn kind_tag(kind: PortKind) -> u8 {
    match kind {
        PortKind::Clock => 0,
        PortKind::Interconnect => 1,
        PortKind::Interrupt => 2,
    }
}

/// Serializable form of a [`PlatformGraph`].
#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    /// The assembly scope.
    pub scope: String,
    /// Hex fingerprint of the topology.
    pub fingerprint: String,
    /// Clock domains in declaration order.
    pub clocks: Vec<ClockSummary>,
    /// Subsystems in construction order.
    pub subsystems: Vec<SubsystemSummary>,
    /// Bindings in wiring order.
    pub bindings: Vec<BindingSummary>,
}

/// Serializable form of a clock source.
#[derive(Debug, Clone, Serialize)]
pub struct ClockSummary {
    /// Clock domain name.
    pub name: String,
    /// Frequency in Hz.
    pub frequency_hz: u64,
    /// Frequency with a unit, e.g. `10MHz`.
    pub frequency: String,
}

/// Serializable form of a subsystem handle.
#[derive(Debug, Clone, Serialize)]
pub struct SubsystemSummary {
    /// Instance name.
    pub name: String,
    /// Factory type tag.
    #[serde(rename = "type")]
    pub type_tag: String,
    /// Declared ports.
    pub ports: Vec<PortSpec>,
    /// Inner topology of a composite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<GraphSummary>>,
}

/// Serializable form of a binding.
#[derive(Debug, Clone, Serialize)]
pub struct BindingSummary {
    /// Driving endpoint.
    pub from: String,
    /// Driven endpoint.
    pub to: String,
    /// Shared port kind.
    pub kind: PortKind,
}
