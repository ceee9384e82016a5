//! Non-fatal findings on a finalized platform.

use weft_diagnostics::{Diagnostic, DiagnosticSink};
use weft_topology::{ComponentRef, PlatformGraph, Port};

use crate::errors::{W300, W301};

/// Emits `W300` for every optional input nothing drives and `W301` for every
/// output that drives nothing. Only the top level of `graph` is inspected.
///
/// Returns the number of warnings emitted.
pub fn report_warnings(graph: &PlatformGraph, sink: &DiagnosticSink) -> usize {
    let mut count = 0;
    for port in graph.unconnected_inputs() {
        let endpoint = graph.endpoint(port.address());
        sink.emit(
            Diagnostic::warning(W300, format!("optional input `{endpoint}` is not connected"))
                .with_origin(origin(graph, port)),
        );
        count += 1;
    }
    for port in graph.undriven_outputs() {
        let endpoint = graph.endpoint(port.address());
        sink.emit(
            Diagnostic::warning(W301, format!("output `{endpoint}` drives nothing"))
                .with_origin(origin(graph, port))
                .with_help("bind it to an input or leave it open on purpose"),
        );
        count += 1;
    }
    count
}

fn origin(graph: &PlatformGraph, port: &Port) -> String {
    let owner = graph.name(port.owner);
    match graph.component(owner) {
        Some(ComponentRef::Clock(_)) => format!("clocks[{owner}]"),
        _ => format!("subsystems[{owner}]"),
    }
}
