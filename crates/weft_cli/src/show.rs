//! `weft show` — assemble a board and print its topology.

use std::fmt::Write;
use std::path::Path;

use weft_diagnostics::DiagnosticSink;
use weft_topology::{GraphSummary, PortDirection, SubsystemSummary};

use crate::pipeline::{assemble, render_diagnostics, resolve_board_file};
use crate::{GlobalArgs, ReportFormat, ShowArgs, ShowFormat};

/// Runs the `weft show` command.
///
/// The topology goes to stdout and any warnings go to stderr. If assembly
/// fails, the diagnostics are rendered instead and the exit code is 1.
pub fn run(args: &ShowArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let board_file = resolve_board_file(global)?;
    let sink = DiagnosticSink::new();

    let Some(assembled) = assemble(&board_file, args.variant.as_deref(), &sink) else {
        render_diagnostics(&sink.take_all(), ReportFormat::Text, global, &board_file);
        return Ok(1);
    };

    let output = match args.format {
        ShowFormat::Summary => render_summary(&assembled.graph.summary()),
        ShowFormat::Json => serde_json::to_string_pretty(&assembled.graph.summary())?,
        ShowFormat::Dot => assembled.graph.to_dot(),
    };
    println!("{output}");
    render_warnings(&sink, global, &board_file);

    Ok(0)
}

/// Renders what assembly left in `sink` to stderr and returns how many
/// warnings there were.
fn render_warnings(sink: &DiagnosticSink, global: &GlobalArgs, board_file: &Path) -> usize {
    let warnings = sink.take_all();
    render_diagnostics(&warnings, ReportFormat::Text, global, board_file);
    warnings.len()
}

/// Renders a summary as an indented tree, descending into composites.
pub fn render_summary(summary: &GraphSummary) -> String {
    let mut out = String::new();
    write_summary(&mut out, summary, 0);
    out
}

fn write_summary(out: &mut String, summary: &GraphSummary, depth: usize) {
    let pad = "  ".repeat(depth);
    let _ = writeln!(out, "{pad}{} [{}]", summary.scope, summary.fingerprint);

    for clock in &summary.clocks {
        let _ = writeln!(out, "{pad}  clock {} @ {}", clock.name, clock.frequency);
    }
    for sub in &summary.subsystems {
        let inputs = port_names(sub, PortDirection::Input);
        let outputs = port_names(sub, PortDirection::Output);
        let _ = writeln!(
            out,
            "{pad}  subsystem {}: {} (in: {inputs}; out: {outputs})",
            sub.name, sub.type_tag
        );
        if let Some(inner) = &sub.inner {
            write_summary(out, inner, depth + 2);
        }
    }
    for binding in &summary.bindings {
        let _ = writeln!(
            out,
            "{pad}  bind {} -> {} ({})",
            binding.from, binding.to, binding.kind
        );
    }
}

fn port_names(sub: &SubsystemSummary, direction: PortDirection) -> String {
    let names: Vec<String> = sub
        .ports
        .iter()
        .filter(|p| p.direction == direction)
        .map(|p| {
            if p.required {
                format!("{}!", p.name)
            } else {
                p.name.clone()
            }
        })
        .collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}
