//! `weft check` — assemble a board and report diagnostics.
//!
//! 1. Locate `board.toml`
//! 2. Load it and apply the requested variant
//! 3. Assemble with the built-in factories
//! 4. Collect warnings on the finalized graph
//! 5. Render diagnostics

use tracing::info;
use weft_diagnostics::{DiagnosticSink, Severity};

use crate::pipeline::{assemble, board_label, render_diagnostics, resolve_board_file};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `weft check` command.
///
/// Returns exit code 0 if the board assembles, 1 if there are errors.
/// Warnings never fail the check.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let board_file = resolve_board_file(global)?;

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Checking {}", board_file.display());
    }

    let sink = DiagnosticSink::new();
    let assembled = assemble(&board_file, args.variant.as_deref(), &sink);

    if let Some(assembled) = &assembled {
        info!(
            board = %board_label(&assembled.board),
            clocks = assembled.graph.clock_count(),
            subsystems = assembled.graph.subsystem_count(),
            bindings = assembled.graph.binding_count(),
            "board assembled"
        );
    }

    let diagnostics = sink.diagnostics();
    render_diagnostics(&diagnostics, args.format, global, &board_file);

    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();

    if !global.quiet && args.format == ReportFormat::Text {
        if let Some(assembled) = &assembled {
            eprintln!(
                "   Assembled {}: {} clock(s), {} subsystem(s), {} binding(s)",
                board_label(&assembled.board),
                assembled.graph.clock_count(),
                assembled.graph.subsystem_count(),
                assembled.graph.binding_count()
            );
        }
        eprintln!("   Result: {error_count} error(s), {warning_count} warning(s)");
    }

    if sink.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}
