//! Shared pipeline helpers for CLI commands.
//!
//! Locates the board description, loads and resolves it, assembles it with
//! the built-in factories, and renders the resulting diagnostics.

use std::path::{Path, PathBuf};

use tracing::debug;
use weft_assemble::{assemble_board, config_diagnostic, report_warnings, Scope};
use weft_config::{load_board_file, resolve_variant, ResolvedBoard, BOARD_FILE};
use weft_diagnostics::{
    Diagnostic, DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer,
};
use weft_models::default_factories;
use weft_topology::PlatformGraph;

use crate::{GlobalArgs, ReportFormat};

/// A successfully assembled board.
pub struct Assembled {
    /// The board description with the variant applied.
    pub board: ResolvedBoard,
    /// The finalized platform.
    pub graph: PlatformGraph,
}

/// Walks up from `start` looking for the nearest directory containing `board.toml`.
pub fn find_board_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(BOARD_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {BOARD_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the board file from global CLI args.
///
/// `--board` may name the file itself or its directory. Without it, the
/// current directory and its parents are searched.
pub fn resolve_board_file(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    match &global.board {
        Some(path) => {
            let p = PathBuf::from(path);
            if p.is_dir() {
                Ok(p.join(BOARD_FILE))
            } else {
                Ok(p)
            }
        }
        None => Ok(find_board_root(&std::env::current_dir()?)?.join(BOARD_FILE)),
    }
}

/// Loads, resolves, and assembles the board at `path`, then reports warnings.
///
/// Every problem is emitted into `sink`; `None` means at least one error was
/// emitted and there is no graph.
pub fn assemble(path: &Path, variant: Option<&str>, sink: &DiagnosticSink) -> Option<Assembled> {
    debug!(board = %path.display(), variant, "loading board");
    let config = match load_board_file(path) {
        Ok(config) => config,
        Err(e) => {
            sink.emit(config_diagnostic(&e));
            return None;
        }
    };
    let board = match resolve_variant(&config, variant) {
        Ok(board) => board,
        Err(e) => {
            sink.emit(config_diagnostic(&e));
            return None;
        }
    };

    let factories = default_factories();
    match assemble_board(&board, &factories, Scope::root(&board.name)) {
        Ok(graph) => {
            report_warnings(&graph, sink);
            Some(Assembled { board, graph })
        }
        Err(e) => {
            sink.emit(e.to_diagnostic());
            None
        }
    }
}

/// Prints diagnostics in the requested format.
///
/// Text goes to stderr; JSON goes to stdout so it can be piped.
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    format: ReportFormat,
    global: &GlobalArgs,
    file: &Path,
) {
    match format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(global.color).with_file(file.display().to_string());
            for diag in diagnostics {
                if global.quiet && diag.severity != Severity::Error {
                    continue;
                }
                eprintln!("{}", renderer.render(diag));
            }
        }
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(diagnostics).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Returns the display name of the board and variant, e.g. `carfield (fast)`.
pub fn board_label(board: &ResolvedBoard) -> String {
    match &board.variant {
        Some(v) => format!("{} ({v})", board.name),
        None => board.name.clone(),
    }
}
