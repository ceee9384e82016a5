//! Conformance test helpers for Weft board assembly.
//!
//! Provides shared pipeline functions that run a board description through
//! the full pipeline (load → resolve variant → assemble → warnings) with the
//! built-in factories, and return structured results for assertion in
//! integration tests.

#![warn(missing_docs)]

use std::path::PathBuf;

use weft_assemble::{assemble_board, config_diagnostic, report_warnings, FactoryRegistry, Scope};
use weft_config::{load_board_from_str, resolve_variant};
use weft_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use weft_models::default_factories;
use weft_topology::{PlatformGraph, PortKind, PortSpec, Subsystem};

/// Result of running the full load → assemble → warn pipeline.
pub struct PipelineResult {
    /// The finalized platform, if assembly succeeded.
    pub graph: Option<PlatformGraph>,
    /// All diagnostics emitted during the pipeline.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any errors were emitted.
    pub has_errors: bool,
    /// Number of error-severity diagnostics.
    pub error_count: usize,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
}

impl PipelineResult {
    /// Codes of all diagnostics, in emission order.
    pub fn codes(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.code.to_string()).collect()
    }

    /// The finalized graph; panics if assembly failed.
    pub fn graph(&self) -> &PlatformGraph {
        match &self.graph {
            Some(graph) => graph,
            None => panic!("assembly failed: {:?}", self.codes()),
        }
    }
}

/// Directory holding the shipped board descriptions.
pub fn boards_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("boards")
}

/// Reads `boards/<name>.toml`.
pub fn board_source(name: &str) -> String {
    let path = boards_dir().join(format!("{name}.toml"));
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

/// Runs a shipped board through the full pipeline.
pub fn run_board(name: &str, variant: Option<&str>) -> PipelineResult {
    run_pipeline(&board_source(name), variant)
}

/// Runs board description text through the full pipeline with the built-in
/// factories.
pub fn run_pipeline(source: &str, variant: Option<&str>) -> PipelineResult {
    run_pipeline_with(source, variant, &default_factories())
}

/// Runs board description text through the full pipeline with `factories`.
pub fn run_pipeline_with(
    source: &str,
    variant: Option<&str>,
    factories: &FactoryRegistry,
) -> PipelineResult {
    let sink = DiagnosticSink::new();
    let graph = assemble(source, variant, factories, &sink);
    if let Some(graph) = &graph {
        report_warnings(graph, &sink);
    }

    let diagnostics = sink.take_all();
    let error_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();

    PipelineResult {
        graph,
        has_errors: error_count > 0,
        diagnostics,
        error_count,
        warning_count,
    }
}

fn assemble(
    source: &str,
    variant: Option<&str>,
    factories: &FactoryRegistry,
    sink: &DiagnosticSink,
) -> Option<PlatformGraph> {
    let config = load_board_from_str(source)
        .map_err(|e| sink.emit(config_diagnostic(&e)))
        .ok()?;
    let board = resolve_variant(&config, variant)
        .map_err(|e| sink.emit(config_diagnostic(&e)))
        .ok()?;
    assemble_board(&board, factories, Scope::root(&board.name))
        .map_err(|e| sink.emit(e.to_diagnostic()))
        .ok()
}

/// A subsystem that only declares ports.
#[derive(Debug, Clone)]
pub struct Stub(pub Vec<PortSpec>);

impl Subsystem for Stub {
    fn ports(&self) -> &[PortSpec] {
        &self.0
    }
}

/// A host with a mandatory `clock`, output `to_cluster`, and input
/// `cluster_in`.
pub fn stub_host() -> Box<dyn Subsystem> {
    Box::new(Stub(vec![
        PortSpec::clock_input(),
        PortSpec::output("to_cluster", PortKind::Interconnect),
        PortSpec::input("cluster_in", PortKind::Interconnect),
    ]))
}

/// A cluster with a mandatory `clock` and input `input`.
pub fn stub_cluster() -> Box<dyn Subsystem> {
    Box::new(Stub(vec![
        PortSpec::clock_input(),
        PortSpec::input("input", PortKind::Interconnect),
    ]))
}

