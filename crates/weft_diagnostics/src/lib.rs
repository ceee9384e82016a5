//! Diagnostic creation, severity management, and rendering.
//!
//! Assembly and configuration failures are turned into structured
//! [`Diagnostic`] messages carrying a stable code, the board declaration they
//! came from, and help text. The thread-safe [`DiagnosticSink`] accumulates
//! them and [`TerminalRenderer`] formats them for humans.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::DiagnosticCode;
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
