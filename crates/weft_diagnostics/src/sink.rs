//! Collecting diagnostics while a board is loaded and assembled.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;

/// Collects diagnostics in emission order.
///
/// Emission takes `&self`, so one sink can be shared by reference (or
/// through an `Arc`) between the steps of a pipeline and across threads.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl DiagnosticSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // A panic mid-push cannot leave the vector half-written.
        self.diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Records `diag`.
    pub fn emit(&self, diag: Diagnostic) {
        self.lock().push(diag);
    }

    /// Records every diagnostic in `diags`, keeping their order.
    pub fn extend(&self, diags: impl IntoIterator<Item = Diagnostic>) {
        self.lock().extend(diags);
    }

    fn count(&self, severity: Severity) -> usize {
        self.lock().iter().filter(|d| d.severity == severity).count()
    }

    /// Returns `true` once any error was recorded.
    pub fn has_errors(&self) -> bool {
        self.lock().iter().any(|d| d.severity.is_error())
    }

    /// Number of errors recorded.
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warnings recorded.
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Removes and returns everything recorded so far.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    /// A copy of everything recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }
}
