//! Assembly errors and their diagnostic codes.
//!
//! Error codes `E300`--`E312` cover assembly failures (name collisions,
//! unresolved endpoints, incompatible bindings, phase misuse). `E320`--`E324`
//! cover board description errors. Warning codes `W300`--`W301` cover
//! non-fatal findings on a finalized graph.

use weft_common::InternalError;
use weft_config::ConfigError;
use weft_diagnostics::{Diagnostic, DiagnosticCode};
use weft_topology::BindError;

use crate::assembler::Phase;
use crate::factory::FactoryError;

/// Clock name already taken.
pub const E300: DiagnosticCode = DiagnosticCode::error(300);
/// Subsystem name already taken by a clock or subsystem.
pub const E301: DiagnosticCode = DiagnosticCode::error(301);
/// Binding names a component that does not exist.
pub const E302: DiagnosticCode = DiagnosticCode::error(302);
/// Binding names a port the component does not declare.
pub const E303: DiagnosticCode = DiagnosticCode::error(303);
/// Binding between ports of different kinds.
pub const E304: DiagnosticCode = DiagnosticCode::error(304);
/// Binding uses a port against its direction.
pub const E305: DiagnosticCode = DiagnosticCode::error(305);
/// Operation called in the wrong assembly phase.
pub const E306: DiagnosticCode = DiagnosticCode::error(306);
/// Clock declared with a zero frequency.
pub const E307: DiagnosticCode = DiagnosticCode::error(307);
/// Input port fed by more than one binding.
pub const E308: DiagnosticCode = DiagnosticCode::error(308);
/// Mandatory input left unbound at finalize.
pub const E309: DiagnosticCode = DiagnosticCode::error(309);
/// No factory registered for a subsystem type.
pub const E310: DiagnosticCode = DiagnosticCode::error(310);
/// Factory rejected its parameters.
pub const E311: DiagnosticCode = DiagnosticCode::error(311);
/// Factory declared the same port twice.
pub const E312: DiagnosticCode = DiagnosticCode::error(312);

/// Board description could not be read.
pub const E320: DiagnosticCode = DiagnosticCode::error(320);
/// Board description is not valid TOML or has the wrong shape.
pub const E321: DiagnosticCode = DiagnosticCode::error(321);
/// Board description lacks a required field.
pub const E322: DiagnosticCode = DiagnosticCode::error(322);
/// Requested variant does not exist.
pub const E323: DiagnosticCode = DiagnosticCode::error(323);
/// Board description failed validation.
pub const E324: DiagnosticCode = DiagnosticCode::error(324);

/// Internal error.
pub const E399: DiagnosticCode = DiagnosticCode::error(399);

/// Optional input that nothing drives.
pub const W300: DiagnosticCode = DiagnosticCode::warning(300);
/// Output that drives nothing.
pub const W301: DiagnosticCode = DiagnosticCode::warning(301);

/// Errors raised while assembling a platform.
///
/// Every failure is fatal to the assembly attempt.
#[derive(Debug, thiserror::Error)]
pub enum AssembleError {
    /// A clock name collides with an existing clock or subsystem.
    #[error("duplicate clock name `{name}`")]
    DuplicateClockName {
        /// The colliding name.
        name: String,
    },

    /// A subsystem name collides with an existing clock or subsystem.
    #[error("duplicate subsystem name `{name}`")]
    DuplicateSubsystemName {
        /// The colliding name.
        name: String,
    },

    /// A binding names a component that has not been added.
    #[error("unknown subsystem `{name}`")]
    UnknownSubsystem {
        /// The unresolved name.
        name: String,
    },

    /// A binding names a port the component does not declare.
    #[error("`{component}` has no port named `{port}`")]
    UnknownPort {
        /// The component that was found.
        component: String,
        /// The missing port.
        port: String,
    },

    /// The binding registry rejected the connection.
    #[error(transparent)]
    Bind(#[from] BindError),

    /// An operation was called out of phase order.
    #[error("`{operation}` is not allowed in the {phase} phase")]
    PhaseViolation {
        /// The rejected operation.
        operation: &'static str,
        /// The phase the assembler was in.
        phase: Phase,
    },

    /// A clock was declared at 0 Hz.
    #[error("clock `{clock}` has a zero frequency")]
    InvalidFrequency {
        /// The clock name.
        clock: String,
    },

    /// A mandatory input has no binding at finalize.
    #[error("required input `{port}` of `{subsystem}` is not bound")]
    UnboundRequiredPort {
        /// The subsystem owning the port.
        subsystem: String,
        /// The unbound port.
        port: String,
    },

    /// No factory is registered for the subsystem type.
    #[error("unknown subsystem type `{type_tag}` for `{subsystem}`")]
    UnknownSubsystemType {
        /// The instance name.
        subsystem: String,
        /// The unknown type tag.
        type_tag: String,
    },

    /// The factory failed to construct the subsystem.
    #[error("cannot construct `{subsystem}` of type `{type_tag}`: {source}")]
    SubsystemConstruction {
        /// The instance name.
        subsystem: String,
        /// The factory's type tag.
        type_tag: String,
        /// The factory's error.
        #[source]
        source: FactoryError,
    },

    /// The subsystem declares two ports with the same name.
    #[error("`{subsystem}` declares port `{port}` more than once")]
    DuplicatePort {
        /// The instance name.
        subsystem: String,
        /// The repeated port name.
        port: String,
    },

    /// A bug in Weft.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl AssembleError {
    /// The stable diagnostic code for this error.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            AssembleError::DuplicateClockName { .. } => E300,
            AssembleError::DuplicateSubsystemName { .. } => E301,
            AssembleError::UnknownSubsystem { .. } => E302,
            AssembleError::UnknownPort { .. } => E303,
            AssembleError::Bind(BindError::IncompatiblePortKind { .. }) => E304,
            AssembleError::Bind(BindError::InvalidDirection { .. }) => E305,
            AssembleError::Bind(BindError::DuplicateBinding { .. }) => E308,
            AssembleError::PhaseViolation { .. } => E306,
            AssembleError::InvalidFrequency { .. } => E307,
            AssembleError::UnboundRequiredPort { .. } => E309,
            AssembleError::UnknownSubsystemType { .. } => E310,
            AssembleError::SubsystemConstruction { .. } => E311,
            AssembleError::DuplicatePort { .. } => E312,
            AssembleError::Internal(_) => E399,
        }
    }

    /// Converts the error into a diagnostic with help text.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string());
        match self {
            AssembleError::DuplicateClockName { .. }
            | AssembleError::DuplicateSubsystemName { .. } => diag
                .with_note("clocks and subsystems share one namespace")
                .with_help("rename one of the declarations"),
            AssembleError::UnknownSubsystem { .. } => {
                diag.with_help("declare the component before binding to it")
            }
            AssembleError::UnknownPort { .. } => {
                diag.with_help("clocks expose a single port named `out`")
            }
            AssembleError::Bind(BindError::IncompatiblePortKind { .. }) => {
                diag.with_help("bind clocks to clocks, interconnects to interconnects, interrupts to interrupts")
            }
            AssembleError::Bind(BindError::InvalidDirection { .. }) => {
                diag.with_help("`from` must name an output port and `to` an input port")
            }
            AssembleError::Bind(BindError::DuplicateBinding { .. }) => diag
                .with_note("an input port is driven by at most one binding")
                .with_help("remove one of the bindings"),
            AssembleError::PhaseViolation { .. } => {
                diag.with_note("clocks come first, then subsystems, then bindings")
            }
            AssembleError::InvalidFrequency { .. } => {
                diag.with_help("use a positive frequency such as \"10MHz\"")
            }
            AssembleError::UnboundRequiredPort { subsystem, port } => {
                diag.with_help(format!("add a binding whose `to` is `{subsystem}.{port}`"))
            }
            AssembleError::UnknownSubsystemType { .. } => {
                diag.with_help("check the `type` of the subsystem declaration")
            }
            AssembleError::SubsystemConstruction { .. } => {
                diag.with_help("check the subsystem's `params` table")
            }
            AssembleError::DuplicatePort { .. } => diag,
            AssembleError::Internal(_) => {
                diag.with_note("this is a bug in weft, please report it")
            }
        }
    }
}

/// Converts a board description error into a diagnostic.
pub fn config_diagnostic(err: &ConfigError) -> Diagnostic {
    match err {
        ConfigError::IoError(_) => Diagnostic::error(E320, err.to_string())
            .with_help("run `weft init` to create a board description"),
        ConfigError::ParseError(_) => Diagnostic::error(E321, err.to_string()),
        ConfigError::MissingField(_) => Diagnostic::error(E322, err.to_string()),
        ConfigError::UnknownVariant(_) => Diagnostic::error(E323, err.to_string())
            .with_help("variants are declared under `[variants.<name>]`"),
        ConfigError::ValidationError(_) => Diagnostic::error(E324, err.to_string()),
    }
}
