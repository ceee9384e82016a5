//! Weft CLI — the command-line interface for Weft board assembly.
//!
//! Provides `weft init` for scaffolding a board description, `weft check` for
//! assembling a board and reporting diagnostics, and `weft show` for printing
//! the finalized topology.

#![warn(missing_docs)]

mod check;
mod init;
mod pipeline;
mod show;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Weft — typed platform assembly for simulated boards.
#[derive(Parser, Debug)]
#[command(name = "weft", version, about = "Weft board assembler")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a board description file or the directory containing `board.toml`.
    #[arg(long, global = true)]
    pub board: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new board description.
    Init {
        /// Board name (creates a subdirectory). If omitted, initializes in
        /// the current directory.
        name: Option<String>,
    },
    /// Assemble the board and report diagnostics.
    Check(CheckArgs),
    /// Assemble the board and print its topology.
    Show(ShowArgs),
}

/// Arguments for the `weft check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Variant to apply over the base board.
    #[arg(long)]
    pub variant: Option<String>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `weft show` subcommand.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Variant to apply over the base board.
    #[arg(long)]
    pub variant: Option<String>,

    /// Output format for the topology.
    #[arg(short, long, value_enum, default_value_t = ShowFormat::Summary)]
    pub format: ShowFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Topology output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ShowFormat {
    /// An indented tree of clocks, subsystems, and bindings.
    Summary,
    /// The serialized graph summary.
    Json,
    /// Graphviz DOT.
    Dot,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a board file or directory.
    pub board: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => {
            std::env::var_os("NO_COLOR").is_none() && std::env::var_os("TERM").is_some()
        }
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    init_tracing(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        board: cli.board,
    };

    let result = match cli.command {
        Command::Init { name } => init::run(name, &global),
        Command::Check(ref args) => check::run(args, &global),
        Command::Show(ref args) => show::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` enables debug events and
/// `--quiet` keeps only errors.
fn init_tracing(quiet: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(quiet, verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_directive(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "weft=debug,weft_assemble=debug,weft_models=debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_init_default() {
        let cli = Cli::parse_from(["weft", "init"]);
        match cli.command {
            Command::Init { name } => assert!(name.is_none()),
            _ => panic!("expected Init command"),
        }
    }

    #[test]
    fn parse_init_with_name() {
        let cli = Cli::parse_from(["weft", "init", "carfield"]);
        match cli.command {
            Command::Init { name } => assert_eq!(name.as_deref(), Some("carfield")),
            _ => panic!("expected Init command"),
        }
    }

    #[test]
    fn parse_check_default() {
        let cli = Cli::parse_from(["weft", "check"]);
        match cli.command {
            Command::Check(ref args) => {
                assert!(args.variant.is_none());
                assert_eq!(args.format, ReportFormat::Text);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_check_with_args() {
        let cli = Cli::parse_from(["weft", "check", "--variant", "fast", "--format", "json"]);
        match cli.command {
            Command::Check(ref args) => {
                assert_eq!(args.variant.as_deref(), Some("fast"));
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_show_formats() {
        for (flag, expected) in [
            ("summary", ShowFormat::Summary),
            ("json", ShowFormat::Json),
            ("dot", ShowFormat::Dot),
        ] {
            let cli = Cli::parse_from(["weft", "show", "-f", flag]);
            match cli.command {
                Command::Show(ref args) => assert_eq!(args.format, expected),
                _ => panic!("expected Show command"),
            }
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["weft", "--quiet", "--color", "never", "check"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn parse_board_path_after_subcommand() {
        let cli = Cli::parse_from(["weft", "show", "--board", "boards/carfield.toml"]);
        assert_eq!(cli.board.as_deref(), Some("boards/carfield.toml"));
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(Cli::try_parse_from(["weft", "show", "--format", "yaml"]).is_err());
    }

    #[test]
    fn filter_directives() {
        assert_eq!(default_directive(true, true), "error");
        assert!(default_directive(false, true).contains("weft_assemble=debug"));
        assert_eq!(default_directive(false, false), "warn");
    }
}
