//! Parsing and validation of `board.toml` board descriptions.
//!
//! A board description declares clock domains, subsystems with their opaque
//! parameters, and bindings in the order they are issued. Named variants
//! override clock frequencies and subsystem parameters; [`resolve_variant`]
//! produces the [`ResolvedBoard`] that assembly consumes.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_board, load_board_file, load_board_from_str, BOARD_FILE};
pub use resolve::{resolve_variant, ResolvedBoard};
pub use types::*;
