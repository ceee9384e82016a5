//! `weft init` — board scaffolding command.
//!
//! Writes a `board.toml` describing the Carfield platform: a host domain and
//! a parallel-processing cluster on separate clocks, a HyperRAM, and a `fast`
//! variant.

use std::fs;
use std::path::{Path, PathBuf};

use weft_config::BOARD_FILE;

use crate::GlobalArgs;

/// Runs the `weft init` command.
///
/// If `name` is `Some`, creates a new subdirectory with that name.
/// Otherwise initializes in the current working directory.
/// Returns exit code 0 on success.
pub fn run(name: Option<String>, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let board_dir = match &name {
        Some(n) => {
            let dir = PathBuf::from(n);
            if dir.exists() {
                return Err(format!("directory '{n}' already exists").into());
            }
            fs::create_dir_all(&dir)?;
            dir
        }
        None => std::env::current_dir()?,
    };

    let board_file = board_dir.join(BOARD_FILE);
    if board_file.exists() {
        return Err(format!("{} already exists", board_file.display()).into());
    }

    let board_name = board_dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("carfield");

    if !global.quiet {
        eprintln!("  Creating new Weft board `{board_name}`");
    }

    write_board_toml(&board_dir, board_name)?;

    if !global.quiet {
        eprintln!("     Created {}", board_file.display());
    }

    Ok(0)
}

/// Writes the template board description.
fn write_board_toml(root: &Path, name: &str) -> std::io::Result<()> {
    fs::write(root.join(BOARD_FILE), board_template(name))
}

/// The Carfield board description under the given board name.
pub fn board_template(name: &str) -> String {
    format!(
        r#"[board]
name = "{name}"
description = "Carfield: host domain, PULP cluster domain, HyperRAM"

[[clocks]]
name = "soc_clock_domain"
frequency = "10MHz"

[[clocks]]
name = "pulpd_clock_domain"
frequency = "10MHz"

[[subsystems]]
name = "ddr"
type = "hyperram"

[[subsystems]]
name = "pulpd"
type = "cluster"
[subsystems.params]
config_file = "pulp/chips/carfield/pulpd/cluster.json"
cid = 0

[[subsystems]]
name = "hostd"
type = "host"

[[bindings]]
from = "soc_clock_domain.out"
to = "hostd.clock"

[[bindings]]
from = "soc_clock_domain.out"
to = "ddr.clock"

[[bindings]]
from = "pulpd_clock_domain.out"
to = "pulpd.clock"

[[bindings]]
from = "hostd.to_cluster"
to = "pulpd.input"

[[bindings]]
from = "pulpd.soc"
to = "hostd.cluster_in"

[variants.fast]
description = "Both domains at 50MHz with a 16-core cluster"

[variants.fast.clocks]
soc_clock_domain = "50MHz"
pulpd_clock_domain = "50MHz"

[variants.fast.params.pulpd]
nb_pe = 16
"#
    )
}
