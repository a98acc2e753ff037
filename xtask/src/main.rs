//! Workspace build tasks, run with `cargo xtask <command>`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask", about = "scrollscene build tasks")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the debug panel's WASM bundle with trunk.
    BuildUi {
        /// Build without optimizations.
        #[arg(long)]
        debug: bool,
    },
}

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn build_ui(debug: bool) -> Result<()> {
    let ui_dir = workspace_root().join("crates/scrollscene-ui");
    let mut cmd = Command::new("trunk");
    let _ = cmd.arg("build").current_dir(&ui_dir);
    if !debug {
        let _ = cmd.arg("--release");
    }
    let status = cmd
        .status()
        .context("failed to run trunk (install with `cargo install trunk`)")?;
    if !status.success() {
        bail!("trunk build failed with {status}");
    }
    Ok(())
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Task::BuildUi { debug } => build_ui(debug),
    }
}
