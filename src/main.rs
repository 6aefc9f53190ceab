// ============================================================================
// src/main.rs – CLI entrypoint and exit-code mapping
// ============================================================================

mod cmd;
mod config;
mod error;
mod plan;
mod ui;
mod util;

use anyhow::Result;
use clap::Parser;
use config::Config;
use error::UpdateError;
use plan::Mode;
use std::path::PathBuf;
use ui::{Timing, UX};

/// Update the host and the container rootfs in lockstep with the engine.
#[derive(Debug, Parser)]
#[command(name = "rce-update", version, about)]
struct Cli {
    /// Update sequence to run: all, rce, rootfs or packages
    mode: String,

    /// Alternate settings file (TOML or YAML)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Suppress the banner, notes and pacing
    #[arg(long)]
    quiet: bool,

    /// Print the resolved command plan without executing anything
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    let cli = Cli::parse();
    let ui = UX::new(cli.quiet);
    let timing = Timing::new(cli.quiet);

    if let Err(err) = run(&cli, &ui, &timing) {
        ui.error(&format!("{err:#}"));
        let code = err
            .downcast_ref::<UpdateError>()
            .map(UpdateError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: &Cli, ui: &UX, timing: &Timing) -> Result<()> {
    // Mode is validated before any config or command work happens.
    let mode = cli.mode.parse::<Mode>()?;
    let cfg = Config::load_or_default(cli.config.as_deref())?;

    ui.banner();
    if cli.dry_run {
        cmd::update::print_plan(ui, &cfg, mode);
        return Ok(());
    }
    cmd::update::run_update(ui, timing, &cfg, mode)
}
