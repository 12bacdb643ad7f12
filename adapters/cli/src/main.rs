#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a harbor scenario headlessly.

mod config;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Scenario, session::Session};

#[derive(Parser)]
#[command(name = "harbor")]
#[command(about = "Plays a scripted island-building scenario", version)]
struct Cli {
    /// Scenario file to play; the bundled demo runs when omitted
    scenario: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the harbor command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    fmt().with_env_filter(filter).with_target(false).init();

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::bundled()?,
    };

    let mut session = Session::new(&scenario)?;
    session.run(&scenario.steps);
    let (report, shutdown) = session.finish();
    info!(released = shutdown.released_entities(), "world shut down");

    println!("islands: {}", report.islands);
    println!("water tiles: {}", report.water_tiles);
    println!("buildings confirmed: {}", report.buildings_confirmed);
    println!("placements rejected: {}", report.placements_rejected);
    println!("builds cancelled: {}", report.builds_cancelled);
    println!("transitions rejected: {}", report.transitions_rejected);
    println!("selections: {}", report.selections);
    println!("units moved: {}", report.units_moved);
    println!("move orders refused: {}", report.moves_rejected);
    println!(
        "released: {} entities ({} units, {} land, {} water)",
        shutdown.released_entities(),
        shutdown.units,
        shutdown.land,
        shutdown.water
    );
    Ok(())
}
