#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Scout explorer through a sandbox level.

mod level;
mod sandbox;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::{
    level::Level,
    session::{SessionConfig, SessionReport},
};

/// Turn limit used when neither the level nor the command line sets one.
const DEFAULT_MAX_TURNS: u64 = 500;
/// Vision radius used when neither the level nor the command line sets one.
const DEFAULT_VISION_RADIUS: u16 = 2;

/// Runs the Scout explorer on a sandbox level.
#[derive(Debug, Parser)]
#[command(name = "scout", version, about)]
struct Args {
    /// Level file to load (TOML).
    #[arg(value_name = "LEVEL")]
    level: PathBuf,

    /// Maximum number of turns to simulate, overriding the level file.
    #[arg(long, value_name = "N")]
    turns: Option<u64>,

    /// Radius of the square vision window, overriding the level file.
    #[arg(long, value_name = "R")]
    vision: Option<u16>,
}

/// Entry point for the Scout command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let level = Level::load(&args.level)
        .with_context(|| format!("failed to load level {}", args.level.display()))?;
    let config = SessionConfig {
        max_turns: args.turns.or(level.max_turns).unwrap_or(DEFAULT_MAX_TURNS),
        vision_radius: args
            .vision
            .or(level.vision_radius)
            .unwrap_or(DEFAULT_VISION_RADIUS),
    };
    tracing::info!(
        level = %level.name,
        width = level.width,
        height = level.height,
        max_turns = config.max_turns,
        vision_radius = config.vision_radius,
        "level loaded"
    );

    let report = session::run(&level, config);
    print_summary(&level, &report);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_summary(level: &Level, report: &SessionReport) {
    println!("{}: {}", level.name, report.stop);
    println!("  turns      {}", report.turns);
    println!("  stars      {}/{}", report.stars, report.stars_total);
    println!("  cookies    {}", report.cookies);
    println!("  teleports  {}", report.teleports);
    println!("  rejected   {}", report.rejected);
}
