//! Headless replay host.
//!
//! Plays a recorded input script against the simulation core and prints the
//! outcome as JSON.
//!
//! Usage:
//!   stompline-replay crates/stompline-replay/replays/level1_dash.json --verbose

mod replay;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use stompline_core::{GameConfig, LevelSet, Simulation};
use tracing::Level;

use crate::replay::ReplayScript;

#[derive(Parser, Debug)]
#[command(name = "stompline-replay")]
#[command(about = "Play a recorded input script and print the outcome as JSON")]
struct Args {
    /// Replay script to play
    replay: PathBuf,
    /// Game configuration; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Level set; the bundled levels are used when omitted
    #[arg(long)]
    levels: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let levels = match &args.levels {
        Some(path) => LevelSet::from_json_str(&read(path)?)
            .with_context(|| format!("invalid level set {}", path.display()))?,
        None => LevelSet::builtin()?,
    };
    let script = ReplayScript::from_json_str(&read(&args.replay)?)
        .with_context(|| format!("invalid replay {}", args.replay.display()))?;

    tracing::info!(
        replay = %args.replay.display(),
        levels = levels.len(),
        frames = script.total_frames(),
        "starting replay"
    );

    let mut sim = Simulation::new(config, levels)?;
    let outcome = replay::run(&mut sim, &script)?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
