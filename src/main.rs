//! Code Asteroids entry point
//!
//! Loads settings, then runs a session driven by the built-in autopilot and
//! the headless renderer until the pilot quits or the frame limit is hit.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use code_asteroids::Settings;
use code_asteroids::platform::{Autopilot, ManualClock, SystemClock};
use code_asteroids::renderer::HeadlessRenderer;
use code_asteroids::runner::{Session, SessionSummary};

/// Shoot drifting blocks of code before they hit your ship
#[derive(Parser, Debug)]
#[command(name = "code-asteroids", version, about)]
struct Args {
    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed (overrides the settings file)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many frames
    #[arg(long)]
    max_frames: Option<u64>,

    /// Games the autopilot plays before quitting
    #[arg(long, default_value_t = 1)]
    games: u32,

    /// Advance a simulated clock one frame per tick instead of sleeping
    #[arg(long)]
    unpaced: bool,

    /// Print the final session summary as JSON
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let seed = args
        .seed
        .or(settings.seed)
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    log::info!("Code Asteroids starting (seed {})", seed);

    let pilot = Autopilot::new(args.games);
    let renderer = HeadlessRenderer::new();
    let summary = if args.unpaced {
        Session::new(&settings, seed, ManualClock::new(0), pilot, renderer).run(args.max_frames)
    } else {
        Session::new(&settings, seed, SystemClock::new(), pilot, renderer)
            .paced(settings.target_fps)
            .run(args.max_frames)
    };

    if args.summary {
        print_summary(&summary)?;
    }
    Ok(())
}

fn print_summary(summary: &SessionSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary).context("failed to serialize summary")?;
    println!("{}", json);
    Ok(())
}
