pub mod app;
pub mod components;
pub mod config;
pub mod constants;
pub mod events;
pub mod map;
pub mod resources;
pub mod systems;

pub use app::build_app;
pub use config::{export_layout, init_tracing, load_arena_config};

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::{
    constants::{MAX_TICK_RATE, SERVER_LOOP_FREQUENCY},
    resources::{ArenaPresets, WaveSchedule},
};
use common::ArenaGenerator;

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about = "Arena server", long_about = None)]
pub struct Args {
    /// Index of the preset to generate first
    #[arg(short, long, default_value_t = 0)]
    pub preset: usize,

    /// JSON file with generator settings, presets and waves
    #[arg(long)]
    pub presets: Option<PathBuf>,

    /// Override the selected preset's seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write the generated layout to this file (.json or .bin)
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Generate the selected preset and exit
    #[arg(long, default_value_t = false)]
    pub once: bool,

    /// Server ticks per second
    #[arg(long, default_value_t = SERVER_LOOP_FREQUENCY)]
    pub tick_rate: u64,
}

// ============================================================================
// Main Server Loop
// ============================================================================

// Period of one server tick
pub fn tick_duration(tick_rate: u64) -> Result<Duration> {
    if !(1..=MAX_TICK_RATE).contains(&tick_rate) {
        bail!("tick rate {tick_rate} must be within 1..={MAX_TICK_RATE}");
    }
    Ok(Duration::from_nanos(1_000_000_000 / tick_rate))
}

pub async fn run_server() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let tick_duration = tick_duration(args.tick_rate)?;

    let config = load_arena_config(args.presets.as_deref())?;
    let mut presets = config.presets;
    let preset_count = presets.len();
    let selected = presets
        .get_mut(args.preset)
        .with_context(|| format!("preset {} out of range ({preset_count} presets)", args.preset))?;
    if let Some(seed) = args.seed {
        selected.seed = seed;
    }

    let generator = ArenaGenerator::new(config.settings).context("invalid generator settings")?;

    if args.once || args.export.is_some() {
        let layout = generator
            .generate(selected)
            .with_context(|| format!("failed to generate preset {}", selected.name))?;
        info!(
            "generated {} (seed {}): {}/{} obstacles",
            layout.name,
            layout.seed,
            layout.obstacle_count(),
            layout.target_obstacle_count
        );
        if let Some(path) = &args.export {
            export_layout(&layout, path)?;
        }
        if args.once {
            return Ok(());
        }
    }

    let mut app = build_app(
        ArenaPresets::new(generator, presets, args.preset),
        WaveSchedule(config.waves),
    );

    info!("starting ECS server loop at {} Hz...", args.tick_rate);

    // Run the app in a loop manually at the tick rate
    let mut interval = time::interval(tick_duration);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frame: u64 = 0;
    loop {
        interval.tick().await;

        let update_start = Instant::now();
        app.update();
        let update_elapsed = update_start.elapsed();

        if update_elapsed > tick_duration {
            warn!(
                "tick {} took {:.2}ms (exceeded {:.2}ms budget)",
                frame,
                update_elapsed.as_secs_f64() * 1000.0,
                tick_duration.as_secs_f64() * 1000.0
            );
        }

        frame += 1;
    }
}
