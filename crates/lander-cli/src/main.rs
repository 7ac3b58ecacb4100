// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `lander-sim`: runs a scripted lunar descent without rendering and logs how
//! it ended.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lander_cli::{frame_dt, run, terrain, Autopilot, FsConfigStore};
use lander_app_core::config::ConfigService;
use lander_physics::{LanderWorld, LandingOutcome, SimConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless lunar lander simulation")]
struct Args {
    /// Directory holding `sim.json` (defaults to the platform config dir)
    #[arg(long)]
    config_dir: Option<PathBuf>,
    /// Write the effective config back to the store before running
    #[arg(long)]
    save_config: bool,
    /// Maximum number of frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u32,
    /// Simulation frame rate; each frame advances by `1 / framerate` seconds
    #[arg(long, default_value_t = 60.0)]
    framerate: f32,
    /// Override the configured random seed
    #[arg(long)]
    seed: Option<u64>,
    /// Terrain vertices per side
    #[arg(long, default_value_t = 65)]
    grid: usize,
    /// Terrain vertex spacing
    #[arg(long, default_value_t = 1.0)]
    spacing: f32,
    /// Terrain hill height
    #[arg(long, default_value_t = 1.5)]
    amplitude: f32,
    /// Let the lander fall without the descent autopilot
    #[arg(long)]
    free_fall: bool,
    /// Log filter used when `RUST_LOG` is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("parse log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = match &args.config_dir {
        Some(dir) => FsConfigStore::at(dir.clone()),
        None => FsConfigStore::new(),
    }
    .context("open config store")?;
    info!(dir = %store.base().display(), "config store");
    let service = ConfigService::new(store);
    let mut config = SimConfig::load(&service).context("load config")?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.save_config {
        service
            .save(SimConfig::KEY, &config)
            .context("save config")?;
    }

    if args.grid < 2 {
        bail!("terrain grid needs at least 2 vertices per side, got {}", args.grid);
    }
    let Some(dt) = frame_dt(args.framerate) else {
        bail!("framerate must be finite and positive, got {}", args.framerate);
    };
    let mesh = terrain::rolling(args.grid, args.spacing, args.amplitude)
        .context("generate terrain")?;
    let mut world = LanderWorld::new(config, &mesh).context("build world")?;
    info!(
        vertices = mesh.vertex_count(),
        leaves = world.octree().leaf_count(),
        depth = world.octree().depth(),
        "terrain indexed"
    );

    let pilot = Autopilot::default();
    let summary = run(
        &mut world,
        args.frames,
        dt,
        (!args.free_fall).then_some(&pilot),
    );
    match summary.outcome {
        LandingOutcome::Landed => info!(fuel = summary.fuel, "the eagle has landed"),
        LandingOutcome::Crashed => info!(debris = world.explosion().system().len(), "lander lost"),
        LandingOutcome::Contact | LandingOutcome::Airborne => {
            info!(frames = summary.frames, "frame budget exhausted before touchdown");
        }
    }
    Ok(())
}
