use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use powder::config::PowderConfig;
use powder::scenes;
use powder::world::{EdgeMode, SimulationContext, SimulationStats};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene to build: floor, hourglass, inferno, lava-meets-water, acid-bath, generators
    #[arg(long)]
    scene: Option<String>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// World seed
    #[arg(long)]
    seed: Option<u64>,

    /// World width in cells
    #[arg(long)]
    width: Option<i32>,

    /// World height in cells
    #[arg(long)]
    height: Option<i32>,

    /// Let particles leave the world instead of piling up at its edges
    #[arg(long)]
    open_edges: bool,

    /// Evaluate particles on one thread
    #[arg(long)]
    sequential: bool,

    /// Log a tick report every N ticks (0 = never)
    #[arg(long)]
    report_every: Option<u64>,

    /// Write a PNG snapshot of the final tick to this path
    #[arg(long)]
    output: Option<PathBuf>,

    /// Screen pixels per world cell in the snapshot
    #[arg(long)]
    scale: Option<u32>,

    /// List available scenes
    #[arg(long)]
    list_scenes: bool,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_scenes {
        scenes::list_scenes();
        return Ok(());
    }

    let mut config = PowderConfig::load()?;

    // Command-line flags win over file and environment
    if let Some(scene) = args.scene {
        config.run.scene = scene;
    }
    if let Some(ticks) = args.ticks {
        config.run.ticks = ticks;
    }
    if let Some(report_every) = args.report_every {
        config.run.report_every = report_every;
    }
    if let Some(scale) = args.scale {
        config.run.scale = scale;
    }
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }
    if let Some(width) = args.width {
        config.world.width = width;
    }
    if let Some(height) = args.height {
        config.world.height = height;
    }
    if args.open_edges {
        config.world.edge_mode = EdgeMode::Open;
    }
    if args.sequential {
        config.world.parallel = false;
    }

    let Some(scene) = scenes::find(&config.run.scene) else {
        anyhow::bail!(
            "Unknown scene '{}' (use --list-scenes to see the options)",
            config.run.scene
        );
    };

    log::info!("Starting Powder: scene '{}'", scene.name);

    let mut context =
        SimulationContext::new(config.world.clone()).context("Invalid world configuration")?;
    (scene.build)(&mut context);
    let placed = context.flush_pending();
    log::info!("Scene '{}' placed {} particles", scene.name, placed);

    let mut stats = SimulationStats::default();
    for _ in 0..config.run.ticks {
        let report = context.step(&mut stats);
        if config.run.report_every > 0 && (report.tick + 1) % config.run.report_every == 0 {
            log::info!(
                "tick {:>5}: {} live, {} moved, {} spawned, {} destroyed, {} reactions, {} blocked",
                report.tick,
                report.live,
                report.moved,
                report.spawned,
                report.destroyed,
                report.reactions,
                report.blocked_moves
            );
        }
    }

    context.print_info();
    log::info!(
        "Totals: {} moves, {} spawns, {} destroys, {} transforms",
        stats.particles_moved,
        stats.spawns,
        stats.destroys,
        stats.reactions
    );

    if let Some(output) = args.output {
        powder::screenshot::save_snapshot(&context, config.run.scale, output)?;
    }

    Ok(())
}
