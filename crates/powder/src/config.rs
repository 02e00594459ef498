//! Runner configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `powder.ron` file (if exists)
//! 3. Environment variables prefixed with `POWDER_`
//!
//! Command-line flags are applied on top by the binary.
//!
//! Example environment variable: `POWDER_WORLD__WIDTH=320`

use anyhow::{Context, Result};
use config::{Config, Environment, File, Map};
use serde::{Deserialize, Serialize};

use powder_core::world::WorldConfig;

/// Main runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PowderConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub run: RunConfig,
}

/// Headless run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Scene to build before the first tick
    pub scene: String,
    /// Number of ticks to simulate
    pub ticks: u64,
    /// Log a tick report every N ticks (0 = never)
    pub report_every: u64,
    /// Screen pixels per world cell in the snapshot
    pub scale: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scene: "hourglass".to_string(),
            ticks: 300,
            report_every: 50,
            scale: 1,
        }
    }
}

impl PowderConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `powder.ron` file (if exists)
    /// 3. Environment variables prefixed with `POWDER_` (highest priority)
    pub fn load() -> Result<Self> {
        Self::load_from("powder")
    }

    /// Same as [`load`](Self::load) with a different config file stem
    pub fn load_from(file_stem: &str) -> Result<Self> {
        Self::load_layers(file_stem, None)
    }

    /// Build all layers; `env` replaces the process environment when set
    fn load_layers(file_stem: &str, env: Option<Map<String, String>>) -> Result<Self> {
        let world = WorldConfig::default();
        let run = RunConfig::default();

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("world.width", world.width as i64)?
            .set_default("world.height", world.height as i64)?
            .set_default("world.seed", world.seed as i64)?
            .set_default("world.edge_mode", "Solid")?
            .set_default("world.floor_rows", world.floor_rows as i64)?
            .set_default("world.parallel", world.parallel)?
            .set_default("run.scene", run.scene)?
            .set_default("run.ticks", run.ticks as i64)?
            .set_default("run.report_every", run.report_every as i64)?
            .set_default("run.scale", run.scale as i64)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(file_stem)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (POWDER_WORLD__WIDTH, etc.)
            .add_source(
                Environment::with_prefix("POWDER")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
