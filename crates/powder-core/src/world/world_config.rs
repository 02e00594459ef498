//! World dimensions and simulation settings

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_WIDTH: i32 = 640;
pub const DEFAULT_HEIGHT: i32 = 480;
/// Depth of the stone strip laid across the bottom of a new world
pub const DEFAULT_FLOOR_ROWS: i32 = 5;
pub const DEFAULT_SEED: u64 = 42;

/// What particles see beyond the world rectangle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeMode {
    /// Out-of-world cells read as occupied; nothing moves out
    #[default]
    Solid,
    /// Out-of-world cells read as empty; particles that wander out are removed next tick
    Open,
}

/// Errors from invalid world settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("floor of {floor_rows} rows does not fit in a world {height} rows tall")]
    FloorTooDeep { floor_rows: i32, height: i32 },
}

/// Fixed-at-startup world settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: i32,
    pub height: i32,
    /// Seed for every per-chunk RNG stream
    pub seed: u64,
    pub edge_mode: EdgeMode,
    /// Stone rows laid at the bottom on creation and reset (0 = none)
    pub floor_rows: i32,
    /// Evaluate particle chunks on the rayon pool
    pub parallel: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: DEFAULT_SEED,
            edge_mode: EdgeMode::Solid,
            floor_rows: DEFAULT_FLOOR_ROWS,
            parallel: true,
        }
    }
}

impl WorldConfig {
    /// Empty world of the given size (no floor)
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            floor_rows: 0,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_edge_mode(mut self, edge_mode: EdgeMode) -> Self {
        self.edge_mode = edge_mode;
        self
    }

    pub fn with_floor_rows(mut self, floor_rows: i32) -> Self {
        self.floor_rows = floor_rows;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), WorldError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(WorldError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.floor_rows < 0 || self.floor_rows > self.height {
            return Err(WorldError::FloorTooDeep {
                floor_rows: self.floor_rows,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Check if a cell lies inside the world rectangle
    pub fn contains(&self, coord: IVec2) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }

    /// Number of cells in the world
    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }
}
