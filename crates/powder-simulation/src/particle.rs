//! Particle type and lifetime constants
//!
//! A particle is one occupied grid cell: where it is, what it is made of,
//! and how many ticks it has left.

use crate::MaterialId;
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Lifetime value for particles that never expire
pub const INFINITE_LIFE: i32 = -1;

/// Ticks a freshly created fire particle lives
pub const FIRE_LIFE: i32 = 40;

/// Ticks a freshly created smoke particle lives
pub const SMOKE_LIFE: i32 = 120;

/// Ticks a freshly created steam particle lives
pub const STEAM_LIFE: i32 = 250;

/// A single particle in the world
///
/// Two particles are equal when coordinate, material and remaining life all match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Particle {
    /// Grid cell (y grows upward)
    pub coord: IVec2,
    /// Material this particle is made of
    pub material: MaterialId,
    /// Remaining ticks, or [`INFINITE_LIFE`]
    pub life: i32,
}

impl Particle {
    pub const fn new(coord: IVec2, material: MaterialId, life: i32) -> Self {
        Self {
            coord,
            material,
            life,
        }
    }

    /// True if this particle never expires
    pub fn is_immortal(&self) -> bool {
        self.life == INFINITE_LIFE
    }

    /// True once the particle has no ticks left and must be removed
    pub fn is_expired(&self) -> bool {
        self.life == 0
    }

    /// Life after one tick has elapsed. Expired particles are removed before aging.
    pub fn aged_life(&self) -> i32 {
        debug_assert!(self.life >= INFINITE_LIFE, "life below -1: {}", self.life);
        if self.is_immortal() {
            self.life
        } else {
            self.life - 1
        }
    }
}
