//! # Powder Core
//!
//! The falling-sand simulation engine. Every tick the particle store is
//! indexed, brush input and per-particle rules are evaluated against that
//! frozen snapshot, and the resulting mutation log is applied in one pass.

pub mod entity;
pub mod render;
pub mod world;

// Re-export the data crate so callers only need one dependency
pub mod simulation {
    pub use powder_simulation::*;
}

/// Common imports for internal use
pub mod prelude {
    pub use crate::entity::{BrushConfig, PointerButton, PointerEvent};
    pub use crate::render::RenderCmd;
    pub use crate::simulation::{MaterialId, MaterialType, Materials, Particle};
    pub use crate::world::{SimulationContext, TickReport, WorldConfig};
    pub use glam::{IVec2, Vec2};
}
