//! # Powder
//!
//! Headless runner for the falling-sand engine: loads layered configuration,
//! builds a demo scene, simulates it and writes PNG snapshots.

pub mod config;
pub mod headless;
pub mod scenes;
pub mod screenshot;

// Re-export core modules for convenience
pub use powder_core::entity;
pub use powder_core::render;
pub use powder_core::simulation;
pub use powder_core::world;

/// Common imports for internal use
pub mod prelude {
    pub use glam::{IVec2, Vec2};
    pub use powder_core::simulation::{MaterialId, MaterialType, Materials};
    pub use powder_core::world::{SimulationContext, TickReport, WorldConfig};
}
