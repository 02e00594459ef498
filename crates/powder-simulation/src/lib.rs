//! Material simulation data for Powder
//!
//! This crate provides the foundational data types for the simulation:
//! - Material definitions (MaterialId, MaterialDef, Materials)
//! - States of matter (MaterialType)
//! - Particle type and lifetime constants

mod materials;
mod particle;

pub use materials::{MaterialDef, MaterialId, MaterialType, Materials};
pub use particle::{FIRE_LIFE, INFINITE_LIFE, Particle, SMOKE_LIFE, STEAM_LIFE};
