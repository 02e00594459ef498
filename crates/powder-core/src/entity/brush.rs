//! Brush state: selected material, size and generator mode

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simulation::{MaterialId, Materials};

/// Largest brush radius
pub const MAX_BRUSH_SIZE: i32 = 6;
pub const DEFAULT_BRUSH_SIZE: i32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BrushError {
    #[error("brush size {0} is outside 0..=6")]
    SizeOutOfRange(i32),
}

/// What the pointer paints with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushConfig {
    material: MaterialId,
    size: i32,
    generator_mode: bool,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            material: MaterialId::Sand,
            size: DEFAULT_BRUSH_SIZE,
            generator_mode: false,
        }
    }
}

impl BrushConfig {
    pub fn new(material: MaterialId, size: i32) -> Result<Self, BrushError> {
        let mut brush = Self {
            material,
            ..Default::default()
        };
        brush.set_size(size)?;
        Ok(brush)
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    /// Brush radius in cells
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Size as shown to the user (a radius 0 brush still paints one cell)
    pub fn display_size(&self) -> i32 {
        self.size + 1
    }

    pub fn generator_mode(&self) -> bool {
        self.generator_mode
    }

    /// Choose the material to paint; in generator mode its generator is
    /// picked instead when one exists
    pub fn select(&mut self, material: MaterialId, materials: &Materials) {
        self.material = if self.generator_mode {
            materials.find_generator_for(material).unwrap_or(material)
        } else {
            material
        };
    }

    /// Switch generator mode
    ///
    /// Turning it on swaps the material for its generator and does nothing if
    /// the material has none. Turning it off swaps a generator back to what it
    /// emits. Returns the resulting mode.
    pub fn set_generator_mode(&mut self, enabled: bool, materials: &Materials) -> bool {
        if enabled == self.generator_mode {
            return self.generator_mode;
        }

        if enabled {
            if let Some(generator) = materials.find_generator_for(self.material) {
                self.material = generator;
                self.generator_mode = true;
            }
        } else {
            if let Some(generated) = materials.generated_material(self.material) {
                self.material = generated;
            }
            self.generator_mode = false;
        }
        self.generator_mode
    }

    pub fn toggle_generator_mode(&mut self, materials: &Materials) -> bool {
        self.set_generator_mode(!self.generator_mode, materials)
    }

    pub fn set_size(&mut self, size: i32) -> Result<(), BrushError> {
        if !(0..=MAX_BRUSH_SIZE).contains(&size) {
            return Err(BrushError::SizeOutOfRange(size));
        }
        self.size = size;
        Ok(())
    }

    /// Increase the size by one, saturating at [`MAX_BRUSH_SIZE`]
    pub fn grow(&mut self) -> i32 {
        self.size = (self.size + 1).min(MAX_BRUSH_SIZE);
        self.size
    }

    /// Decrease the size by one, saturating at zero
    pub fn shrink(&mut self) -> i32 {
        self.size = (self.size - 1).max(0);
        self.size
    }
}
