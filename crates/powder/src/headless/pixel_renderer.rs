//! CPU-based pixel buffer renderer for headless snapshots
//!
//! Draws render commands into an RGBA buffer without GPU dependencies.

use powder_core::render::RenderCmd;
use powder_core::simulation::{MaterialId, Materials};

/// Background for empty cells
const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// CPU-based renderer that outputs to a pixel buffer
pub struct PixelRenderer {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Screen pixels per world cell
    pub scale: usize,
    /// RGBA pixel buffer (4 bytes per pixel)
    pub buffer: Vec<u8>,
}

impl PixelRenderer {
    /// Renderer for a world of `world_width` x `world_height` cells
    pub fn new(world_width: usize, world_height: usize, scale: usize) -> Self {
        let scale = scale.max(1);
        let width = world_width * scale;
        let height = world_height * scale;
        Self {
            width,
            height,
            scale,
            buffer: vec![0u8; width * height * 4],
        }
    }

    /// Clear to the background and draw every command
    pub fn render(&mut self, commands: &[RenderCmd], materials: &Materials) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel.copy_from_slice(&BACKGROUND);
        }

        for cmd in commands {
            let id = u8::try_from(cmd.material_id)
                .ok()
                .and_then(MaterialId::from_index);
            let color = match id {
                Some(id) => materials.get_color(id),
                None => {
                    log::error!("render command with unknown material {}", cmd.material_id);
                    continue;
                }
            };
            self.fill_cell(cmd.x, cmd.y, color);
        }
    }

    /// Paint one world cell; cells outside the image are skipped
    fn fill_cell(&mut self, x: i32, y: i32, color: [u8; 4]) {
        let cells_wide = (self.width / self.scale) as i32;
        let cells_high = (self.height / self.scale) as i32;
        if x < 0 || y < 0 || x >= cells_wide || y >= cells_high {
            return;
        }

        // Flip Y for screen coordinates (world Y increases upward)
        let top = (cells_high - 1 - y) as usize * self.scale;
        let left = x as usize * self.scale;
        for py in top..top + self.scale {
            for px in left..left + self.scale {
                let idx = (py * self.width + px) * 4;
                self.buffer[idx..idx + 4].copy_from_slice(&color);
            }
        }
    }

    /// Color of the screen pixel at (`x`, `y`), top-left origin
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut color = [0; 4];
        color.copy_from_slice(&self.buffer[idx..idx + 4]);
        Some(color)
    }
}
