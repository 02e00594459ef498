//! Pen tool for drawing materials

use glam::IVec2;

use super::{Tool, ToolContext, diamond, generator_row};
use crate::simulation::MaterialId;
use crate::world::MutationLog;

/// Pen tool that draws a specific material into empty cells
pub struct PenTool {
    material: MaterialId,
}

impl PenTool {
    pub fn new(material: MaterialId) -> Self {
        Self { material }
    }
}

impl Tool for PenTool {
    fn name(&self) -> &str {
        "Pen"
    }

    fn apply(&self, ctx: ToolContext<'_>, center: IVec2, size: i32, log: &mut MutationLog) -> usize {
        let free = |coord: &IVec2| ctx.config.contains(*coord) && !ctx.index.is_occupied(*coord);

        let mut spawned = 0;
        let mut spawn = |coord: IVec2| {
            log.spawn(ctx.materials.create(self.material, coord));
            spawned += 1;
        };

        // Generators go in a flat row so they don't stack on each other
        if ctx.materials.is_generator(self.material) {
            generator_row(center, size).filter(free).for_each(&mut spawn);
        } else {
            diamond(center, size).filter(free).for_each(&mut spawn);
        }
        spawned
    }
}
