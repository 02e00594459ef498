//! Painting tools
//!
//! Tools never touch particles directly. They read the tick's frozen index
//! and write spawns and destroys into the same mutation log the update
//! engine uses.

mod erase;
mod pen;

pub use erase::EraseTool;
pub use pen::PenTool;

use glam::IVec2;

use super::brush::BrushConfig;
use super::input::{PointerButton, PointerEvent};
use crate::simulation::{MaterialId, Materials};
use crate::world::{MutationLog, SpatialIndex, WorldConfig};

/// Read-only world state a tool works against
#[derive(Clone, Copy)]
pub struct ToolContext<'a> {
    pub index: &'a SpatialIndex,
    pub config: &'a WorldConfig,
    pub materials: &'a Materials,
}

/// Trait for drawing tools
pub trait Tool {
    /// Tool display name
    fn name(&self) -> &str;

    /// Apply the tool around `center` and return the number of scheduled ops
    fn apply(&self, ctx: ToolContext<'_>, center: IVec2, size: i32, log: &mut MutationLog)
    -> usize;
}

/// `center` shifted by `(dx, dy)`, clamped to the `i32` range
///
/// Clamped cells lie far outside any world, so callers drop them with the
/// usual bounds check.
fn offset(center: IVec2, dx: i32, dy: i32) -> IVec2 {
    IVec2::new(center.x.saturating_add(dx), center.y.saturating_add(dy))
}

/// Cells of a diamond of radius `size` around `center`, row by row from the bottom
///
/// The row at vertical distance `d` spans `x - (size - d) ..= x + (size - d)`.
pub fn diamond(center: IVec2, size: i32) -> impl Iterator<Item = IVec2> {
    let size = size.max(0);
    (-size..=size).flat_map(move |dy| {
        let half = size - dy.abs();
        (-half..=half).map(move |dx| offset(center, dx, dy))
    })
}

/// Single row of `2 * size + 1` cells centered on `center`
pub fn generator_row(center: IVec2, size: i32) -> impl Iterator<Item = IVec2> {
    let size = size.max(0);
    (-size..=size).map(move |dx| offset(center, dx, 0))
}

/// Turns pointer events into mutations
pub struct PaintController;

impl PaintController {
    /// Route one pointer event to the pen or the eraser
    ///
    /// Generators are only placed on a fresh click, never while the button
    /// is held. Erasing works either way.
    pub fn apply(
        event: &PointerEvent,
        brush: &BrushConfig,
        ctx: ToolContext<'_>,
        log: &mut MutationLog,
    ) -> usize {
        let pen;
        let tool: &dyn Tool = match event.button {
            PointerButton::Secondary => &EraseTool,
            PointerButton::Primary => {
                let material = brush.material();
                if material == MaterialId::Void {
                    return 0;
                }
                if event.is_held && ctx.materials.is_generator(material) {
                    return 0;
                }
                pen = PenTool::new(material);
                &pen
            }
        };

        let scheduled = tool.apply(ctx, event.world_coord, brush.size(), log);
        log::trace!(
            "{} scheduled {} ops at {}",
            tool.name(),
            scheduled,
            event.world_coord
        );
        scheduled
    }
}
