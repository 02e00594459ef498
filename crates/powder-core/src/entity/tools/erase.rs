//! Eraser tool

use glam::IVec2;

use super::{Tool, ToolContext, diamond};
use crate::world::MutationLog;

/// Eraser tool that removes every particle under the brush
pub struct EraseTool;

impl Tool for EraseTool {
    fn name(&self) -> &str {
        "Eraser"
    }

    fn apply(&self, ctx: ToolContext<'_>, center: IVec2, size: i32, log: &mut MutationLog) -> usize {
        let mut erased = 0;
        for index in diamond(center, size).filter_map(|coord| ctx.index.occupant(coord)) {
            log.destroy(index);
            erased += 1;
        }
        erased
    }
}
