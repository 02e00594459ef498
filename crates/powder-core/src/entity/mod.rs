pub mod brush;
pub mod input;
pub mod tools;

pub use brush::{BrushConfig, BrushError, MAX_BRUSH_SIZE};
pub use input::{PointerButton, PointerEvent, WorldRect};
pub use tools::{PaintController, Tool, ToolContext};
