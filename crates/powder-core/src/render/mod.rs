//! Render output shared with frontends

mod render_bridge;

pub use render_bridge::{RenderBridge, RenderCmd};
