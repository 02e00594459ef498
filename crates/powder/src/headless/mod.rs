//! Headless rendering (no window, no GPU)

mod pixel_renderer;

pub use pixel_renderer::PixelRenderer;
