//! PNG snapshots of a running world

use anyhow::{Context, Result};
use std::path::Path;

use crate::headless::PixelRenderer;
use powder_core::world::SimulationContext;

/// Render the last completed tick and write it to `path`
pub fn save_snapshot(
    context: &SimulationContext,
    scale: u32,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let config = context.config();

    let mut renderer = PixelRenderer::new(
        config.width as usize,
        config.height as usize,
        scale as usize,
    );
    renderer.render(context.render_commands(), context.materials());

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    save_buffer_as_png(&renderer.buffer, renderer.width, renderer.height, path)
        .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
    log::info!(
        "Saved {}x{} snapshot to {}",
        renderer.width,
        renderer.height,
        path.display()
    );
    Ok(())
}

fn save_buffer_as_png(
    buffer: &[u8],
    width: usize,
    height: usize,
    path: impl AsRef<Path>,
) -> Result<()> {
    use image::{ImageBuffer, Rgba};

    let img: ImageBuffer<Rgba<u8>, _> =
        ImageBuffer::from_raw(width as u32, height as u32, buffer.to_vec())
            .ok_or_else(|| anyhow::anyhow!("Failed to create image buffer"))?;

    img.save(path)?;
    Ok(())
}
