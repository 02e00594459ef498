//! Render bridge - per-tick projection of live particles into draw commands
//!
//! The command list is POD so a GPU renderer can upload it as-is.

use crate::simulation::Particle;

/// One particle to draw
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderCmd {
    pub x: i32,
    pub y: i32,
    /// Index into the material registry, see `MaterialId::index`
    pub material_id: u32,
}

impl From<&Particle> for RenderCmd {
    fn from(particle: &Particle) -> Self {
        Self {
            x: particle.coord.x,
            y: particle.coord.y,
            material_id: particle.material.index() as u32,
        }
    }
}

/// Reusable command buffer
///
/// Storage only ever grows; `count` says how many entries are current.
#[derive(Debug, Default, Clone)]
pub struct RenderBridge {
    commands: Vec<RenderCmd>,
    count: usize,
}

impl RenderBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the commands from the live particle list, in store order
    pub fn sync(&mut self, particles: &[Particle]) {
        if self.commands.len() < particles.len() {
            self.commands.resize(particles.len(), RenderCmd::default());
        }
        for (slot, particle) in self.commands.iter_mut().zip(particles) {
            *slot = RenderCmd::from(particle);
        }
        self.count = particles.len();
    }

    /// Commands for the current tick
    pub fn commands(&self) -> &[RenderCmd] {
        &self.commands[..self.count]
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Allocated entries, never less than any count seen so far
    pub fn capacity(&self) -> usize {
        self.commands.len()
    }

    /// Raw bytes of the current commands, ready for a vertex or storage buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.commands())
    }
}
