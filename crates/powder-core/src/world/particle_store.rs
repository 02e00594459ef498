//! Particle store - the dense list of live particles
//!
//! Particles are addressed by their position in the list. Positions are only
//! stable within one tick: applying the mutation log compacts the list.

use glam::IVec2;

use crate::simulation::{MaterialId, Particle};

#[derive(Debug, Default, Clone)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    /// Buffer the next generation is built into, swapped in on install
    spare: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            spare: Vec::with_capacity(capacity),
        }
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Append without any occupancy check
    #[cfg(test)]
    pub(crate) fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.spare.clear();
    }

    /// Live particles of one material
    pub fn count_of(&self, material: MaterialId) -> usize {
        self.particles
            .iter()
            .filter(|p| p.material == material)
            .count()
    }

    /// Live particle count per material, indexed by [`MaterialId::index`]
    pub fn population(&self) -> [usize; MaterialId::COUNT] {
        let mut counts = [0; MaterialId::COUNT];
        for particle in &self.particles {
            counts[particle.material.index() as usize] += 1;
        }
        counts
    }

    /// Find the particle at `coord` by scanning (tests and tooling only)
    pub fn find_at(&self, coord: IVec2) -> Option<&Particle> {
        self.particles.iter().find(|p| p.coord == coord)
    }

    /// Empty scratch buffer for building the next generation
    pub(crate) fn take_spare(&mut self) -> Vec<Particle> {
        let mut spare = std::mem::take(&mut self.spare);
        spare.clear();
        spare
    }

    /// Make `next` the live list, keeping the old allocation for next tick
    pub(crate) fn install(&mut self, next: Vec<Particle>) {
        self.spare = std::mem::replace(&mut self.particles, next);
        self.spare.clear();
    }
}
