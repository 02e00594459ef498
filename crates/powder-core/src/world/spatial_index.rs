//! Spatial index - coordinate to occupant lookup, rebuilt every tick
//!
//! The index is a snapshot: it reflects particle positions at the start of a
//! tick and is read-only while particles are evaluated. It is never updated
//! incrementally.

use ahash::AHashMap;
use glam::IVec2;
use std::collections::hash_map::Entry;

use crate::simulation::Particle;

/// Pack a cell coordinate into a single hash key
///
/// Both axes keep their full 32 bits, so the key is unique for any
/// coordinate, including out-of-world ones.
pub fn coord_key(coord: IVec2) -> u64 {
    ((coord.x as u32 as u64) << 32) | (coord.y as u32 as u64)
}

/// Maps each occupied cell to the index of its particle in the store
#[derive(Debug, Default, Clone)]
pub struct SpatialIndex {
    cells: AHashMap<u64, u32>,
    collisions: usize,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh index from a particle snapshot
    pub fn build(particles: &[Particle]) -> Self {
        let mut index = Self::new();
        index.rebuild(particles);
        index
    }

    /// Replace the contents with `particles`, reusing the allocation
    ///
    /// Two particles on one cell is an engine bug: debug builds panic,
    /// release builds keep the first particle and count the collision.
    pub fn rebuild(&mut self, particles: &[Particle]) {
        self.cells.clear();
        self.cells.reserve(particles.len());
        self.collisions = 0;

        for (i, particle) in particles.iter().enumerate() {
            match self.cells.entry(coord_key(particle.coord)) {
                Entry::Vacant(slot) => {
                    slot.insert(i as u32);
                }
                Entry::Occupied(slot) => {
                    self.collisions += 1;
                    log::error!(
                        "duplicate occupancy at {}: particle {} collides with {}",
                        particle.coord,
                        i,
                        slot.get()
                    );
                    if cfg!(debug_assertions) {
                        panic!(
                            "duplicate occupancy at {}: particle {} collides with {}",
                            particle.coord,
                            i,
                            slot.get()
                        );
                    }
                }
            }
        }
    }

    /// Index of the particle occupying `coord`, if any
    pub fn occupant(&self, coord: IVec2) -> Option<usize> {
        self.cells.get(&coord_key(coord)).map(|&i| i as usize)
    }

    pub fn is_occupied(&self, coord: IVec2) -> bool {
        self.cells.contains_key(&coord_key(coord))
    }

    /// Number of occupied cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Duplicate occupancies seen by the last rebuild
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}
