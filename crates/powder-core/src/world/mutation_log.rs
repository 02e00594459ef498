//! Mutation log - deferred writes for one tick
//!
//! Evaluation never touches the particle store directly. Every change is
//! recorded here and applied in one pass once all particles have been
//! evaluated, so no rule observes another rule's effect within a tick.

use ahash::AHashSet;
use glam::IVec2;

use crate::simulation::{MaterialId, Materials, Particle};
use crate::world::SimStats;
use crate::world::particle_store::ParticleStore;
use crate::world::spatial_index::coord_key;

/// One pending change. Indices refer to the particle store as it was at the
/// start of the tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Spawn(Particle),
    Destroy(usize),
    Overwrite { index: usize, coord: IVec2, life: i32 },
    Transform { index: usize, material: MaterialId },
}

/// What applying a log changed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub moved: usize,
    pub spawned: usize,
    pub destroyed: usize,
    pub transformed: usize,
    /// Spawns whose cell was already claimed
    pub dropped_spawns: usize,
    /// Moves whose destination was already claimed
    pub blocked_moves: usize,
}

#[derive(Debug, Default, Clone)]
pub struct MutationLog {
    ops: Vec<Mutation>,

    // Scratch reused across applies
    claimed: AHashSet<u64>,
    destroyed: Vec<bool>,
    targets: Vec<Option<(IVec2, i32)>>,
    transforms: Vec<Option<MaterialId>>,
    spawns: Vec<Particle>,
}

impl MutationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ops: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    pub fn spawn(&mut self, particle: Particle) {
        self.ops.push(Mutation::Spawn(particle));
    }

    pub fn destroy(&mut self, index: usize) {
        self.ops.push(Mutation::Destroy(index));
    }

    pub fn overwrite(&mut self, index: usize, coord: IVec2, life: i32) {
        self.ops.push(Mutation::Overwrite { index, coord, life });
    }

    pub fn transform(&mut self, index: usize, material: MaterialId) {
        self.ops.push(Mutation::Transform { index, material });
    }

    /// Move every op of `other` to the end of this log, preserving order
    pub fn append(&mut self, other: &mut MutationLog) {
        self.ops.append(&mut other.ops);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mutation> {
        self.ops.iter()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Apply every pending op to `store` and empty the log
    ///
    /// Cells are handed out in a fixed order so the result never depends on
    /// how the log was produced:
    /// 1. surviving particles that stay put keep their cell
    /// 2. movers claim their destination in particle order; a mover whose
    ///    destination is taken stays where it was
    /// 3. spawns claim their cell in log order; a spawn onto a taken cell
    ///    is dropped
    ///
    /// Destroy beats every other op on the same particle and is counted once.
    pub fn apply(
        &mut self,
        store: &mut ParticleStore,
        materials: &Materials,
        stats: &mut dyn SimStats,
    ) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();
        let count = store.len();

        self.destroyed.clear();
        self.destroyed.resize(count, false);
        self.targets.clear();
        self.targets.resize(count, None);
        self.transforms.clear();
        self.transforms.resize(count, None);
        self.spawns.clear();
        self.claimed.clear();

        for op in self.ops.drain(..) {
            match op {
                Mutation::Spawn(particle) => self.spawns.push(particle),
                Mutation::Destroy(index) => match self.destroyed.get_mut(index) {
                    Some(flag) if !*flag => {
                        *flag = true;
                        outcome.destroyed += 1;
                    }
                    Some(_) => {}
                    None => log::error!("destroy of unknown particle {index} (live: {count})"),
                },
                Mutation::Overwrite { index, coord, life } => match self.targets.get_mut(index) {
                    Some(target) => *target = Some((coord, life)),
                    None => log::error!("overwrite of unknown particle {index} (live: {count})"),
                },
                Mutation::Transform { index, material } => {
                    match self.transforms.get_mut(index) {
                        Some(slot) => *slot = Some(material),
                        None => log::error!("transform of unknown particle {index} (live: {count})"),
                    }
                }
            }
        }

        let particles = store.as_slice();

        // Stayers first
        for (i, particle) in particles.iter().enumerate() {
            if self.destroyed[i] {
                continue;
            }
            let moves = matches!(self.targets[i], Some((coord, _)) if coord != particle.coord);
            if !moves {
                self.claimed.insert(coord_key(particle.coord));
            }
        }

        // Then movers, in particle order
        for (i, particle) in particles.iter().enumerate() {
            if self.destroyed[i] {
                continue;
            }
            if let Some((coord, life)) = self.targets[i]
                && coord != particle.coord
            {
                if self.claimed.insert(coord_key(coord)) {
                    outcome.moved += 1;
                    stats.record_particle_moved();
                } else {
                    // Lost the race; the start cell is still ours
                    self.claimed.insert(coord_key(particle.coord));
                    self.targets[i] = Some((particle.coord, life));
                    outcome.blocked_moves += 1;
                }
            }
        }

        let mut next = store.take_spare();
        next.reserve(count.saturating_sub(outcome.destroyed) + self.spawns.len());

        for (i, particle) in store.as_slice().iter().enumerate() {
            if self.destroyed[i] {
                stats.record_destroy();
                continue;
            }
            let (coord, life) = self.targets[i].unwrap_or((particle.coord, particle.life));
            match self.transforms[i] {
                Some(material) => {
                    next.push(materials.create(material, coord));
                    outcome.transformed += 1;
                    stats.record_reaction();
                }
                None => next.push(Particle::new(coord, particle.material, life)),
            }
        }

        for particle in self.spawns.drain(..) {
            if self.claimed.insert(coord_key(particle.coord)) {
                next.push(particle);
                outcome.spawned += 1;
                stats.record_spawn();
            } else {
                outcome.dropped_spawns += 1;
            }
        }

        store.install(next);
        outcome
    }
}
