//! Update engine - evaluates every particle against the frozen snapshot
//!
//! Particles are split into fixed-size chunks. Each chunk gets its own RNG
//! stream and its own mutation log shard, and shards are joined in chunk
//! order, so parallel and sequential evaluation produce identical logs.

use rayon::prelude::*;

use crate::simulation::{Materials, Particle};
use crate::world::WorldRng;
use crate::world::ca_update::CellularAutomataUpdater;
use crate::world::chemistry_system::ChemistrySystem;
use crate::world::mutation_log::MutationLog;
use crate::world::neighbor_queries::Neighborhood;
use crate::world::rng_trait::chunk_rng;
use crate::world::spatial_index::SpatialIndex;
use crate::world::world_config::WorldConfig;

/// Particles evaluated per work unit
pub const CHUNK_LEN: usize = 64;

/// Read-only state shared by every chunk in a tick
#[derive(Clone, Copy)]
pub struct TickInput<'a> {
    pub particles: &'a [Particle],
    pub index: &'a SpatialIndex,
    pub materials: &'a Materials,
    pub config: &'a WorldConfig,
    pub tick: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvaluationSummary {
    /// Reactions scheduled by the chemistry rules
    pub reactions: usize,
}

pub struct UpdateEngine;

impl UpdateEngine {
    /// Evaluate every particle, appending the resulting mutations to `log`
    pub fn evaluate(input: TickInput<'_>, log: &mut MutationLog) -> EvaluationSummary {
        let shards: Vec<(MutationLog, usize)> = if input.config.parallel {
            input
                .particles
                .par_chunks(CHUNK_LEN)
                .enumerate()
                .map(|(chunk, _)| Self::evaluate_chunk(input, chunk))
                .collect()
        } else {
            input
                .particles
                .chunks(CHUNK_LEN)
                .enumerate()
                .map(|(chunk, _)| Self::evaluate_chunk(input, chunk))
                .collect()
        };

        let mut summary = EvaluationSummary::default();
        for (mut shard, reactions) in shards {
            log.append(&mut shard);
            summary.reactions += reactions;
        }
        summary
    }

    /// Evaluate one chunk into a fresh shard
    pub fn evaluate_chunk(input: TickInput<'_>, chunk: usize) -> (MutationLog, usize) {
        let start = chunk * CHUNK_LEN;
        let end = (start + CHUNK_LEN).min(input.particles.len());

        let mut rng = chunk_rng(input.config.seed, input.tick, chunk);
        let mut shard = MutationLog::with_capacity(end.saturating_sub(start));
        let mut reactions = 0;

        for index in start..end {
            reactions += Self::update_particle(input, index, &mut shard, &mut rng);
        }
        (shard, reactions)
    }

    /// Advance one particle by a single step
    ///
    /// Returns the number of reactions it scheduled.
    pub fn update_particle<R: WorldRng>(
        input: TickInput<'_>,
        index: usize,
        log: &mut MutationLog,
        rng: &mut R,
    ) -> usize {
        let particle = input.particles[index];

        if particle.is_expired() || !input.config.contains(particle.coord) {
            log.destroy(index);
            return 0;
        }

        let life = particle.aged_life();
        let material = input.materials.get(particle.material);
        let mut hood = Neighborhood::new(input.index, input.config, particle.coord);

        let coord = match CellularAutomataUpdater::step(material.material_type, &mut hood, rng) {
            Some(dir) => hood.coord(dir),
            None => particle.coord,
        };

        let reactions = ChemistrySystem::react(
            index,
            input.particles,
            &mut hood,
            input.materials,
            log,
            rng,
        );

        if coord != particle.coord || life != particle.life {
            log.overwrite(index, coord, life);
        }
        reactions
    }
}
