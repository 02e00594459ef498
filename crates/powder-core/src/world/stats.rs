//! Simulation statistics collection

use serde::Serialize;

/// Trait for collecting simulation statistics
///
/// Called from the single-threaded mutation apply step, never from workers.
pub trait SimStats {
    /// Record that a particle moved to a new cell
    fn record_particle_moved(&mut self);

    /// Record that a particle entered the world
    fn record_spawn(&mut self);

    /// Record that a particle left the world
    fn record_destroy(&mut self);

    /// Record that a particle changed material in place
    fn record_reaction(&mut self);
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_particle_moved(&mut self) {}
    fn record_spawn(&mut self) {}
    fn record_destroy(&mut self) {}
    fn record_reaction(&mut self) {}
}

/// Running totals across every tick of a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimulationStats {
    pub particles_moved: u64,
    pub spawns: u64,
    pub destroys: u64,
    pub reactions: u64,
}

impl SimStats for SimulationStats {
    fn record_particle_moved(&mut self) {
        self.particles_moved += 1;
    }

    fn record_spawn(&mut self) {
        self.spawns += 1;
    }

    fn record_destroy(&mut self) {
        self.destroys += 1;
    }

    fn record_reaction(&mut self) {
        self.reactions += 1;
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Tick number this report describes (first tick is 0)
    pub tick: u64,
    /// Live particles after the tick was applied
    pub live: usize,
    pub moved: usize,
    pub spawned: usize,
    pub destroyed: usize,
    /// Particles that changed material in place (water to steam, ...)
    pub transformed: usize,
    /// Neighbor reactions scheduled by the chemistry rules
    pub reactions: usize,
    /// Spawns that lost their cell to another claimant
    pub dropped_spawns: usize,
    /// Moves that lost their destination and stayed put
    pub blocked_moves: usize,
    /// Duplicate occupancies seen while building the spatial index
    pub index_collisions: usize,
}
