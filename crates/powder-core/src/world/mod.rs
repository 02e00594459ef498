//! World management - particles, indexing and the per-tick update

mod ca_update;
mod chemistry_system;
pub mod mutation_log;
pub mod neighbor_queries;
pub mod particle_store;
pub mod rng_trait;
pub mod spatial_index;
pub mod stats;
mod update_engine;
#[allow(clippy::module_inception)]
mod world;
pub mod world_config;

pub use ca_update::CellularAutomataUpdater;
pub use chemistry_system::ChemistrySystem;
pub use mutation_log::{ApplyOutcome, Mutation, MutationLog};
pub use neighbor_queries::{Direction, Neighborhood, Occupancy};
pub use particle_store::ParticleStore;
pub use rng_trait::WorldRng;
pub use spatial_index::{SpatialIndex, coord_key};
pub use stats::{NoopStats, SimStats, SimulationStats, TickReport};
pub use update_engine::{CHUNK_LEN, EvaluationSummary, TickInput, UpdateEngine};
pub use world::SimulationContext;
pub use world_config::{EdgeMode, WorldConfig, WorldError};
