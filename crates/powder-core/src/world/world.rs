//! Simulation context - owns the world and drives the tick

use glam::IVec2;

use super::mutation_log::MutationLog;
use super::particle_store::ParticleStore;
use super::spatial_index::SpatialIndex;
use super::stats::{NoopStats, SimStats, TickReport};
use super::update_engine::{TickInput, UpdateEngine};
use super::world_config::{WorldConfig, WorldError};
use crate::entity::{BrushConfig, PaintController, PointerEvent, ToolContext};
use crate::render::{RenderBridge, RenderCmd};
use crate::simulation::{MaterialId, Materials, Particle};

/// Everything one simulation needs: registry, particles, brush and counters
pub struct SimulationContext {
    config: WorldConfig,

    /// Material definitions
    materials: Materials,

    particles: ParticleStore,

    /// Snapshot index, rebuilt at the start of every tick
    index: SpatialIndex,

    /// Mutations for the current tick
    log: MutationLog,

    /// Spawns requested between ticks, applied before the next tick begins
    pending: MutationLog,

    /// Pointer event to paint on the next tick
    pending_input: Option<PointerEvent>,

    brush: BrushConfig,

    render: RenderBridge,

    /// Ticks completed since creation or the last reset
    tick: u64,
}

impl SimulationContext {
    /// Create a world and lay its floor
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        config.validate()?;

        let mut context = Self {
            particles: ParticleStore::with_capacity(config.area().min(1 << 16)),
            config,
            materials: Materials::new(),
            index: SpatialIndex::new(),
            log: MutationLog::new(),
            pending: MutationLog::new(),
            pending_input: None,
            brush: BrushConfig::default(),
            render: RenderBridge::new(),
            tick: 0,
        };
        context.lay_floor();
        context.flush_pending();

        log::info!(
            "Created {}x{} world (seed {}, {:?} edges, {} particles)",
            context.config.width,
            context.config.height,
            context.config.seed,
            context.config.edge_mode,
            context.particles.len()
        );
        Ok(context)
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn materials(&self) -> &Materials {
        &self.materials
    }

    /// Live particles in store order
    pub fn particles(&self) -> &[Particle] {
        self.particles.as_slice()
    }

    /// Draw commands for the last completed tick
    pub fn render_commands(&self) -> &[RenderCmd] {
        self.render.commands()
    }

    pub fn render_bridge(&self) -> &RenderBridge {
        &self.render
    }

    /// Ticks completed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    /// Live particles of one material
    pub fn count_of(&self, material: MaterialId) -> usize {
        self.particles.count_of(material)
    }

    /// Live particle count per material, indexed by [`MaterialId::index`]
    pub fn population(&self) -> [usize; MaterialId::COUNT] {
        self.particles.population()
    }

    pub fn brush(&self) -> &BrushConfig {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut BrushConfig {
        &mut self.brush
    }

    /// Select the brush material, honoring generator mode
    pub fn select_material(&mut self, material: MaterialId) {
        self.brush.select(material, &self.materials);
    }

    pub fn toggle_generator_mode(&mut self) -> bool {
        self.brush.toggle_generator_mode(&self.materials)
    }

    /// Queue a fresh particle of `material` at `coord`
    ///
    /// The spawn lands before the next tick is evaluated, or on
    /// [`flush_pending`](Self::flush_pending). A spawn onto an occupied cell
    /// is dropped.
    pub fn spawn(&mut self, coord: IVec2, material: MaterialId) {
        self.pending.spawn(self.materials.create(material, coord));
    }

    pub fn spawn_at(&mut self, x: i32, y: i32, material: MaterialId) {
        self.spawn(IVec2::new(x, y), material);
    }

    /// Fill the axis-aligned box `min..=max` with `material`
    pub fn fill_rect(&mut self, min: IVec2, max: IVec2, material: MaterialId) {
        for y in min.y..=max.y {
            for x in min.x..=max.x {
                self.spawn_at(x, y, material);
            }
        }
    }

    /// Apply queued spawns now and return how many landed
    pub fn flush_pending(&mut self) -> usize {
        if self.pending.is_empty() {
            return 0;
        }
        let outcome = self
            .pending
            .apply(&mut self.particles, &self.materials, &mut NoopStats);
        if outcome.dropped_spawns > 0 {
            log::debug!("{} queued spawns hit occupied cells", outcome.dropped_spawns);
        }
        self.render.sync(self.particles.as_slice());
        outcome.spawned
    }

    /// Paint with `event` on the next tick. A newer event replaces an older one.
    pub fn queue_input(&mut self, event: PointerEvent) {
        self.pending_input = Some(event);
    }

    /// Advance one tick without collecting stats
    pub fn update(&mut self) -> TickReport {
        self.step(&mut NoopStats)
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self, stats: &mut dyn SimStats) -> TickReport {
        self.flush_pending();
        self.index.rebuild(self.particles.as_slice());

        if let Some(event) = self.pending_input.take() {
            let ctx = ToolContext {
                index: &self.index,
                config: &self.config,
                materials: &self.materials,
            };
            PaintController::apply(&event, &self.brush, ctx, &mut self.log);
        }

        let input = TickInput {
            particles: self.particles.as_slice(),
            index: &self.index,
            materials: &self.materials,
            config: &self.config,
            tick: self.tick,
        };
        let summary = UpdateEngine::evaluate(input, &mut self.log);
        let outcome = self
            .log
            .apply(&mut self.particles, &self.materials, stats);
        self.render.sync(self.particles.as_slice());

        let report = TickReport {
            tick: self.tick,
            live: self.particles.len(),
            moved: outcome.moved,
            spawned: outcome.spawned,
            destroyed: outcome.destroyed,
            transformed: outcome.transformed,
            reactions: summary.reactions,
            dropped_spawns: outcome.dropped_spawns,
            blocked_moves: outcome.blocked_moves,
            index_collisions: self.index.collisions(),
        };
        self.tick += 1;

        log::debug!(
            "tick {}: {} live, {} moved, +{} -{}",
            report.tick,
            report.live,
            report.moved,
            report.spawned,
            report.destroyed
        );
        report
    }

    /// Remove every particle, restart the tick counter and lay a fresh floor
    pub fn reset(&mut self) {
        self.particles.clear();
        self.log.clear();
        self.pending.clear();
        self.pending_input = None;
        self.tick = 0;
        self.lay_floor();
        self.flush_pending();
        log::info!("World reset ({} particles)", self.particles.len());
    }

    /// Log tick, live count and per-material population
    pub fn print_info(&self) {
        log::info!("=== World Info ===");
        log::info!("Tick: {}", self.tick);
        log::info!("Live particles: {}", self.particles.len());
        let population = self.population();
        for def in self.materials.iter() {
            let count = population[def.id.index() as usize];
            if count > 0 {
                log::info!("  {}: {}", def.name, count);
            }
        }
        log::info!(
            "Brush: {} (size {}{})",
            self.materials.get(self.brush.material()).name,
            self.brush.display_size(),
            if self.brush.generator_mode() {
                ", generator mode"
            } else {
                ""
            }
        );
    }

    fn lay_floor(&mut self) {
        for y in 0..self.config.floor_rows {
            for x in 0..self.config.width {
                self.spawn_at(x, y, MaterialId::Stone);
            }
        }
    }
}
