//! Integration tests for whole-tick behavior
//!
//! Each test builds a small world through the public API, runs a few ticks
//! and checks the outcome a player would see.

use std::collections::HashSet;

use glam::IVec2;
use powder_core::entity::PointerEvent;
use powder_core::simulation::{FIRE_LIFE, INFINITE_LIFE, MaterialId, Particle};
use powder_core::world::{EdgeMode, SimulationContext, WorldConfig};

fn world(width: i32, height: i32) -> SimulationContext {
    SimulationContext::new(WorldConfig::new(width, height)).unwrap()
}

fn material_at(context: &SimulationContext, x: i32, y: i32) -> Option<MaterialId> {
    let coord = IVec2::new(x, y);
    context
        .particles()
        .iter()
        .find(|p| p.coord == coord)
        .map(|p| p.material)
}

fn assert_unique_coords(particles: &[Particle]) {
    let mut seen = HashSet::with_capacity(particles.len());
    for particle in particles {
        assert!(
            seen.insert(particle.coord),
            "two particles at {}",
            particle.coord
        );
    }
}

// ============================================================================
// Movement
// ============================================================================

#[test]
fn test_sand_falls_one_row_per_tick_then_rests() {
    let mut context = world(10, 10);
    context.spawn_at(5, 8, MaterialId::Sand);

    for expected_y in (0..8).rev() {
        context.update();
        assert_eq!(context.particles()[0].coord.y, expected_y);
    }

    let resting = context.particles()[0];
    for _ in 0..5 {
        context.update();
        assert_eq!(context.particles()[0], resting);
    }
}

#[test]
fn test_sand_lands_on_a_slab() {
    let mut context = world(10, 20);
    context.fill_rect(IVec2::new(0, 2), IVec2::new(9, 2), MaterialId::Stone);
    context.spawn_at(5, 10, MaterialId::Sand);

    for _ in 0..20 {
        context.update();
    }

    let sand: Vec<_> = context
        .particles()
        .iter()
        .filter(|p| p.material == MaterialId::Sand)
        .collect();
    assert_eq!(sand.len(), 1);
    assert_eq!(sand[0].coord.y, 3);
}

#[test]
fn test_water_levels_out() {
    let mut context = SimulationContext::new(WorldConfig::new(30, 30).with_floor_rows(1)).unwrap();
    context.fill_rect(IVec2::new(14, 1), IVec2::new(15, 10), MaterialId::Water);

    for _ in 0..300 {
        context.update();
    }

    let highest = context
        .particles()
        .iter()
        .filter(|p| p.material == MaterialId::Water)
        .map(|p| p.coord.y)
        .max()
        .unwrap();
    // 20 cells of water on a 30-wide floor spread below the starting column height
    assert!(highest < 10, "water still stacked up to row {highest}");
    assert_eq!(context.count_of(MaterialId::Water), 20);
}

// ============================================================================
// Chemistry
// ============================================================================

#[test]
fn test_acid_dissolves_adjacent_stone() {
    let mut context = world(20, 20);
    context.spawn_at(5, 5, MaterialId::Acid);
    context.spawn_at(4, 5, MaterialId::Stone);
    context.spawn_at(6, 5, MaterialId::Stone);
    context.spawn_at(5, 4, MaterialId::Stone);
    // Above the acid is out of reach
    context.spawn_at(5, 6, MaterialId::Stone);

    context.update();

    assert_eq!(context.count_of(MaterialId::Stone), 1);
    assert_eq!(material_at(&context, 5, 6), Some(MaterialId::Stone));
    assert_eq!(context.count_of(MaterialId::Acid), 1);
}

#[test]
fn test_acid_spares_resistant_materials() {
    for material in [
        MaterialId::Acid,
        MaterialId::Fire,
        MaterialId::Water,
        MaterialId::Glass,
        MaterialId::Lava,
    ] {
        let mut context = world(20, 20);
        context.spawn_at(5, 1, MaterialId::Acid);
        context.spawn_at(4, 1, material);
        context.spawn_at(6, 1, material);
        context.spawn_at(5, 0, material);
        context.flush_pending();
        let before = context.count_of(material);

        context.update();

        assert_eq!(context.count_of(material), before, "acid dissolved {material:?}");
    }
}

#[test]
fn test_fire_turns_sand_into_glass() {
    let mut context = world(20, 20);
    context.spawn_at(5, 5, MaterialId::Fire);
    context.spawn_at(5, 6, MaterialId::Sand);

    let report = context.update();

    assert_eq!(material_at(&context, 5, 6), Some(MaterialId::Glass));
    assert_eq!(context.count_of(MaterialId::Sand), 0);
    assert_eq!(report.reactions, 1);
}

#[test]
fn test_fire_burns_wood() {
    let mut context = world(20, 20);
    context.spawn_at(5, 5, MaterialId::Fire);
    context.spawn_at(5, 6, MaterialId::Wood);

    context.update();

    assert_eq!(context.count_of(MaterialId::Wood), 0);
    assert!(matches!(
        material_at(&context, 5, 6),
        Some(MaterialId::Fire | MaterialId::Steam)
    ));
}

#[test]
fn test_water_over_lava_boils() {
    let mut context = world(10, 10);
    context.spawn_at(5, 2, MaterialId::Water);
    context.spawn_at(5, 1, MaterialId::Lava);

    let report = context.update();

    assert_eq!(report.transformed, 1);
    assert_eq!(context.count_of(MaterialId::Water), 0);
    assert_eq!(context.count_of(MaterialId::Steam), 1);
    assert_eq!(context.count_of(MaterialId::Lava), 1);
}

#[test]
fn test_steam_condenses_under_stone() {
    let mut context = world(10, 10);
    context.spawn_at(5, 5, MaterialId::Steam);
    context.spawn_at(5, 6, MaterialId::Stone);

    context.update();

    assert_eq!(context.count_of(MaterialId::Steam), 0);
    assert_eq!(context.count_of(MaterialId::Water), 1);
}

#[test]
fn test_water_quenches_fire() {
    let mut context = world(10, 10);
    context.spawn_at(5, 6, MaterialId::Water);
    context.spawn_at(5, 5, MaterialId::Fire);

    context.update();

    assert_eq!(context.count_of(MaterialId::Fire), 0);
    assert_eq!(context.count_of(MaterialId::Water), 1);
}

#[test]
fn test_lava_burns_wood_below() {
    let mut context = world(10, 10);
    context.spawn_at(5, 6, MaterialId::Lava);
    context.spawn_at(5, 5, MaterialId::Wood);

    context.update();

    assert_eq!(context.count_of(MaterialId::Wood), 0);
    assert_eq!(context.count_of(MaterialId::Lava), 1);
}

// ============================================================================
// Generators
// ============================================================================

#[test]
fn test_sand_generator_emits_into_empty_cell_above() {
    let mut context = world(10, 20);
    context.spawn_at(5, 2, MaterialId::SandGenerator);

    let first = context.update();
    assert_eq!(first.spawned, 1);
    assert_eq!(material_at(&context, 5, 3), Some(MaterialId::Sand));

    // The new grain still sits on the generator at the start of this tick
    let second = context.update();
    assert_eq!(second.spawned, 0);

    // It slid off the generator, so the cell is free again
    let third = context.update();
    assert_eq!(third.spawned, 1);
    assert_eq!(material_at(&context, 5, 3), Some(MaterialId::Sand));
}

#[test]
fn test_blocked_generator_never_emits() {
    let mut context = world(10, 20);
    context.spawn_at(5, 2, MaterialId::SandGenerator);
    context.spawn_at(5, 3, MaterialId::Stone);

    for _ in 0..10 {
        let report = context.update();
        assert_eq!(report.spawned, 0);
    }
    assert_eq!(context.count_of(MaterialId::Sand), 0);
}

#[test]
fn test_gas_generator_emits_below() {
    let mut context = world(10, 20);
    context.spawn_at(5, 10, MaterialId::SmokeGenerator);

    context.update();

    assert_eq!(material_at(&context, 5, 9), Some(MaterialId::Smoke));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_out_of_bounds_particle_is_removed() {
    let mut context = world(10, 10);
    context.spawn_at(-3, 5, MaterialId::Stone);
    context.spawn_at(4, 12, MaterialId::Stone);
    context.flush_pending();
    assert_eq!(context.live_count(), 2);

    let report = context.update();

    assert_eq!(report.destroyed, 2);
    assert_eq!(context.live_count(), 0);
}

#[test]
fn test_open_edges_let_particles_fall_out() {
    let config = WorldConfig::new(10, 10).with_edge_mode(EdgeMode::Open);
    let mut context = SimulationContext::new(config).unwrap();
    context.spawn_at(5, 0, MaterialId::Sand);

    context.update();
    assert_eq!(context.particles()[0].coord.y, -1);

    let report = context.update();
    assert_eq!(report.destroyed, 1);
    assert_eq!(context.live_count(), 0);
}

#[test]
fn test_fire_burns_out_after_its_life_span() {
    let mut context = world(20, 20);
    context.spawn_at(10, 5, MaterialId::Fire);

    for _ in 0..FIRE_LIFE {
        context.update();
    }
    // Life reached zero but removal happens on the following tick
    assert_eq!(context.count_of(MaterialId::Fire), 1);
    assert_eq!(context.particles()[0].life, 0);

    context.update();
    assert_eq!(context.count_of(MaterialId::Fire), 0);
}

#[test]
fn test_invariants_hold_over_a_busy_run() {
    let mut context = SimulationContext::new(WorldConfig::new(48, 48).with_floor_rows(2)).unwrap();
    let mix = [
        MaterialId::Sand,
        MaterialId::Water,
        MaterialId::Acid,
        MaterialId::Lava,
        MaterialId::Steam,
        MaterialId::Fire,
        MaterialId::Wood,
        MaterialId::Smoke,
    ];
    for y in 10..30 {
        for x in 4..44 {
            context.spawn_at(x, y, mix[((x * 7 + y * 3) as usize) % mix.len()]);
        }
    }
    context.spawn_at(24, 40, MaterialId::WaterGenerator);
    context.spawn_at(30, 40, MaterialId::SteamGenerator);

    for _ in 0..200 {
        let report = context.update();
        assert_eq!(report.index_collisions, 0);
        assert_eq!(report.live, context.live_count());
        assert_unique_coords(context.particles());

        for particle in context.particles() {
            assert!(particle.life >= INFINITE_LIFE);
            let life_span = context.materials().get(particle.material).life_span;
            if life_span == INFINITE_LIFE {
                assert_eq!(particle.life, INFINITE_LIFE, "{particle:?}");
            }
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let run = |parallel: bool| -> Vec<Particle> {
        let config = WorldConfig::new(64, 64)
            .with_floor_rows(3)
            .with_seed(7)
            .with_parallel(parallel);
        let mut context = SimulationContext::new(config).unwrap();
        context.fill_rect(IVec2::new(10, 20), IVec2::new(30, 40), MaterialId::Sand);
        context.fill_rect(IVec2::new(35, 20), IVec2::new(55, 30), MaterialId::Water);
        context.fill_rect(IVec2::new(35, 31), IVec2::new(55, 33), MaterialId::Fire);
        context.spawn_at(20, 60, MaterialId::AcidGenerator);
        for _ in 0..60 {
            context.update();
        }
        context.particles().to_vec()
    };

    assert_eq!(run(true), run(false));
}

#[test]
fn test_same_seed_same_world() {
    let run = |seed: u64| -> Vec<Particle> {
        let mut context =
            SimulationContext::new(WorldConfig::new(32, 32).with_seed(seed)).unwrap();
        context.fill_rect(IVec2::new(8, 10), IVec2::new(24, 20), MaterialId::Water);
        for _ in 0..30 {
            context.update();
        }
        context.particles().to_vec()
    };

    assert_eq!(run(3), run(3));
}

// ============================================================================
// Painting
// ============================================================================

#[test]
fn test_click_paints_a_thirteen_cell_diamond() {
    let mut context = world(200, 200);
    context.queue_input(PointerEvent::click(IVec2::new(100, 100)));

    let report = context.update();

    assert_eq!(report.spawned, 13);
    assert_eq!(context.count_of(MaterialId::Sand), 13);
    for (dy, width) in [(-2, 1), (-1, 3), (0, 5), (1, 3), (2, 1)] {
        let row = context
            .particles()
            .iter()
            .filter(|p| p.coord.y == 100 + dy)
            .count();
        assert_eq!(row, width, "row {dy}");
    }
}

#[test]
fn test_paint_skips_occupied_cells() {
    let mut context = world(200, 200);
    context.spawn_at(100, 100, MaterialId::Stone);
    context.select_material(MaterialId::Wood);
    context.queue_input(PointerEvent::click(IVec2::new(100, 100)));

    let report = context.update();

    assert_eq!(report.spawned, 12);
    assert_eq!(material_at(&context, 100, 100), Some(MaterialId::Stone));
}

#[test]
fn test_held_generator_brush_does_not_paint() {
    let mut context = world(100, 100);
    assert!(context.toggle_generator_mode());
    assert_eq!(context.brush().material(), MaterialId::SandGenerator);

    context.queue_input(PointerEvent::drag(IVec2::new(50, 50)));
    assert_eq!(context.update().spawned, 0);

    context.queue_input(PointerEvent::click(IVec2::new(50, 50)));
    let report = context.update();
    assert_eq!(report.spawned, 5);
    assert_eq!(context.count_of(MaterialId::SandGenerator), 5);
}

#[test]
fn test_pointer_at_i32_limits_is_ignored() {
    let mut context = world(50, 50);
    let before = context.live_count();

    context.queue_input(PointerEvent::click(IVec2::new(i32::MAX, 5)));
    assert_eq!(context.update().spawned, 0);

    context.queue_input(PointerEvent::erase(IVec2::new(i32::MIN, i32::MIN), true));
    assert_eq!(context.update().destroyed, 0);

    assert_eq!(context.live_count(), before);
}

#[test]
fn test_secondary_button_erases() {
    let mut context = world(50, 50);
    context.fill_rect(IVec2::new(10, 10), IVec2::new(30, 30), MaterialId::Stone);
    context.flush_pending();
    let before = context.live_count();

    context.queue_input(PointerEvent::erase(IVec2::new(20, 20), true));
    let report = context.update();

    assert_eq!(report.destroyed, 13);
    assert_eq!(context.live_count(), before - 13);
    assert_eq!(material_at(&context, 20, 20), None);
}

#[test]
fn test_render_commands_track_live_particles() {
    let mut context = SimulationContext::new(WorldConfig::new(40, 40).with_floor_rows(1)).unwrap();
    context.fill_rect(IVec2::new(5, 20), IVec2::new(15, 25), MaterialId::Sand);

    for _ in 0..10 {
        context.update();
        let commands = context.render_commands();
        assert_eq!(commands.len(), context.live_count());
        for (cmd, particle) in commands.iter().zip(context.particles()) {
            assert_eq!((cmd.x, cmd.y), (particle.coord.x, particle.coord.y));
            assert_eq!(cmd.material_id, particle.material.index() as u32);
        }
    }
}

#[test]
fn test_reset_restores_a_fresh_world() {
    let mut context = SimulationContext::new(WorldConfig::new(40, 40).with_floor_rows(5)).unwrap();
    let floor = context.live_count();
    context.fill_rect(IVec2::new(5, 20), IVec2::new(15, 25), MaterialId::Lava);
    for _ in 0..5 {
        context.update();
    }

    context.reset();

    assert_eq!(context.tick(), 0);
    assert_eq!(context.live_count(), floor);
    assert_eq!(context.count_of(MaterialId::Stone), floor);
}
