//! Demo scenes
//!
//! Each scene only queues spawns on top of the floor the world already
//! has, so every scene adapts to the configured world size.

use glam::IVec2;
use powder_core::simulation::MaterialId;
use powder_core::world::SimulationContext;

/// A named scene builder
pub struct SceneDef {
    pub name: &'static str,
    pub description: &'static str,
    pub build: fn(&mut SimulationContext),
}

pub const SCENES: &[SceneDef] = &[
    SceneDef {
        name: "floor",
        description: "Just the stone floor",
        build: build_floor,
    },
    SceneDef {
        name: "hourglass",
        description: "A block of sand pouring through a stone funnel",
        build: build_hourglass,
    },
    SceneDef {
        name: "inferno",
        description: "A wooden tower set alight from below",
        build: build_inferno,
    },
    SceneDef {
        name: "lava-meets-water",
        description: "A lava pool and a water pool separated by a crumbling wall",
        build: build_lava_meets_water,
    },
    SceneDef {
        name: "acid-bath",
        description: "Acid poured over stone pillars inside a glass tank",
        build: build_acid_bath,
    },
    SceneDef {
        name: "generators",
        description: "One generator of every kind hanging below the ceiling",
        build: build_generators,
    },
];

/// Look a scene up by name (case-insensitive)
pub fn find(name: &str) -> Option<&'static SceneDef> {
    SCENES.iter().find(|scene| scene.name.eq_ignore_ascii_case(name))
}

pub fn list_scenes() {
    println!("Available scenes:");
    println!();
    for scene in SCENES {
        println!("  {:<18} {}", scene.name, scene.description);
    }
}

/// First free row above the floor
fn ground(context: &SimulationContext) -> i32 {
    context.config().floor_rows
}

fn build_floor(_context: &mut SimulationContext) {}

fn build_hourglass(context: &mut SimulationContext) {
    let (w, h) = (context.config().width, context.config().height);
    let cx = w / 2;
    let neck = h / 2;
    let half = (w / 4).max(2);

    // Two stone ramps meeting at a two-cell gap
    for i in 0..half {
        let y = neck + i;
        context.spawn_at(cx - 2 - i, y, MaterialId::Stone);
        context.spawn_at(cx + 1 + i, y, MaterialId::Stone);
    }

    let top = (neck + half + 2).min(h - 2);
    let sand_top = (top + h / 8).min(h - 1);
    context.fill_rect(
        IVec2::new(cx - half / 2, top),
        IVec2::new(cx + half / 2, sand_top),
        MaterialId::Sand,
    );
}

fn build_inferno(context: &mut SimulationContext) {
    let w = context.config().width;
    let base = ground(context);
    let cx = w / 2;
    let half = (w / 10).max(2);

    context.fill_rect(
        IVec2::new(cx - half, base),
        IVec2::new(cx + half, base),
        MaterialId::Fire,
    );
    context.fill_rect(
        IVec2::new(cx - half, base + 1),
        IVec2::new(cx + half, base + half * 3),
        MaterialId::Wood,
    );
    // Sand cap that will fuse into glass
    context.fill_rect(
        IVec2::new(cx - half, base + half * 3 + 1),
        IVec2::new(cx + half, base + half * 3 + 2),
        MaterialId::Sand,
    );
}

fn build_lava_meets_water(context: &mut SimulationContext) {
    let (w, h) = (context.config().width, context.config().height);
    let base = ground(context);
    let cx = w / 2;
    let depth = (h / 4).max(2);

    context.fill_rect(
        IVec2::new(w / 8, base),
        IVec2::new(cx - 2, base + depth),
        MaterialId::Lava,
    );
    context.fill_rect(
        IVec2::new(cx + 2, base),
        IVec2::new(w - w / 8, base + depth),
        MaterialId::Water,
    );
    // A wood wall the lava burns through
    context.fill_rect(
        IVec2::new(cx - 1, base),
        IVec2::new(cx + 1, base + depth + 2),
        MaterialId::Wood,
    );
}

fn build_acid_bath(context: &mut SimulationContext) {
    let (w, h) = (context.config().width, context.config().height);
    let base = ground(context);
    let left = w / 6;
    let right = w - w / 6;
    let rim = base + h / 3;

    // Glass tank acid cannot eat through
    context.fill_rect(IVec2::new(left, base), IVec2::new(left, rim), MaterialId::Glass);
    context.fill_rect(IVec2::new(right, base), IVec2::new(right, rim), MaterialId::Glass);

    let pillar_top = base + h / 5;
    for x in ((left + 4)..(right - 3)).step_by(8) {
        context.fill_rect(
            IVec2::new(x, base),
            IVec2::new(x + 1, pillar_top),
            MaterialId::Stone,
        );
    }

    context.fill_rect(
        IVec2::new(left + 2, rim - 4),
        IVec2::new(right - 2, rim),
        MaterialId::Acid,
    );
}

fn build_generators(context: &mut SimulationContext) {
    let (w, h) = (context.config().width, context.config().height);
    let generators: Vec<MaterialId> = context
        .materials()
        .iter()
        .filter(|def| def.is_generator())
        .map(|def| def.id)
        .collect();

    let spacing = w / (generators.len() as i32 + 1);
    let y = h - h / 6;
    for (i, generator) in generators.into_iter().enumerate() {
        let x = spacing * (i as i32 + 1);
        context.fill_rect(IVec2::new(x - 1, y), IVec2::new(x + 1, y), generator);
    }
}
