//! Chemistry system - material-specific reactions with neighbors
//!
//! Reactions read the same frozen neighborhood as movement and only ever
//! schedule mutations; nothing changes until the log is applied.

use crate::simulation::{MaterialId, MaterialType, Materials, Particle};
use crate::world::WorldRng;
use crate::world::mutation_log::MutationLog;
use crate::world::neighbor_queries::{Direction, Neighborhood};

/// Materials acid cannot dissolve
const ACID_PROOF: [MaterialId; 5] = [
    MaterialId::Acid,
    MaterialId::Fire,
    MaterialId::Water,
    MaterialId::Glass,
    MaterialId::Lava,
];

/// Materials lava does not burn through
const LAVA_PROOF: [MaterialId; 3] = [MaterialId::Fire, MaterialId::Lava, MaterialId::Stone];

/// Handles chemistry: dissolving, burning, condensing and generators
pub struct ChemistrySystem;

impl ChemistrySystem {
    /// Schedule the reactions of `particles[index]` and return how many were scheduled
    pub fn react<R: WorldRng>(
        index: usize,
        particles: &[Particle],
        hood: &mut Neighborhood<'_>,
        materials: &Materials,
        log: &mut MutationLog,
        rng: &mut R,
    ) -> usize {
        let Some(particle) = particles.get(index) else {
            return 0;
        };

        match particle.material {
            MaterialId::Acid => Self::update_acid(particles, hood, log),
            MaterialId::Fire => Self::update_fire(particles, hood, materials, log, rng),
            MaterialId::Water => Self::update_water(index, particles, hood, log),
            MaterialId::Steam => Self::update_steam(index, particles, hood, log),
            MaterialId::Lava => Self::update_lava(particles, hood, log),
            material => match materials.generated_material(material) {
                Some(generated) => Self::update_generator(generated, hood, materials, log),
                None => 0,
            },
        }
    }

    /// Neighbor in `dir` as (index, material)
    fn neighbor(
        particles: &[Particle],
        hood: &mut Neighborhood<'_>,
        dir: Direction,
    ) -> Option<(usize, MaterialId)> {
        let index = hood.particle(dir)?;
        particles.get(index).map(|p| (index, p.material))
    }

    fn update_acid(
        particles: &[Particle],
        hood: &mut Neighborhood<'_>,
        log: &mut MutationLog,
    ) -> usize {
        let mut reactions = 0;
        for dir in [Direction::Left, Direction::Right, Direction::Bottom] {
            if let Some((target, material)) = Self::neighbor(particles, hood, dir)
                && !ACID_PROOF.contains(&material)
            {
                log.destroy(target);
                reactions += 1;
            }
        }
        reactions
    }

    /// Fire burns wood above it and fuses sand above it into glass
    fn update_fire<R: WorldRng>(
        particles: &[Particle],
        hood: &mut Neighborhood<'_>,
        materials: &Materials,
        log: &mut MutationLog,
        rng: &mut R,
    ) -> usize {
        let Some((target, material)) = Self::neighbor(particles, hood, Direction::Top) else {
            return 0;
        };

        let product = match material {
            MaterialId::Wood if rng.one_in(2) => MaterialId::Fire,
            MaterialId::Wood => MaterialId::Steam,
            MaterialId::Sand => MaterialId::Glass,
            _ => return 0,
        };

        log.destroy(target);
        log.spawn(materials.create(product, hood.coord(Direction::Top)));
        1
    }

    fn update_water(
        index: usize,
        particles: &[Particle],
        hood: &mut Neighborhood<'_>,
        log: &mut MutationLog,
    ) -> usize {
        match Self::neighbor(particles, hood, Direction::Bottom) {
            Some((target, MaterialId::Fire | MaterialId::Steam)) => {
                log.destroy(target);
                1
            }
            Some((_, MaterialId::Lava)) => {
                log.transform(index, MaterialId::Steam);
                1
            }
            _ => 0,
        }
    }

    /// Steam condenses against stone above it
    fn update_steam(
        index: usize,
        particles: &[Particle],
        hood: &mut Neighborhood<'_>,
        log: &mut MutationLog,
    ) -> usize {
        match Self::neighbor(particles, hood, Direction::Top) {
            Some((_, MaterialId::Stone)) => {
                log.transform(index, MaterialId::Water);
                1
            }
            _ => 0,
        }
    }

    fn update_lava(
        particles: &[Particle],
        hood: &mut Neighborhood<'_>,
        log: &mut MutationLog,
    ) -> usize {
        match Self::neighbor(particles, hood, Direction::Bottom) {
            Some((target, material)) if !LAVA_PROOF.contains(&material) => {
                log.destroy(target);
                1
            }
            _ => 0,
        }
    }

    /// Falling materials are emitted above the generator, everything else below
    fn update_generator(
        generated: MaterialId,
        hood: &mut Neighborhood<'_>,
        materials: &Materials,
        log: &mut MutationLog,
    ) -> usize {
        let dir = match materials.get(generated).material_type {
            MaterialType::Liquid | MaterialType::Powder => Direction::Top,
            MaterialType::Gas | MaterialType::Solid => Direction::Bottom,
        };

        if !hood.is_empty(dir) {
            return 0;
        }
        log.spawn(materials.create(generated, hood.coord(dir)));
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::INFINITE_LIFE;
    use crate::world::mutation_log::Mutation;
    use crate::world::spatial_index::SpatialIndex;
    use crate::world::world_config::WorldConfig;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256StarStar;

    fn particle(material: MaterialId, x: i32, y: i32) -> Particle {
        Particle::new(IVec2::new(x, y), material, INFINITE_LIFE)
    }

    /// React the first particle in `particles` and return the scheduled ops
    fn react(particles: &[Particle]) -> Vec<Mutation> {
        let index = SpatialIndex::build(particles);
        let config = WorldConfig::new(20, 20);
        let materials = Materials::new();
        let mut hood = Neighborhood::new(&index, &config, particles[0].coord);
        let mut log = MutationLog::new();
        let mut rng = Xoshiro256StarStar::seed_from_u64(1);

        let reactions =
            ChemistrySystem::react(0, particles, &mut hood, &materials, &mut log, &mut rng);
        let ops: Vec<Mutation> = log.iter().copied().collect();
        assert!(reactions <= ops.len());
        ops
    }

    #[test]
    fn test_acid_dissolves_stone_on_three_sides() {
        let ops = react(&[
            particle(MaterialId::Acid, 5, 5),
            particle(MaterialId::Stone, 4, 5),
            particle(MaterialId::Stone, 6, 5),
            particle(MaterialId::Stone, 5, 4),
            particle(MaterialId::Stone, 5, 6),
        ]);
        assert_eq!(
            ops,
            vec![Mutation::Destroy(1), Mutation::Destroy(2), Mutation::Destroy(3)]
        );
    }

    #[test]
    fn test_acid_spares_resistant_materials() {
        for material in ACID_PROOF {
            let ops = react(&[
                particle(MaterialId::Acid, 5, 5),
                particle(material, 4, 5),
                particle(material, 6, 5),
                particle(material, 5, 4),
            ]);
            assert!(ops.is_empty(), "acid dissolved {material:?}");
        }
    }

    #[test]
    fn test_fire_fuses_sand_into_glass() {
        let ops = react(&[particle(MaterialId::Fire, 5, 5), particle(MaterialId::Sand, 5, 6)]);
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0], Mutation::Destroy(1));
        match ops[1] {
            Mutation::Spawn(p) => {
                assert_eq!(p.material, MaterialId::Glass);
                assert_eq!(p.coord, IVec2::new(5, 6));
            }
            other => panic!("expected spawn, got {other:?}"),
        }
    }

    #[test]
    fn test_fire_burns_wood() {
        let ops = react(&[particle(MaterialId::Fire, 5, 5), particle(MaterialId::Wood, 5, 6)]);
        assert_eq!(ops[0], Mutation::Destroy(1));
        match ops[1] {
            Mutation::Spawn(p) => {
                assert!(matches!(p.material, MaterialId::Fire | MaterialId::Steam));
                assert_eq!(p.coord, IVec2::new(5, 6));
            }
            other => panic!("expected spawn, got {other:?}"),
        }
    }

    #[test]
    fn test_fire_ignores_stone() {
        let ops = react(&[particle(MaterialId::Fire, 5, 5), particle(MaterialId::Stone, 5, 6)]);
        assert!(ops.is_empty());
    }

    #[test]
    fn test_water_quenches_fire_below() {
        let ops = react(&[particle(MaterialId::Water, 5, 5), particle(MaterialId::Fire, 5, 4)]);
        assert_eq!(ops, vec![Mutation::Destroy(1)]);
    }

    #[test]
    fn test_water_absorbs_steam_below() {
        let ops = react(&[particle(MaterialId::Water, 5, 5), particle(MaterialId::Steam, 5, 4)]);
        assert_eq!(ops, vec![Mutation::Destroy(1)]);
    }

    #[test]
    fn test_water_ignores_steam_beside_it() {
        let ops = react(&[particle(MaterialId::Water, 5, 5), particle(MaterialId::Steam, 6, 5)]);
        assert!(ops.is_empty());
    }

    #[test]
    fn test_water_boils_over_lava() {
        let ops = react(&[particle(MaterialId::Water, 5, 5), particle(MaterialId::Lava, 5, 4)]);
        assert_eq!(
            ops,
            vec![Mutation::Transform {
                index: 0,
                material: MaterialId::Steam
            }]
        );
    }

    #[test]
    fn test_steam_condenses_under_stone() {
        let ops = react(&[particle(MaterialId::Steam, 5, 5), particle(MaterialId::Stone, 5, 6)]);
        assert_eq!(
            ops,
            vec![Mutation::Transform {
                index: 0,
                material: MaterialId::Water
            }]
        );
    }

    #[test]
    fn test_lava_burns_what_is_below() {
        let ops = react(&[particle(MaterialId::Lava, 5, 5), particle(MaterialId::Wood, 5, 4)]);
        assert_eq!(ops, vec![Mutation::Destroy(1)]);

        for material in LAVA_PROOF {
            let ops = react(&[particle(MaterialId::Lava, 5, 5), particle(material, 5, 4)]);
            assert!(ops.is_empty(), "lava burned {material:?}");
        }
    }

    #[test]
    fn test_sand_generator_emits_above() {
        let ops = react(&[particle(MaterialId::SandGenerator, 5, 5)]);
        assert_eq!(ops.len(), 1);
        match ops[0] {
            Mutation::Spawn(p) => {
                assert_eq!(p.material, MaterialId::Sand);
                assert_eq!(p.coord, IVec2::new(5, 6));
            }
            other => panic!("expected spawn, got {other:?}"),
        }
    }

    #[test]
    fn test_smoke_generator_emits_below() {
        let ops = react(&[particle(MaterialId::SmokeGenerator, 5, 5)]);
        match ops[..] {
            [Mutation::Spawn(p)] => {
                assert_eq!(p.material, MaterialId::Smoke);
                assert_eq!(p.coord, IVec2::new(5, 4));
            }
            _ => panic!("expected one spawn, got {ops:?}"),
        }
    }

    #[test]
    fn test_generator_never_spawns_into_occupied_cell() {
        let ops = react(&[
            particle(MaterialId::SandGenerator, 5, 5),
            particle(MaterialId::Stone, 5, 6),
        ]);
        assert!(ops.is_empty());
    }

    #[test]
    fn test_inert_materials_do_nothing() {
        for material in [MaterialId::Sand, MaterialId::Stone, MaterialId::Glass, MaterialId::Smoke] {
            let ops = react(&[particle(material, 5, 5), particle(MaterialId::Wood, 5, 4)]);
            assert!(ops.is_empty());
        }
    }
}
