//! Material definitions and registry

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::particle::{FIRE_LIFE, INFINITE_LIFE, Particle, SMOKE_LIFE, STEAM_LIFE};

/// Built-in materials
///
/// The discriminant is the material's index in the registry table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum MaterialId {
    Void = 0,
    Sand = 1,
    Fire = 2,
    Water = 3,
    Stone = 4,
    Smoke = 5,
    Steam = 6,
    Acid = 7,
    Glass = 8,
    Wood = 9,
    Lava = 10,

    // Generators (one per generatable material)
    SandGenerator = 11,
    FireGenerator = 12,
    WaterGenerator = 13,
    SmokeGenerator = 14,
    SteamGenerator = 15,
    AcidGenerator = 16,
    LavaGenerator = 17,
}

impl MaterialId {
    /// Number of material ids
    pub const COUNT: usize = 18;

    /// Every material, in index order
    pub const ALL: [MaterialId; Self::COUNT] = [
        MaterialId::Void,
        MaterialId::Sand,
        MaterialId::Fire,
        MaterialId::Water,
        MaterialId::Stone,
        MaterialId::Smoke,
        MaterialId::Steam,
        MaterialId::Acid,
        MaterialId::Glass,
        MaterialId::Wood,
        MaterialId::Lava,
        MaterialId::SandGenerator,
        MaterialId::FireGenerator,
        MaterialId::WaterGenerator,
        MaterialId::SmokeGenerator,
        MaterialId::SteamGenerator,
        MaterialId::AcidGenerator,
        MaterialId::LavaGenerator,
    ];

    /// Get the material index
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Convert from material index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }
}

/// How a material behaves physically
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialType {
    /// Doesn't move (stone, wood, glass, generators)
    Solid,
    /// Falls, piles up (sand)
    Powder,
    /// Flows, seeks level (water, acid, lava)
    Liquid,
    /// Rises, disperses (fire, smoke, steam)
    Gas,
}

/// Definition of a material's properties
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialDef {
    pub id: MaterialId,
    pub name: &'static str,
    pub material_type: MaterialType,

    /// Base color (RGBA)
    pub color: [u8; 4],

    /// Life of a freshly created particle, or [`INFINITE_LIFE`]
    pub life_span: i32,

    /// What a generator cell emits each tick (generators only)
    pub generates: Option<MaterialId>,
}

impl Default for MaterialDef {
    fn default() -> Self {
        Self {
            id: MaterialId::Void,
            name: "unknown",
            material_type: MaterialType::Solid,
            color: [255, 0, 255, 255], // Magenta for missing materials
            life_span: INFINITE_LIFE,
            generates: None,
        }
    }
}

impl MaterialDef {
    /// Create a fresh particle of this material at `coord`
    pub fn create(&self, coord: IVec2) -> Particle {
        Particle::new(coord, self.id, self.life_span)
    }

    pub fn is_generator(&self) -> bool {
        self.generates.is_some()
    }
}

/// Registry of all materials
#[derive(Clone, Debug)]
pub struct Materials {
    materials: Vec<MaterialDef>,
}

impl Materials {
    pub fn new() -> Self {
        let mut materials = Self {
            materials: Vec::with_capacity(MaterialId::COUNT),
        };
        materials.register_defaults();
        log::debug!("Registered {} materials", materials.materials.len());
        materials
    }

    fn register_defaults(&mut self) {
        // Void - never simulated, marks "nothing selected"
        self.register(MaterialDef {
            id: MaterialId::Void,
            name: "void",
            color: [0, 0, 0, 0],
            ..Default::default()
        });

        // POWDERS

        self.register(MaterialDef {
            id: MaterialId::Sand,
            name: "sand",
            material_type: MaterialType::Powder,
            color: [0xee, 0xee, 0x10, 255],
            ..Default::default()
        });

        // GASES

        // Fire burns out, which is what ends a fire in an empty room
        self.register(MaterialDef {
            id: MaterialId::Fire,
            name: "fire",
            material_type: MaterialType::Gas,
            color: [0xff, 0x00, 0x00, 255],
            life_span: FIRE_LIFE,
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Smoke,
            name: "smoke",
            material_type: MaterialType::Gas,
            color: [0x87, 0x87, 0x87, 255],
            life_span: SMOKE_LIFE,
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Steam,
            name: "steam",
            material_type: MaterialType::Gas,
            color: [0xe3, 0xe3, 0xe3, 255],
            life_span: STEAM_LIFE,
            ..Default::default()
        });

        // LIQUIDS

        self.register(MaterialDef {
            id: MaterialId::Water,
            name: "water",
            material_type: MaterialType::Liquid,
            color: [0x00, 0x00, 0xff, 255],
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Acid,
            name: "acid",
            material_type: MaterialType::Liquid,
            color: [0xff, 0x33, 0xee, 255],
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Lava,
            name: "lava",
            material_type: MaterialType::Liquid,
            color: [0xf5, 0x6e, 0x28, 255],
            ..Default::default()
        });

        // SOLIDS

        self.register(MaterialDef {
            id: MaterialId::Stone,
            name: "stone",
            color: [0x7f, 0x7f, 0x7f, 255],
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Glass,
            name: "glass",
            color: [0x40, 0x40, 0x40, 255],
            ..Default::default()
        });

        self.register(MaterialDef {
            id: MaterialId::Wood,
            name: "wood",
            color: [0xbf, 0x9c, 0x1d, 255],
            ..Default::default()
        });

        // GENERATORS - solid, immortal, emit their target every tick

        self.register_generator(MaterialId::SandGenerator, "sand_generator", MaterialId::Sand);
        self.register_generator(MaterialId::FireGenerator, "fire_generator", MaterialId::Fire);
        self.register_generator(
            MaterialId::WaterGenerator,
            "water_generator",
            MaterialId::Water,
        );
        self.register_generator(
            MaterialId::SmokeGenerator,
            "smoke_generator",
            MaterialId::Smoke,
        );
        self.register_generator(
            MaterialId::SteamGenerator,
            "steam_generator",
            MaterialId::Steam,
        );
        self.register_generator(MaterialId::AcidGenerator, "acid_generator", MaterialId::Acid);
        self.register_generator(MaterialId::LavaGenerator, "lava_generator", MaterialId::Lava);
    }

    /// Generators are drawn in a darkened shade of what they emit
    fn register_generator(&mut self, id: MaterialId, name: &'static str, generates: MaterialId) {
        let [r, g, b, a] = self.get(generates).color;
        self.register(MaterialDef {
            id,
            name,
            color: [r / 2, g / 2, b / 2, a],
            generates: Some(generates),
            ..Default::default()
        });
    }

    fn register(&mut self, material: MaterialDef) {
        let id = material.id.index() as usize;

        // Ensure vec is large enough
        if self.materials.len() <= id {
            self.materials.resize(id + 1, MaterialDef::default());
        }

        self.materials[id] = material;
    }

    /// Get material definition by ID
    ///
    /// `new` registers every [`MaterialId`], so the table covers each index.
    pub fn get(&self, id: MaterialId) -> &MaterialDef {
        &self.materials[id.index() as usize]
    }

    /// Get color for a material
    pub fn get_color(&self, id: MaterialId) -> [u8; 4] {
        self.get(id).color
    }

    /// Create a fresh particle of `id` at `coord` using the material's life span
    pub fn create(&self, id: MaterialId, coord: IVec2) -> Particle {
        self.get(id).create(coord)
    }

    pub fn is_generator(&self, id: MaterialId) -> bool {
        self.get(id).is_generator()
    }

    /// Material emitted by a generator (None for non-generators)
    pub fn generated_material(&self, id: MaterialId) -> Option<MaterialId> {
        self.get(id).generates
    }

    /// Find the first generator that emits `material`
    pub fn find_generator_for(&self, material: MaterialId) -> Option<MaterialId> {
        self.materials
            .iter()
            .find(|def| def.generates == Some(material))
            .map(|def| def.id)
    }

    /// Look up a material by its registry name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<MaterialId> {
        self.materials
            .iter()
            .find(|def| def.name.eq_ignore_ascii_case(name))
            .map(|def| def.id)
    }

    /// Iterate over every registered material
    pub fn iter(&self) -> impl Iterator<Item = &MaterialDef> {
        self.materials.iter()
    }
}

impl Default for Materials {
    fn default() -> Self {
        Self::new()
    }
}
