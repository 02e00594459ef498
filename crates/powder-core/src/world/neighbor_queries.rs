//! Neighbor queries against the tick's frozen spatial index

use glam::IVec2;

use super::spatial_index::SpatialIndex;
use super::world_config::{EdgeMode, WorldConfig};

/// The eight cells around a particle (y grows upward, so Top is y + 1)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    TopLeft,
    TopRight,
    Left,
    Right,
    Bottom,
    BottomLeft,
    BottomRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Top,
        Direction::TopLeft,
        Direction::TopRight,
        Direction::Left,
        Direction::Right,
        Direction::Bottom,
        Direction::BottomLeft,
        Direction::BottomRight,
    ];

    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Top => IVec2::new(0, 1),
            Direction::TopLeft => IVec2::new(-1, 1),
            Direction::TopRight => IVec2::new(1, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
            Direction::Bottom => IVec2::new(0, -1),
            Direction::BottomLeft => IVec2::new(-1, -1),
            Direction::BottomRight => IVec2::new(1, -1),
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// What a neighboring cell holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupancy {
    Empty,
    /// Outside the world with [`EdgeMode::Solid`]
    Boundary,
    /// Index of the occupying particle
    Particle(usize),
}

impl Occupancy {
    pub fn is_empty(self) -> bool {
        self == Occupancy::Empty
    }
}

/// Lazily resolved 8-neighborhood of one particle
///
/// Each direction hits the index at most once; later reads come from the cache.
pub struct Neighborhood<'a> {
    index: &'a SpatialIndex,
    config: &'a WorldConfig,
    center: IVec2,
    cache: [Option<Occupancy>; 8],
}

impl<'a> Neighborhood<'a> {
    pub fn new(index: &'a SpatialIndex, config: &'a WorldConfig, center: IVec2) -> Self {
        Self {
            index,
            config,
            center,
            cache: [None; 8],
        }
    }

    pub fn center(&self) -> IVec2 {
        self.center
    }

    /// Cell coordinate in direction `dir`
    pub fn coord(&self, dir: Direction) -> IVec2 {
        self.center + dir.offset()
    }

    pub fn get(&mut self, dir: Direction) -> Occupancy {
        if let Some(cached) = self.cache[dir.slot()] {
            return cached;
        }
        let resolved = self.resolve(self.coord(dir));
        self.cache[dir.slot()] = Some(resolved);
        resolved
    }

    pub fn is_empty(&mut self, dir: Direction) -> bool {
        self.get(dir).is_empty()
    }

    /// Index of the particle in direction `dir`, if there is one
    pub fn particle(&mut self, dir: Direction) -> Option<usize> {
        match self.get(dir) {
            Occupancy::Particle(index) => Some(index),
            _ => None,
        }
    }

    fn resolve(&self, coord: IVec2) -> Occupancy {
        if let Some(index) = self.index.occupant(coord) {
            return Occupancy::Particle(index);
        }
        if self.config.contains(coord) {
            return Occupancy::Empty;
        }
        match self.config.edge_mode {
            EdgeMode::Solid => Occupancy::Boundary,
            EdgeMode::Open => Occupancy::Empty,
        }
    }
}
