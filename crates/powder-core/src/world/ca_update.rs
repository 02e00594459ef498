//! Cellular automata update logic - material movement physics
//!
//! Every rule only picks a direction; the caller turns it into a mutation.
//! Rolls come before the neighbor reads they guard, so a cell that is never
//! needed is never looked up.

use crate::simulation::MaterialType;
use crate::world::WorldRng;
use crate::world::neighbor_queries::{Direction, Neighborhood};

/// Cellular automata updater - picks where a particle moves this tick
pub struct CellularAutomataUpdater;

impl CellularAutomataUpdater {
    /// Dispatch on state of matter
    pub fn step<R: WorldRng>(
        material_type: MaterialType,
        hood: &mut Neighborhood<'_>,
        rng: &mut R,
    ) -> Option<Direction> {
        match material_type {
            MaterialType::Solid => None,
            MaterialType::Powder => Self::update_powder(hood, rng),
            MaterialType::Liquid => Self::update_liquid(hood, rng),
            MaterialType::Gas => Self::update_gas(hood, rng),
        }
    }

    /// Update gas (rises, drifts diagonally)
    pub fn update_gas<R: WorldRng>(
        hood: &mut Neighborhood<'_>,
        rng: &mut R,
    ) -> Option<Direction> {
        use Direction::*;

        if hood.is_empty(Top) {
            if rng.one_in(3) && hood.is_empty(TopLeft) {
                return Some(TopLeft);
            }
            if rng.one_in(3) && hood.is_empty(TopRight) {
                return Some(TopRight);
            }
            return Some(Top);
        }

        if hood.is_empty(TopLeft) {
            Some(TopLeft)
        } else if hood.is_empty(TopRight) {
            Some(TopRight)
        } else {
            None
        }
    }

    /// Update liquid (falls, spreads diagonally, then slides sideways)
    pub fn update_liquid<R: WorldRng>(
        hood: &mut Neighborhood<'_>,
        rng: &mut R,
    ) -> Option<Direction> {
        use Direction::*;

        if let Some(dir) = Self::fall(hood, rng, 5) {
            return Some(dir);
        }

        // Nowhere lower to go, flow to the side
        if rng.one_in(2) && hood.is_empty(Left) {
            Some(Left)
        } else if rng.one_in(2) && hood.is_empty(Right) {
            Some(Right)
        } else {
            None
        }
    }

    /// Update powder (falls, piles up)
    pub fn update_powder<R: WorldRng>(
        hood: &mut Neighborhood<'_>,
        rng: &mut R,
    ) -> Option<Direction> {
        use Direction::*;

        if hood.is_empty(Bottom) {
            if rng.one_in(3) {
                let diagonal = if rng.one_in(2) { BottomRight } else { BottomLeft };
                if hood.is_empty(diagonal) {
                    return Some(diagonal);
                }
            }
            return Some(Bottom);
        }

        if hood.is_empty(BottomLeft) {
            Some(BottomLeft)
        } else if hood.is_empty(BottomRight) {
            Some(BottomRight)
        } else {
            None
        }
    }

    /// Downward step for liquids. `diagonal_odds` is the 1-in-n chance of
    /// drifting diagonally while the cell below is free.
    fn fall<R: WorldRng>(
        hood: &mut Neighborhood<'_>,
        rng: &mut R,
        diagonal_odds: u32,
    ) -> Option<Direction> {
        use Direction::*;

        if hood.is_empty(Bottom) {
            if rng.one_in(diagonal_odds) {
                let diagonal = if rng.one_in(2) { BottomRight } else { BottomLeft };
                if hood.is_empty(diagonal) {
                    return Some(diagonal);
                }
            }
            return Some(Bottom);
        }

        match (hood.is_empty(BottomLeft), hood.is_empty(BottomRight)) {
            (true, true) => Some(if rng.one_in(2) { BottomRight } else { BottomLeft }),
            (true, false) => Some(BottomLeft),
            (false, true) => Some(BottomRight),
            (false, false) => None,
        }
    }
}
