//! RNG trait abstraction for the update engine
//!
//! Every chunk of particles evaluated in a tick owns one of these, seeded
//! from the world seed, the tick number and the chunk number, so a run is
//! reproducible no matter how rayon schedules the chunks.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

/// Random number generator trait for the simulation
pub trait WorldRng {
    /// Generate a uniform integer in [0, n)
    fn gen_below(&mut self, n: u32) -> u32;

    /// A "1-in-n" roll
    fn one_in(&mut self, n: u32) -> bool {
        debug_assert!(n > 0, "one_in(0) has no outcomes");
        self.gen_below(n) == 0
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> WorldRng for T {
    fn gen_below(&mut self, n: u32) -> u32 {
        rand::Rng::gen_range(self, 0..n)
    }
}

const TICK_MIX: u64 = 0x9E37_79B9_7F4A_7C15;
const CHUNK_MIX: u64 = 0xD1B5_4A32_D192_ED03;

/// Deterministic RNG stream for one chunk of one tick
pub fn chunk_rng(seed: u64, tick: u64, chunk: usize) -> Xoshiro256StarStar {
    let stream = seed
        ^ tick.wrapping_add(1).wrapping_mul(TICK_MIX)
        ^ (chunk as u64).wrapping_add(1).wrapping_mul(CHUNK_MIX);
    Xoshiro256StarStar::seed_from_u64(stream)
}
