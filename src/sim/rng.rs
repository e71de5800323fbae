//! Session-scoped random number generator
//!
//! One instance per session, owned by [`GameState`](super::GameState) and lent
//! to entities during their create phase and to the session's own spawn logic.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random source with the ranges the simulation asks for
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u64,
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed drawn from the thread RNG (reproducibility is not required)
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in [lo, hi]; returns `lo` for an empty range
    pub fn float_in_range(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    /// Uniform float in [0, max)
    pub fn float_less_than(&mut self, max: f32) -> f32 {
        if max <= 0.0 {
            return 0.0;
        }
        self.rng.random_range(0.0..max)
    }

    /// Uniform integer in [lo, hi] (inclusive)
    pub fn int_in_range(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    /// Uniform integer in [0, max)
    pub fn int_less_than(&mut self, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        self.rng.random_range(0..max)
    }

    pub fn fifty_fifty(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}
