//! Random source for spawn choices and difficulty gates
//!
//! Sessions take any `RandomSource`; the default is a seeded PCG so a run
//! replays identically for the same seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Orientation, Side};

pub trait RandomSource {
    /// True with the given probability (0..=1)
    fn chance(&mut self, probability: f32) -> bool;

    /// Uniform value in `min..=max`
    fn range(&mut self, min: f32, max: f32) -> f32;

    /// Return to the initial state, called on session reset
    fn reseed(&mut self) {}

    fn side(&mut self) -> Side {
        if self.chance(0.5) { Side::Left } else { Side::Right }
    }

    fn orientation(&mut self) -> Orientation {
        if self.chance(0.5) {
            Orientation::Up
        } else {
            Orientation::Down
        }
    }
}

/// PCG-backed source, reseedable for session resets
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn chance(&mut self, probability: f32) -> bool {
        self.rng.random_bool(probability.clamp(0.0, 1.0) as f64)
    }

    fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn reseed(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
    }
}
