//! rand-backed random source.
//!
//! `StdRng` so a fixed seed reproduces an entire demo run (price walk and
//! candle volumes included).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ports::random_port::RandomSource;

pub struct RngAdapter {
    rng: StdRng,
}

impl RngAdapter {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        RngAdapter {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic stream for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        RngAdapter {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RngAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for RngAdapter {
    fn next_fraction(&mut self) -> f64 {
        self.rng.gen_range(0.0..1.0)
    }
}
