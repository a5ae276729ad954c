//! Deterministic key-set generation for the bench binary and stress tests.

use clap::ValueEnum;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Shape of the generated key set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KeyDistribution {
    /// Monotonically increasing keys, 0..count.
    Sequential,
    /// Uniform random keys over the full u64 range.
    Uniform,
    /// Random keys drawn from a small range so most inserts are duplicates.
    DuplicateHeavy,
}

/// Seeded key generator; the same seed always yields the same key set.
pub struct DataGenerator {
    rng: ChaCha8Rng,
}

impl DataGenerator {
    /// Create a generator from a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Produce `count` keys following `distribution`.
    pub fn generate_keys(&mut self, count: usize, distribution: KeyDistribution) -> Vec<u64> {
        match distribution {
            KeyDistribution::Sequential => (0..count as u64).collect(),
            KeyDistribution::Uniform => (0..count).map(|_| self.rng.gen()).collect(),
            KeyDistribution::DuplicateHeavy => {
                let span = (count as u64 / 10).max(1);
                (0..count).map(|_| self.rng.gen_range(0..span)).collect()
            }
        }
    }
}
