//! Seedable PRNG wrapper used by particle generators

use ::rand::rngs::SmallRng;
use ::rand::{Rng, SeedableRng};

pub struct ParticleRng {
    inner: SmallRng,
}

impl ParticleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            inner: SmallRng::from_entropy(),
        }
    }

    /// Returns a float in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Returns a float in [min, max). `min == max` returns `min`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Symmetric noise in [-scale/2, scale/2)
    pub fn jitter(&mut self, scale: f32) -> f32 {
        (self.next_f32() - 0.5) * scale
    }
}
