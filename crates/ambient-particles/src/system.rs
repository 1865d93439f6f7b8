//! The particle field and its lifecycle

use crate::particle::Particle;
use crate::pattern::{self, EffectPattern};
use crate::rand::ParticleRng;
use glam::Vec2;

pub const MIN_PARTICLES: usize = 1;
pub const MAX_PARTICLES: usize = 200;

/// A fixed-size field of particles animated by one [`EffectPattern`].
///
/// Particle data exists whether or not the system is running. Pattern,
/// count and canvas changes discard and regenerate every particle.
/// After [`dispose`](Self::dispose) every operation is a logged no-op.
pub struct ParticleSystem {
    particles: Vec<Particle>,
    particle_count: usize,
    width: f32,
    height: f32,
    pattern: EffectPattern,
    running: bool,
    disposed: bool,
    rng: ParticleRng,
}

impl ParticleSystem {
    /// Create a field of exactly `count` particles. The count is taken as given.
    pub fn new(count: usize, width: f32, height: f32, pattern: EffectPattern) -> Self {
        Self::with_rng(count, width, height, pattern, ParticleRng::from_entropy())
    }

    /// Like [`new`](Self::new), with a reproducible RNG
    pub fn with_seed(
        count: usize,
        width: f32,
        height: f32,
        pattern: EffectPattern,
        seed: u64,
    ) -> Self {
        Self::with_rng(count, width, height, pattern, ParticleRng::new(seed))
    }

    fn with_rng(
        count: usize,
        width: f32,
        height: f32,
        pattern: EffectPattern,
        rng: ParticleRng,
    ) -> Self {
        let mut system = Self {
            particles: Vec::with_capacity(count),
            particle_count: count,
            width,
            height,
            pattern,
            running: false,
            disposed: false,
            rng,
        };
        system.regenerate();
        system
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn pattern(&self) -> EffectPattern {
        self.pattern
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Read-only view of the current frame's particles
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn start(&mut self) {
        if self.check_disposed("start") {
            return;
        }
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance every particle by `delta_ms`, scaled by `intensity`
    pub fn update(&mut self, delta_ms: f32, intensity: f32) {
        if self.check_disposed("update") {
            return;
        }
        let center = self.center();
        let count = self.particle_count;

        for i in 0..self.particles.len() {
            pattern::advance(self.pattern, &mut self.particles[i], delta_ms, intensity, center);
            if !self.pattern.is_finite_life() {
                continue;
            }

            // out of bounds respawns first, then the fresh particle ages this tick too
            let id = self.particles[i].id;
            if !self.particles[i].is_inside(self.width, self.height) {
                self.particles[i] = pattern::spawn(self.pattern, id, count, center, &mut self.rng);
            }
            self.particles[i].life -= delta_ms * pattern::LIFE_DECAY_PER_MS;
            if self.particles[i].life <= 0.0 {
                self.particles[i] = pattern::spawn(self.pattern, id, count, center, &mut self.rng);
            }
        }
    }

    /// Switch pattern, regenerating the whole field
    pub fn set_pattern(&mut self, pattern: EffectPattern) {
        if self.check_disposed("set_pattern") {
            return;
        }
        self.pattern = pattern;
        self.regenerate();
    }

    /// Resize the field to `count` clamped to [1, 200], regenerating it
    pub fn set_particle_count(&mut self, count: usize) {
        if self.check_disposed("set_particle_count") {
            return;
        }
        self.particle_count = count.clamp(MIN_PARTICLES, MAX_PARTICLES);
        self.regenerate();
    }

    /// Change the canvas, regenerating the field around the new center
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.check_disposed("resize") {
            return;
        }
        self.width = width;
        self.height = height;
        self.regenerate();
    }

    /// Stop and drop all particles. Terminal.
    pub fn dispose(&mut self) {
        self.stop();
        self.particles = Vec::new();
        self.disposed = true;
    }

    fn regenerate(&mut self) {
        let center = self.center();
        let count = self.particle_count;
        self.particles.clear();
        for i in 0..count {
            self.particles
                .push(pattern::spawn(self.pattern, i, count, center, &mut self.rng));
        }
        log::debug!(
            "[particles] generated {} {} particles on {}x{}",
            count,
            self.pattern,
            self.width,
            self.height
        );
    }

    fn check_disposed(&self, op: &str) -> bool {
        if self.disposed {
            log::warn!("[particles] {op} called on a disposed particle system");
        }
        self.disposed
    }
}
