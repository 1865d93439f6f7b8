//! Ambient Particles - pattern-driven 2D particle field
//!
//! Provides a fixed-size particle field with:
//! - One generator and one update rule per geometric pattern
//! - Deterministic simulation given a seed
//! - Whole-set regeneration on pattern, count or canvas changes

pub mod particle;
pub mod pattern;
pub mod rand;
pub mod system;

pub use particle::Particle;
pub use pattern::EffectPattern;
pub use system::ParticleSystem;
