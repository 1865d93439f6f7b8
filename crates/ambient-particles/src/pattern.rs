//! Geometric patterns: particle placement and per-tick motion rules

use crate::particle::Particle;
use crate::rand::ParticleRng;
use ambient_core::Color;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;
use std::fmt;

/// Selects both the particle generator and the update rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum EffectPattern {
    #[default]
    Waves,
    Spiral,
    Burst,
    Orbit,
    Particles,
    Gradients,
    Mesh,
    Aurora,
}

impl EffectPattern {
    pub const ALL: [EffectPattern; 8] = [
        EffectPattern::Waves,
        EffectPattern::Spiral,
        EffectPattern::Burst,
        EffectPattern::Orbit,
        EffectPattern::Particles,
        EffectPattern::Gradients,
        EffectPattern::Mesh,
        EffectPattern::Aurora,
    ];

    /// Parse a pattern name. Unknown names fall back to `Waves`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                log::warn!("[particles] unknown pattern '{name}', using waves");
                EffectPattern::Waves
            })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectPattern::Waves => "waves",
            EffectPattern::Spiral => "spiral",
            EffectPattern::Burst => "burst",
            EffectPattern::Orbit => "orbit",
            EffectPattern::Particles => "particles",
            EffectPattern::Gradients => "gradients",
            EffectPattern::Mesh => "mesh",
            EffectPattern::Aurora => "aurora",
        }
    }

    /// The pattern whose rules actually drive the particles.
    /// Patterns without their own particle rules move like `Waves`.
    pub fn motion(self) -> Self {
        match self {
            EffectPattern::Spiral | EffectPattern::Burst | EffectPattern::Orbit => self,
            _ => EffectPattern::Waves,
        }
    }

    /// Whether particles of this pattern have a finite life
    pub fn is_finite_life(self) -> bool {
        self.motion() == EffectPattern::Burst
    }
}

impl From<String> for EffectPattern {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for EffectPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fraction of a full turn for particle `index` of `count`
fn turn(index: usize, count: usize) -> f32 {
    index as f32 / count.max(1) as f32
}

fn polar(center: Vec2, angle: f32, radius: f32) -> Vec2 {
    center + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Generate particle `index` of `count` around `center`
pub fn spawn(
    pattern: EffectPattern,
    index: usize,
    count: usize,
    center: Vec2,
    rng: &mut ParticleRng,
) -> Particle {
    match pattern.motion() {
        EffectPattern::Spiral => spawn_spiral(index, count, center, rng),
        EffectPattern::Burst => spawn_burst(index, count, center, rng),
        EffectPattern::Orbit => spawn_orbit(index, count, center, rng),
        _ => spawn_wave(index, count, center, rng),
    }
}

fn spawn_wave(index: usize, count: usize, center: Vec2, rng: &mut ParticleRng) -> Particle {
    let angle = turn(index, count) * TAU;
    let radius = rng.range(50.0, 150.0);
    Particle {
        id: index,
        position: polar(center, angle, radius),
        velocity: Vec2::new(rng.jitter(0.5), rng.jitter(0.5)),
        radius: rng.range(2.0, 6.0),
        original_radius: radius,
        opacity: rng.range(0.3, 1.0),
        angle,
        speed: rng.range(0.5, 2.0),
        life: 1.0,
        max_life: 1.0,
        color: Color::from_hsl(rng.range(200.0, 260.0), 0.7, 0.6, 1.0),
    }
}

fn spawn_spiral(index: usize, count: usize, center: Vec2, rng: &mut ParticleRng) -> Particle {
    // four full turns
    let angle = turn(index, count) * TAU * 4.0;
    let radius = turn(index, count) * 120.0;
    Particle {
        id: index,
        position: polar(center, angle, radius),
        velocity: Vec2::ZERO,
        radius: rng.range(1.0, 4.0),
        original_radius: radius,
        opacity: rng.range(0.4, 1.0),
        angle,
        speed: rng.range(1.0, 3.0),
        life: 1.0,
        max_life: 1.0,
        color: Color::from_hsl(rng.range(280.0, 360.0), 0.8, 0.7, 1.0),
    }
}

fn spawn_burst(index: usize, count: usize, center: Vec2, rng: &mut ParticleRng) -> Particle {
    let angle = turn(index, count) * TAU;
    let speed = rng.range(2.0, 5.0);
    Particle {
        id: index,
        position: center,
        velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
        radius: rng.range(1.5, 4.0),
        original_radius: 0.0,
        opacity: rng.range(0.8, 1.0),
        angle,
        speed,
        life: 1.0,
        max_life: 1.0,
        color: Color::from_hsl(rng.range(30.0, 90.0), 0.9, 0.7, 1.0),
    }
}

fn spawn_orbit(index: usize, count: usize, center: Vec2, rng: &mut ParticleRng) -> Particle {
    // three concentric rings
    let radius = 40.0 + (index % 3) as f32 * 30.0;
    let angle = turn(index, count) * TAU;
    Particle {
        id: index,
        position: polar(center, angle, radius),
        velocity: Vec2::ZERO,
        radius: rng.range(2.0, 4.0),
        original_radius: radius,
        opacity: rng.range(0.5, 1.0),
        angle,
        speed: rng.range(0.8, 1.2),
        life: 1.0,
        max_life: 1.0,
        color: Color::from_hsl(rng.range(180.0, 360.0), 0.75, 0.65, 1.0),
    }
}

/// Life lost per millisecond by finite-life particles
pub const LIFE_DECAY_PER_MS: f32 = 0.001;

/// Advance one particle by `dt_ms`. Aging and respawning of finite-life
/// particles is left to the caller, which owns the canvas bounds and the RNG.
pub fn advance(
    pattern: EffectPattern,
    particle: &mut Particle,
    dt_ms: f32,
    intensity: f32,
    center: Vec2,
) {
    match pattern.motion() {
        EffectPattern::Spiral => {
            particle.angle += particle.speed * dt_ms * 0.005 * intensity;
            let radius = particle.original_radius + (particle.angle * 0.5).sin() * 30.0 * intensity;
            particle.position = polar(center, particle.angle, radius);
            particle.opacity = (0.4 + (particle.angle * 1.5).sin() * 0.4) * intensity;
        }
        EffectPattern::Burst => {
            particle.position += particle.velocity * dt_ms * 0.1 * intensity;
            particle.velocity *= 0.98;
        }
        EffectPattern::Orbit => {
            particle.angle += particle.speed * dt_ms * 0.008 * intensity;
            particle.position = polar(center, particle.angle, particle.original_radius);
            particle.opacity = (0.5 + (particle.angle * 4.0).sin() * 0.3) * intensity;
        }
        _ => {
            particle.angle += particle.speed * dt_ms * 0.01 * intensity;
            let amplitude = (particle.angle * 3.0).sin() * 20.0 * intensity;
            particle.position = polar(center, particle.angle, particle.original_radius + amplitude);
            particle.opacity = (0.3 + (particle.angle * 2.0).sin() * 0.3) * intensity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Vec2 = Vec2::new(140.0, 140.0);

    #[test]
    fn lossy_name_parsing() {
        assert_eq!(EffectPattern::from_name("Spiral"), EffectPattern::Spiral);
        assert_eq!(EffectPattern::from_name(" orbit "), EffectPattern::Orbit);
        assert_eq!(EffectPattern::from_name("confetti"), EffectPattern::Waves);
    }

    #[test]
    fn extended_patterns_move_like_waves() {
        for p in [
            EffectPattern::Particles,
            EffectPattern::Gradients,
            EffectPattern::Mesh,
            EffectPattern::Aurora,
        ] {
            assert_eq!(p.motion(), EffectPattern::Waves);
            assert!(!p.is_finite_life());
        }
        assert!(EffectPattern::Burst.is_finite_life());
    }

    #[test]
    fn wave_particles_sit_on_their_radius() {
        let mut rng = ParticleRng::new(1);
        for i in 0..20 {
            let p = spawn(EffectPattern::Waves, i, 20, CENTER, &mut rng);
            assert!((50.0..=150.0).contains(&p.original_radius));
            let dist = p.position.distance(CENTER);
            assert!((dist - p.original_radius).abs() < 1e-3);
            assert!(p.opacity > 0.0 && p.opacity <= 1.0);
            let (hue, _, _) = p.color.to_hsl();
            assert!((199.0..=261.0).contains(&hue));
        }
    }

    #[test]
    fn spiral_makes_four_turns() {
        let mut rng = ParticleRng::new(2);
        let last = spawn(EffectPattern::Spiral, 49, 50, CENTER, &mut rng);
        assert!(last.angle > TAU * 3.0);
        assert!((last.original_radius - 49.0 / 50.0 * 120.0).abs() < 1e-4);
        assert_eq!(last.velocity, Vec2::ZERO);
    }

    #[test]
    fn burst_starts_at_center_with_outward_velocity() {
        let mut rng = ParticleRng::new(3);
        let p = spawn(EffectPattern::Burst, 5, 20, CENTER, &mut rng);
        assert_eq!(p.position, CENTER);
        assert!((2.0..5.0).contains(&p.speed));
        assert!((p.velocity.length() - p.speed).abs() < 1e-4);
        assert_eq!(p.life, 1.0);
        assert_eq!(p.max_life, 1.0);
    }

    #[test]
    fn orbit_uses_three_rings() {
        let mut rng = ParticleRng::new(4);
        let radii: Vec<f32> = (0..6)
            .map(|i| spawn(EffectPattern::Orbit, i, 6, CENTER, &mut rng).original_radius)
            .collect();
        assert_eq!(radii, vec![40.0, 70.0, 100.0, 40.0, 70.0, 100.0]);
    }

    #[test]
    fn orbit_advance_keeps_radius() {
        let mut rng = ParticleRng::new(5);
        let mut p = spawn(EffectPattern::Orbit, 1, 3, CENTER, &mut rng);
        let before = p.angle;
        advance(EffectPattern::Orbit, &mut p, 16.0, 1.0, CENTER);
        assert!(p.angle > before);
        assert!((p.position.distance(CENTER) - 70.0).abs() < 1e-3);
    }

    #[test]
    fn zero_intensity_freezes_and_hides() {
        let mut rng = ParticleRng::new(6);
        let mut p = spawn(EffectPattern::Waves, 0, 1, CENTER, &mut rng);
        let angle = p.angle;
        advance(EffectPattern::Waves, &mut p, 16.0, 0.0, CENTER);
        assert_eq!(p.angle, angle);
        assert_eq!(p.opacity, 0.0);
    }

    #[test]
    fn burst_advance_damps() {
        let mut rng = ParticleRng::new(7);
        let mut p = spawn(EffectPattern::Burst, 0, 4, CENTER, &mut rng);
        let v0 = p.velocity;
        advance(EffectPattern::Burst, &mut p, 16.0, 1.0, CENTER);
        assert!((p.position - (CENTER + v0 * 1.6)).length() < 1e-4);
        assert!((p.velocity - v0 * 0.98).length() < 1e-5);
        assert_eq!(p.life, 1.0);
    }
}
