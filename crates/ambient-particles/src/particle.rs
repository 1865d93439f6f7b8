//! Particle simulation state

use ambient_core::Color;
use glam::Vec2;

/// One particle of the field.
///
/// `id` is the particle's index in the field. It survives in-place
/// regeneration (burst respawn) but not a full regeneration of the set.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Draw radius
    pub radius: f32,
    /// Pattern-defined baseline distance from the canvas center
    pub original_radius: f32,
    pub opacity: f32,
    /// Polar angle around the canvas center, radians
    pub angle: f32,
    pub speed: f32,
    /// Remaining life, only decremented by finite-life patterns
    pub life: f32,
    pub max_life: f32,
    pub color: Color,
}

impl Particle {
    /// Whether the particle lies inside a `width` x `height` canvas
    pub fn is_inside(&self, width: f32, height: f32) -> bool {
        self.position.x >= 0.0
            && self.position.x <= width
            && self.position.y >= 0.0
            && self.position.y <= height
    }
}
