//! Per-frame draw list handed to the rasterizing collaborator

use crate::quality::QualitySettings;
use ambient_core::Color;
use ambient_particles::Particle;
use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Only every n-th particle gets a glow halo
pub const GLOW_SAMPLE_STRIDE: usize = 3;
pub const GLOW_RADIUS_SCALE: f32 = 3.0;
pub const GLOW_ALPHA: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawLayer {
    Glow,
    Main,
}

/// One circle to draw. `color.a` is the final alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawItem {
    pub id: usize,
    pub layer: DrawLayer,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Color,
}

/// GPU instance data for one circle, 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct DrawInstance {
    /// xy = center, z = radius, w = layer (0 glow, 1 main)
    pub pos_radius: [f32; 4],
    /// rgba with final alpha
    pub color: [f32; 4],
}

/// Immutable snapshot of one frame, glow layer first
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DrawList {
    pub items: Vec<DrawItem>,
    pub blur_radius: f32,
}

impl DrawList {
    /// Build the frame from the particle snapshot.
    ///
    /// `progress` is the fade-in/out value; `palette`, when non-empty,
    /// replaces each particle's own color by index.
    pub fn build(
        particles: &[Particle],
        settings: &QualitySettings,
        progress: f32,
        intensity: f32,
        palette: &[Color],
    ) -> Self {
        let color_of = |p: &Particle| {
            if palette.is_empty() {
                p.color
            } else {
                palette[p.id % palette.len()]
            }
        };

        let mut items = Vec::with_capacity(particles.len() + particles.len() / GLOW_SAMPLE_STRIDE + 1);

        if settings.enable_glow {
            for p in particles.iter().step_by(GLOW_SAMPLE_STRIDE) {
                let alpha = p.opacity * GLOW_ALPHA * settings.glow_intensity;
                items.push(DrawItem {
                    id: p.id,
                    layer: DrawLayer::Glow,
                    x: p.position.x,
                    y: p.position.y,
                    radius: p.radius * GLOW_RADIUS_SCALE,
                    color: color_of(p).with_alpha(alpha),
                });
            }
        }

        for p in particles {
            let alpha = p.opacity * progress * intensity;
            items.push(DrawItem {
                id: p.id,
                layer: DrawLayer::Main,
                x: p.position.x,
                y: p.position.y,
                radius: p.radius,
                color: color_of(p).with_alpha(alpha),
            });
        }

        Self {
            items,
            blur_radius: if settings.enable_blur {
                settings.blur_radius
            } else {
                0.0
            },
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn layer(&self, layer: DrawLayer) -> impl Iterator<Item = &DrawItem> {
        self.items.iter().filter(move |item| item.layer == layer)
    }

    /// Pack for an instanced draw call
    pub fn to_instances(&self) -> Vec<DrawInstance> {
        self.items
            .iter()
            .map(|item| DrawInstance {
                pos_radius: [
                    item.x,
                    item.y,
                    item.radius,
                    match item.layer {
                        DrawLayer::Glow => 0.0,
                        DrawLayer::Main => 1.0,
                    },
                ],
                color: item.color.to_array(),
            })
            .collect()
    }
}
