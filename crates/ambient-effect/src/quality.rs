//! Per-tier renderer settings

use ambient_core::Quality;
use serde::Serialize;

/// How the renderer paces and decorates frames for one quality tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualitySettings {
    pub enable_blur: bool,
    /// Secondary glow layer, drawn for every third particle
    pub enable_glow: bool,
    pub blur_radius: f32,
    pub glow_intensity: f32,
    /// Delay between frame callbacks
    pub update_interval_ms: f64,
}

impl QualitySettings {
    pub fn for_quality(quality: Quality) -> Self {
        match quality {
            Quality::High => Self {
                enable_blur: true,
                enable_glow: true,
                blur_radius: 3.0,
                glow_intensity: 1.0,
                update_interval_ms: 16.0,
            },
            Quality::Medium => Self {
                enable_blur: true,
                enable_glow: false,
                blur_radius: 2.0,
                glow_intensity: 0.7,
                update_interval_ms: 33.0,
            },
            Quality::Low => Self {
                enable_blur: false,
                enable_glow: false,
                blur_radius: 0.0,
                glow_intensity: 0.5,
                update_interval_ms: 66.0,
            },
        }
    }
}
