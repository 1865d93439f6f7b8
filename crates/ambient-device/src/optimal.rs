//! Grade → rendering budget lookup tables

use ambient_core::{CapabilityGrade, Fps, Quality};
use serde::{Deserialize, Serialize};

pub const MIN_PARTICLE_COUNT: usize = 1;
pub const MAX_PARTICLE_COUNT: usize = 200;

/// The active set of quality knobs governing the effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    pub quality: Quality,
    pub fps: Fps,
    pub particle_count: usize,
    pub enable_blur: bool,
    pub enable_shadows: bool,
    pub complex_effects: bool,
}

impl RenderConfig {
    /// Same config with the particle budget clamped to the supported range
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count.clamp(MIN_PARTICLE_COUNT, MAX_PARTICLE_COUNT);
        self
    }
}

/// Optimal rendering config for a grade
pub fn resolve(grade: CapabilityGrade) -> RenderConfig {
    match grade {
        CapabilityGrade::High => RenderConfig {
            quality: Quality::High,
            fps: Fps::Sixty,
            particle_count: 100,
            enable_blur: true,
            enable_shadows: true,
            complex_effects: true,
        },
        CapabilityGrade::Medium => RenderConfig {
            quality: Quality::Medium,
            fps: Fps::Thirty,
            particle_count: 50,
            enable_blur: true,
            enable_shadows: false,
            complex_effects: false,
        },
        CapabilityGrade::Low => RenderConfig {
            quality: Quality::Low,
            fps: Fps::Fifteen,
            particle_count: 25,
            enable_blur: false,
            enable_shadows: false,
            complex_effects: false,
        },
    }
}

/// Per-grade tolerances used by the performance monitor
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// Dropped frames tolerated before the device is reported unhealthy
    pub frame_drop_threshold: u32,
    pub memory_usage_threshold_mb: u32,
    /// Relative rendering complexity budget, 1.0 = full
    pub rendering_complexity: f32,
}

pub fn performance_metrics(grade: CapabilityGrade) -> PerformanceMetrics {
    match grade {
        CapabilityGrade::High => PerformanceMetrics {
            frame_drop_threshold: 2,
            memory_usage_threshold_mb: 150,
            rendering_complexity: 1.0,
        },
        CapabilityGrade::Medium => PerformanceMetrics {
            frame_drop_threshold: 5,
            memory_usage_threshold_mb: 100,
            rendering_complexity: 0.7,
        },
        CapabilityGrade::Low => PerformanceMetrics {
            frame_drop_threshold: 10,
            memory_usage_threshold_mb: 50,
            rendering_complexity: 0.4,
        },
    }
}
