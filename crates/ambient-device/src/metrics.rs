//! Static device metrics and capability classification

use ambient_core::{CapabilityGrade, Platform};
use serde::{Deserialize, Serialize};

/// Pixel density is never taken above this
pub const MAX_PIXEL_DENSITY: f32 = 3.0;

/// Display metrics read once from the host at startup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMetrics")]
pub struct DeviceMetrics {
    pub platform: Platform,
    /// Logical width in points
    pub width: f32,
    /// Logical height in points
    pub height: f32,
    pub pixel_density: f32,
    /// `width * height * pixel_density`
    pub total_pixels: f64,
}

/// Deserialization shape; routed through `DeviceMetrics::new` so clamps apply
#[derive(Deserialize)]
struct RawMetrics {
    platform: Platform,
    width: f32,
    height: f32,
    #[serde(default = "default_density", alias = "pixel_ratio")]
    pixel_density: f32,
}

fn default_density() -> f32 {
    2.0
}

impl From<RawMetrics> for DeviceMetrics {
    fn from(raw: RawMetrics) -> Self {
        Self::new(raw.platform, raw.width, raw.height, raw.pixel_density)
    }
}

impl DeviceMetrics {
    pub fn new(platform: Platform, width: f32, height: f32, pixel_density: f32) -> Self {
        let pixel_density = if pixel_density.is_finite() && pixel_density > 0.0 {
            pixel_density.min(MAX_PIXEL_DENSITY)
        } else {
            1.0
        };
        let width = width.max(0.0);
        let height = height.max(0.0);
        Self {
            platform,
            width,
            height,
            pixel_density,
            total_pixels: width as f64 * height as f64 * pixel_density as f64,
        }
    }
}

impl Default for DeviceMetrics {
    /// Conservative stand-in when the host cannot report metrics
    fn default() -> Self {
        Self::new(Platform::Other, 375.0, 667.0, 2.0)
    }
}

/// Grade a device from its display metrics. Pure and total.
pub fn classify(metrics: &DeviceMetrics) -> CapabilityGrade {
    let pixels = metrics.total_pixels;
    let density = metrics.pixel_density;

    match metrics.platform {
        Platform::Ios => {
            if pixels > 1_100_000.0 && density >= 3.0 {
                CapabilityGrade::High
            } else if pixels > 750_000.0 && density >= 2.0 {
                CapabilityGrade::Medium
            } else {
                CapabilityGrade::Low
            }
        }
        Platform::Android => {
            if pixels > 2_500_000.0 && density >= 2.5 {
                CapabilityGrade::High
            } else if pixels > 1_500_000.0 && density >= 2.0 {
                CapabilityGrade::Medium
            } else {
                CapabilityGrade::Low
            }
        }
        Platform::Web | Platform::Other => CapabilityGrade::Medium,
    }
}
