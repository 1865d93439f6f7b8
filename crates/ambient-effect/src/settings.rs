//! TOML settings file
//!
//! ```toml
//! dark_mode = false
//!
//! [device]
//! platform = "ios"
//! width = 390
//! height = 844
//! pixel_density = 3
//!
//! [effect]
//! preset = "calm"
//! particle_count = 40
//!
//! [adaptive]
//! enable_auto_adaptation = true
//! adaptation_delay_ms = 2000
//! poll_interval_ms = 1000
//! ```
//!
//! Every table is optional.

use crate::adaptive::{AdaptiveOptions, DEFAULT_ADAPTATION_DELAY_MS};
use crate::config::{EffectConfig, EffectOverrides, Preset};
use ambient_core::{AmbientError, Result};
use ambient_device::DeviceMetrics;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default cadence of the host's performance status poll
pub const DEFAULT_POLL_INTERVAL_MS: f64 = 1000.0;

/// Top-level settings file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AmbientSettings {
    /// Absent means "ask the host", which falls back to `DeviceMetrics::default`
    #[serde(default)]
    pub device: Option<DeviceMetrics>,
    #[serde(default)]
    pub effect: EffectSection,
    #[serde(default)]
    pub adaptive: AdaptiveSettings,
    #[serde(default)]
    pub canvas: CanvasSettings,
    #[serde(default)]
    pub dark_mode: bool,
}

/// `[effect]`: an optional preset plus explicit overrides, which win
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectSection {
    #[serde(default)]
    pub preset: Option<Preset>,
    #[serde(flatten)]
    pub overrides: EffectOverrides,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveSettings {
    #[serde(default = "default_true")]
    pub enable_auto_adaptation: bool,
    #[serde(default = "default_adaptation_delay")]
    pub adaptation_delay_ms: f64,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: f64,
}

impl Default for AdaptiveSettings {
    fn default() -> Self {
        Self {
            enable_auto_adaptation: true,
            adaptation_delay_ms: DEFAULT_ADAPTATION_DELAY_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_adaptation_delay() -> f64 {
    DEFAULT_ADAPTATION_DELAY_MS
}
fn default_poll_interval() -> f64 {
    DEFAULT_POLL_INTERVAL_MS
}

/// Drawing surface size in logical points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSettings {
    #[serde(default = "default_canvas_side")]
    pub width: f32,
    #[serde(default = "default_canvas_side")]
    pub height: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: default_canvas_side(),
            height: default_canvas_side(),
        }
    }
}

fn default_canvas_side() -> f32 {
    280.0
}

impl AmbientSettings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: AmbientSettings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            AmbientError::TomlParseError(msg) => {
                AmbientError::TomlParseError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    fn validate(&self) -> Result<()> {
        let adaptive = &self.adaptive;
        if adaptive.adaptation_delay_ms.is_nan() || adaptive.adaptation_delay_ms < 0.0 {
            return Err(AmbientError::ConfigError(format!(
                "adaptation_delay_ms must be non-negative, got {}",
                adaptive.adaptation_delay_ms
            )));
        }
        if adaptive.poll_interval_ms.is_nan() || adaptive.poll_interval_ms <= 0.0 {
            return Err(AmbientError::ConfigError(format!(
                "poll_interval_ms must be positive, got {}",
                adaptive.poll_interval_ms
            )));
        }
        if self.canvas.width <= 0.0 || self.canvas.height <= 0.0 {
            return Err(AmbientError::ConfigError(format!(
                "canvas must have a positive size, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        Ok(())
    }

    pub fn metrics(&self) -> DeviceMetrics {
        self.device.unwrap_or_default()
    }

    /// Preset underneath explicit overrides, then the dark mode adjustment
    pub fn effect_overrides(&self) -> EffectOverrides {
        let base = self
            .effect
            .preset
            .map(|p| p.overrides())
            .unwrap_or_default();
        let mut overrides = base.layered(&self.effect.overrides);

        if self.dark_mode {
            let dimmed = EffectConfig::default().merged(&overrides).dark_mode();
            overrides.colors = Some(dimmed.colors);
            overrides.intensity = Some(dimmed.intensity);
        }
        overrides
    }

    pub fn adaptive_options(&self) -> AdaptiveOptions {
        AdaptiveOptions {
            initial: self.effect_overrides(),
            enable_auto_adaptation: self.adaptive.enable_auto_adaptation,
            adaptation_delay_ms: self.adaptive.adaptation_delay_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambient_core::{Fps, Platform};
    use ambient_particles::EffectPattern;

    #[test]
    fn empty_file_takes_defaults() {
        let settings = AmbientSettings::from_toml_str("").unwrap();
        assert_eq!(settings, AmbientSettings::default());
        assert!(settings.adaptive.enable_auto_adaptation);
        assert_eq!(settings.adaptive.adaptation_delay_ms, 2000.0);
        assert_eq!(settings.adaptive.poll_interval_ms, 1000.0);
        assert_eq!(settings.metrics(), DeviceMetrics::default());
        assert!(settings.effect_overrides().is_empty());
    }

    #[test]
    fn full_file() {
        let settings = AmbientSettings::from_toml_str(
            r##"
            dark_mode = false

            [device]
            platform = "iOS"
            width = 390
            height = 844
            pixel_density = 3

            [effect]
            preset = "energetic"
            particle_count = 40
            fps = 30
            colors = ["#112233", "#445566"]

            [adaptive]
            enable_auto_adaptation = false
            adaptation_delay_ms = 500

            [canvas]
            width = 320
            "##,
        )
        .unwrap();

        let device = settings.metrics();
        assert_eq!(device.platform, Platform::Ios);
        assert_eq!(device.pixel_density, 3.0);

        let overrides = settings.effect_overrides();
        assert_eq!(overrides.pattern, Some(EffectPattern::Particles));
        assert_eq!(overrides.intensity, Some(0.8));
        assert_eq!(overrides.particle_count, Some(40));
        assert_eq!(overrides.fps, Some(Fps::Thirty));
        assert_eq!(overrides.colors.as_ref().map(|c| c.len()), Some(2));

        let options = settings.adaptive_options();
        assert!(!options.enable_auto_adaptation);
        assert_eq!(options.adaptation_delay_ms, 500.0);
        assert_eq!(settings.adaptive.poll_interval_ms, 1000.0);
        assert_eq!(settings.canvas.width, 320.0);
        assert_eq!(settings.canvas.height, 280.0);
    }

    #[test]
    fn dark_mode_dims_the_resolved_look() {
        let settings = AmbientSettings::from_toml_str(
            r#"
            dark_mode = true
            [effect]
            preset = "calm"
            "#,
        )
        .unwrap();
        let overrides = settings.effect_overrides();
        assert!((overrides.intensity.unwrap() - 0.35).abs() < 1e-6);
        let calm = Preset::Calm.overrides().colors.unwrap();
        let dimmed = overrides.colors.unwrap();
        assert_eq!(dimmed.len(), calm.len());
        assert_ne!(dimmed[0], calm[0]);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AmbientSettings::from_toml_str("[effect]\npreset = \"loud\""),
            Err(AmbientError::TomlParseError(_))
        ));
        assert!(matches!(
            AmbientSettings::from_toml_str("[effect]\nfps = 45"),
            Err(AmbientError::TomlParseError(_))
        ));
        assert!(matches!(
            AmbientSettings::from_toml_str("[adaptive]\npoll_interval_ms = 0"),
            Err(AmbientError::ConfigError(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AmbientSettings::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, AmbientError::IoError(_)));
    }
}
