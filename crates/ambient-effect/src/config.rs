//! Effect configuration, partial overrides and built-in presets

use ambient_core::{AmbientError, Color, Fps, Quality, Result};
use ambient_device::{RenderConfig, MAX_PARTICLE_COUNT, MIN_PARTICLE_COUNT};
use ambient_particles::EffectPattern;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dark mode scales intensity by this
pub const DARK_MODE_INTENSITY: f32 = 0.7;
/// Dark mode scales color saturation by this
pub const DARK_MODE_SATURATION: f32 = 0.8;

/// Full effect configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectConfig {
    /// Palette for drawing. Cosmetic only, never read by the simulation.
    pub colors: Vec<Color>,
    /// Brightness multiplier in [0, 1]
    pub intensity: f32,
    pub pattern: EffectPattern,
    pub render: RenderConfig,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            colors: vec![
                Color::from_hex(0xff6b6b),
                Color::from_hex(0x4ecdc4),
                Color::from_hex(0x45b7d1),
            ],
            intensity: 0.6,
            pattern: EffectPattern::Waves,
            render: RenderConfig {
                quality: Quality::Medium,
                fps: Fps::Sixty,
                particle_count: 50,
                enable_blur: true,
                enable_shadows: false,
                complex_effects: false,
            },
        }
    }
}

impl EffectConfig {
    /// Defaults with the given render budget
    pub fn with_render(render: RenderConfig) -> Self {
        Self {
            render,
            ..Self::default()
        }
    }

    /// Apply every field present in `overrides`
    pub fn merged(mut self, overrides: &EffectOverrides) -> Self {
        if let Some(colors) = &overrides.colors {
            self.colors = colors.clone();
        }
        if let Some(intensity) = overrides.intensity {
            self.intensity = intensity.clamp(0.0, 1.0);
        }
        if let Some(pattern) = overrides.pattern {
            self.pattern = pattern;
        }
        if let Some(quality) = overrides.quality {
            self.render.quality = quality;
        }
        if let Some(fps) = overrides.fps {
            self.render.fps = fps;
        }
        if let Some(count) = overrides.particle_count {
            self.render.particle_count = count.clamp(MIN_PARTICLE_COUNT, MAX_PARTICLE_COUNT);
        }
        if let Some(blur) = overrides.enable_blur {
            self.render.enable_blur = blur;
        }
        if let Some(shadows) = overrides.enable_shadows {
            self.render.enable_shadows = shadows;
        }
        if let Some(complex) = overrides.complex_effects {
            self.render.complex_effects = complex;
        }
        self
    }

    /// Dimmer, less saturated variant for dark backgrounds
    pub fn dark_mode(&self) -> Self {
        Self {
            colors: self
                .colors
                .iter()
                .map(|c| c.scale_saturation(DARK_MODE_SATURATION))
                .collect(),
            intensity: self.intensity * DARK_MODE_INTENSITY,
            ..self.clone()
        }
    }
}

/// A partial [`EffectConfig`]. Absent fields leave the base untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectOverrides {
    pub colors: Option<Vec<Color>>,
    pub intensity: Option<f32>,
    pub pattern: Option<EffectPattern>,
    pub quality: Option<Quality>,
    pub fps: Option<Fps>,
    pub particle_count: Option<usize>,
    pub enable_blur: Option<bool>,
    pub enable_shadows: Option<bool>,
    pub complex_effects: Option<bool>,
}

impl EffectOverrides {
    /// `top` wins wherever it sets a field
    pub fn layered(&self, top: &EffectOverrides) -> Self {
        Self {
            colors: top.colors.clone().or_else(|| self.colors.clone()),
            intensity: top.intensity.or(self.intensity),
            pattern: top.pattern.or(self.pattern),
            quality: top.quality.or(self.quality),
            fps: top.fps.or(self.fps),
            particle_count: top.particle_count.or(self.particle_count),
            enable_blur: top.enable_blur.or(self.enable_blur),
            enable_shadows: top.enable_shadows.or(self.enable_shadows),
            complex_effects: top.complex_effects.or(self.complex_effects),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Built-in looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Preset {
    Calm,
    Energetic,
    Professional,
    NightMode,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Calm,
        Preset::Energetic,
        Preset::Professional,
        Preset::NightMode,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Calm => "calm",
            Preset::Energetic => "energetic",
            Preset::Professional => "professional",
            Preset::NightMode => "night_mode",
        }
    }

    pub fn overrides(&self) -> EffectOverrides {
        let palette = |hexes: &[u32]| Some(hexes.iter().map(|h| Color::from_hex(*h)).collect());
        match self {
            Preset::Calm => EffectOverrides {
                pattern: Some(EffectPattern::Waves),
                colors: palette(&[0xe3f2fd, 0xbbdefb, 0x90caf9]),
                intensity: Some(0.5),
                ..Default::default()
            },
            Preset::Energetic => EffectOverrides {
                pattern: Some(EffectPattern::Particles),
                colors: palette(&[0xff6b6b, 0xfeca57, 0x48dbfb, 0xff9ff3]),
                intensity: Some(0.8),
                particle_count: Some(80),
                ..Default::default()
            },
            Preset::Professional => EffectOverrides {
                pattern: Some(EffectPattern::Gradients),
                colors: palette(&[0x667eea, 0x764ba2, 0xf093fb]),
                intensity: Some(0.4),
                ..Default::default()
            },
            Preset::NightMode => EffectOverrides {
                pattern: Some(EffectPattern::Aurora),
                colors: palette(&[0x0f3443, 0x34495e, 0x1e3c72, 0x2c3e50]),
                intensity: Some(0.3),
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = AmbientError;

    /// Accepts `night_mode`, `night-mode` and `nightMode` spellings
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Preset::ALL
            .into_iter()
            .find(|p| p.name().replace('_', "") == key)
            .ok_or_else(|| AmbientError::UnknownPreset(s.to_string()))
    }
}

impl TryFrom<String> for Preset {
    type Error = AmbientError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Preset> for String {
    fn from(preset: Preset) -> Self {
        preset.name().to_string()
    }
}
