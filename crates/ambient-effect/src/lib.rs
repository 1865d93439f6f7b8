//! Ambient Effect - the adaptive particle effect
//!
//! Ties the device, particle and runtime crates together:
//! - `EffectConfig` / `EffectOverrides` / `Preset`: what to draw and how richly
//! - `AmbientSettings`: TOML settings file
//! - `AdaptiveConfigController`: closed-loop quality adaptation with cooldown
//! - `EffectRenderer`: frame loop, intensity fade and draw list output
//! - `AmbientEffect`: host session wiring press/release and timer intensity

pub mod adaptive;
pub mod config;
pub mod draw;
pub mod fade;
pub mod quality;
pub mod renderer;
pub mod session;
pub mod settings;

pub use adaptive::{Adaptation, AdaptationKind, AdaptiveConfigController, AdaptiveOptions};
pub use config::{EffectConfig, EffectOverrides, Preset};
pub use draw::{DrawInstance, DrawItem, DrawLayer, DrawList};
pub use fade::Fade;
pub use quality::QualitySettings;
pub use renderer::{EffectRenderer, FrameReport, RendererOptions};
pub use session::AmbientEffect;
pub use settings::{AdaptiveSettings, AmbientSettings, CanvasSettings, EffectSection};
