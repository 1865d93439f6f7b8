//! Ambient Device - capability grading and runtime frame health
//!
//! - `DeviceMetrics` / `classify`: one-shot grade from static display metrics
//! - `RenderConfig` / `resolve`: fixed grade → rendering budget table
//! - `PerformanceMonitor`: frame-drop sampler reporting a "healthy" signal

mod metrics;
mod monitor;
mod optimal;

pub use metrics::{classify, DeviceMetrics, MAX_PIXEL_DENSITY};
pub use monitor::{PerformanceMonitor, PerformanceStatus, FRAME_DROP_FACTOR, IDEAL_FRAME_MS};
pub use optimal::{performance_metrics, resolve, PerformanceMetrics, RenderConfig};
pub use optimal::{MAX_PARTICLE_COUNT, MIN_PARTICLE_COUNT};
