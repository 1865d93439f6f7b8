//! Frame loop for one effect instance
//!
//! The renderer owns the particle field, the performance monitor and the
//! frame scheduler. The host calls [`EffectRenderer::pump`] from its frame
//! callback; a frame only runs when the scheduler's deadline has passed,
//! which paces the loop at the quality tier's update interval.

use crate::config::EffectConfig;
use crate::draw::DrawList;
use crate::fade::{Fade, FADE_IN_MS, FADE_OUT_MS};
use crate::quality::QualitySettings;
use ambient_core::{CapabilityGrade, Color, Quality};
use ambient_device::{
    resolve, PerformanceMonitor, PerformanceStatus, MAX_PARTICLE_COUNT, MIN_PARTICLE_COUNT,
};
use ambient_particles::{EffectPattern, Particle, ParticleSystem};
use ambient_runtime::{EffectEvent, EventBus, FrameClock, SharedClock, TimerScheduler};

/// Called with `false` on every frame measured as unhealthy
pub type PerformanceSink = Box<dyn FnMut(bool)>;

#[derive(Debug, Clone, PartialEq)]
pub struct RendererOptions {
    pub width: f32,
    pub height: f32,
    pub pattern: EffectPattern,
    pub intensity: f32,
    /// Defaults to the device grade
    pub quality: Option<Quality>,
    /// Defaults to the tier's particle budget. Clamped to [1, 200].
    pub particle_count: Option<usize>,
    /// Replaces particle colors when non-empty
    pub palette: Vec<Color>,
    /// Fixed RNG seed for reproducible fields
    pub seed: Option<u64>,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            width: 280.0,
            height: 280.0,
            pattern: EffectPattern::Waves,
            intensity: 1.0,
            quality: None,
            particle_count: None,
            palette: Vec::new(),
            seed: None,
        }
    }
}

/// Outcome of one executed frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Simulation step handed to the particle system
    pub delta_ms: f64,
    pub healthy: bool,
    /// Frames executed since construction
    pub frame: u64,
}

pub struct EffectRenderer {
    clock: SharedClock,
    particles: ParticleSystem,
    monitor: PerformanceMonitor,
    scheduler: TimerScheduler,
    frame_clock: FrameClock,
    fade: Fade,
    quality: Quality,
    settings: QualitySettings,
    intensity: f32,
    palette: Vec<Color>,
    active: bool,
    torn_down: bool,
    was_healthy: bool,
    frame: u64,
    events: EventBus,
    on_performance_change: Option<PerformanceSink>,
}

impl EffectRenderer {
    pub fn new(options: RendererOptions, capability: CapabilityGrade, clock: SharedClock) -> Self {
        let quality = options.quality.unwrap_or(capability);
        let count = options
            .particle_count
            .unwrap_or_else(|| resolve(quality).particle_count)
            .clamp(MIN_PARTICLE_COUNT, MAX_PARTICLE_COUNT);

        let particles = match options.seed {
            Some(seed) => ParticleSystem::with_seed(
                count,
                options.width,
                options.height,
                options.pattern,
                seed,
            ),
            None => ParticleSystem::new(count, options.width, options.height, options.pattern),
        };

        let settings = QualitySettings::for_quality(quality);
        let monitor = PerformanceMonitor::new(capability, clock.clone());

        Self {
            scheduler: TimerScheduler::new(clock.clone()),
            clock,
            particles,
            monitor,
            frame_clock: FrameClock::new(),
            fade: Fade::settled(0.0),
            quality,
            settings,
            intensity: options.intensity.clamp(0.0, 1.0),
            palette: options.palette,
            active: false,
            torn_down: false,
            was_healthy: true,
            frame: 0,
            events: EventBus::new(),
            on_performance_change: None,
        }
    }

    pub fn on_performance_change(&mut self, sink: PerformanceSink) {
        self.on_performance_change = Some(sink);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn quality_settings(&self) -> &QualitySettings {
        &self.settings
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn pattern(&self) -> EffectPattern {
        self.particles.pattern()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.particle_count()
    }

    /// Read-only snapshot of this frame's particles
    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    pub fn performance_status(&self) -> PerformanceStatus {
        self.monitor.performance_status()
    }

    pub fn monitor_mut(&mut self) -> &mut PerformanceMonitor {
        &mut self.monitor
    }

    /// Milliseconds until the next frame is due, if one is scheduled
    pub fn next_frame_in(&self) -> Option<f64> {
        self.scheduler.remaining_ms()
    }

    /// Fade progress in [0, 1]
    pub fn progress(&self) -> f32 {
        self.fade.value(self.clock.now_ms())
    }

    pub fn events(&mut self) -> &mut EventBus {
        &mut self.events
    }

    pub fn drain_events(&mut self) -> Vec<EffectEvent> {
        self.events.drain()
    }

    /// Start the loop. The first frame is due immediately.
    pub fn activate(&mut self) {
        if self.torn_down {
            log::warn!("[renderer] activate after teardown ignored");
            return;
        }
        if self.active {
            return;
        }
        let now = self.clock.now_ms();
        self.active = true;
        self.was_healthy = true;
        self.particles.start();
        self.monitor.start_monitoring();
        self.frame_clock.reset();
        self.fade.fade_to(1.0, FADE_IN_MS, now);
        self.scheduler.schedule_in(0.0);
        self.events.push(EffectEvent::Activated);
        log::debug!(
            "[renderer] activated: {} x{} at {} quality",
            self.particles.pattern(),
            self.particles.particle_count(),
            self.quality
        );
    }

    pub fn activate_with(&mut self, pattern: EffectPattern, intensity: f32) {
        self.set_pattern(pattern);
        self.set_intensity(intensity);
        self.activate();
    }

    /// Stop the loop and cancel the pending frame. Particle data is kept.
    pub fn deactivate(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.particles.stop();
        self.monitor.stop_monitoring();
        self.scheduler.cancel();
        self.fade.fade_to(0.0, FADE_OUT_MS, self.clock.now_ms());
        self.events.push(EffectEvent::Deactivated);
        log::debug!("[renderer] deactivated after {} frames", self.frame);
    }

    /// Dispose the particle field and stop the monitor. Terminal.
    pub fn teardown(&mut self) {
        self.active = false;
        self.torn_down = true;
        self.scheduler.cancel();
        self.monitor.stop_monitoring();
        self.particles.dispose();
        self.fade = Fade::settled(0.0);
    }

    /// Run one frame if it is due
    pub fn pump(&mut self) -> Option<FrameReport> {
        if !self.active || !self.scheduler.poll() {
            return None;
        }

        let now = self.clock.now_ms();
        let healthy = self.monitor.measure_frame();
        if !healthy {
            if let Some(sink) = self.on_performance_change.as_mut() {
                sink(false);
            }
            if self.was_healthy {
                self.events.push(EffectEvent::PerformanceDegraded {
                    frame_drop_count: self.monitor.frame_drop_count(),
                });
            }
        }
        self.was_healthy = healthy;

        let delta_ms = self.frame_clock.tick(now);
        self.particles.update(delta_ms as f32, self.intensity);
        self.frame += 1;

        if self.active {
            self.scheduler.schedule_in(self.settings.update_interval_ms);
        }

        Some(FrameReport {
            delta_ms,
            healthy,
            frame: self.frame,
        })
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        self.intensity = intensity.clamp(0.0, 1.0);
    }

    pub fn set_pattern(&mut self, pattern: EffectPattern) {
        if pattern != self.particles.pattern() {
            self.particles.set_pattern(pattern);
        }
    }

    pub fn set_particle_count(&mut self, count: usize) {
        if count != self.particles.particle_count() {
            self.particles.set_particle_count(count);
        }
    }

    /// Switch tiers. The new update interval applies from the next scheduled frame.
    pub fn set_quality(&mut self, quality: Quality) {
        if quality == self.quality {
            return;
        }
        self.quality = quality;
        self.settings = QualitySettings::for_quality(quality);
    }

    pub fn set_palette(&mut self, palette: Vec<Color>) {
        self.palette = palette;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.particles.resize(width, height);
    }

    /// Follow a new effect config from the adaptive controller
    pub fn apply_config(&mut self, config: &EffectConfig, intensity_scale: f32) {
        self.set_quality(config.render.quality);
        self.set_particle_count(config.render.particle_count);
        self.set_pattern(config.pattern);
        self.set_intensity(config.intensity * intensity_scale);
        self.palette.clone_from(&config.colors);
    }

    /// Draw list for the current particle snapshot
    pub fn draw_list(&self) -> DrawList {
        DrawList::build(
            self.particles.particles(),
            &self.settings,
            self.progress(),
            self.intensity,
            &self.palette,
        )
    }
}
