//! Host-facing effect session
//!
//! [`AmbientEffect`] is what an app embeds: it profiles the device once,
//! owns the renderer and the adaptive controller, and polls performance on
//! a fixed cadence while the effect is pressed.

use crate::adaptive::AdaptiveConfigController;
use crate::config::{EffectConfig, EffectOverrides};
use crate::draw::DrawList;
use crate::renderer::{EffectRenderer, RendererOptions};
use crate::settings::AmbientSettings;
use ambient_core::{CapabilityGrade, Quality};
use ambient_device::{classify, DeviceMetrics, PerformanceStatus};
use ambient_runtime::{EffectEvent, EventBus, SharedClock, TimerScheduler};

pub struct AmbientEffect {
    metrics: DeviceMetrics,
    capability: CapabilityGrade,
    renderer: EffectRenderer,
    controller: AdaptiveConfigController,
    poll: TimerScheduler,
    poll_interval_ms: f64,
    /// Foreground timer signal in [0, 1], multiplied into config intensity
    timer_intensity: f32,
    events: EventBus,
}

impl AmbientEffect {
    pub fn new(settings: &AmbientSettings, clock: SharedClock) -> Self {
        Self::build(settings, clock, None)
    }

    /// Like [`new`](Self::new), with a reproducible particle field
    pub fn with_seed(settings: &AmbientSettings, clock: SharedClock, seed: u64) -> Self {
        Self::build(settings, clock, Some(seed))
    }

    fn build(settings: &AmbientSettings, clock: SharedClock, seed: Option<u64>) -> Self {
        let metrics = settings.metrics();
        let capability = classify(&metrics);
        let controller =
            AdaptiveConfigController::new(capability, settings.adaptive_options(), clock.clone());

        let config = controller.config();
        let options = RendererOptions {
            width: settings.canvas.width,
            height: settings.canvas.height,
            pattern: config.pattern,
            intensity: config.intensity,
            quality: Some(config.render.quality),
            particle_count: Some(config.render.particle_count),
            palette: config.colors.clone(),
            seed,
        };
        let renderer = EffectRenderer::new(options, capability, clock.clone());

        log::info!(
            "[effect] {} {}x{}@{} classified as {}",
            metrics.platform,
            metrics.width,
            metrics.height,
            metrics.pixel_density,
            capability
        );

        Self {
            metrics,
            capability,
            renderer,
            controller,
            poll: TimerScheduler::new(clock),
            poll_interval_ms: settings.adaptive.poll_interval_ms,
            timer_intensity: 1.0,
            events: EventBus::new(),
        }
    }

    pub fn metrics(&self) -> &DeviceMetrics {
        &self.metrics
    }

    pub fn capability(&self) -> CapabilityGrade {
        self.capability
    }

    pub fn config(&self) -> &EffectConfig {
        self.controller.config()
    }

    pub fn renderer(&self) -> &EffectRenderer {
        &self.renderer
    }

    pub fn controller(&self) -> &AdaptiveConfigController {
        &self.controller
    }

    pub fn performance_status(&self) -> PerformanceStatus {
        self.renderer.performance_status()
    }

    pub fn is_active(&self) -> bool {
        self.renderer.is_active()
    }

    pub fn timer_intensity(&self) -> f32 {
        self.timer_intensity
    }

    pub fn press(&mut self) {
        if self.renderer.is_active() {
            return;
        }
        self.renderer.activate();
        self.poll.schedule_in(self.poll_interval_ms);
        self.collect_events();
    }

    pub fn release(&mut self) {
        self.renderer.deactivate();
        self.poll.cancel();
        self.collect_events();
    }

    pub fn set_timer_intensity(&mut self, intensity: f32) {
        self.timer_intensity = intensity.clamp(0.0, 1.0);
        self.renderer
            .set_intensity(self.controller.config().intensity * self.timer_intensity);
    }

    /// Pump the frame loop and the status poll. Returns the draw list when a frame ran.
    pub fn tick(&mut self) -> Option<DrawList> {
        let report = self.renderer.pump();

        if self.poll.poll() {
            let status = self.renderer.performance_status();
            if let Some(adaptation) = self.controller.evaluate(&status) {
                self.apply_config();
                // the next verdict should reflect the new tier only
                self.renderer.monitor_mut().reset_counters();
                self.events.push(EffectEvent::QualityAdapted {
                    from: adaptation.from,
                    to: adaptation.to,
                });
            }
            if self.renderer.is_active() {
                self.poll.schedule_in(self.poll_interval_ms);
            }
        }

        self.collect_events();
        report.map(|_| self.renderer.draw_list())
    }

    pub fn force_quality(&mut self, quality: Quality) {
        self.controller.force_quality(quality);
        self.apply_config();
        self.events.push(EffectEvent::QualityForced(quality));
    }

    pub fn reset_to_optimal(&mut self) {
        self.controller.reset_to_optimal(self.renderer.monitor_mut());
        self.apply_config();
        self.events.push(EffectEvent::ResetToOptimal);
    }

    pub fn update_config(&mut self, overrides: &EffectOverrides) {
        self.controller.update_config(overrides);
        self.apply_config();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.renderer.resize(width, height);
    }

    pub fn drain_events(&mut self) -> Vec<EffectEvent> {
        self.collect_events();
        self.events.drain()
    }

    pub fn teardown(&mut self) {
        self.poll.cancel();
        self.renderer.teardown();
    }

    fn apply_config(&mut self) {
        self.renderer
            .apply_config(self.controller.config(), self.timer_intensity);
    }

    fn collect_events(&mut self) {
        self.renderer.events().forward_to(&mut self.events);
    }
}
