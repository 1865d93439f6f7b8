//! Closed-loop quality adaptation
//!
//! The controller owns the live [`EffectConfig`]. The host feeds it the
//! monitor's [`PerformanceStatus`] on a timer; at most once per
//! `adaptation_delay_ms` it steps the config one notch down (unhealthy) or
//! one notch back toward the device target (clean).

use crate::config::{EffectConfig, EffectOverrides};
use ambient_core::{CapabilityGrade, Fps, Quality};
use ambient_device::{resolve, PerformanceMonitor, PerformanceStatus};
use ambient_runtime::SharedClock;

pub const DEFAULT_ADAPTATION_DELAY_MS: f64 = 2000.0;
/// How long `is_adapting` stays raised after a change
pub const ADAPTING_FLAG_MS: f64 = 500.0;

const DOWNGRADE_PARTICLES: f64 = 0.7;
const UPGRADE_PARTICLES: f64 = 1.2;
const MIN_ADAPTED_PARTICLES: usize = 10;
const DOWNGRADE_INTENSITY: f32 = 0.8;
const UPGRADE_INTENSITY: f32 = 1.1;
const MIN_ADAPTED_INTENSITY: f32 = 0.3;
const MAX_INTENSITY: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AdaptiveOptions {
    /// Caller overrides layered on top of the device-optimal config
    pub initial: EffectOverrides,
    pub enable_auto_adaptation: bool,
    /// Minimum time between automatic adjustments
    pub adaptation_delay_ms: f64,
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self {
            initial: EffectOverrides::default(),
            enable_auto_adaptation: true,
            adaptation_delay_ms: DEFAULT_ADAPTATION_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdaptationKind {
    Downgrade,
    Upgrade,
}

/// What one automatic adjustment changed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adaptation {
    pub kind: AdaptationKind,
    pub from: Quality,
    pub to: Quality,
    pub fps: Fps,
    pub particle_count: usize,
    pub intensity: f32,
}

/// One notch down: quality, fps, particle budget and intensity all shrink.
/// Values already under the floors are left alone, never raised.
pub fn downgraded(config: &EffectConfig) -> EffectConfig {
    let mut next = config.clone();
    let render = &mut next.render;
    render.quality = render.quality.step_down();
    render.fps = render.fps.step_down();

    let count = render.particle_count;
    let scaled = (count as f64 * DOWNGRADE_PARTICLES).floor() as usize;
    render.particle_count = scaled.max(MIN_ADAPTED_PARTICLES).min(count);

    next.intensity = (config.intensity * DOWNGRADE_INTENSITY)
        .max(MIN_ADAPTED_INTENSITY)
        .min(config.intensity);
    next
}

/// One notch up toward `target`. Quality and fps only climb while below the
/// target; the particle count grows by a fifth and is capped at the target's.
pub fn upgraded(config: &EffectConfig, target: &EffectConfig) -> EffectConfig {
    let mut next = config.clone();
    let render = &mut next.render;
    let goal = &target.render;

    if render.quality < goal.quality {
        render.quality = render.quality.step_up();
    }
    if render.fps < goal.fps {
        render.fps = render.fps.step_up();
    }

    let scaled = (render.particle_count as f64 * UPGRADE_PARTICLES).floor() as usize;
    render.particle_count = scaled.min(goal.particle_count);

    if config.intensity < MAX_INTENSITY {
        next.intensity = (config.intensity * UPGRADE_INTENSITY).min(MAX_INTENSITY);
    }
    next
}

/// Owns the live config and decides when to adapt it
pub struct AdaptiveConfigController {
    clock: SharedClock,
    capability: CapabilityGrade,
    options: AdaptiveOptions,
    /// Device-optimal config merged with the caller's overrides
    target: EffectConfig,
    config: EffectConfig,
    /// Automatic adaptation is blocked until this time
    cooldown_until: f64,
    adapting_until: Option<f64>,
}

impl AdaptiveConfigController {
    pub fn new(capability: CapabilityGrade, options: AdaptiveOptions, clock: SharedClock) -> Self {
        let target = EffectConfig::with_render(resolve(capability)).merged(&options.initial);
        log::debug!(
            "[adaptive] {} device, target {} @ {}fps with {} particles",
            capability,
            target.render.quality,
            target.render.fps,
            target.render.particle_count
        );
        Self {
            clock,
            capability,
            options,
            config: target.clone(),
            target,
            cooldown_until: f64::NEG_INFINITY,
            adapting_until: None,
        }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// The ceiling automatic upgrades climb back to
    pub fn target(&self) -> &EffectConfig {
        &self.target
    }

    pub fn capability(&self) -> CapabilityGrade {
        self.capability
    }

    pub fn options(&self) -> &AdaptiveOptions {
        &self.options
    }

    pub fn set_auto_adaptation(&mut self, enabled: bool) {
        self.options.enable_auto_adaptation = enabled;
    }

    /// Raised for a short while after each change
    pub fn is_adapting(&self) -> bool {
        self.adapting_until
            .is_some_and(|until| self.clock.now_ms() < until)
    }

    /// Whether `evaluate` would currently be allowed to act
    pub fn is_cooling_down(&self) -> bool {
        self.clock.now_ms() < self.cooldown_until
    }

    /// Feed the latest monitor status. Returns the change made, if any.
    pub fn evaluate(&mut self, status: &PerformanceStatus) -> Option<Adaptation> {
        if !self.options.enable_auto_adaptation || self.is_cooling_down() {
            return None;
        }

        let (kind, next) = if !status.is_good {
            (AdaptationKind::Downgrade, downgraded(&self.config))
        } else if status.frame_drop_count == 0 {
            (AdaptationKind::Upgrade, upgraded(&self.config, &self.target))
        } else {
            return None;
        };

        if next == self.config {
            return None;
        }

        let now = self.clock.now_ms();
        let from = self.config.render.quality;
        self.config = next;
        self.cooldown_until = now + self.options.adaptation_delay_ms;
        self.adapting_until = Some(now + ADAPTING_FLAG_MS);

        let adaptation = Adaptation {
            kind,
            from,
            to: self.config.render.quality,
            fps: self.config.render.fps,
            particle_count: self.config.render.particle_count,
            intensity: self.config.intensity,
        };
        log::info!(
            "[adaptive] {:?}: {} -> {} ({}fps, {} particles, intensity {:.2})",
            kind,
            adaptation.from,
            adaptation.to,
            adaptation.fps,
            adaptation.particle_count,
            adaptation.intensity
        );
        Some(adaptation)
    }

    /// Pin the render budget of `quality` and hold off automatic
    /// adaptation for twice the usual delay.
    pub fn force_quality(&mut self, quality: Quality) {
        self.config.render = resolve(quality);
        self.cooldown_until = self.clock.now_ms() + self.options.adaptation_delay_ms * 2.0;
        log::info!("[adaptive] quality forced to {quality}");
    }

    /// Back to the device-optimal config. Clears the cooldown and the
    /// monitor's counters.
    pub fn reset_to_optimal(&mut self, monitor: &mut PerformanceMonitor) {
        self.config = self.target.clone();
        self.cooldown_until = f64::NEG_INFINITY;
        self.adapting_until = None;
        monitor.reset_counters();
    }

    /// Merge a partial change into the live config
    pub fn update_config(&mut self, overrides: &EffectOverrides) {
        self.config = self.config.clone().merged(overrides);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambient_runtime::VirtualClock;

    fn status(is_good: bool, frame_drop_count: u32) -> PerformanceStatus {
        PerformanceStatus {
            is_good,
            frame_drop_count,
            capability: Quality::High,
            recommended_quality: Quality::High,
        }
    }

    fn controller(grade: CapabilityGrade) -> (VirtualClock, AdaptiveConfigController) {
        let clock = VirtualClock::new();
        let c = AdaptiveConfigController::new(grade, AdaptiveOptions::default(), clock.shared());
        (clock, c)
    }

    #[test]
    fn seeded_from_device_optimal() {
        let (_clock, c) = controller(Quality::High);
        assert_eq!(c.config().render, resolve(Quality::High));
        assert_eq!(c.config(), c.target());
        assert!(!c.is_adapting());
    }

    #[test]
    fn overrides_shape_the_target() {
        let clock = VirtualClock::new();
        let options = AdaptiveOptions {
            initial: EffectOverrides {
                particle_count: Some(60),
                ..Default::default()
            },
            ..Default::default()
        };
        let c = AdaptiveConfigController::new(Quality::High, options, clock.shared());
        assert_eq!(c.target().render.particle_count, 60);
        assert_eq!(c.target().render.fps, Fps::Sixty);
    }

    #[test]
    fn downgrade_one_step() {
        let (_clock, mut c) = controller(Quality::High);
        let a = c.evaluate(&status(false, 3)).unwrap();
        assert_eq!(a.kind, AdaptationKind::Downgrade);
        assert_eq!((a.from, a.to), (Quality::High, Quality::Medium));
        assert_eq!(c.config().render.fps, Fps::Thirty);
        assert_eq!(c.config().render.particle_count, 70);
        assert!((c.config().intensity - 0.48).abs() < 1e-6);
        assert!(c.is_adapting());
    }

    #[test]
    fn cooldown_blocks_back_to_back_adaptation() {
        let (clock, mut c) = controller(Quality::High);
        assert!(c.evaluate(&status(false, 3)).is_some());
        clock.advance(1000.0);
        assert!(c.evaluate(&status(false, 3)).is_none());
        assert!(!c.is_adapting());
        clock.advance(1000.0);
        assert!(c.evaluate(&status(false, 3)).is_some());
        assert_eq!(c.config().render.quality, Quality::Low);
    }

    #[test]
    fn downgrade_floors() {
        let (clock, mut c) = controller(Quality::High);
        for _ in 0..20 {
            c.evaluate(&status(false, 9));
            clock.advance(2000.0);
        }
        let config = c.config();
        assert_eq!(config.render.quality, Quality::Low);
        assert_eq!(config.render.fps, Fps::Fifteen);
        assert_eq!(config.render.particle_count, 10);
        assert!((config.intensity - 0.3).abs() < 1e-6);
        // fully degraded: nothing left to change
        assert!(c.evaluate(&status(false, 9)).is_none());
    }

    #[test]
    fn downgrade_never_raises_small_values() {
        let config = EffectConfig {
            intensity: 0.2,
            ..EffectConfig::default()
        }
        .merged(&EffectOverrides {
            particle_count: Some(5),
            ..Default::default()
        });
        let next = downgraded(&config);
        assert_eq!(next.render.particle_count, 5);
        assert!((next.intensity - 0.2).abs() < 1e-6);
    }

    #[test]
    fn upgrade_climbs_back_to_target_only() {
        let (clock, mut c) = controller(Quality::Medium);
        c.force_quality(Quality::Low);
        clock.advance(4000.0);

        let mut seen = Vec::new();
        for _ in 0..20 {
            if let Some(a) = c.evaluate(&status(true, 0)) {
                seen.push(a);
            }
            clock.advance(2000.0);
        }
        assert!(seen.iter().all(|a| a.kind == AdaptationKind::Upgrade));
        let config = c.config();
        assert_eq!(config.render.quality, Quality::Medium);
        assert_eq!(config.render.fps, Fps::Thirty);
        assert_eq!(config.render.particle_count, 50);
        assert_eq!(config.intensity, 1.0);
    }

    #[test]
    fn upgrade_step_sizes() {
        let target = EffectConfig::with_render(resolve(Quality::High));
        let low = EffectConfig::with_render(resolve(Quality::Low));
        let next = upgraded(&low, &target);
        assert_eq!(next.render.quality, Quality::Medium);
        assert_eq!(next.render.fps, Fps::Thirty);
        assert_eq!(next.render.particle_count, 30);
        assert!((next.intensity - 0.66).abs() < 1e-6);
    }

    #[test]
    fn upgrade_respects_target_ceiling() {
        let target = EffectConfig::with_render(resolve(Quality::Low));
        let config = EffectConfig::with_render(resolve(Quality::Low)).merged(&EffectOverrides {
            particle_count: Some(12),
            ..Default::default()
        });
        let next = upgraded(&config, &target);
        assert_eq!(next.render.quality, Quality::Low);
        assert_eq!(next.render.fps, Fps::Fifteen);
        assert_eq!(next.render.particle_count, 14);
        let next = upgraded(&EffectConfig::with_render(resolve(Quality::High)), &target);
        assert_eq!(next.render.quality, Quality::High);
        assert_eq!(next.render.particle_count, 25);
    }

    #[test]
    fn upgrade_pulls_a_forced_budget_back_to_target() {
        let (clock, mut c) = controller(Quality::Medium);
        c.force_quality(Quality::High);
        assert_eq!(c.config().render.particle_count, 100);
        clock.advance(10_000.0);

        let a = c.evaluate(&status(true, 0)).unwrap();
        assert_eq!(a.kind, AdaptationKind::Upgrade);
        assert_eq!(a.particle_count, 50);
        assert_eq!(c.config().render.particle_count, c.target().render.particle_count);
    }

    #[test]
    fn some_drops_but_healthy_holds_steady() {
        let (clock, mut c) = controller(Quality::High);
        c.force_quality(Quality::Low);
        clock.advance(10_000.0);
        assert!(c.evaluate(&status(true, 1)).is_none());
        assert_eq!(c.config().render.quality, Quality::Low);
    }

    #[test]
    fn force_quality_holds_for_twice_the_delay() {
        let (clock, mut c) = controller(Quality::High);
        c.force_quality(Quality::Low);
        assert_eq!(c.config().render, resolve(Quality::Low));
        clock.advance(3999.0);
        assert!(c.evaluate(&status(true, 0)).is_none());
        clock.advance(1.0);
        assert!(c.evaluate(&status(true, 0)).is_some());
    }

    #[test]
    fn reset_restores_target_and_clears_cooldown() {
        let (clock, mut c) = controller(Quality::High);
        let mut monitor = PerformanceMonitor::new(Quality::High, clock.shared());
        monitor.start_monitoring();
        for _ in 0..5 {
            clock.advance(40.0);
            monitor.measure_frame();
        }
        assert!(c.evaluate(&monitor.performance_status()).is_some());

        c.reset_to_optimal(&mut monitor);
        assert_eq!(c.config(), c.target());
        assert_eq!(monitor.frame_drop_count(), 0);
        assert!(!c.is_cooling_down());
        assert!(c.evaluate(&status(false, 5)).is_some());
    }

    #[test]
    fn disabled_auto_adaptation_never_acts() {
        let (_clock, mut c) = controller(Quality::High);
        c.set_auto_adaptation(false);
        assert!(c.evaluate(&status(false, 10)).is_none());
        assert_eq!(c.config(), c.target());
    }

    #[test]
    fn update_config_merges() {
        let (_clock, mut c) = controller(Quality::Medium);
        c.update_config(&EffectOverrides {
            intensity: Some(0.9),
            ..Default::default()
        });
        assert!((c.config().intensity - 0.9).abs() < 1e-6);
        assert_eq!(c.config().render, resolve(Quality::Medium));
    }

    #[test]
    fn bounds_hold_under_random_feedback() {
        let (clock, mut c) = controller(Quality::High);
        let target_count = c.target().render.particle_count;
        for i in 0..200u32 {
            let good = (i * 7919) % 3 != 0;
            c.evaluate(&status(good, if good { 0 } else { 4 }));
            clock.advance(if i % 5 == 0 { 100.0 } else { 2000.0 });
            let config = c.config();
            assert!(config.render.particle_count <= target_count);
            assert!(config.render.particle_count >= MIN_ADAPTED_PARTICLES);
            assert!(config.render.fps >= Fps::Fifteen);
            assert!(config.render.quality >= Quality::Low);
            assert!(config.intensity <= 1.0);
            assert!(config.intensity >= 0.3 - 1e-6);
        }
    }
}
