//! Runtime frame-health sampling

use crate::optimal::{performance_metrics, PerformanceMetrics};
use ambient_core::{CapabilityGrade, Quality};
use ambient_runtime::SharedClock;
use serde::Serialize;

/// Ideal frame interval at 60fps
pub const IDEAL_FRAME_MS: f64 = 1000.0 / 60.0;
/// A frame longer than `IDEAL_FRAME_MS * FRAME_DROP_FACTOR` counts as dropped
pub const FRAME_DROP_FACTOR: f64 = 1.5;

/// Snapshot of the monitor's counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceStatus {
    pub is_good: bool,
    pub frame_drop_count: u32,
    pub capability: CapabilityGrade,
    pub recommended_quality: Quality,
}

impl PerformanceStatus {
    /// Status reported before any frame was measured
    pub fn healthy(capability: CapabilityGrade) -> Self {
        Self {
            is_good: true,
            frame_drop_count: 0,
            capability,
            recommended_quality: capability,
        }
    }
}

/// Counts slow frames while monitoring.
///
/// Idle → `start_monitoring` → Monitoring → `stop_monitoring` → Idle.
/// While idle `measure_frame` is a no-op reporting healthy.
pub struct PerformanceMonitor {
    clock: SharedClock,
    capability: CapabilityGrade,
    metrics: PerformanceMetrics,
    monitoring: bool,
    frame_drop_count: u32,
    last_frame_ms: f64,
}

impl PerformanceMonitor {
    pub fn new(capability: CapabilityGrade, clock: SharedClock) -> Self {
        let last_frame_ms = clock.now_ms();
        Self {
            clock,
            capability,
            metrics: performance_metrics(capability),
            monitoring: false,
            frame_drop_count: 0,
            last_frame_ms,
        }
    }

    pub fn capability(&self) -> CapabilityGrade {
        self.capability
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.metrics
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring
    }

    pub fn frame_drop_count(&self) -> u32 {
        self.frame_drop_count
    }

    /// Frames longer than this count as dropped, whatever pace the host runs at
    pub fn drop_threshold_ms(&self) -> f64 {
        IDEAL_FRAME_MS * FRAME_DROP_FACTOR
    }

    /// Begin a monitoring session. Calling again re-arms the timestamp and counters.
    pub fn start_monitoring(&mut self) {
        self.monitoring = true;
        self.last_frame_ms = self.clock.now_ms();
        self.frame_drop_count = 0;
        log::debug!(
            "[monitor] started ({} device, tolerating {} drops)",
            self.capability,
            self.metrics.frame_drop_threshold
        );
    }

    pub fn stop_monitoring(&mut self) {
        if self.monitoring {
            log::debug!("[monitor] stopped after {} drops", self.frame_drop_count);
        }
        self.monitoring = false;
    }

    /// Record a frame boundary. Returns whether the drop count is still tolerated.
    pub fn measure_frame(&mut self) -> bool {
        if !self.monitoring {
            return true;
        }

        let now = self.clock.now_ms();
        let frame_ms = now - self.last_frame_ms;
        if frame_ms > self.drop_threshold_ms() {
            self.frame_drop_count = self.frame_drop_count.saturating_add(1);
        }
        self.last_frame_ms = now;

        self.is_good()
    }

    pub fn performance_status(&self) -> PerformanceStatus {
        let is_good = self.is_good();
        PerformanceStatus {
            is_good,
            frame_drop_count: self.frame_drop_count,
            capability: self.capability,
            recommended_quality: if is_good {
                self.capability
            } else {
                self.capability.step_down()
            },
        }
    }

    /// Zero the drop counter and restamp the last frame. Monitoring state is untouched.
    pub fn reset_counters(&mut self) {
        self.frame_drop_count = 0;
        self.last_frame_ms = self.clock.now_ms();
    }

    fn is_good(&self) -> bool {
        self.frame_drop_count <= self.metrics.frame_drop_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambient_runtime::VirtualClock;

    fn monitor(grade: CapabilityGrade) -> (VirtualClock, PerformanceMonitor) {
        let clock = VirtualClock::new();
        let monitor = PerformanceMonitor::new(grade, clock.shared());
        (clock, monitor)
    }

    #[test]
    fn starts_clean() {
        let (_clock, mut m) = monitor(Quality::High);
        m.start_monitoring();
        let status = m.performance_status();
        assert_eq!(status.frame_drop_count, 0);
        assert!(status.is_good);
        assert_eq!(status.recommended_quality, Quality::High);
    }

    #[test]
    fn idle_measurements_are_noops() {
        let (clock, mut m) = monitor(Quality::High);
        for _ in 0..10 {
            clock.advance(100.0);
            assert!(m.measure_frame());
        }
        assert_eq!(m.frame_drop_count(), 0);
    }

    #[test]
    fn slow_frames_exhaust_tolerance() {
        for grade in Quality::ALL {
            let (clock, mut m) = monitor(grade);
            m.start_monitoring();
            let threshold = m.metrics().frame_drop_threshold;
            for _ in 0..threshold {
                clock.advance(26.0);
                assert!(m.measure_frame());
            }
            clock.advance(26.0);
            assert!(!m.measure_frame());
            let status = m.performance_status();
            assert!(!status.is_good);
            assert_eq!(status.frame_drop_count, threshold + 1);
            assert_eq!(status.recommended_quality, grade.step_down());
        }
    }

    #[test]
    fn boundary_frames_are_not_drops() {
        let (clock, mut m) = monitor(Quality::High);
        m.start_monitoring();
        for _ in 0..20 {
            clock.advance(25.0);
            m.measure_frame();
        }
        assert_eq!(m.frame_drop_count(), 0);
    }

    #[test]
    fn fast_frames_do_not_recover_drops() {
        let (clock, mut m) = monitor(Quality::High);
        m.start_monitoring();
        clock.advance(40.0);
        m.measure_frame();
        for _ in 0..10 {
            clock.advance(16.0);
            m.measure_frame();
        }
        assert_eq!(m.frame_drop_count(), 1);
    }

    #[test]
    fn restart_and_reset_zero_the_counter() {
        let (clock, mut m) = monitor(Quality::Medium);
        m.start_monitoring();
        for _ in 0..8 {
            clock.advance(50.0);
            m.measure_frame();
        }
        assert!(!m.performance_status().is_good);

        m.reset_counters();
        assert!(m.is_monitoring());
        assert_eq!(m.frame_drop_count(), 0);

        clock.advance(50.0);
        m.measure_frame();
        m.start_monitoring();
        assert_eq!(m.frame_drop_count(), 0);
    }

    #[test]
    fn stop_freezes_counter() {
        let (clock, mut m) = monitor(Quality::Low);
        m.start_monitoring();
        clock.advance(100.0);
        m.measure_frame();
        m.stop_monitoring();
        clock.advance(100.0);
        assert!(m.measure_frame());
        assert_eq!(m.frame_drop_count(), 1);
    }

    #[test]
    fn threshold_is_fixed_at_sixty_fps() {
        let (clock, mut m) = monitor(Quality::Low);
        assert!((m.drop_threshold_ms() - 25.0).abs() < 1e-9);
        m.start_monitoring();
        // a host throttled to 15fps still measures against the 60fps ideal
        for _ in 0..10 {
            clock.advance(66.0);
            m.measure_frame();
        }
        assert_eq!(m.frame_drop_count(), 10);
        assert!(m.performance_status().is_good);
        clock.advance(66.0);
        assert!(!m.measure_frame());
    }

    #[test]
    fn reset_restamps_last_frame() {
        let (clock, mut m) = monitor(Quality::High);
        m.start_monitoring();
        clock.advance(1000.0);
        m.reset_counters();
        clock.advance(16.0);
        m.measure_frame();
        assert_eq!(m.frame_drop_count(), 0);
    }
}
