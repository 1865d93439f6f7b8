//! Events emitted by the effect loop

use ambient_core::Quality;

/// Something the host may want to react to (haptics, UI badges, logging)
#[derive(Debug, Clone, PartialEq)]
pub enum EffectEvent {
    /// The animation loop started
    Activated,
    /// The animation loop stopped
    Deactivated,
    /// A measured frame pushed the drop counter past tolerance
    PerformanceDegraded { frame_drop_count: u32 },
    /// The adaptive controller changed quality tier or budget
    QualityAdapted { from: Quality, to: Quality },
    /// The host pinned a quality tier
    QualityForced(Quality),
    /// Config returned to the device-optimal baseline
    ResetToOptimal,
}
