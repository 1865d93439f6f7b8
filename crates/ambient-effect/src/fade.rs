//! Linear fade of the effect's animation progress

pub const FADE_IN_MS: f64 = 500.0;
pub const FADE_OUT_MS: f64 = 300.0;

/// Time-based linear transition between two progress values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    start_ms: f64,
    duration_ms: f64,
}

impl Fade {
    /// Resting at `value`
    pub fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start_ms: 0.0,
            duration_ms: 0.0,
        }
    }

    /// Start moving toward `to` from wherever the fade currently is
    pub fn fade_to(&mut self, to: f32, duration_ms: f64, now_ms: f64) {
        self.from = self.value(now_ms);
        self.to = to;
        self.start_ms = now_ms;
        self.duration_ms = duration_ms.max(0.0);
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn value(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0) as f32;
        self.from + (self.to - self.from) * t
    }
}
