//! Time sources and frame delta tracking

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic millisecond time source.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin
    fn now_ms(&self) -> f64;
}

/// Clock handle shared by every component of one effect instance.
pub type SharedClock = Rc<dyn Clock>;

/// Wall clock backed by `Instant`, origin at construction
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn shared() -> SharedClock {
        Rc::new(Self::new())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Manually driven clock. Clones share the same time.
#[derive(Clone, Default)]
pub struct VirtualClock {
    now: Rc<Cell<f64>>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms.max(0.0));
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn shared(&self) -> SharedClock {
        Rc::new(self.clone())
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Tracks the time between rendered frames of one active session.
///
/// Lives as long as the renderer; `reset` is called on activation so the
/// first frame of every session gets the nominal delta.
pub struct FrameClock {
    /// Time since last frame in milliseconds
    pub delta_ms: f64,
    /// Total elapsed session time in milliseconds
    pub total_ms: f64,
    /// Delta reported for the first frame of a session
    pub first_frame_ms: f64,
    /// Upper bound on a single delta
    pub max_delta_ms: f64,
    last: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            delta_ms: 0.0,
            total_ms: 0.0,
            first_frame_ms: 16.0,
            max_delta_ms: 250.0,
            last: None,
        }
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame. The next `tick` reports `first_frame_ms`.
    pub fn reset(&mut self) {
        self.last = None;
        self.delta_ms = 0.0;
        self.total_ms = 0.0;
    }

    /// Record a frame at `now_ms` and return its delta
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        self.delta_ms = match self.last {
            None => self.first_frame_ms,
            Some(last) => (now_ms - last).clamp(0.0, self.max_delta_ms),
        };
        self.last = Some(now_ms);
        self.total_ms += self.delta_ms;
        self.delta_ms
    }
}
