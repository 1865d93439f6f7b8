//! Cancellable single-deadline scheduler

use crate::clock::SharedClock;

/// Holds at most one pending callback deadline.
///
/// The host pumps `poll` from its frame callback; a deadline fires exactly
/// once. Scheduling again replaces any pending deadline.
pub struct TimerScheduler {
    clock: SharedClock,
    deadline: Option<f64>,
}

impl TimerScheduler {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            clock,
            deadline: None,
        }
    }

    /// Arm the timer `delay_ms` from now
    pub fn schedule_in(&mut self, delay_ms: f64) {
        self.deadline = Some(self.clock.now_ms() + delay_ms.max(0.0));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Milliseconds until the pending deadline, if any
    pub fn remaining_ms(&self) -> Option<f64> {
        self.deadline
            .map(|deadline| (deadline - self.clock.now_ms()).max(0.0))
    }

    /// Returns true once when the deadline has been reached, disarming the timer
    pub fn poll(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if self.clock.now_ms() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::VirtualClock;

    #[test]
    fn fires_once_at_deadline() {
        let clock = VirtualClock::new();
        let mut timer = TimerScheduler::new(clock.shared());
        timer.schedule_in(33.0);
        assert!(!timer.poll());
        clock.advance(32.0);
        assert!(!timer.poll());
        clock.advance(1.0);
        assert!(timer.poll());
        assert!(!timer.poll());
        assert!(!timer.is_pending());
    }

    #[test]
    fn cancel_drops_pending_deadline() {
        let clock = VirtualClock::new();
        let mut timer = TimerScheduler::new(clock.shared());
        timer.schedule_in(16.0);
        timer.cancel();
        clock.advance(100.0);
        assert!(!timer.poll());
    }

    #[test]
    fn zero_delay_is_due_immediately() {
        let clock = VirtualClock::new();
        let mut timer = TimerScheduler::new(clock.shared());
        timer.schedule_in(0.0);
        assert_eq!(timer.remaining_ms(), Some(0.0));
        assert!(timer.poll());
    }

    #[test]
    fn rescheduling_replaces_deadline() {
        let clock = VirtualClock::new();
        let mut timer = TimerScheduler::new(clock.shared());
        timer.schedule_in(10.0);
        timer.schedule_in(50.0);
        clock.advance(20.0);
        assert!(!timer.poll());
        assert_eq!(timer.remaining_ms(), Some(30.0));
    }
}
