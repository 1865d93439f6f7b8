//! Ambient Runtime - Animation loop infrastructure
//!
//! Provides the building blocks the effect loop runs on:
//! - `Clock`: injectable time source (`SystemClock`, `VirtualClock`)
//! - `FrameClock`: per-session frame delta tracking
//! - `TimerScheduler`: single cancellable deadline standing in for frame callbacks
//! - `EffectEvent` / `EventBus`: typed event queue drained by the host

mod clock;
mod event;
mod event_bus;
mod scheduler;

pub use clock::{Clock, FrameClock, SharedClock, SystemClock, VirtualClock};
pub use event::EffectEvent;
pub use event_bus::EventBus;
pub use scheduler::TimerScheduler;
