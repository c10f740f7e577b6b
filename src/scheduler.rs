//! Transition tick scheduling.
//!
//! The platform owns one periodic timer that invokes
//! [`Lightstrip::tick`](crate::Lightstrip::tick) on its dispatch context.
//! The timer is created once and started/stopped repeatedly; the trait
//! below is the seam, so tests can drive ticks without real time passing.

use embassy_time::Duration;

use crate::error::Fault;

/// Visual update rate while a transition is in progress.
pub const TICK_RATE_HZ: u64 = 60;

/// Period of the transition tick timer.
pub const TICK_INTERVAL: Duration = Duration::from_micros(1_000_000 / TICK_RATE_HZ);

/// Outcome of starting a periodic timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStart {
    /// The timer was idle and is now running.
    Started,
    /// The timer was already running; its phase is unchanged.
    AlreadyRunning,
}

/// Outcome of stopping a periodic timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStop {
    /// The timer was running and is now stopped.
    Stopped,
    /// The timer was already idle.
    AlreadyStopped,
}

/// Platform periodic timer driving the transition tick.
pub trait TickTimer {
    /// Begin firing the tick callback every `interval`.
    ///
    /// `AlreadyRunning` is success: repeated start requests must not
    /// reset the phase or create a duplicate timer. Any other failure is
    /// an unrecoverable platform fault.
    fn start_periodic(&mut self, interval: Duration) -> Result<TimerStart, Fault>;

    /// Stop firing ticks.
    ///
    /// Stopping an idle timer reports `AlreadyStopped` and is success.
    fn stop(&mut self) -> TimerStop;
}
