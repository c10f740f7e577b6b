#![no_std]

//! Smart lightstrip accessory core.
//!
//! Accepts on/off, hue, saturation and brightness commands from an
//! accessory-protocol transport and renders them onto an addressable LED
//! strip as smooth transitions. The heart of the crate is the transition
//! engine in [`accessory`]: a periodic-timer-driven state machine that
//! blends the rendered state toward the commanded state one tick at a
//! time and keeps the timer running only while a visible change is in
//! progress.
//!
//! The platform seams (LED hardware, durable key-value store, periodic
//! timer) are traits the accessory is generic over.

pub mod accessory;
pub mod color;
pub mod command;
pub mod error;
pub mod events;
pub mod math8;
pub mod scheduler;
pub mod state;
pub mod store;

pub use accessory::{COLOR_STEP, Lightstrip, POWER_FADE_STEP};
pub use color::{Hsv, Rgb};
pub use command::{Characteristic, CharacteristicValue};
pub use error::Fault;
pub use events::{EventOverflow, EventQueue, EventReceiver, EventSender};
pub use scheduler::{TICK_INTERVAL, TICK_RATE_HZ, TickTimer, TimerStart, TimerStop};
pub use state::{AccessoryState, LightState};
pub use store::{KeyValueStore, STATE_DOMAIN, STATE_KEY, StateStore};

pub use embassy_time::Duration;

/// Abstract LED strip driver
///
/// Implement this trait to support different hardware platforms.
/// The accessory is generic over this trait.
pub trait StripDriver {
    /// Set the strip-wide brightness applied to subsequent writes
    fn set_brightness(&mut self, value: u8);

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
