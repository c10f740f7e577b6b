//! Lightstrip accessory orchestration.
//!
//! Owns the rendered/commanded state pair, translates protocol read and
//! write requests into target mutations, and drives the per-tick
//! transition of the rendered state toward the target.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::StripDriver;
use crate::color::{Rgb, hsv2rgb};
use crate::command::{
    Characteristic, CharacteristicValue, brightness_from_percent, brightness_to_percent,
    hue_from_degrees, hue_to_degrees, percent_to_unit, unit_to_percent,
};
use crate::error::Fault;
use crate::events::EventSender;
use crate::math8::{step8, step8_wrap};
use crate::scheduler::{TICK_INTERVAL, TickTimer};
use crate::state::{AccessoryState, LightState};
use crate::store::{KeyValueStore, StateStore};

/// Per-tick change applied to the hue, saturation and value channels.
pub const COLOR_STEP: u8 = 4;

/// Per-tick change applied to the power fade envelope.
pub const POWER_FADE_STEP: u8 = 8;

/// Light strip accessory
///
/// The single process-wide instance owning the accessory state. Generic
/// over the three platform seams and the strip length `N`.
///
/// Two invocation paths exist and share one dispatch context: the
/// transport calls [`read`](Self::read) / [`write`](Self::write), and the
/// platform timer calls [`tick`](Self::tick) while a transition is in
/// progress. Neither is ever re-entered concurrently, so no locking is
/// needed around the state pair.
pub struct Lightstrip<'a, D, K, T, const N: usize>
where
    D: StripDriver,
    K: KeyValueStore,
    T: TickTimer,
{
    state: AccessoryState,
    /// True while a power fade is in flight. Armed by an accepted power
    /// write (including a reversal of one in flight), cleared when the
    /// envelope reaches its goal.
    fading: bool,
    frame: [Rgb; N],
    driver: D,
    store: StateStore<K>,
    timer: T,
    events: EventSender<'a>,
}

impl<'a, D, K, T, const N: usize> Lightstrip<'a, D, K, T, N>
where
    D: StripDriver,
    K: KeyValueStore,
    T: TickTimer,
{
    /// Create the accessory, restoring the persisted state.
    ///
    /// Loads the `{current, target}` record (defaulting on absence or
    /// size mismatch), paints the strip with the restored rendered state,
    /// and resumes an interrupted transition when the loaded pair is not
    /// converged.
    pub fn new(driver: D, kv: K, timer: T, events: EventSender<'a>) -> Result<Self, Fault> {
        let mut store = StateStore::new(kv);
        let state = store.load()?;
        let fading = state.current.on != state.target.on;
        let mut strip = Self {
            state,
            fading,
            frame: [Rgb::default(); N],
            driver,
            store,
            timer,
            events,
        };

        // The envelope tracks the rendered global level, including
        // mid-fade snapshots, so restoring it repaints what was last
        // visible.
        strip.driver.set_brightness(strip.state.current.brightness);
        strip.paint();

        if !strip.at_rest() {
            strip.request_update()?;
        }
        Ok(strip)
    }

    /// The presently rendered state.
    pub fn current(&self) -> &LightState {
        &self.state.current
    }

    /// The most recently commanded state.
    pub fn target(&self) -> &LightState {
        &self.state.target
    }

    /// Handle a read request for `characteristic`.
    ///
    /// Values are reported from the rendered state, converted to the
    /// protocol domain.
    pub fn read(&self, characteristic: Characteristic) -> CharacteristicValue {
        let current = &self.state.current;
        match characteristic {
            Characteristic::On => CharacteristicValue::On(current.on),
            Characteristic::Hue => CharacteristicValue::Hue(hue_to_degrees(current.color.hue)),
            Characteristic::Saturation => {
                CharacteristicValue::Saturation(unit_to_percent(current.color.sat))
            }
            Characteristic::Brightness => {
                CharacteristicValue::Brightness(brightness_to_percent(current.color.val))
            }
        }
    }

    /// Handle a write request.
    ///
    /// Converts the value to the internal domain and, only when it
    /// differs from the stored target: updates the target, ensures the
    /// tick timer is running, persists the state record and raises a
    /// change notification. A redundant write is a complete no-op.
    pub fn write(&mut self, value: CharacteristicValue) -> Result<(), Fault> {
        let target = &mut self.state.target;
        let changed = match value {
            CharacteristicValue::On(on) => {
                if target.on == on {
                    false
                } else {
                    target.on = on;
                    true
                }
            }
            CharacteristicValue::Hue(degrees) => {
                let hue = hue_from_degrees(degrees);
                if target.color.hue == hue {
                    false
                } else {
                    target.color.hue = hue;
                    true
                }
            }
            CharacteristicValue::Saturation(percent) => {
                let sat = percent_to_unit(percent);
                if target.color.sat == sat {
                    false
                } else {
                    target.color.sat = sat;
                    true
                }
            }
            CharacteristicValue::Brightness(percent) => {
                let val = brightness_from_percent(percent);
                if target.color.val == val {
                    false
                } else {
                    target.color.val = val;
                    // Zero is rendered but not kept as the resume level.
                    if val != 0 {
                        target.brightness = val;
                    }
                    true
                }
            }
        };

        if !changed {
            return Ok(());
        }

        if let CharacteristicValue::On(_) = value {
            // A reversal mid-fade only changes the goal; the envelope
            // keeps stepping from wherever it is.
            self.fading = true;
        }

        #[cfg(feature = "esp32-log")]
        println!("write accepted: {:?}", value);

        self.request_update()?;
        self.store.save(&self.state)?;
        let _ = self.events.raise(value.characteristic());
        Ok(())
    }

    /// Ensure the tick timer is running at [`TICK_INTERVAL`].
    ///
    /// A timer that is already running is left untouched; commands
    /// arriving between ticks must not reset the phase.
    pub fn request_update(&mut self) -> Result<(), Fault> {
        self.timer.start_periodic(TICK_INTERVAL)?;
        Ok(())
    }

    /// One transition tick.
    ///
    /// Invoked by the platform timer at the frame rate while a change is
    /// in progress. Narrows the gap between the rendered and commanded
    /// state by one step, repaints the strip, and stops the timer once
    /// the two are equal.
    pub fn tick(&mut self) {
        let state = &mut self.state;
        if self.fading {
            // Power fade takes priority; the color channels hold so a
            // fade-to-black does not shift hue visibly.
            let goal = if state.target.on {
                state.target.brightness
            } else {
                0
            };
            state.current.brightness = step8(state.current.brightness, goal, POWER_FADE_STEP);
            if state.current.brightness == goal {
                state.current.on = state.target.on;
                self.fading = false;
            }
            self.driver.set_brightness(state.current.brightness);
        } else {
            let (current, target) = (&mut state.current.color, state.target.color);
            current.val = step8(current.val, target.val, COLOR_STEP);
            current.hue = step8_wrap(current.hue, target.hue, COLOR_STEP);
            current.sat = step8(current.sat, target.sat, COLOR_STEP);
            // Value doubles as the rendered brightness outside a power
            // fade; an off strip stays at level zero. The envelope
            // chases the rendered level stepwise, it never jumps.
            let level = if state.current.on {
                state.current.color.val
            } else {
                0
            };
            state.current.brightness = step8(state.current.brightness, level, POWER_FADE_STEP);
            self.driver.set_brightness(state.current.brightness);
        }

        // The driver has no partial update; repaint the whole strip
        // every tick.
        self.paint();

        if self.at_rest() {
            self.timer.stop();
        }
    }

    /// Nothing left to render: the state pair converged, no fade is
    /// pending, and the envelope rests at the level the power state
    /// calls for.
    fn at_rest(&self) -> bool {
        let settled = if self.state.current.on {
            self.state.current.color.val
        } else {
            0
        };
        !self.fading && self.state.current.brightness == settled && self.state.converged()
    }

    fn paint(&mut self) {
        let rgb = hsv2rgb(self.state.current.color);
        for led in &mut self.frame {
            *led = rgb;
        }
        self.driver.write(&self.frame);
    }
}
