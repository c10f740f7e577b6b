//! Accessory light state and its persisted encoding.

use crate::color::Hsv;

/// Factory-default hue (teal-ish).
pub const HUE_DEFAULT: u8 = 125;
/// Factory-default saturation.
pub const SATURATION_DEFAULT: u8 = 204;
/// Factory-default brightness / value.
pub const BRIGHTNESS_DEFAULT: u8 = 120;

/// One light state: power flag, power-fade envelope level and HSV color.
///
/// `brightness` is the level the power fade moves through; on the target
/// side it stores the last non-zero commanded brightness, used as the
/// fade-in goal when the strip turns back on.
#[derive(Clone, Copy)]
pub struct LightState {
    pub on: bool,
    pub brightness: u8,
    pub color: Hsv,
}

impl core::fmt::Debug for LightState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LightState")
            .field("on", &self.on)
            .field("brightness", &self.brightness)
            .field("color.hue", &self.color.hue)
            .field("color.sat", &self.color.sat)
            .field("color.val", &self.color.val)
            .finish()
    }
}

impl LightState {
    /// Size of one encoded state.
    pub const ENCODED_SIZE: usize = 5;

    fn encode(&self) -> [u8; Self::ENCODED_SIZE] {
        [
            u8::from(self.on),
            self.brightness,
            self.color.hue,
            self.color.sat,
            self.color.val,
        ]
    }

    fn decode(data: &[u8]) -> Self {
        Self {
            on: data[0] != 0,
            brightness: data[1],
            color: Hsv {
                hue: data[2],
                sat: data[3],
                val: data[4],
            },
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self {
            on: false,
            brightness: BRIGHTNESS_DEFAULT,
            color: Hsv {
                hue: HUE_DEFAULT,
                sat: SATURATION_DEFAULT,
                val: BRIGHTNESS_DEFAULT,
            },
        }
    }
}

/// The rendered/commanded state pair.
///
/// The transition tick only mutates `current`; command handlers only
/// mutate `target`. While the two differ the tick timer must be running.
#[derive(Clone, Copy, Debug)]
pub struct AccessoryState {
    /// What is physically rendered on the strip.
    pub current: LightState,
    /// What was last commanded.
    pub target: LightState,
}

impl Default for AccessoryState {
    fn default() -> Self {
        // An off strip rests with the fade envelope at zero; the
        // commanded side keeps the factory brightness as the fade-in
        // goal for the first power-on.
        let target = LightState::default();
        Self {
            current: LightState {
                brightness: 0,
                ..target
            },
            target,
        }
    }
}

impl AccessoryState {
    /// Size of the encoded `{current, target}` record.
    pub const ENCODED_SIZE: usize = 2 * LightState::ENCODED_SIZE;

    /// At-rest condition: the rendered state matches the commanded state
    /// in power flag and color tuple. The fade envelope is excluded —
    /// an off strip rests at envelope 0 while the commanded brightness
    /// keeps the resume level.
    pub fn converged(&self) -> bool {
        self.current.on == self.target.on
            && self.current.color.hue == self.target.color.hue
            && self.current.color.sat == self.target.color.sat
            && self.current.color.val == self.target.color.val
    }

    /// Encode the pair as the opaque persisted record.
    pub fn encode(&self) -> [u8; Self::ENCODED_SIZE] {
        let mut out = [0u8; Self::ENCODED_SIZE];
        out[..LightState::ENCODED_SIZE].copy_from_slice(&self.current.encode());
        out[LightState::ENCODED_SIZE..].copy_from_slice(&self.target.encode());
        out
    }

    /// Decode a persisted record.
    ///
    /// Returns `None` when `data` is shorter than the record size.
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < Self::ENCODED_SIZE {
            return None;
        }
        Some(Self {
            current: LightState::decode(&data[..LightState::ENCODED_SIZE]),
            target: LightState::decode(&data[LightState::ENCODED_SIZE..Self::ENCODED_SIZE]),
        })
    }
}
