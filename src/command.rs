//! Typed characteristic commands at the accessory protocol boundary.
//!
//! The transport exposes hue in degrees and saturation/brightness in
//! percent; internally every channel is 8-bit. The conversion helpers
//! here are the only place the two domains meet.

use libm::roundf;

/// Characteristics exposed by the light bulb service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Characteristic {
    On,
    Hue,
    Saturation,
    Brightness,
}

/// A characteristic value in its external protocol domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacteristicValue {
    /// Power state
    On(bool),
    /// Hue in degrees (0-360)
    Hue(f32),
    /// Saturation in percent (0-100)
    Saturation(f32),
    /// Brightness in percent (0-100)
    Brightness(u8),
}

impl CharacteristicValue {
    /// The characteristic this value belongs to.
    pub const fn characteristic(&self) -> Characteristic {
        match self {
            Self::On(_) => Characteristic::On,
            Self::Hue(_) => Characteristic::Hue,
            Self::Saturation(_) => Characteristic::Saturation,
            Self::Brightness(_) => Characteristic::Brightness,
        }
    }
}

/// Convert an internal hue (0-255 ring) to protocol degrees (0-360).
pub fn hue_to_degrees(hue: u8) -> f32 {
    f32::from(hue) * 360.0 / 255.0
}

/// Convert protocol degrees (0-360) to the internal hue ring (0-255).
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn hue_from_degrees(degrees: f32) -> u8 {
    roundf(degrees * 255.0 / 360.0) as u8
}

/// Convert an internal 0-255 channel to protocol percent (0-100).
pub fn unit_to_percent(value: u8) -> f32 {
    f32::from(value) * 100.0 / 255.0
}

/// Convert protocol percent (0-100) to an internal 0-255 channel.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn percent_to_unit(percent: f32) -> u8 {
    roundf(percent * 255.0 / 100.0) as u8
}

/// Convert an internal 0-255 brightness to integer protocol percent.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn brightness_to_percent(value: u8) -> u8 {
    roundf(unit_to_percent(value)) as u8
}

/// Convert integer protocol percent to an internal 0-255 brightness.
pub fn brightness_from_percent(percent: u8) -> u8 {
    percent_to_unit(f32::from(percent))
}
