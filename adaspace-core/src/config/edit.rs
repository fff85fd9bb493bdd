//! Settings edits from the host configurator
//!
//! Each edit touches one field (or one field group such as the LED color).
//! Values are checked before they reach the live settings; the magic is
//! not addressable at all. With the `serde` feature, edits travel over the
//! serial link as postcard frames.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::led::{LedMode, UndefinedLedMode};
use super::model::{Axis, BUTTON_COUNT};
use super::ranges::{DEADZONE_RANGE, GAMMA_RANGE, SMOOTHING_RANGE};
use super::store::ConfigStore;

/// Largest encoded [`SettingEdit`]
pub const MAX_EDIT_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SettingEdit {
    Smoothing(f32),
    Gamma(f32),
    Deadzone(f32),
    Gain(Axis, f32),
    Invert(Axis, bool),
    SwapXy(bool),
    /// `button` is the 0-based physical index
    ButtonMap { button: u8, hid_id: u8 },
    LedMode(u8),
    LedColor { r: u8, g: u8, b: u8 },
    LedBrightness(u8),
    EncoderEnabled(bool),
    EncoderGain(f32),
    EncoderInvert(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditError {
    /// NaN or infinity
    NonFinite,
    /// Value outside the field's domain
    OutOfRange,
    /// No such physical button
    InvalidButton(u8),
    /// LED mode byte outside the known modes
    UndefinedLedMode(u8),
    /// Frame did not decode to an edit
    Malformed,
}

impl From<UndefinedLedMode> for EditError {
    fn from(e: UndefinedLedMode) -> Self {
        EditError::UndefinedLedMode(e.0)
    }
}

fn checked(value: f32, range: Option<&core::ops::RangeInclusive<f32>>) -> Result<f32, EditError> {
    if !value.is_finite() {
        return Err(EditError::NonFinite);
    }
    match range {
        Some(range) if !range.contains(&value) => Err(EditError::OutOfRange),
        _ => Ok(value),
    }
}

#[cfg(feature = "serde")]
impl SettingEdit {
    /// Decode one edit from a postcard frame
    pub fn decode(bytes: &[u8]) -> Result<Self, EditError> {
        postcard::from_bytes(bytes).map_err(|_| EditError::Malformed)
    }

    /// Encode into `buffer`, returning the used prefix
    pub fn encode<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], EditError> {
        postcard::to_slice(self, buffer).map_err(|_| EditError::Malformed)
    }
}

impl ConfigStore {
    /// Check and apply one edit, requesting a persist on success
    ///
    /// A rejected edit leaves the live settings untouched.
    pub fn apply(&mut self, edit: SettingEdit) -> Result<(), EditError> {
        match edit {
            SettingEdit::Smoothing(v) => {
                let v = checked(v, Some(&SMOOTHING_RANGE))?;
                self.update(|cfg| cfg.smoothing = v);
            }
            SettingEdit::Gamma(v) => {
                let v = checked(v, Some(&GAMMA_RANGE))?;
                self.update(|cfg| cfg.gamma = v);
            }
            SettingEdit::Deadzone(v) => {
                let v = checked(v, Some(&DEADZONE_RANGE))?;
                self.update(|cfg| cfg.deadzone = v);
            }
            SettingEdit::Gain(axis, v) => {
                let v = checked(v, None)?;
                if v < 0.0 {
                    return Err(EditError::OutOfRange);
                }
                self.update(|cfg| *cfg.gain_mut(axis) = v);
            }
            SettingEdit::Invert(axis, on) => self.update(|cfg| *cfg.inverted_mut(axis) = on),
            SettingEdit::SwapXy(on) => self.update(|cfg| cfg.swap_xy = on),
            SettingEdit::ButtonMap { button, hid_id } => {
                let index = button as usize;
                if index >= BUTTON_COUNT {
                    return Err(EditError::InvalidButton(button));
                }
                self.update(|cfg| cfg.button_map[index] = hid_id);
            }
            SettingEdit::LedMode(raw) => {
                let mode = LedMode::try_from(raw)?;
                self.update(|cfg| cfg.led_mode = mode.into());
            }
            SettingEdit::LedColor { r, g, b } => self.update(|cfg| {
                cfg.led_color_r = r;
                cfg.led_color_g = g;
                cfg.led_color_b = b;
            }),
            SettingEdit::LedBrightness(v) => self.update(|cfg| cfg.led_brightness = v),
            SettingEdit::EncoderEnabled(on) => self.update(|cfg| cfg.enc_enabled = on),
            SettingEdit::EncoderGain(v) => {
                let v = checked(v, None)?;
                self.update(|cfg| cfg.enc_gain = v);
            }
            SettingEdit::EncoderInvert(on) => self.update(|cfg| cfg.enc_invert = on),
        }
        debug!("Applied setting edit");
        Ok(())
    }
}
