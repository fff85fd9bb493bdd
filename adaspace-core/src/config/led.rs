//! LED settings as seen by the LED driver
//!
//! The struct stores `led_mode` as a raw byte. Decoding it is the driver's
//! job, and an undefined value is reported rather than silently defaulted.

use super::model::SpaceMouseConfig;

/// Status LED animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LedMode {
    /// Solid color
    Static = 0,
    /// Slow brightness pulse
    Breathing = 1,
    /// Brightness follows motion magnitude
    Reactive = 2,
}

/// `led_mode` byte outside the known modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UndefinedLedMode(pub u8);

impl TryFrom<u8> for LedMode {
    type Error = UndefinedLedMode;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LedMode::Static),
            1 => Ok(LedMode::Breathing),
            2 => Ok(LedMode::Reactive),
            other => Err(UndefinedLedMode(other)),
        }
    }
}

impl From<LedMode> for u8 {
    fn from(mode: LedMode) -> Self {
        mode as u8
    }
}

impl LedMode {
    /// Safe mode for a driver that hit an undefined value
    pub const fn fallback() -> Self {
        LedMode::Static
    }
}

/// Snapshot of the LED fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedSettings {
    pub mode: Result<LedMode, UndefinedLedMode>,
    pub color: (u8, u8, u8),
    pub brightness: u8,
}

impl LedSettings {
    /// Color with brightness applied, rounded to nearest
    pub fn scaled_color(&self) -> (u8, u8, u8) {
        let scale = |c: u8| ((c as u16 * self.brightness as u16 + 127) / 255) as u8;
        (scale(self.color.0), scale(self.color.1), scale(self.color.2))
    }
}

impl SpaceMouseConfig {
    pub fn led(&self) -> LedSettings {
        LedSettings {
            mode: LedMode::try_from(self.led_mode),
            color: (self.led_color_r, self.led_color_g, self.led_color_b),
            brightness: self.led_brightness,
        }
    }
}
