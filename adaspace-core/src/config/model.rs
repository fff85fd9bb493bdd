//! The persisted settings struct
//!
//! `SpaceMouseConfig` is read every control cycle by the motion pipeline,
//! the button mapper, the LED driver and the encoder reader. Its layout is
//! also the on-flash format, so the field list below is frozen for a given
//! `CONFIG_MAGIC`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Layout version tag
///
/// Bump whenever a field is added, removed, reordered or resized. Images
/// carrying any other value are discarded wholesale at boot.
pub const CONFIG_MAGIC: u32 = 0xAD45_DAC4;

/// Number of physical buttons, and so the length of `button_map`
pub const BUTTON_COUNT: usize = 4;

/// Motion axes reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Pan left/right
    Tx,
    /// Pan forward/back
    Ty,
    /// Push/pull (zoom)
    Tz,
    /// Tilt forward/back
    Rx,
    /// Tilt left/right
    Ry,
    /// Twist
    Rz,
}

impl Axis {
    /// All axes in HID report order
    pub const ALL: [Axis; 6] = [Axis::Tx, Axis::Ty, Axis::Tz, Axis::Rx, Axis::Ry, Axis::Rz];

    pub fn is_rotation(self) -> bool {
        matches!(self, Axis::Rx | Axis::Ry | Axis::Rz)
    }
}

/// Runtime-tunable parameters of the space mouse
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpaceMouseConfig {
    pub(crate) magic: u32,

    // Physics
    /// 0.0 (raw) to 0.95 (heavy averaging)
    pub smoothing: f32,
    /// 1.0 (linear) to 3.0 (cubic precision)
    pub gamma: f32,
    /// Per-axis magnitude treated as zero, roughly 0.5 to 5.0
    pub deadzone: f32,

    // Axis gains
    pub gain_tx: f32,
    pub gain_ty: f32,
    pub gain_tz: f32,
    pub gain_rx: f32,
    pub gain_ry: f32,
    pub gain_rz: f32,

    // Axis inverts
    pub inv_tx: bool,
    pub inv_ty: bool,
    pub inv_tz: bool,
    pub inv_rx: bool,
    pub inv_ry: bool,
    pub inv_rz: bool,

    /// Rotate the virtual reference frame by 90°
    pub swap_xy: bool,

    /// HID button id emitted for physical buttons 1..4
    pub button_map: [u8; BUTTON_COUNT],

    /// 0 = Static, 1 = Breathing, 2 = Reactive
    ///
    /// Kept raw: an undefined value is the LED driver's fault to report.
    pub led_mode: u8,
    pub led_color_r: u8,
    pub led_color_g: u8,
    pub led_color_b: u8,
    pub led_brightness: u8,

    // Encoder
    pub enc_enabled: bool,
    pub enc_gain: f32,
    pub enc_invert: bool,
}

impl Default for SpaceMouseConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

impl SpaceMouseConfig {
    /// Factory settings stamped with the current `CONFIG_MAGIC`
    pub const fn defaults() -> Self {
        Self {
            magic: CONFIG_MAGIC,
            smoothing: DEFAULT_SMOOTHING,
            gamma: DEFAULT_GAMMA,
            deadzone: DEFAULT_DEADZONE,
            gain_tx: DEFAULT_GAIN_TRANS,
            gain_ty: DEFAULT_GAIN_TRANS,
            gain_tz: DEFAULT_GAIN_ZOOM,
            gain_rx: DEFAULT_GAIN_ROT,
            gain_ry: DEFAULT_GAIN_ROT,
            gain_rz: DEFAULT_GAIN_ROT,
            inv_tx: false,
            inv_ty: false,
            inv_tz: false,
            inv_rx: false,
            inv_ry: false,
            inv_rz: false,
            swap_xy: false,
            button_map: DEFAULT_BUTTON_MAP,
            led_mode: DEFAULT_LED_MODE,
            led_color_r: DEFAULT_LED_R,
            led_color_g: DEFAULT_LED_G,
            led_color_b: DEFAULT_LED_B,
            led_brightness: DEFAULT_LED_BRIGHTNESS,
            enc_enabled: DEFAULT_ENC_ENABLED,
            enc_gain: DEFAULT_ENC_GAIN,
            enc_invert: false,
        }
    }

    /// Layout version tag this instance was built or decoded with
    pub const fn magic(&self) -> u32 {
        self.magic
    }

    /// Whether this instance was written by a build with the same layout
    ///
    /// Only the magic is compared. Field ranges are a separate pass, see
    /// [`SpaceMouseConfig::check_ranges`].
    pub const fn validate(&self) -> bool {
        self.magic == CONFIG_MAGIC
    }

    pub fn gain(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Tx => self.gain_tx,
            Axis::Ty => self.gain_ty,
            Axis::Tz => self.gain_tz,
            Axis::Rx => self.gain_rx,
            Axis::Ry => self.gain_ry,
            Axis::Rz => self.gain_rz,
        }
    }

    pub fn inverted(&self, axis: Axis) -> bool {
        match axis {
            Axis::Tx => self.inv_tx,
            Axis::Ty => self.inv_ty,
            Axis::Tz => self.inv_tz,
            Axis::Rx => self.inv_rx,
            Axis::Ry => self.inv_ry,
            Axis::Rz => self.inv_rz,
        }
    }

    /// Gain with the axis invert folded into its sign
    pub fn signed_gain(&self, axis: Axis) -> f32 {
        let gain = self.gain(axis);
        if self.inverted(axis) {
            -gain
        } else {
            gain
        }
    }

    pub(crate) fn gain_mut(&mut self, axis: Axis) -> &mut f32 {
        match axis {
            Axis::Tx => &mut self.gain_tx,
            Axis::Ty => &mut self.gain_ty,
            Axis::Tz => &mut self.gain_tz,
            Axis::Rx => &mut self.gain_rx,
            Axis::Ry => &mut self.gain_ry,
            Axis::Rz => &mut self.gain_rz,
        }
    }

    pub(crate) fn inverted_mut(&mut self, axis: Axis) -> &mut bool {
        match axis {
            Axis::Tx => &mut self.inv_tx,
            Axis::Ty => &mut self.inv_ty,
            Axis::Tz => &mut self.inv_tz,
            Axis::Rx => &mut self.inv_rx,
            Axis::Ry => &mut self.inv_ry,
            Axis::Rz => &mut self.inv_rz,
        }
    }

    /// HID button id for a physical button (0-based)
    ///
    /// Several physical buttons may map to the same id.
    pub fn hid_button(&self, physical: usize) -> Option<u8> {
        self.button_map.get(physical).copied()
    }

    /// Scale a raw encoder step count
    ///
    /// Returns `None` while the encoder is gated off, so the reader can
    /// skip polling entirely.
    pub fn encoder_delta(&self, raw_steps: i32) -> Option<f32> {
        if !self.enc_enabled {
            return None;
        }
        let delta = raw_steps as f32 * self.enc_gain;
        Some(if self.enc_invert { -delta } else { delta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_carry_magic() {
        let config = SpaceMouseConfig::defaults();
        assert_eq!(config.magic(), CONFIG_MAGIC);
        assert!(config.validate());
    }

    #[test]
    fn test_default_values() {
        let config = SpaceMouseConfig::default();
        assert_eq!(config.smoothing, 0.5);
        assert_eq!(config.gamma, 1.5);
        assert_eq!(config.deadzone, 1.0);
        assert_eq!(config.gain_tx, 100.0);
        assert_eq!(config.gain_ty, 100.0);
        assert_eq!(config.gain_tz, 50.0);
        for axis in [Axis::Rx, Axis::Ry, Axis::Rz] {
            assert_eq!(config.gain(axis), 40.0);
        }
        assert!(Axis::ALL.iter().all(|&axis| !config.inverted(axis)));
        assert!(!config.swap_xy);
        assert_eq!(config.button_map, [1, 2, 3, 4]);
        assert_eq!(config.led_mode, 2);
        assert_eq!(
            (config.led_color_r, config.led_color_g, config.led_color_b),
            (0, 255, 255)
        );
        assert_eq!(config.led_brightness, 50);
        assert!(!config.enc_enabled);
        assert_eq!(config.enc_gain, 1.0);
        assert!(!config.enc_invert);
    }

    #[test]
    fn test_wrong_magic_fails_validation() {
        let mut config = SpaceMouseConfig::defaults();
        config.magic = CONFIG_MAGIC ^ 1;
        assert!(!config.validate());
        config.magic = 0;
        assert!(!config.validate());
    }

    #[test]
    fn test_signed_gain_follows_invert() {
        let mut config = SpaceMouseConfig::defaults();
        config.inv_ry = true;
        assert_eq!(config.signed_gain(Axis::Ry), -40.0);
        assert_eq!(config.signed_gain(Axis::Rx), 40.0);
    }

    #[test]
    fn test_axis_accessors_are_independent() {
        let mut config = SpaceMouseConfig::defaults();
        for (i, axis) in Axis::ALL.iter().enumerate() {
            *config.gain_mut(*axis) = i as f32;
        }
        *config.inverted_mut(Axis::Tz) = true;

        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(config.gain(*axis), i as f32);
            assert_eq!(config.inverted(*axis), *axis == Axis::Tz);
        }
        assert!(config.inv_tz);
    }

    #[test]
    fn test_duplicate_button_ids_allowed() {
        let mut config = SpaceMouseConfig::defaults();
        config.button_map = [5, 5, 5, 5];
        assert!(config.validate());
        assert_eq!(config.hid_button(0), Some(5));
        assert_eq!(config.hid_button(3), Some(5));
        assert_eq!(config.hid_button(4), None);
    }

    #[test]
    fn test_encoder_gated_and_scaled() {
        let mut config = SpaceMouseConfig::defaults();
        assert_eq!(config.encoder_delta(3), None);

        config.enc_enabled = true;
        config.enc_gain = 2.5;
        assert_eq!(config.encoder_delta(2), Some(5.0));

        config.enc_invert = true;
        assert_eq!(config.encoder_delta(2), Some(-5.0));
        assert_eq!(config.encoder_delta(-4), Some(10.0));
    }

    #[test]
    fn test_rotation_axes() {
        let rotations = Axis::ALL.iter().filter(|a| a.is_rotation()).count();
        assert_eq!(rotations, 3);
        assert!(!Axis::Tz.is_rotation());
    }
}
