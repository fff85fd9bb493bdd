//! Factory default values
//!
//! Everything a fresh or reset device boots with. Changing a value here
//! does not require a `CONFIG_MAGIC` bump; changing the struct layout does.

use super::model::BUTTON_COUNT;

/// Temporal smoothing factor (0.0 = raw)
pub const DEFAULT_SMOOTHING: f32 = 0.5;

/// Response curve exponent (1.0 = linear)
pub const DEFAULT_GAMMA: f32 = 1.5;

/// Per-axis deadzone in sensor units
pub const DEFAULT_DEADZONE: f32 = 1.0;

/// Gain for the pan axes (TX, TY)
pub const DEFAULT_GAIN_TRANS: f32 = 100.0;

/// Gain for the rotation axes (RX, RY, RZ)
pub const DEFAULT_GAIN_ROT: f32 = 40.0;

/// Gain for the push/pull axis (TZ), which hosts map to zoom
pub const DEFAULT_GAIN_ZOOM: f32 = 50.0;

/// HID button ids emitted for physical buttons 1..4
pub const DEFAULT_BUTTON_MAP: [u8; BUTTON_COUNT] = [1, 2, 3, 4];

/// Reactive
pub const DEFAULT_LED_MODE: u8 = 2;
pub const DEFAULT_LED_R: u8 = 0;
pub const DEFAULT_LED_G: u8 = 255;
pub const DEFAULT_LED_B: u8 = 255;
pub const DEFAULT_LED_BRIGHTNESS: u8 = 50;

/// Encoder is optional hardware, so it starts gated off
pub const DEFAULT_ENC_ENABLED: bool = false;

/// Pass-through multiplier for encoder detents
pub const DEFAULT_ENC_GAIN: f32 = 1.0;
