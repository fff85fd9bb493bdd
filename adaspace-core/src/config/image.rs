//! Raw settings image
//!
//! The image is the struct's memory layout on the RP2040 (little-endian,
//! 4-byte float alignment, 1-byte bools), written field by field so no
//! unsafe transmute is needed. Padding bytes are written as zero and
//! ignored on read.
//!
//! ```text
//!  0  magic          40  inv_tx..inv_rz   51  led_mode
//!  4  smoothing      46  swap_xy          52  led_color_r/g/b
//!  8  gamma          47  button_map[4]    55  led_brightness
//! 12  deadzone                            56  enc_enabled
//! 16  gain_tx..gain_rz (6 x f32)          60  enc_gain
//!                                         64  enc_invert
//! ```

use super::model::{SpaceMouseConfig, BUTTON_COUNT};

/// Size of the persisted image in bytes
pub const CONFIG_SIZE: usize = 68;

const OFF_MAGIC: usize = 0;
const OFF_SMOOTHING: usize = 4;
const OFF_GAMMA: usize = 8;
const OFF_DEADZONE: usize = 12;
const OFF_GAINS: usize = 16;
const OFF_INVERTS: usize = 40;
const OFF_SWAP_XY: usize = 46;
const OFF_BUTTON_MAP: usize = 47;
const OFF_LED_MODE: usize = 51;
const OFF_LED_COLOR: usize = 52;
const OFF_LED_BRIGHTNESS: usize = 55;
const OFF_ENC_ENABLED: usize = 56;
const OFF_ENC_GAIN: usize = 60;
const OFF_ENC_INVERT: usize = 64;

const _: () = assert!(core::mem::size_of::<SpaceMouseConfig>() == CONFIG_SIZE);
const _: () = assert!(OFF_BUTTON_MAP + BUTTON_COUNT == OFF_LED_MODE);

fn put_f32(image: &mut [u8; CONFIG_SIZE], offset: usize, value: f32) {
    image[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn get_f32(image: &[u8; CONFIG_SIZE], offset: usize) -> f32 {
    f32::from_le_bytes([
        image[offset],
        image[offset + 1],
        image[offset + 2],
        image[offset + 3],
    ])
}

fn get_bool(image: &[u8; CONFIG_SIZE], offset: usize) -> bool {
    image[offset] != 0
}

impl SpaceMouseConfig {
    /// Encode into the persisted image
    pub fn to_bytes(&self) -> [u8; CONFIG_SIZE] {
        let mut image = [0u8; CONFIG_SIZE];

        image[OFF_MAGIC..OFF_MAGIC + 4].copy_from_slice(&self.magic.to_le_bytes());
        put_f32(&mut image, OFF_SMOOTHING, self.smoothing);
        put_f32(&mut image, OFF_GAMMA, self.gamma);
        put_f32(&mut image, OFF_DEADZONE, self.deadzone);

        let gains = [
            self.gain_tx,
            self.gain_ty,
            self.gain_tz,
            self.gain_rx,
            self.gain_ry,
            self.gain_rz,
        ];
        for (i, gain) in gains.into_iter().enumerate() {
            put_f32(&mut image, OFF_GAINS + i * 4, gain);
        }

        let inverts = [
            self.inv_tx,
            self.inv_ty,
            self.inv_tz,
            self.inv_rx,
            self.inv_ry,
            self.inv_rz,
        ];
        for (i, inverted) in inverts.into_iter().enumerate() {
            image[OFF_INVERTS + i] = inverted as u8;
        }

        image[OFF_SWAP_XY] = self.swap_xy as u8;
        image[OFF_BUTTON_MAP..OFF_BUTTON_MAP + BUTTON_COUNT].copy_from_slice(&self.button_map);
        image[OFF_LED_MODE] = self.led_mode;
        image[OFF_LED_COLOR] = self.led_color_r;
        image[OFF_LED_COLOR + 1] = self.led_color_g;
        image[OFF_LED_COLOR + 2] = self.led_color_b;
        image[OFF_LED_BRIGHTNESS] = self.led_brightness;
        image[OFF_ENC_ENABLED] = self.enc_enabled as u8;
        put_f32(&mut image, OFF_ENC_GAIN, self.enc_gain);
        image[OFF_ENC_INVERT] = self.enc_invert as u8;

        image
    }

    /// Decode a persisted image without judging it
    ///
    /// Returns `None` only when `bytes` is shorter than [`CONFIG_SIZE`];
    /// trailing bytes are ignored. The magic is not checked and no field
    /// is clamped. Float bit patterns are kept as stored, and a bool byte
    /// reads as true when non-zero.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let image: &[u8; CONFIG_SIZE] = bytes.get(..CONFIG_SIZE)?.try_into().ok()?;

        let mut button_map = [0u8; BUTTON_COUNT];
        button_map.copy_from_slice(&image[OFF_BUTTON_MAP..OFF_BUTTON_MAP + BUTTON_COUNT]);

        Some(Self {
            magic: u32::from_le_bytes([image[0], image[1], image[2], image[3]]),
            smoothing: get_f32(image, OFF_SMOOTHING),
            gamma: get_f32(image, OFF_GAMMA),
            deadzone: get_f32(image, OFF_DEADZONE),
            gain_tx: get_f32(image, OFF_GAINS),
            gain_ty: get_f32(image, OFF_GAINS + 4),
            gain_tz: get_f32(image, OFF_GAINS + 8),
            gain_rx: get_f32(image, OFF_GAINS + 12),
            gain_ry: get_f32(image, OFF_GAINS + 16),
            gain_rz: get_f32(image, OFF_GAINS + 20),
            inv_tx: get_bool(image, OFF_INVERTS),
            inv_ty: get_bool(image, OFF_INVERTS + 1),
            inv_tz: get_bool(image, OFF_INVERTS + 2),
            inv_rx: get_bool(image, OFF_INVERTS + 3),
            inv_ry: get_bool(image, OFF_INVERTS + 4),
            inv_rz: get_bool(image, OFF_INVERTS + 5),
            swap_xy: get_bool(image, OFF_SWAP_XY),
            button_map,
            led_mode: image[OFF_LED_MODE],
            led_color_r: image[OFF_LED_COLOR],
            led_color_g: image[OFF_LED_COLOR + 1],
            led_color_b: image[OFF_LED_COLOR + 2],
            led_brightness: image[OFF_LED_BRIGHTNESS],
            enc_enabled: get_bool(image, OFF_ENC_ENABLED),
            enc_gain: get_f32(image, OFF_ENC_GAIN),
            enc_invert: get_bool(image, OFF_ENC_INVERT),
        })
    }
}
