//! Board pin assignments
//!
//! Fixed at build time; unlike [`crate::config::SpaceMouseConfig`] none of
//! this is persisted or editable.

use crate::config::BUTTON_COUNT;

/// GPIO pin with its electrical conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO number (0-29 on the RP2040)
    pub pin: u8,
    /// Pin is active-low
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Switch to ground with the internal pull-up holding the idle level
    pub const fn active_low_button(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }

    /// Logical state from a raw pin level
    pub const fn is_active(&self, level_high: bool) -> bool {
        level_high != self.inverted
    }
}

/// Pin map of one board variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPins {
    /// Magnetometer/IMU I2C data
    pub sda: PinConfig,
    /// Magnetometer/IMU I2C clock
    pub scl: PinConfig,
    /// On-board NeoPixel (status LED)
    pub neopixel: PinConfig,
    /// Switched supply for the sensor
    pub sensor_power: PinConfig,
    /// Plain LED, optional
    pub simple_led: PinConfig,
    /// Physical buttons 1..4, indexed like `button_map`
    pub buttons: [PinConfig; BUTTON_COUNT],
}

/// Adafruit QT Py RP2040
pub const QT_PY_RP2040: BoardPins = BoardPins {
    sda: PinConfig::new(0),
    scl: PinConfig::new(1),
    neopixel: PinConfig::new(12),
    sensor_power: PinConfig::new(11),
    simple_led: PinConfig::new(25),
    buttons: [
        PinConfig::active_low_button(29),
        PinConfig::active_low_button(28),
        PinConfig::active_low_button(27),
        PinConfig::active_low_button(26),
    ],
};

impl BoardPins {
    /// Physical button index wired to `pin`
    pub fn button_index(&self, pin: u8) -> Option<usize> {
        self.buttons.iter().position(|b| b.pin == pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SpaceMouseConfig;

    #[test]
    fn test_qt_py_pins_unique() {
        let board = QT_PY_RP2040;
        let mut pins = [
            board.sda.pin,
            board.scl.pin,
            board.neopixel.pin,
            board.sensor_power.pin,
            board.simple_led.pin,
            board.buttons[0].pin,
            board.buttons[1].pin,
            board.buttons[2].pin,
            board.buttons[3].pin,
        ];
        pins.sort_unstable();
        assert!(pins.windows(2).all(|w| w[0] != w[1]));
        assert!(pins.iter().all(|&p| p <= 29));
    }

    #[test]
    fn test_buttons_are_active_low() {
        let button = QT_PY_RP2040.buttons[0];
        assert!(button.pull_up);
        assert!(button.is_active(false));
        assert!(!button.is_active(true));
        assert!(PinConfig::new(3).is_active(true));
    }

    #[test]
    fn test_every_button_has_a_map_slot() {
        let config = SpaceMouseConfig::defaults();
        assert_eq!(QT_PY_RP2040.buttons.len(), config.button_map.len());
        for button in QT_PY_RP2040.buttons {
            let index = QT_PY_RP2040.button_index(button.pin).unwrap();
            assert!(config.hid_button(index).is_some());
        }
    }

    #[test]
    fn test_pin_to_hid_button() {
        let mut config = SpaceMouseConfig::defaults();
        config.button_map = [10, 11, 12, 13];

        let index = QT_PY_RP2040.button_index(27).unwrap();
        assert_eq!(index, 2);
        assert_eq!(config.hid_button(index), Some(12));
        assert_eq!(QT_PY_RP2040.button_index(5), None);
    }
}
