//! RP2040-specific backends for the space mouse firmware
//!
//! Implements the shared `adaspace-hal` traits on the Adafruit QT Py
//! RP2040:
//!
//! - Flash storage driver (implements `adaspace_hal::FlashStorage`)

#![no_std]

pub mod flash;

pub use adaspace_hal::{FlashStorage as FlashStorageTrait, StorageKey};
