//! Board-agnostic settings core for the AdaSpace3D space mouse
//!
//! This crate owns everything about the runtime-tunable settings that
//! does not touch hardware directly:
//!
//! - The `SpaceMouseConfig` struct and its factory defaults
//! - The raw flash image and its magic-keyed layout check
//! - Boot-time load with fallback to defaults
//! - Checked edits from the host configurator
//! - Persistence through `adaspace_hal::FlashStorage`
//! - Read-only views for the motion, button, LED and encoder consumers
//! - Board pin assignments

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod board;
pub mod config;
