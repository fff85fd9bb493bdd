//! AdaSpace3D Hardware Abstraction Layer
//!
//! Traits the configuration core needs from the board, so the same
//! settings logic runs against the RP2040 flash backend on target and
//! against in-memory doubles on the host.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  adaspace-core (ConfigStore, boot load) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  adaspace-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!            ┌─────────────────┐
//!            │ adaspace-hal-   │
//!            │     rp2040      │
//!            └─────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`flash::FlashStorage`] - Non-volatile storage for the settings image

#![no_std]
#![deny(unsafe_code)]

pub mod flash;

pub use flash::{FlashError, FlashStorage, StorageKey};
