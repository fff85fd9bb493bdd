//! Persisted settings
//!
//! The settings struct, its raw flash image, the boot-time load that
//! decides whether a stored image can be trusted, and the edit and
//! persistence paths that keep flash and the live settings in step.

pub mod defaults;
pub mod edit;
pub mod image;
pub mod led;
pub mod model;
pub mod persistence;
pub mod ranges;
pub mod store;

pub use edit::{EditError, SettingEdit, MAX_EDIT_SIZE};
pub use image::CONFIG_SIZE;
pub use led::{LedMode, LedSettings, UndefinedLedMode};
pub use model::{Axis, SpaceMouseConfig, BUTTON_COUNT, CONFIG_MAGIC};
pub use persistence::{ConfigPersistence, PersistError};
pub use ranges::{ConfigField, RangeViolation, ViolationKind};
pub use store::{load, BootState, ConfigStore, LoadOutcome, Loaded, RejectReason};
