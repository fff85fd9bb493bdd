//! Live settings ownership and the boot-time load
//!
//! Storage is read once at boot. The candidate image is either adopted
//! as-is or thrown away for factory defaults; there is no partial
//! reinterpretation of an image from a different layout and no retry.
//!
//! ```text
//! Unloaded ──read──▶ CandidateRead ──magic ok──▶ Valid     (live = candidate)
//!                                  └─magic bad─▶ Invalid   (live = defaults,
//!                                                           persist requested)
//! ```
//!
//! Blank storage is judged like a magic mismatch. A read fault also boots
//! on defaults, but leaves storage alone: the image was never judged, so
//! there is nothing known to be stale.

use adaspace_hal::FlashError;

use super::image::CONFIG_SIZE;
use super::model::{SpaceMouseConfig, CONFIG_MAGIC};

/// Where the boot-time load ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootState {
    /// Nothing read yet
    Unloaded,
    /// Image read, not yet judged
    ///
    /// Transient inside the boot load; never the state a finished load
    /// reports.
    CandidateRead,
    /// Image adopted as the live settings
    Valid,
    /// Image rejected, running on defaults
    Invalid,
}

/// Why a stored image was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RejectReason {
    /// Written by a build with another layout, or never written at all
    MagicMismatch { found: u32 },
    /// Fewer bytes than one full image
    ShortImage { len: usize },
    /// Nothing stored yet (first boot or erased partition)
    Blank,
    /// Storage backend failed to read; the stored image is unknown
    Unreadable(FlashError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadOutcome {
    Adopted,
    Reset(RejectReason),
}

/// Result of judging one candidate image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loaded {
    pub config: SpaceMouseConfig,
    pub outcome: LoadOutcome,
}

impl LoadOutcome {
    /// Storage is known to hold no usable image and must be rewritten
    ///
    /// False after a read fault: the unread image may still be good.
    pub fn persist_requested(self) -> bool {
        match self {
            LoadOutcome::Adopted => false,
            LoadOutcome::Reset(RejectReason::Unreadable(_)) => false,
            LoadOutcome::Reset(_) => true,
        }
    }
}

impl Loaded {
    pub fn persist_requested(&self) -> bool {
        self.outcome.persist_requested()
    }
}

/// Adopt `raw` if its magic matches this build, otherwise fall back to
/// defaults
///
/// No field is clamped or range-checked on the adopt path.
pub fn load(raw: &[u8]) -> Loaded {
    let Some(candidate) = SpaceMouseConfig::from_bytes(raw) else {
        return reset(RejectReason::ShortImage { len: raw.len() });
    };

    if candidate.validate() {
        Loaded {
            config: candidate,
            outcome: LoadOutcome::Adopted,
        }
    } else {
        reset(RejectReason::MagicMismatch {
            found: candidate.magic(),
        })
    }
}

fn reset(reason: RejectReason) -> Loaded {
    Loaded {
        config: SpaceMouseConfig::defaults(),
        outcome: LoadOutcome::Reset(reason),
    }
}

/// Owner of the one live settings instance
///
/// Consumers borrow [`ConfigStore::live`] each cycle. All writes go through
/// `&mut self`, so a multi-field update finishes before anyone can read.
#[derive(Debug)]
pub struct ConfigStore {
    live: SpaceMouseConfig,
    outcome: LoadOutcome,
    persist_requested: bool,
}

impl ConfigStore {
    /// Judge a freshly read image
    pub fn from_image(raw: &[u8]) -> (Self, LoadOutcome) {
        let loaded = load(raw);
        (Self::from_loaded(loaded), loaded.outcome)
    }

    /// Start from defaults because storage holds nothing yet
    pub fn blank() -> Self {
        Self::from_loaded(reset(RejectReason::Blank))
    }

    /// Start from defaults because storage failed to read
    ///
    /// No persist is requested, so the unread image survives until the
    /// settings are next edited and saved.
    pub fn unreadable(error: FlashError) -> Self {
        Self::from_loaded(reset(RejectReason::Unreadable(error)))
    }

    /// Factory defaults, flagged for persisting
    pub fn with_defaults() -> Self {
        Self::blank()
    }

    fn from_loaded(loaded: Loaded) -> Self {
        Self {
            live: loaded.config,
            outcome: loaded.outcome,
            persist_requested: loaded.persist_requested(),
        }
    }

    pub fn live(&self) -> &SpaceMouseConfig {
        &self.live
    }

    pub fn boot_state(&self) -> BootState {
        match self.outcome {
            LoadOutcome::Adopted => BootState::Valid,
            LoadOutcome::Reset(_) => BootState::Invalid,
        }
    }

    /// How the boot load ended, including any storage read fault
    pub fn outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// Apply a group of field changes in one step
    ///
    /// The magic is kept whatever the closure does.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut SpaceMouseConfig) -> R) -> R {
        let result = f(&mut self.live);
        self.live.magic = CONFIG_MAGIC;
        self.persist_requested = true;
        result
    }

    /// Replace the live settings with factory defaults
    pub fn reset_to_defaults(&mut self) {
        self.live = SpaceMouseConfig::defaults();
        self.persist_requested = true;
    }

    /// Live settings differ from what storage holds
    pub fn needs_persist(&self) -> bool {
        self.persist_requested
    }

    /// Storage now holds [`ConfigStore::image`]
    pub fn mark_persisted(&mut self) {
        self.persist_requested = false;
    }

    /// Image to hand to the storage backend
    pub fn image(&self) -> [u8; CONFIG_SIZE] {
        self.live.to_bytes()
    }
}
