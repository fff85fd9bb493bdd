//! Settings persistence
//!
//! Reads the settings image once at boot, writes it back whenever the
//! live settings change.

use adaspace_hal::{FlashError, FlashStorage, StorageKey};

use super::image::CONFIG_SIZE;
use super::store::{BootState, ConfigStore, LoadOutcome, RejectReason};

/// Read buffer, larger than one image so oversized blobs are still read
const READ_BUFFER_SIZE: usize = 2 * CONFIG_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PersistError {
    /// Storage backend failed
    Flash(FlashError),
}

impl From<FlashError> for PersistError {
    fn from(e: FlashError) -> Self {
        PersistError::Flash(e)
    }
}

/// Settings persistence manager
pub struct ConfigPersistence<S> {
    storage: S,
    state: BootState,
}

impl<S: FlashStorage> ConfigPersistence<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: BootState::Unloaded,
        }
    }

    /// Give the backend back to the caller
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Progress of the boot-time load
    pub fn state(&self) -> BootState {
        self.state
    }

    /// One-shot boot load
    ///
    /// Never fails: a blank, stale or unreadable image yields defaults.
    /// Blank and stale images are overwritten with defaults straight away;
    /// if that write fails the store stays flagged so the caller can retry
    /// with [`Self::save`]. A read fault leaves storage untouched, and
    /// [`ConfigStore::outcome`] carries the error.
    pub async fn boot(&mut self) -> ConfigStore {
        info!("Loading settings from flash...");

        let mut buffer = [0u8; READ_BUFFER_SIZE];
        let mut store = match self
            .storage
            .read(StorageKey::SpaceMouseConfig, &mut buffer)
            .await
        {
            Ok(len) => {
                debug!("Read {} bytes of settings from flash", len);
                ConfigStore::from_image(&buffer[..len]).0
            }
            Err(e) if e.is_blank() => ConfigStore::blank(),
            Err(e) => ConfigStore::unreadable(e),
        };
        log_outcome(store.outcome());
        self.state = store.boot_state();

        if store.needs_persist() {
            if let Err(e) = self.save(&mut store).await {
                error!("Failed to write default settings: {:?}", e);
            }
        }

        store
    }

    /// Write the live settings if they changed since the last write
    pub async fn save(&mut self, store: &mut ConfigStore) -> Result<(), PersistError> {
        if !store.needs_persist() {
            return Ok(());
        }

        let image = store.image();
        self.storage
            .write(StorageKey::SpaceMouseConfig, &image)
            .await?;
        store.mark_persisted();

        debug!("Saved {} bytes of settings to flash", image.len());
        Ok(())
    }

    /// Wipe the settings partition and start over from defaults
    pub async fn factory_reset(&mut self, store: &mut ConfigStore) -> Result<(), PersistError> {
        warn!("Factory reset: erasing settings partition");
        self.storage.erase_all().await?;
        store.reset_to_defaults();
        self.save(store).await
    }
}

fn log_outcome(outcome: LoadOutcome) {
    match outcome {
        LoadOutcome::Adopted => info!("Settings loaded"),
        LoadOutcome::Reset(RejectReason::MagicMismatch { found }) => {
            warn!("Settings layout mismatch (magic {=u32:#x}), resetting to defaults", found)
        }
        LoadOutcome::Reset(RejectReason::ShortImage { len }) => {
            warn!("Settings image truncated ({} bytes), resetting to defaults", len)
        }
        LoadOutcome::Reset(RejectReason::Blank) => info!("No settings in flash, using defaults"),
        LoadOutcome::Reset(RejectReason::Unreadable(e)) => {
            error!("Failed to read settings: {:?}, running on defaults without overwriting", e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SettingEdit, SpaceMouseConfig};
    use embassy_futures::block_on;

    /// In-memory backend with switchable faults
    #[derive(Default)]
    struct MemoryStorage {
        blob: Option<std::vec::Vec<u8>>,
        fail_reads: bool,
        fail_writes: bool,
        writes: usize,
    }

    impl MemoryStorage {
        fn holding(bytes: &[u8]) -> Self {
            Self {
                blob: Some(bytes.to_vec()),
                ..Self::default()
            }
        }
    }

    impl FlashStorage for MemoryStorage {
        async fn read(&mut self, _key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
            if self.fail_reads {
                return Err(FlashError::Storage);
            }
            let blob = self.blob.as_ref().ok_or(FlashError::NotFound)?;
            let target = buffer
                .get_mut(..blob.len())
                .ok_or(FlashError::BufferTooSmall)?;
            target.copy_from_slice(blob);
            Ok(blob.len())
        }

        async fn write(&mut self, _key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
            if self.fail_writes {
                return Err(FlashError::Flash);
            }
            self.blob = Some(data.to_vec());
            self.writes += 1;
            Ok(())
        }

        async fn exists(&mut self, _key: StorageKey) -> bool {
            self.blob.is_some()
        }

        async fn erase_all(&mut self) -> Result<(), FlashError> {
            self.blob = None;
            Ok(())
        }
    }

    #[test]
    fn test_first_boot_writes_defaults() {
        let mut persistence = ConfigPersistence::new(MemoryStorage::default());
        assert_eq!(persistence.state(), BootState::Unloaded);

        let store = block_on(persistence.boot());
        assert_eq!(persistence.state(), BootState::Invalid);
        assert_eq!(store.outcome(), LoadOutcome::Reset(RejectReason::Blank));
        assert_eq!(*store.live(), SpaceMouseConfig::defaults());
        assert!(!store.needs_persist());

        let storage = persistence.into_storage();
        assert_eq!(storage.writes, 1);
        assert_eq!(
            storage.blob.as_deref(),
            Some(&SpaceMouseConfig::defaults().to_bytes()[..])
        );
    }

    #[test]
    fn test_valid_image_adopted_without_write() {
        let mut config = SpaceMouseConfig::defaults();
        config.gamma = 2.2;
        config.led_mode = 0;

        let mut persistence = ConfigPersistence::new(MemoryStorage::holding(&config.to_bytes()));
        let store = block_on(persistence.boot());

        assert_eq!(persistence.state(), BootState::Valid);
        assert_eq!(*store.live(), config);
        assert_eq!(persistence.into_storage().writes, 0);
    }

    #[test]
    fn test_stale_image_overwritten() {
        let mut image = SpaceMouseConfig::defaults().to_bytes();
        image[..4].copy_from_slice(&0xAD45_DAC3u32.to_le_bytes());
        image[8] = 0x42;

        let mut persistence = ConfigPersistence::new(MemoryStorage::holding(&image));
        let store = block_on(persistence.boot());

        assert_eq!(persistence.state(), BootState::Invalid);
        assert_eq!(*store.live(), SpaceMouseConfig::defaults());
        let storage = persistence.into_storage();
        assert_eq!(storage.writes, 1);
        assert!(SpaceMouseConfig::from_bytes(storage.blob.as_deref().unwrap())
            .unwrap()
            .validate());
    }

    #[test]
    fn test_read_fault_keeps_stored_image() {
        let mut config = SpaceMouseConfig::defaults();
        config.gamma = 2.2;
        config.swap_xy = true;
        let image = config.to_bytes();

        let storage = MemoryStorage {
            fail_reads: true,
            ..MemoryStorage::holding(&image)
        };
        let mut persistence = ConfigPersistence::new(storage);
        let store = block_on(persistence.boot());

        assert_eq!(persistence.state(), BootState::Invalid);
        assert_eq!(
            store.outcome(),
            LoadOutcome::Reset(RejectReason::Unreadable(FlashError::Storage))
        );
        assert_eq!(*store.live(), SpaceMouseConfig::defaults());
        assert!(!store.needs_persist());

        let mut storage = persistence.into_storage();
        assert_eq!(storage.writes, 0);
        assert_eq!(storage.blob.as_deref(), Some(&image[..]));

        // Once the fault clears, the untouched image is adopted again
        storage.fail_reads = false;
        let mut rebooted = ConfigPersistence::new(storage);
        let reloaded = block_on(rebooted.boot());
        assert_eq!(reloaded.outcome(), LoadOutcome::Adopted);
        assert_eq!(*reloaded.live(), config);
    }

    #[test]
    fn test_boot_never_reports_candidate_read() {
        let images: [Option<&[u8]>; 3] = [
            None,
            Some(&[0u8; 3]),
            Some(&[0xFFu8; CONFIG_SIZE]),
        ];
        for image in images {
            let storage = match image {
                Some(bytes) => MemoryStorage::holding(bytes),
                None => MemoryStorage::default(),
            };
            let mut persistence = ConfigPersistence::new(storage);
            let store = block_on(persistence.boot());
            assert_eq!(persistence.state(), BootState::Invalid);
            assert_eq!(persistence.state(), store.boot_state());
        }

        let valid = SpaceMouseConfig::defaults().to_bytes();
        let mut persistence = ConfigPersistence::new(MemoryStorage::holding(&valid));
        block_on(persistence.boot());
        assert_eq!(persistence.state(), BootState::Valid);
    }

    #[test]
    fn test_blank_and_stale_are_distinguished() {
        let mut blank = ConfigPersistence::new(MemoryStorage::default());
        let blank_store = block_on(blank.boot());

        let mut stale = ConfigPersistence::new(MemoryStorage::holding(&[0u8; CONFIG_SIZE]));
        let stale_store = block_on(stale.boot());

        assert_eq!(blank_store.outcome(), LoadOutcome::Reset(RejectReason::Blank));
        assert_eq!(
            stale_store.outcome(),
            LoadOutcome::Reset(RejectReason::MagicMismatch { found: 0 })
        );
        assert_eq!(blank.into_storage().writes, 1);
        assert_eq!(stale.into_storage().writes, 1);
    }

    #[test]
    fn test_failed_write_back_keeps_request() {
        let storage = MemoryStorage {
            fail_writes: true,
            ..MemoryStorage::default()
        };
        let mut persistence = ConfigPersistence::new(storage);
        let mut store = block_on(persistence.boot());
        assert!(store.needs_persist());

        assert_eq!(
            block_on(persistence.save(&mut store)),
            Err(PersistError::Flash(FlashError::Flash))
        );
        assert!(store.needs_persist());
    }

    #[test]
    fn test_edit_then_reboot_reproduces_live() {
        let mut persistence = ConfigPersistence::new(MemoryStorage::default());
        let mut store = block_on(persistence.boot());

        store.apply(SettingEdit::Deadzone(2.5)).unwrap();
        store.apply(SettingEdit::LedBrightness(10)).unwrap();
        block_on(persistence.save(&mut store)).unwrap();
        assert!(!store.needs_persist());

        let mut rebooted = ConfigPersistence::new(persistence.into_storage());
        let reloaded = block_on(rebooted.boot());
        assert_eq!(rebooted.state(), BootState::Valid);
        assert_eq!(reloaded.live(), store.live());
    }

    #[test]
    fn test_save_skips_clean_store() {
        let mut persistence = ConfigPersistence::new(MemoryStorage::default());
        let mut store = block_on(persistence.boot());
        block_on(persistence.save(&mut store)).unwrap();
        assert_eq!(persistence.into_storage().writes, 1);
    }

    #[test]
    fn test_factory_reset() {
        let mut persistence = ConfigPersistence::new(MemoryStorage::default());
        let mut store = block_on(persistence.boot());
        store.apply(SettingEdit::SwapXy(true)).unwrap();
        block_on(persistence.save(&mut store)).unwrap();

        block_on(persistence.factory_reset(&mut store)).unwrap();
        assert_eq!(*store.live(), SpaceMouseConfig::defaults());
        assert!(!store.needs_persist());

        let mut storage = persistence.into_storage();
        assert!(block_on(storage.exists(StorageKey::SpaceMouseConfig)));
        assert_eq!(
            storage.blob.as_deref(),
            Some(&SpaceMouseConfig::defaults().to_bytes()[..])
        );
    }
}
