//! Flash storage driver for the QT Py RP2040
//!
//! Keeps the settings image in a small wear-levelled map at the top of
//! the 8MB QSPI flash, well clear of the firmware image.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use embedded_storage_async::nor_flash::NorFlash;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use adaspace_hal::flash::{FlashError, StorageKey};

/// QT Py RP2040 carries an 8MB flash chip
pub const FLASH_SIZE: usize = 8 * 1024 * 1024;

/// Four erase sectors: enough for the map to rotate pages
pub const SETTINGS_PARTITION_SIZE: usize = 4 * ERASE_SIZE;
pub const SETTINGS_PARTITION_START: usize = FLASH_SIZE - SETTINGS_PARTITION_SIZE;

pub const SETTINGS_RANGE: core::ops::Range<u32> =
    (SETTINGS_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Scratch space for one map entry (key + item + map overhead)
const ITEM_BUFFER_SIZE: usize = 256;

/// RP2040 settings storage
pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
}

impl<'d> Rp2040FlashStorage<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
        }
    }
}

impl<'d> adaspace_hal::FlashStorage for Rp2040FlashStorage<'d> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let mut item_buffer = [0u8; ITEM_BUFFER_SIZE];

        let stored = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut item_buffer,
            &key,
        )
        .await
        .map_err(|_| FlashError::Storage)?
        .ok_or(FlashError::NotFound)?;

        let target = buffer
            .get_mut(..stored.len())
            .ok_or(FlashError::BufferTooSmall)?;
        target.copy_from_slice(stored);
        Ok(stored.len())
    }

    async fn write(&mut self, key: StorageKey, data: &[u8]) -> Result<(), FlashError> {
        let mut item_buffer = [0u8; ITEM_BUFFER_SIZE];

        map::store_item(
            &mut self.flash,
            SETTINGS_RANGE,
            &mut NoCache::new(),
            &mut item_buffer,
            &key,
            &data,
        )
        .await
        .map_err(|e| match e {
            sequential_storage::Error::FullStorage => FlashError::Full,
            sequential_storage::Error::Storage { .. } => FlashError::Flash,
            _ => FlashError::Storage,
        })
    }

    async fn exists(&mut self, key: StorageKey) -> bool {
        let mut item_buffer = [0u8; ITEM_BUFFER_SIZE];

        matches!(
            map::fetch_item::<StorageKey, &[u8], _>(
                &mut self.flash,
                SETTINGS_RANGE,
                &mut NoCache::new(),
                &mut item_buffer,
                &key,
            )
            .await,
            Ok(Some(_))
        )
    }

    async fn erase_all(&mut self) -> Result<(), FlashError> {
        self.flash
            .erase(SETTINGS_RANGE.start, SETTINGS_RANGE.end)
            .await
            .map_err(|_| FlashError::Flash)
    }
}
