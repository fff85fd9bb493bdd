//! Non-volatile storage abstractions
//!
//! The settings image is stored as an opaque byte blob under a fixed key.
//! Backends must hand back exactly the bytes they were given: no
//! reformatting, no byte swapping, no trimming of trailing padding.

/// Keys for blobs kept in the settings partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Raw `SpaceMouseConfig` image
    SpaceMouseConfig = 0,
}

impl StorageKey {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::SpaceMouseConfig),
            _ => None,
        }
    }
}

/// Errors reported by a storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// Low-level flash erase/program failed
    Flash,
    /// Storage layer (map bookkeeping) failed
    Storage,
    /// Nothing stored under the key (blank or first boot)
    NotFound,
    /// Caller buffer cannot hold the stored item
    BufferTooSmall,
    /// Partition has no room left for the item
    Full,
}

impl FlashError {
    /// Whether the error just means nothing was ever written
    pub fn is_blank(self) -> bool {
        matches!(self, FlashError::NotFound)
    }
}

/// Keyed non-volatile storage
///
/// Reads happen once at boot; writes happen after the settings interface
/// changes a field. Implementations own wear levelling and integrity.
pub trait FlashStorage {
    /// Copy the blob stored under `key` into `buffer`
    ///
    /// Returns the number of bytes copied.
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;

    /// Replace the blob stored under `key`
    fn write(
        &mut self,
        key: StorageKey,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), FlashError>>;

    /// Check whether anything is stored under `key`
    fn exists(&mut self, key: StorageKey) -> impl core::future::Future<Output = bool>;

    /// Wipe the whole settings partition
    fn erase_all(&mut self) -> impl core::future::Future<Output = Result<(), FlashError>>;
}

#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        let slot = buffer
            .first_mut()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        *slot = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        let byte = buffer
            .first()
            .ok_or(sequential_storage::map::SerializationError::BufferTooSmall)?;
        StorageKey::from_u8(*byte)
            .map(|key| (key, 1))
            .ok_or(sequential_storage::map::SerializationError::InvalidFormat)
    }
}
