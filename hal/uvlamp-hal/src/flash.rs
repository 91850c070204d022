//! Flash storage abstractions
//!
//! The lamp persists a single fixed-layout record into raw NOR flash, so
//! there is no key-value layer here: storage is accessed through the
//! `embedded-storage` NOR traits, re-exported for implementors.

pub use embedded_storage::nor_flash::{
    ErrorType, NorFlash, NorFlashError, NorFlashErrorKind, ReadNorFlash,
};

/// Minimum programmable unit
pub const PAGE_SIZE: usize = 256;

/// Minimum erasable unit
pub const SECTOR_SIZE: usize = 4096;

/// Value every byte reads back as after an erase
pub const ERASED_BYTE: u8 = 0xFF;

/// Check that `offset` is the start of an erase sector of `sector_size` bytes
pub fn is_sector_aligned(offset: u32, sector_size: usize) -> bool {
    sector_size != 0 && offset as usize % sector_size == 0
}
