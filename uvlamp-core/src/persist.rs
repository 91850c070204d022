//! Persisted configuration record
//!
//! One fixed-layout record at the head of a dedicated flash sector:
//!
//! | Offset | Size | Field                      |
//! |--------|------|----------------------------|
//! | 0      | 4    | magic `0xABCD1234` (LE)    |
//! | 4      | 1    | timer seconds (0-180)      |
//! | 5      | 1    | power percent (0-100)      |
//! | 6      | 2    | reserved                   |
//!
//! The rest of the programmed page holds the erased byte pattern. Erased
//! or partially written storage fails the magic check and reads as "no
//! configuration".

use uvlamp_hal::flash::{
    is_sector_aligned, NorFlash, NorFlashError, NorFlashErrorKind, ERASED_BYTE, PAGE_SIZE,
};

use crate::config::{MAX_POWER_PERCENT, MAX_TIMER_SECONDS};

/// Validity sentinel at the start of the record
pub const MAGIC: u32 = 0xABCD_1234;

/// Serialized record length
pub const RECORD_LEN: usize = 8;

/// Persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistError {
    /// Record offset is not the start of an erase sector
    Misaligned,
    /// Record sector lies outside the storage
    OutOfBounds,
    /// Flash driver error
    Flash(NorFlashErrorKind),
    /// Data read back after programming does not match
    VerifyFailed,
}

// NorFlashErrorKind has no defmt support
#[cfg(feature = "defmt")]
impl defmt::Format for PersistError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            PersistError::Misaligned => defmt::write!(f, "Misaligned"),
            PersistError::OutOfBounds => defmt::write!(f, "OutOfBounds"),
            PersistError::Flash(kind) => defmt::write!(f, "Flash({})", defmt::Debug2Format(kind)),
            PersistError::VerifyFailed => defmt::write!(f, "VerifyFailed"),
        }
    }
}

impl<E: NorFlashError> From<E> for PersistError {
    fn from(e: E) -> Self {
        PersistError::Flash(e.kind())
    }
}

/// User settings that survive power loss
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedConfig {
    /// Countdown duration in seconds
    pub timer_seconds: u8,
    /// Lamp power in percent
    pub power_percent: u8,
}

impl PersistedConfig {
    /// Serialize into the on-flash layout
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut buf = [0u8; RECORD_LEN];
        buf[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        buf[4] = self.timer_seconds;
        buf[5] = self.power_percent;
        buf
    }

    /// Parse the on-flash layout
    ///
    /// Returns `None` unless the magic matches. Fields outside their valid
    /// range are replaced by 0.
    pub fn decode(buf: &[u8; RECORD_LEN]) -> Option<Self> {
        let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        if magic != MAGIC {
            return None;
        }
        Some(Self {
            timer_seconds: in_range_or_zero(buf[4], MAX_TIMER_SECONDS),
            power_percent: in_range_or_zero(buf[5], MAX_POWER_PERCENT),
        })
    }
}

fn in_range_or_zero(value: u8, max: u8) -> u8 {
    if value > max {
        0
    } else {
        value
    }
}

/// Configuration record stored in a dedicated NOR flash sector
pub struct ConfigStore<S> {
    storage: S,
    offset: u32,
}

impl<S: NorFlash> ConfigStore<S> {
    /// Bind the store to the sector starting at `offset`
    pub fn new(storage: S, offset: u32) -> Result<Self, PersistError> {
        if !is_sector_aligned(offset, S::ERASE_SIZE) || offset as usize % S::WRITE_SIZE != 0 {
            return Err(PersistError::Misaligned);
        }
        if PAGE_SIZE % S::WRITE_SIZE != 0 || PAGE_SIZE > S::ERASE_SIZE {
            return Err(PersistError::Misaligned);
        }
        if offset as usize + S::ERASE_SIZE > storage.capacity() {
            return Err(PersistError::OutOfBounds);
        }
        Ok(Self { storage, offset })
    }

    /// Read the stored configuration
    ///
    /// `Ok(None)` means no valid record (erased or corrupt storage).
    pub fn load(&mut self) -> Result<Option<PersistedConfig>, PersistError> {
        let mut buf = [0u8; RECORD_LEN];
        self.storage.read(self.offset, &mut buf)?;
        Ok(PersistedConfig::decode(&buf))
    }

    /// Erase the sector and program the record, then read it back
    ///
    /// Erase and program run in one critical section so edge handlers
    /// cannot run while the flash is busy. No retries.
    pub fn save(&mut self, config: &PersistedConfig) -> Result<(), PersistError> {
        let mut page = [ERASED_BYTE; PAGE_SIZE];
        page[..RECORD_LEN].copy_from_slice(&config.encode());

        let storage = &mut self.storage;
        let offset = self.offset;
        critical_section::with(|_| -> Result<(), PersistError> {
            storage.erase(offset, offset + S::ERASE_SIZE as u32)?;
            storage.write(offset, &page)?;
            Ok(())
        })?;

        let mut readback = [0u8; RECORD_LEN];
        self.storage.read(self.offset, &mut readback)?;
        if readback != config.encode() {
            return Err(PersistError::VerifyFailed);
        }
        Ok(())
    }

    /// Borrow the underlying storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[cfg(test)]
    pub(crate) fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}
