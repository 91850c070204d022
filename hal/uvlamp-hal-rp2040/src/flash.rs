//! On-board flash for the configuration record
//!
//! The last 4 KiB sector of the 2 MB flash is reserved in `memory.x` and
//! holds the persisted configuration. Access is blocking; erase and program
//! are short enough to run inside the control loop.

use embassy_rp::flash::{Blocking, Error, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use embedded_storage::nor_flash::{ErrorType, NorFlash, ReadNorFlash};

/// Flash size on the lamp board
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Offset of the configuration sector
pub const CONFIG_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

/// Blocking flash used by the configuration store
pub struct ConfigFlash<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> ConfigFlash<'d> {
    /// Take the flash peripheral
    pub fn new(flash: Peri<'d, FLASH>) -> Self {
        Self {
            flash: Flash::new_blocking(flash),
        }
    }
}

impl ErrorType for ConfigFlash<'_> {
    type Error = Error;
}

impl ReadNorFlash for ConfigFlash<'_> {
    const READ_SIZE: usize = <Flash<'static, FLASH, Blocking, FLASH_SIZE> as ReadNorFlash>::READ_SIZE;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        self.flash.blocking_read(offset, bytes)
    }

    fn capacity(&self) -> usize {
        FLASH_SIZE
    }
}

impl NorFlash for ConfigFlash<'_> {
    const WRITE_SIZE: usize = <Flash<'static, FLASH, Blocking, FLASH_SIZE> as NorFlash>::WRITE_SIZE;
    const ERASE_SIZE: usize = ERASE_SIZE;

    fn erase(&mut self, from: u32, to: u32) -> Result<(), Self::Error> {
        self.flash.blocking_erase(from, to)
    }

    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        self.flash.blocking_write(offset, bytes)
    }
}
