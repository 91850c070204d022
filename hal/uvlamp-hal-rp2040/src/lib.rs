//! RP2040-specific HAL for the UV lamp firmware
//!
//! This crate provides RP2040 implementations of the shared `uvlamp-hal`
//! traits:
//!
//! - Pulled-up inputs with edge waits (encoder and buttons)
//! - PWM slice channels with a frequency-derived clock divider
//! - Blocking on-board flash for the configuration sector

#![no_std]

pub mod flash;
pub mod gpio;
pub mod pwm;

pub use flash::{ConfigFlash, CONFIG_OFFSET, FLASH_SIZE};
pub use gpio::Rp2040Input;
pub use pwm::{PwmOutput, Rp2040PwmChannel};
