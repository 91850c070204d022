//! Board-agnostic control core for the UV lamp firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Interrupt-to-loop input mailboxes (encoder, buttons)
//! - Debounce and short/long press classification
//! - Screen and edit-mode navigation
//! - Countdown timer coordinated with the lamp output
//! - Persisted configuration record in raw flash
//! - UI and lamp output traits

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod input;
pub mod persist;
pub mod state;
pub mod traits;
pub mod ui;

#[cfg(test)]
pub(crate) mod mock;

pub use controller::{ControlCore, CoreEvent, InputSources};
