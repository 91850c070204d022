//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in uvlamp-core on top of the uvlamp-hal capabilities:
//!
//! - Lamp output (two synchronized PWM channels)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod output;
