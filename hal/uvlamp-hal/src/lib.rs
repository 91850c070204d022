//! UV Lamp Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that chip-specific HALs
//! implement. The control core only talks to hardware through these traits,
//! which keeps it testable on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (uvlamp-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  uvlamp-core / uvlamp-drivers           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  uvlamp-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  uvlamp-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input sampling
//! - [`pwm::PwmChannel`] - One PWM output channel
//! - [`flash`] - Raw NOR storage geometry and the `embedded-storage` traits

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use flash::{NorFlash, ReadNorFlash};
pub use gpio::InputPin;
pub use pwm::PwmChannel;
