//! Control-loop state
//!
//! Everything here is owned by the control loop; no interrupt handler ever
//! touches it.

pub mod countdown;
pub mod navigator;

pub use countdown::{Countdown, TickOutcome};
pub use navigator::{EditTarget, EditTransition, Navigator, Screen};
