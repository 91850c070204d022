//! Interrupt-sourced input
//!
//! Edge handlers (producers) write into small mailboxes; the control loop
//! (consumer) drains them once per iteration. A producer never does more
//! than a few word-sized updates, so interrupt latency stays bounded.

pub mod button;
pub mod encoder;
pub mod gesture;

pub use button::{ButtonMailbox, ButtonState};
pub use encoder::EncoderMailbox;
pub use gesture::{classify, Button, Gesture};
