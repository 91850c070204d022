//! Embassy async tasks
//!
//! Input tasks run on the interrupt executor and only touch their mailbox.
//! The control task runs in thread mode and owns everything else.

pub mod control;
pub mod input;

pub use control::{control_task, LampCore};
pub use input::{button_task, encoder_task};
