//! Collaborator traits
//!
//! These traits define the interface between the control core and the
//! board-specific lamp output and display implementations.

pub mod display;
pub mod output;

pub use display::{Transition, UiBackend, Widget};
pub use output::LampOutput;
