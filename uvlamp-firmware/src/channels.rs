//! Input mailboxes shared between tasks
//!
//! Written by the input tasks on the interrupt executor, drained by the
//! control task once per frame.

use uvlamp_core::input::{Button, ButtonMailbox, EncoderMailbox};
use uvlamp_core::InputSources;

/// Rotary encoder steps
pub static ENCODER: EncoderMailbox = EncoderMailbox::new();

/// Screen / edit-mode button
pub static PRIMARY_BUTTON: ButtonMailbox = ButtonMailbox::new();

/// Start / pause / reset button
pub static SECONDARY_BUTTON: ButtonMailbox = ButtonMailbox::new();

/// Mailbox for a button
pub fn button_mailbox(button: Button) -> &'static ButtonMailbox {
    match button {
        Button::Primary => &PRIMARY_BUTTON,
        Button::Secondary => &SECONDARY_BUTTON,
    }
}

/// All mailboxes, as the control core consumes them
pub fn input_sources() -> InputSources<'static> {
    InputSources {
        encoder: &ENCODER,
        primary: &PRIMARY_BUTTON,
        secondary: &SECONDARY_BUTTON,
    }
}
