//! GPIO inputs

use embassy_rp::gpio::{Input, Pin, Pull};
use embassy_rp::Peri;
use uvlamp_hal::InputPin;

/// Input pin with internal pull-up
///
/// Encoder lines and buttons idle high and are pulled low by the switch.
pub struct Rp2040Input<'d> {
    pin: Input<'d>,
}

impl<'d> Rp2040Input<'d> {
    /// Configure `pin` as an input with pull-up
    pub fn new_pull_up(pin: Peri<'d, impl Pin>) -> Self {
        Self {
            pin: Input::new(pin, Pull::Up),
        }
    }

    /// Wait for the next rising or falling edge
    pub async fn wait_for_any_edge(&mut self) {
        self.pin.wait_for_any_edge().await
    }
}

impl InputPin for Rp2040Input<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
