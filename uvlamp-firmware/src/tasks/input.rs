//! Input edge tasks
//!
//! Each task waits for a pin edge and records it in its mailbox. They run
//! at interrupt priority, so edges are captured even while the control
//! loop is busy.

use defmt::*;
use embassy_futures::select::select;
use embassy_time::Instant;
use uvlamp_core::input::Button;
use uvlamp_hal_rp2040::Rp2040Input;

use crate::channels::{button_mailbox, ENCODER};

/// Encoder task - decodes quadrature edges on either line
#[embassy_executor::task]
pub async fn encoder_task(mut a: Rp2040Input<'static>, mut b: Rp2040Input<'static>) {
    info!("Encoder task started");

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;
        ENCODER.sample(&a, &b);
    }
}

/// Button task - timestamps press and release edges
#[embassy_executor::task(pool_size = 2)]
pub async fn button_task(button: Button, mut pin: Rp2040Input<'static>) {
    info!("Button task started: {}", button);
    let mailbox = button_mailbox(button);

    loop {
        pin.wait_for_any_edge().await;
        mailbox.sample(&pin, Instant::now().as_millis());
    }
}
