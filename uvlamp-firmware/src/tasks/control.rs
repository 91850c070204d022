//! Control task
//!
//! Runs the paced control loop: one [`ControlCore::run_frame`] per frame,
//! then a display flush, then a sleep for the rest of the frame.

use defmt::*;
use embassy_time::{Duration, Instant, Timer};
use uvlamp_core::{ControlCore, CoreEvent};
use uvlamp_display::WidgetTree;
use uvlamp_drivers::output::DualPwmOutput;
use uvlamp_hal_rp2040::{ConfigFlash, Rp2040PwmChannel};

use crate::channels::input_sources;
use crate::display;

/// Control core wired to the RP2040 peripherals
pub type LampCore = ControlCore<
    ConfigFlash<'static>,
    DualPwmOutput<Rp2040PwmChannel<'static>, Rp2040PwmChannel<'static>>,
>;

/// Control task - owns all loop-side state
#[embassy_executor::task]
pub async fn control_task(core: &'static mut LampCore) {
    info!("Control task started");

    let mut ui = WidgetTree::new();
    log_event(&core.boot(&mut ui));
    display::flush(&mut ui);

    let inputs = input_sources();
    let frame = Duration::from_millis(core.config().frame_ms as u64);

    loop {
        let start = Instant::now();

        for event in core.run_frame(start.as_millis(), &inputs, &mut ui).iter() {
            log_event(event);
        }
        display::flush(&mut ui);

        // No sleep when the frame overran
        let elapsed = start.elapsed();
        if elapsed < frame {
            Timer::after(frame - elapsed).await;
        }
    }
}

fn log_event(event: &CoreEvent) {
    match event {
        CoreEvent::ConfigRestored(config) => info!(
            "Config restored: timer={}s power={}%",
            config.timer_seconds, config.power_percent
        ),
        CoreEvent::ConfigDefaulted => info!("No stored config, using defaults"),
        CoreEvent::LoadFailed(e) => warn!("Config load failed: {}, using defaults", e),
        CoreEvent::SaveFailed(e) => warn!("Config save failed: {}", e),
        CoreEvent::ConfigSaved(config) => debug!(
            "Config saved: timer={}s power={}%",
            config.timer_seconds, config.power_percent
        ),
        other => debug!("{}", other),
    }
}
