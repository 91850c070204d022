//! UV Lamp - Handheld UV Exposure Appliance Firmware
//!
//! Main firmware binary for the RP2040 lamp board. A rotary encoder and two
//! buttons drive three screens; a countdown gates two PWM lamp channels;
//! power and duration survive power loss in the last flash sector.
//!
//! Input edges are handled by tasks on an interrupt executor so they
//! preempt the thread-mode control loop.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::pwm::Pwm;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use uvlamp_core::input::Button;
use uvlamp_core::persist::ConfigStore;
use uvlamp_core::ControlCore;
use uvlamp_drivers::output::DualPwmOutput;
use uvlamp_hal_rp2040::{
    ConfigFlash, PwmOutput, Rp2040Input, Rp2040PwmChannel, CONFIG_OFFSET,
};

mod channels;
mod config;
mod display;
mod tasks;

use tasks::LampCore;

/// Executor for the input edge tasks
static EXECUTOR_INPUT: InterruptExecutor = InterruptExecutor::new();

/// Control core (must live forever for the control task)
static CORE: StaticCell<LampCore> = StaticCell::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_INPUT.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("UV lamp firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let control_config = config::control_config();
    info!(
        "Timing: debounce={}ms long_press={}ms arc={}ms frame={}ms",
        control_config.debounce_ms,
        control_config.long_press_ms,
        control_config.arc_refresh_ms,
        control_config.frame_ms
    );

    // Configuration sector (last 4 KiB, reserved in memory.x)
    let store = match ConfigStore::new(ConfigFlash::new(p.FLASH), CONFIG_OFFSET) {
        Ok(store) => store,
        Err(e) => defmt::panic!("Config store unavailable: {}", e),
    };

    // Lamp PWM: GPIO13 is slice 6 output B, GPIO14 is slice 7 output A
    let pwm_a = Pwm::new_output_b(
        p.PWM_SLICE6,
        p.PIN_13,
        Rp2040PwmChannel::config(config::PWM_FREQUENCY_HZ),
    );
    let pwm_b = Pwm::new_output_a(
        p.PWM_SLICE7,
        p.PIN_14,
        Rp2040PwmChannel::config(config::PWM_FREQUENCY_HZ),
    );
    let output = DualPwmOutput::new(
        Rp2040PwmChannel::new(pwm_a, PwmOutput::B, config::PWM_FREQUENCY_HZ),
        Rp2040PwmChannel::new(pwm_b, PwmOutput::A, config::PWM_FREQUENCY_HZ),
    );
    info!("Lamp PWM initialized at {} Hz", config::PWM_FREQUENCY_HZ);

    // Encoder on GPIO10/11, buttons on GPIO9 (primary) and GPIO8 (secondary)
    let enc_a = Rp2040Input::new_pull_up(p.PIN_10);
    let enc_b = Rp2040Input::new_pull_up(p.PIN_11);
    let primary = Rp2040Input::new_pull_up(p.PIN_9);
    let secondary = Rp2040Input::new_pull_up(p.PIN_8);

    // Resting levels, so the first edge decodes against the real position
    channels::ENCODER.prime_from(&enc_a, &enc_b);

    let core = CORE.init(ControlCore::new(store, output, control_config));

    // Input tasks preempt the control loop
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let input_spawner = EXECUTOR_INPUT.start(interrupt::SWI_IRQ_1);
    unwrap!(input_spawner.spawn(tasks::encoder_task(enc_a, enc_b)));
    unwrap!(input_spawner.spawn(tasks::button_task(Button::Primary, primary)));
    unwrap!(input_spawner.spawn(tasks::button_task(Button::Secondary, secondary)));

    unwrap!(spawner.spawn(tasks::control_task(core)));

    info!("All tasks spawned, firmware running");
}
