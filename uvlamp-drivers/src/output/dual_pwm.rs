//! Dual-channel PWM lamp output
//!
//! The lamp is driven by two PWM channels that must always carry the same
//! duty. Power is set in percent and mapped linearly onto the full duty
//! range of the channels:
//!
//! ```text
//! duty = percent * max_duty / 100
//! ```
//!
//! Disabling forces both duties to zero before the channels are switched
//! off, so a channel that is re-enabled by mistake starts dark.

use uvlamp_core::config::MAX_POWER_PERCENT;
use uvlamp_core::traits::LampOutput;
use uvlamp_hal::PwmChannel;

/// Map a power percentage onto a channel's duty range
pub fn duty_for_percent(percent: u8, max_duty: u16) -> u16 {
    let percent = percent.min(MAX_POWER_PERCENT) as u32;
    (percent * max_duty as u32 / MAX_POWER_PERCENT as u32) as u16
}

/// Lamp output on two synchronized PWM channels
pub struct DualPwmOutput<A, B> {
    a: A,
    b: B,
    /// Last requested power (0-100%)
    percent: u8,
    enabled: bool,
}

impl<A: PwmChannel, B: PwmChannel> DualPwmOutput<A, B> {
    /// Create a new output; both channels start at zero duty and disabled
    pub fn new(a: A, b: B) -> Self {
        let mut output = Self {
            a,
            b,
            percent: 0,
            enabled: false,
        };
        output.disable();
        output
    }

    /// Get the last requested power
    pub fn percent(&self) -> u8 {
        self.percent
    }

    /// Get both channels
    pub fn channels(&self) -> (&A, &B) {
        (&self.a, &self.b)
    }

    fn apply_duty(&mut self, percent: u8) {
        let duty_a = duty_for_percent(percent, self.a.max_duty());
        let duty_b = duty_for_percent(percent, self.b.max_duty());
        self.a.set_duty(duty_a);
        self.b.set_duty(duty_b);
    }
}

impl<A: PwmChannel, B: PwmChannel> LampOutput for DualPwmOutput<A, B> {
    fn set_power(&mut self, percent: u8) {
        self.percent = percent.min(MAX_POWER_PERCENT);
        if self.enabled {
            self.apply_duty(self.percent);
        }
    }

    fn enable(&mut self) {
        self.apply_duty(self.percent);
        self.a.set_enabled(true);
        self.b.set_enabled(true);
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.apply_duty(0);
        self.a.set_enabled(false);
        self.b.set_enabled(false);
        self.enabled = false;
    }
}
