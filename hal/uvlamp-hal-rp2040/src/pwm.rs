//! PWM slice channels
//!
//! Each lamp channel uses one output of an RP2040 PWM slice. The counter
//! wraps at `top = 65534`, so the full 16-bit compare range maps onto
//! 0-100% duty with `u16::MAX` meaning always on.

use embassy_rp::pwm::{Config, Pwm};
use fixed::types::extra::U4;
use fixed::FixedU16;
use uvlamp_hal::pwm::MAX_DUTY;
use uvlamp_hal::PwmChannel;

/// RP2040 system clock
pub const SYS_CLOCK_HZ: u32 = 125_000_000;

/// Counter wrap value
pub const TOP: u16 = MAX_DUTY - 1;

/// Which output of the slice drives the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmOutput {
    A,
    B,
}

/// Clock divider for a PWM frequency, in 8.4 fixed-point bits
///
/// Clamped to the hardware range (1.0 to 255.9375).
pub fn divider_bits(freq_hz: u32) -> u16 {
    let counts = freq_hz.max(1) as u64 * (TOP as u64 + 1);
    let bits = SYS_CLOCK_HZ as u64 * 16 / counts;
    bits.clamp(16, 0x0FFF) as u16
}

/// One PWM channel on an RP2040 slice
pub struct Rp2040PwmChannel<'d> {
    pwm: Pwm<'d>,
    config: Config,
    output: PwmOutput,
}

impl<'d> Rp2040PwmChannel<'d> {
    /// Wrap a slice created with `Pwm::new_output_a`/`new_output_b`
    ///
    /// The channel starts disabled at zero duty.
    pub fn new(pwm: Pwm<'d>, output: PwmOutput, freq_hz: u32) -> Self {
        let mut channel = Self {
            pwm,
            config: Self::config(freq_hz),
            output,
        };
        channel.apply();
        channel
    }

    /// Slice configuration for `freq_hz`, disabled at zero duty
    pub fn config(freq_hz: u32) -> Config {
        let mut config = Config::default();
        config.top = TOP;
        config.divider = FixedU16::<U4>::from_bits(divider_bits(freq_hz));
        config.compare_a = 0;
        config.compare_b = 0;
        config.enable = false;
        config
    }

    fn apply(&mut self) {
        self.pwm.set_config(&self.config);
    }
}

impl PwmChannel for Rp2040PwmChannel<'_> {
    fn set_duty(&mut self, duty: u16) {
        match self.output {
            PwmOutput::A => self.config.compare_a = duty,
            PwmOutput::B => self.config.compare_b = duty,
        }
        self.apply();
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.config.enable = enabled;
        self.apply();
    }
}
