//! PWM output abstractions
//!
//! A [`PwmChannel`] is a single compare output. Slice/channel wiring and
//! clock division are the implementation's business.

/// Full-scale duty value used by the lamp outputs (16-bit resolution)
pub const MAX_DUTY: u16 = u16::MAX;

/// Single PWM output channel
pub trait PwmChannel {
    /// Largest duty value this channel accepts (100% on)
    fn max_duty(&self) -> u16 {
        MAX_DUTY
    }

    /// Set the compare value for this channel
    ///
    /// Values above [`PwmChannel::max_duty`] are clamped by the implementation.
    fn set_duty(&mut self, duty: u16);

    /// Start or stop the hardware counter driving this channel
    fn set_enabled(&mut self, enabled: bool);
}
