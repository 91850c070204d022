//! Lamp output trait

/// Trait for the lamp power stage
///
/// Implementations drive every output channel with the same duty.
pub trait LampOutput {
    /// Set the power level in percent (values above 100 are clamped)
    fn set_power(&mut self, percent: u8);

    /// Turn the output on at the last requested power
    fn enable(&mut self);

    /// Force duty to zero, then turn the output off
    fn disable(&mut self);
}
