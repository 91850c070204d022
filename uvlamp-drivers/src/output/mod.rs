//! Lamp output drivers

pub mod dual_pwm;

pub use dual_pwm::{duty_for_percent, DualPwmOutput};
