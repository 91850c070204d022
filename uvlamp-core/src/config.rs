//! Configuration limits and timing
//!
//! Value domains are fixed by the persisted record layout; timing is
//! tunable per board through [`ControlConfig`].

/// Longest countdown that can be configured, in seconds
pub const MAX_TIMER_SECONDS: u8 = 180;

/// Highest lamp power setting, in percent
pub const MAX_POWER_PERCENT: u8 = 100;

/// Default debounce window (ms)
pub const DEFAULT_DEBOUNCE_MS: u32 = 10;

/// Default long-press threshold (ms)
pub const DEFAULT_LONG_PRESS_MS: u32 = 1000;

/// Default minimum interval between progress arc refreshes (ms)
pub const DEFAULT_ARC_REFRESH_MS: u32 = 100;

/// Default control loop rate
pub const DEFAULT_FRAME_RATE_HZ: u32 = 30;

/// Timing parameters for the control loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlConfig {
    /// Presses at or below this duration are bounce noise
    pub debounce_ms: u32,
    /// Presses held this long are long presses
    pub long_press_ms: u32,
    /// Minimum interval between progress arc refreshes
    pub arc_refresh_ms: u32,
    /// Target duration of one loop iteration
    pub frame_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            arc_refresh_ms: DEFAULT_ARC_REFRESH_MS,
            frame_ms: 1000 / DEFAULT_FRAME_RATE_HZ,
        }
    }
}

impl ControlConfig {
    /// Build a config from a loop rate instead of a frame time
    pub fn with_frame_rate(mut self, hz: u32) -> Self {
        self.frame_ms = 1000 / hz.max(1);
        self
    }
}

/// Add a signed delta to a setting and clamp the result to `0..=max`
pub fn apply_delta(value: u8, delta: i32, max: u8) -> u8 {
    (value as i32).saturating_add(delta).clamp(0, max as i32) as u8
}
