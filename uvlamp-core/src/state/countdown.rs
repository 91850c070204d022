//! Countdown timer engine
//!
//! Millisecond countdown that owns the lamp's on/off state: the output is
//! enabled exactly while the countdown runs.
//!
//! ```text
//!   Stopped(full) --start--> Running --pause--> Stopped(partial)
//!        ^                      |
//!        +------- expiry -------+   (output off, remaining rearmed)
//! ```

use crate::config::{ControlConfig, MAX_TIMER_SECONDS};
use crate::traits::LampOutput;

/// What a tick asks the display to refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Nothing changed
    Idle,
    /// Countdown reached zero, stopped and rearmed; full refresh needed
    Expired,
    /// Countdown advanced
    Progress {
        /// Whole seconds remaining, when that value changed
        seconds: Option<u32>,
        /// Progress percent, when the arc refresh interval elapsed
        arc: Option<u8>,
    },
}

/// Countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Countdown {
    configured_seconds: u8,
    remaining_ms: u32,
    running: bool,
    last_tick_ms: u64,
    last_arc_ms: u64,
    shown_seconds: u32,
}

impl Countdown {
    /// Create a stopped countdown armed with `seconds`
    pub fn new(seconds: u8) -> Self {
        let seconds = seconds.min(MAX_TIMER_SECONDS);
        let remaining_ms = seconds as u32 * 1000;
        Self {
            configured_seconds: seconds,
            remaining_ms,
            running: false,
            last_tick_ms: 0,
            last_arc_ms: 0,
            shown_seconds: remaining_ms / 1000,
        }
    }

    /// Configured duration in seconds
    pub fn configured_seconds(&self) -> u8 {
        self.configured_seconds
    }

    /// Configured duration in milliseconds
    pub fn total_ms(&self) -> u32 {
        self.configured_seconds as u32 * 1000
    }

    /// Time left in milliseconds
    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    /// Whole seconds left
    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_ms / 1000
    }

    /// Check if the countdown is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Change the configured duration
    ///
    /// Remaining time is clamped to the new total so it never exceeds it.
    pub fn set_configured_seconds(&mut self, seconds: u8) {
        self.configured_seconds = seconds.min(MAX_TIMER_SECONDS);
        self.remaining_ms = self.remaining_ms.min(self.total_ms());
    }

    /// Start counting down and switch the lamp on at `power_percent`
    ///
    /// Returns `false` (and leaves the lamp off) when nothing is left to count.
    pub fn start<O: LampOutput>(&mut self, now_ms: u64, output: &mut O, power_percent: u8) -> bool {
        if self.running {
            return true;
        }
        if self.remaining_ms == 0 {
            return false;
        }
        self.running = true;
        self.last_tick_ms = now_ms;
        self.last_arc_ms = now_ms;
        output.set_power(power_percent);
        output.enable();
        true
    }

    /// Stop counting and switch the lamp off, keeping the remaining time
    pub fn pause<O: LampOutput>(&mut self, output: &mut O) {
        self.running = false;
        output.disable();
    }

    /// Start when stopped, pause when running
    ///
    /// Returns the new running state.
    pub fn toggle<O: LampOutput>(&mut self, now_ms: u64, output: &mut O, power_percent: u8) -> bool {
        if self.running {
            self.pause(output);
            false
        } else {
            self.start(now_ms, output, power_percent)
        }
    }

    /// Stop, switch the lamp off and rearm with the configured duration
    pub fn reset<O: LampOutput>(&mut self, output: &mut O) {
        self.running = false;
        output.disable();
        self.rearm();
    }

    /// Advance the countdown to `now_ms`
    ///
    /// Only counts while running and while the main screen is shown.
    pub fn tick<O: LampOutput>(
        &mut self,
        now_ms: u64,
        on_main_screen: bool,
        output: &mut O,
        config: &ControlConfig,
    ) -> TickOutcome {
        if !self.running || !on_main_screen {
            return TickOutcome::Idle;
        }

        let elapsed = now_ms.saturating_sub(self.last_tick_ms);
        if elapsed == 0 {
            return TickOutcome::Idle;
        }
        self.last_tick_ms = now_ms;

        if (self.remaining_ms as u64) <= elapsed {
            self.running = false;
            output.disable();
            self.rearm();
            return TickOutcome::Expired;
        }
        self.remaining_ms -= elapsed as u32;

        let seconds = self.remaining_seconds();
        let seconds = if seconds != self.shown_seconds {
            self.shown_seconds = seconds;
            Some(seconds)
        } else {
            None
        };

        let arc = if now_ms.saturating_sub(self.last_arc_ms) >= config.arc_refresh_ms as u64 {
            self.last_arc_ms = now_ms;
            Some(self.progress_percent())
        } else {
            None
        };

        TickOutcome::Progress { seconds, arc }
    }

    /// Remaining time as a percentage of the configured duration
    ///
    /// A zero duration reads as 0 rather than dividing by zero.
    pub fn progress_percent(&self) -> u8 {
        let total = self.total_ms();
        if total == 0 {
            return 0;
        }
        (self.remaining_ms as u64 * 100 / total as u64).min(100) as u8
    }

    fn rearm(&mut self) {
        self.remaining_ms = self.total_ms();
        self.shown_seconds = self.remaining_seconds();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockOutput;
    use proptest::prelude::*;

    #[test]
    fn test_new_is_armed_and_stopped() {
        let countdown = Countdown::new(10);
        assert_eq!(countdown.remaining_ms(), 10_000);
        assert!(!countdown.is_running());
        assert_eq!(countdown.progress_percent(), 100);
    }

    #[test]
    fn test_new_clamps_duration() {
        assert_eq!(Countdown::new(250).configured_seconds(), MAX_TIMER_SECONDS);
    }

    #[test]
    fn test_start_enables_output() {
        let mut countdown = Countdown::new(10);
        let mut output = MockOutput::new();

        assert!(countdown.start(0, &mut output, 50));
        assert!(countdown.is_running());
        assert!(output.enabled);
        assert_eq!(output.power, 50);
    }

    #[test]
    fn test_start_with_zero_remaining_is_noop() {
        let mut countdown = Countdown::new(0);
        let mut output = MockOutput::new();

        assert!(!countdown.start(0, &mut output, 50));
        assert!(!countdown.is_running());
        assert!(!output.enabled);
        assert_eq!(output.enable_calls, 0);
    }

    #[test]
    fn test_pause_keeps_remaining() {
        let config = ControlConfig::default();
        let mut countdown = Countdown::new(10);
        let mut output = MockOutput::new();

        countdown.start(0, &mut output, 50);
        countdown.tick(2500, true, &mut output, &config);
        countdown.pause(&mut output);

        assert!(!countdown.is_running());
        assert!(!output.enabled);
        assert_eq!(countdown.remaining_ms(), 7500);

        // Resume anchors to the new start time
        countdown.start(10_000, &mut output, 50);
        countdown.tick(10_500, true, &mut output, &config);
        assert_eq!(countdown.remaining_ms(), 7000);
    }

    #[test]
    fn test_tick_only_counts_on_main_screen() {
        let config = ControlConfig::default();
        let mut countdown = Countdown::new(10);
        let mut output = MockOutput::new();

        countdown.start(0, &mut output, 50);
        assert_eq!(countdown.tick(500, false, &mut output, &config), TickOutcome::Idle);
        assert_eq!(countdown.remaining_ms(), 10_000);
    }

    #[test]
    fn test_tick_with_no_elapsed_time() {
        let config = ControlConfig::default();
        let mut countdown = Countdown::new(10);
        let mut output = MockOutput::new();

        countdown.start(100, &mut output, 50);
        assert_eq!(countdown.tick(100, true, &mut output, &config), TickOutcome::Idle);
    }

    #[test]
    fn test_label_refresh_only_on_second_change() {
        let config = ControlConfig::default();
        let mut countdown = Countdown::new(10);
        let mut output = MockOutput::new();
        countdown.start(0, &mut output, 50);

        // 9999 ms left is still "9" seconds, which differs from the armed 10
        assert_eq!(
            countdown.tick(1, true, &mut output, &config),
            TickOutcome::Progress { seconds: Some(9), arc: None }
        );
        assert_eq!(
            countdown.tick(50, true, &mut output, &config),
            TickOutcome::Progress { seconds: None, arc: None }
        );
        assert_eq!(
            countdown.tick(100, true, &mut output, &config),
            TickOutcome::Progress { seconds: None, arc: Some(99) }
        );
        assert_eq!(
            countdown.tick(1001, true, &mut output, &config),
            TickOutcome::Progress { seconds: Some(8), arc: Some(89) }
        );
    }

    #[test]
    fn test_expiry_rearms_and_disables() {
        let config = ControlConfig::default();
        let mut countdown = Countdown::new(10);
        let mut output = MockOutput::new();
        countdown.start(0, &mut output, 50);

        let mut now = 0;
        let mut expired = 0;
        while now < 10_000 {
            now += 100;
            if countdown.tick(now, true, &mut output, &config) == TickOutcome::Expired {
                expired += 1;
            }
        }

        assert_eq!(expired, 1);
        assert!(!countdown.is_running());
        assert_eq!(countdown.remaining_ms(), 10_000);
        assert!(!output.enabled);
        assert_eq!(output.disable_calls, 1);
    }

    #[test]
    fn test_reset_disables_output() {
        let config = ControlConfig::default();
        let mut countdown = Countdown::new(30);
        let mut output = MockOutput::new();

        countdown.start(0, &mut output, 80);
        countdown.tick(4000, true, &mut output, &config);
        countdown.reset(&mut output);

        assert!(!countdown.is_running());
        assert!(!output.enabled);
        assert_eq!(countdown.remaining_ms(), 30_000);
    }

    #[test]
    fn test_shrinking_duration_clamps_remaining() {
        let mut countdown = Countdown::new(120);
        countdown.set_configured_seconds(30);
        assert_eq!(countdown.remaining_ms(), 30_000);

        // Growing leaves remaining until the next rearm
        countdown.set_configured_seconds(60);
        assert_eq!(countdown.remaining_ms(), 30_000);
    }

    #[test]
    fn test_progress_zero_duration() {
        let countdown = Countdown::new(0);
        assert_eq!(countdown.progress_percent(), 0);
    }

    #[test]
    fn test_toggle() {
        let mut countdown = Countdown::new(5);
        let mut output = MockOutput::new();

        assert!(countdown.toggle(0, &mut output, 20));
        assert!(output.enabled);
        assert!(!countdown.toggle(10, &mut output, 20));
        assert!(!output.enabled);
    }

    proptest! {
        /// Remaining time stays within the configured duration and the lamp
        /// is on exactly while running
        #[test]
        fn prop_remaining_bounded(
            seconds in 0u8..=180,
            steps in proptest::collection::vec((0u64..2_000, any::<bool>()), 1..200),
        ) {
            let config = ControlConfig::default();
            let mut countdown = Countdown::new(seconds);
            let mut output = MockOutput::new();
            let mut now = 0u64;

            countdown.start(now, &mut output, 100);
            for (step, toggle) in steps {
                now += step;
                if toggle {
                    countdown.toggle(now, &mut output, 100);
                }
                countdown.tick(now, true, &mut output, &config);

                prop_assert!(countdown.remaining_ms() <= countdown.total_ms());
                prop_assert!(countdown.progress_percent() <= 100);
                prop_assert_eq!(countdown.is_running(), output.enabled);
            }
        }
    }
}
