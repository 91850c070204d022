//! Debounce and gesture classification
//!
//! Turns raw press/release state into short and long presses using elapsed
//! time only. Runs in the control loop, never in interrupt context. A
//! released press is timed between its two recorded edges, so a loop that
//! polls late still sees the physical duration.
//!
//! | Gesture     | Condition                                   |
//! |-------------|---------------------------------------------|
//! | (none)      | released after `<= debounce_ms`             |
//! | Short press | released after `debounce_ms < d < long_ms`  |
//! | Long press  | held for `>= long_ms` (once per press)      |

use super::button::ButtonState;
use crate::config::ControlConfig;

/// Physical buttons on the lamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Screen navigation and edit mode
    Primary,
    /// Countdown start/pause/reset
    Secondary,
}

/// Classified button gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// Released between the debounce window and the long-press threshold
    ShortPress,
    /// Held for at least the long-press threshold
    LongPress,
}

/// Advance the gesture state of one button
///
/// Emits at most one `LongPress` and at most one `ShortPress` per physical
/// press, and never both. A release always clears the recorded press.
pub fn classify(state: &mut ButtonState, now_ms: u64, config: &ControlConfig) -> Option<Gesture> {
    let started = state.press_start_ms?;
    let long_ms = config.long_press_ms as u64;

    if state.pressed {
        let held_ms = now_ms.saturating_sub(started);
        if !state.long_press_handled && held_ms >= long_ms {
            state.long_press_handled = true;
            return Some(Gesture::LongPress);
        }
        return None;
    }

    // Released: consume the press regardless of outcome
    let held_ms = state.release_ms.unwrap_or(now_ms).saturating_sub(started);
    let handled = state.long_press_handled;
    state.press_start_ms = None;
    state.release_ms = None;
    state.long_press_handled = false;

    if handled {
        None
    } else if held_ms >= long_ms {
        // Held past the threshold but released before a poll saw it held
        Some(Gesture::LongPress)
    } else if held_ms > config.debounce_ms as u64 {
        Some(Gesture::ShortPress)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pressed_at(ms: u64) -> ButtonState {
        let mut state = ButtonState::default();
        state.record_edge(true, ms);
        state
    }

    #[test]
    fn test_idle_button_is_silent() {
        let mut state = ButtonState::default();
        let config = ControlConfig::default();
        assert_eq!(classify(&mut state, 5000, &config), None);
    }

    #[test]
    fn test_short_press() {
        let config = ControlConfig::default();
        let mut state = pressed_at(100);

        assert_eq!(classify(&mut state, 150, &config), None);
        state.record_edge(false, 300);
        assert_eq!(classify(&mut state, 300, &config), Some(Gesture::ShortPress));
        assert_eq!(state.press_start_ms, None);
        assert_eq!(classify(&mut state, 400, &config), None);
    }

    #[test]
    fn test_bounce_is_discarded() {
        let config = ControlConfig::default();

        let mut state = pressed_at(100);
        state.record_edge(false, 110);
        assert_eq!(classify(&mut state, 110, &config), None);
        assert_eq!(state.press_start_ms, None);
    }

    #[test]
    fn test_long_press_fires_once_while_held() {
        let config = ControlConfig::default();
        let mut state = pressed_at(0);

        assert_eq!(classify(&mut state, 999, &config), None);
        assert_eq!(classify(&mut state, 1000, &config), Some(Gesture::LongPress));
        assert_eq!(classify(&mut state, 1500, &config), None);
        assert_eq!(classify(&mut state, 5000, &config), None);

        // Release after a handled long press emits nothing
        state.record_edge(false, 5200);
        assert_eq!(classify(&mut state, 5200, &config), None);
        assert!(!state.long_press_handled);
    }

    #[test]
    fn test_release_timed_by_edges_not_poll() {
        let config = ControlConfig::default();

        let mut state = pressed_at(1000);
        state.record_edge(false, 1990);
        assert_eq!(classify(&mut state, 2010, &config), Some(Gesture::ShortPress));

        let mut state = pressed_at(5000);
        state.record_edge(false, 5005);
        assert_eq!(classify(&mut state, 5025, &config), None);
    }

    #[test]
    fn test_long_press_seen_only_at_release() {
        let config = ControlConfig::default();
        let mut state = pressed_at(0);

        state.record_edge(false, 1200);
        assert_eq!(classify(&mut state, 1200, &config), Some(Gesture::LongPress));
        assert_eq!(classify(&mut state, 1300, &config), None);
    }

    #[test]
    fn test_new_press_rearms_long_press() {
        let config = ControlConfig::default();
        let mut state = pressed_at(0);

        assert_eq!(classify(&mut state, 1100, &config), Some(Gesture::LongPress));
        state.record_edge(false, 1200);
        assert_eq!(classify(&mut state, 1200, &config), None);

        state.record_edge(true, 2000);
        assert_eq!(classify(&mut state, 3000, &config), Some(Gesture::LongPress));
    }

    proptest! {
        /// Poll a single press at loop rate and count gestures by duration
        #[test]
        fn prop_one_gesture_per_press(
            start in 1u64..10_000,
            duration in 0u64..3_000,
            frame in 1u64..50,
        ) {
            let config = ControlConfig::default();
            let mut state = pressed_at(start);
            let release = start + duration;

            let mut shorts = 0;
            let mut longs = 0;
            let mut tally = |gesture: Option<Gesture>| match gesture {
                Some(Gesture::ShortPress) => shorts += 1,
                Some(Gesture::LongPress) => longs += 1,
                None => {}
            };

            let mut now = start;
            while now < release {
                tally(classify(&mut state, now, &config));
                now += frame;
            }
            state.record_edge(false, release);
            tally(classify(&mut state, release, &config));
            tally(classify(&mut state, release + frame, &config));

            if duration <= 10 {
                prop_assert_eq!((shorts, longs), (0, 0));
            } else if duration < 1000 {
                prop_assert_eq!((shorts, longs), (1, 0));
            } else {
                prop_assert_eq!((shorts, longs), (0, 1));
            }
        }

        /// Released presses polled some time after the release edge
        #[test]
        fn prop_late_poll_keeps_press_duration(
            start in 1u64..10_000,
            duration in 0u64..1_000,
            lag in 0u64..2_000,
        ) {
            let config = ControlConfig::default();
            let mut state = pressed_at(start);
            state.record_edge(false, start + duration);

            let gesture = classify(&mut state, start + duration + lag, &config);

            let expected = if duration <= 10 { None } else { Some(Gesture::ShortPress) };
            prop_assert_eq!(gesture, expected);
            prop_assert_eq!(state, ButtonState::default());
        }
    }
}
