//! Button edge capture
//!
//! Active-low momentary switches with pull-ups. The edge handler records
//! press/release with a timestamp; classification happens later in the
//! control loop (see [`super::gesture`]).

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use uvlamp_hal::InputPin;

use super::gesture::{classify, Gesture};
use crate::config::ControlConfig;

/// Raw state of one button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    /// Line currently reads as pressed
    pub pressed: bool,
    /// Timestamp of the last press edge, cleared once the release is classified
    pub press_start_ms: Option<u64>,
    /// Timestamp of the release edge ending the current press
    pub release_ms: Option<u64>,
    /// Long press already emitted for the current press
    pub long_press_handled: bool,
}

impl ButtonState {
    /// Apply one edge: a press records its start time, a release its end time
    pub fn record_edge(&mut self, pressed: bool, now_ms: u64) {
        if pressed {
            self.pressed = true;
            self.press_start_ms = Some(now_ms);
            self.release_ms = None;
            self.long_press_handled = false;
        } else if self.pressed {
            self.pressed = false;
            self.release_ms = Some(now_ms);
        }
    }
}

/// Button mailbox shared between the edge handler and the control loop
///
/// Both sides go through a critical section so the consumer's
/// read-classify-clear step is indivisible with respect to new edges.
pub struct ButtonMailbox {
    state: Mutex<CriticalSectionRawMutex, Cell<ButtonState>>,
}

impl Default for ButtonMailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonMailbox {
    /// Create an idle mailbox (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(Cell::new(ButtonState {
                pressed: false,
                press_start_ms: None,
                release_ms: None,
                long_press_handled: false,
            })),
        }
    }

    /// Producer side: record an edge
    pub fn on_edge(&self, pressed: bool, now_ms: u64) {
        self.state.lock(|cell| {
            let mut state = cell.get();
            state.record_edge(pressed, now_ms);
            cell.set(state);
        });
    }

    /// Producer side: sample an active-low button line and record the edge
    pub fn sample<P: InputPin>(&self, pin: &P, now_ms: u64) {
        self.on_edge(pin.is_low(), now_ms);
    }

    /// Consumer side: classify and clear in one step
    pub fn poll(&self, now_ms: u64, config: &ControlConfig) -> Option<Gesture> {
        self.state.lock(|cell| {
            let mut state = cell.get();
            let gesture = classify(&mut state, now_ms, config);
            cell.set(state);
            gesture
        })
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> ButtonState {
        self.state.lock(|cell| cell.get())
    }
}
