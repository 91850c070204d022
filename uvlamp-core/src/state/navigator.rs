//! Screen and edit-mode navigation
//!
//! State machine over `{Main, PowerSetting, TimerSetting} x {edit on/off}`.
//! Navigation is pure; side effects (screen loads, saves, countdown resets)
//! are applied by the controller based on the returned transitions.

/// Screens, in navigation order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Countdown and power summary
    #[default]
    Main,
    /// Lamp power adjustment
    PowerSetting,
    /// Countdown duration adjustment
    TimerSetting,
}

impl Screen {
    /// Next screen in the cycle
    pub const fn next(self) -> Self {
        match self {
            Screen::Main => Screen::PowerSetting,
            Screen::PowerSetting => Screen::TimerSetting,
            Screen::TimerSetting => Screen::Main,
        }
    }

    /// Value adjusted by the encoder on this screen, if any
    pub const fn edit_target(self) -> Option<EditTarget> {
        match self {
            Screen::Main => None,
            Screen::PowerSetting => Some(EditTarget::Power),
            Screen::TimerSetting => Some(EditTarget::Timer),
        }
    }
}

/// Setting adjusted in edit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditTarget {
    /// Lamp power percent
    Power,
    /// Countdown duration
    Timer,
}

/// Result of toggling edit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditTransition {
    /// Edit mode turned on for this target
    Entered(EditTarget),
    /// Edit mode turned off; configuration should be persisted
    Exited,
}

/// Current screen and edit mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Navigator {
    screen: Screen,
    edit_mode: bool,
}

impl Navigator {
    /// Start on the main screen, not editing
    pub const fn new() -> Self {
        Self {
            screen: Screen::Main,
            edit_mode: false,
        }
    }

    /// Get the active screen
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Check if edit mode is on
    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    /// Move to the next screen
    ///
    /// Blocked while editing or while the countdown runs.
    pub fn advance(&mut self, timer_running: bool) -> Option<Screen> {
        if self.edit_mode || timer_running {
            return None;
        }
        self.screen = self.screen.next();
        Some(self.screen)
    }

    /// Toggle edit mode; only setting screens have something to edit
    pub fn toggle_edit(&mut self) -> Option<EditTransition> {
        let target = self.screen.edit_target()?;
        self.edit_mode = !self.edit_mode;
        Some(if self.edit_mode {
            EditTransition::Entered(target)
        } else {
            EditTransition::Exited
        })
    }

    /// Setting the encoder adjusts right now, if any
    pub fn edit_target(&self) -> Option<EditTarget> {
        if self.edit_mode {
            self.screen.edit_target()
        } else {
            None
        }
    }
}
