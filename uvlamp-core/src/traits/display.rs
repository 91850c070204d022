//! Display collaborator interface
//!
//! The core never inspects widget internals; it only names screens and
//! widgets and hands over values.

use crate::state::Screen;

/// Duration of the animated screen transition
pub const TRANSITION_MS: u32 = 500;

/// Widgets the core updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Widget {
    /// Remaining time on the main screen (`MM:SS`)
    MainTimerLabel,
    /// Remaining-time progress on the main screen (0-100)
    MainTimerArc,
    /// Configured power on the main screen (`N%`)
    MainPowerLabel,
    /// Configured power on the power setting screen
    PowerLabel,
    /// Power adjustment control, visible only in edit mode
    PowerArc,
    /// Configured duration on the timer setting screen (`MM:SS`)
    TimerLabel,
    /// Duration adjustment control, visible only in edit mode
    TimerArc,
}

impl Widget {
    /// Number of widgets
    pub const COUNT: usize = 7;

    /// All widgets, in index order
    pub const ALL: [Widget; Self::COUNT] = [
        Widget::MainTimerLabel,
        Widget::MainTimerArc,
        Widget::MainPowerLabel,
        Widget::PowerLabel,
        Widget::PowerArc,
        Widget::TimerLabel,
        Widget::TimerArc,
    ];

    /// Dense index for table storage
    pub const fn index(self) -> usize {
        match self {
            Widget::MainTimerLabel => 0,
            Widget::MainTimerArc => 1,
            Widget::MainPowerLabel => 2,
            Widget::PowerLabel => 3,
            Widget::PowerArc => 4,
            Widget::TimerLabel => 5,
            Widget::TimerArc => 6,
        }
    }

    /// Screen this widget lives on
    pub const fn screen(self) -> Screen {
        match self {
            Widget::MainTimerLabel | Widget::MainTimerArc | Widget::MainPowerLabel => Screen::Main,
            Widget::PowerLabel | Widget::PowerArc => Screen::PowerSetting,
            Widget::TimerLabel | Widget::TimerArc => Screen::TimerSetting,
        }
    }
}

/// How a newly loaded screen replaces the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Swap immediately
    None,
    /// Slide in from the right over [`TRANSITION_MS`]
    MoveLeft,
}

/// Trait for the display collaborator
///
/// Calls are cheap state updates; the implementation decides when to
/// actually draw.
pub trait UiBackend {
    /// Make `screen` the active screen
    fn load_screen(&mut self, screen: Screen, transition: Transition);

    /// Replace a label's text
    fn set_label_text(&mut self, widget: Widget, text: &str);

    /// Set an arc's value (0-100)
    fn set_arc_value(&mut self, widget: Widget, value: u8);

    /// Show or hide a widget
    fn set_widget_visible(&mut self, widget: Widget, visible: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_indices_are_dense() {
        for (i, widget) in Widget::ALL.iter().enumerate() {
            assert_eq!(widget.index(), i);
        }
    }

    #[test]
    fn test_arcs_live_on_setting_screens() {
        assert_eq!(Widget::PowerArc.screen(), Screen::PowerSetting);
        assert_eq!(Widget::TimerArc.screen(), Screen::TimerSetting);
        assert_eq!(Widget::MainTimerArc.screen(), Screen::Main);
    }
}
