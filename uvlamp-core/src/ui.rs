//! Display content
//!
//! Formats setting and countdown values and pushes them to the display
//! collaborator. Pure functions of the values passed in.

use core::fmt::Write;

use heapless::String;

use crate::config::MAX_TIMER_SECONDS;
use crate::state::{Countdown, EditTarget};
use crate::traits::{UiBackend, Widget};

/// Text buffer for a single label
pub type LabelText = String<8>;

/// Format seconds as `MM:SS`
pub fn format_mm_ss(total_seconds: u32) -> LabelText {
    let mut text = LabelText::new();
    // Valid durations never exceed 03:00
    let _ = write!(text, "{:02}:{:02}", total_seconds / 60, total_seconds % 60);
    text
}

/// Format a bare number
pub fn format_number(value: u8) -> LabelText {
    let mut text = LabelText::new();
    let _ = write!(text, "{}", value);
    text
}

/// Format a percentage with its unit
pub fn format_percent(value: u8) -> LabelText {
    let mut text = LabelText::new();
    let _ = write!(text, "{}%", value);
    text
}

/// Arc position for a configured duration, 0-100 over the full range
pub fn timer_arc_value(seconds: u8) -> u8 {
    (seconds.min(MAX_TIMER_SECONDS) as u16 * 100 / MAX_TIMER_SECONDS as u16) as u8
}

/// Refresh the timer setting screen
pub fn render_timer_setting<U: UiBackend>(ui: &mut U, seconds: u8) {
    ui.set_label_text(Widget::TimerLabel, &format_mm_ss(seconds as u32));
    ui.set_arc_value(Widget::TimerArc, timer_arc_value(seconds));
}

/// Refresh the power setting screen
pub fn render_power_setting<U: UiBackend>(ui: &mut U, percent: u8) {
    ui.set_arc_value(Widget::PowerArc, percent);
    ui.set_label_text(Widget::PowerLabel, &format_number(percent));
}

/// Refresh the remaining-time label on the main screen
pub fn render_main_label<U: UiBackend>(ui: &mut U, remaining_seconds: u32) {
    ui.set_label_text(Widget::MainTimerLabel, &format_mm_ss(remaining_seconds));
}

/// Refresh the progress arc on the main screen
pub fn render_main_arc<U: UiBackend>(ui: &mut U, percent: u8) {
    ui.set_arc_value(Widget::MainTimerArc, percent);
}

/// Refresh everything on the main screen
pub fn render_main<U: UiBackend>(ui: &mut U, countdown: &Countdown, power_percent: u8) {
    ui.set_label_text(Widget::MainPowerLabel, &format_percent(power_percent));
    render_main_label(ui, countdown.remaining_seconds());
    render_main_arc(ui, countdown.progress_percent());
}

/// Show the adjustment control for `target` only
///
/// `None` hides both controls.
pub fn show_adjustment<U: UiBackend>(ui: &mut U, target: Option<EditTarget>) {
    match target {
        Some(EditTarget::Power) => ui.set_widget_visible(Widget::PowerArc, true),
        Some(EditTarget::Timer) => ui.set_widget_visible(Widget::TimerArc, true),
        None => {
            ui.set_widget_visible(Widget::PowerArc, false);
            ui.set_widget_visible(Widget::TimerArc, false);
        }
    }
}
