//! Display flush
//!
//! Drains the widget tree once per frame. Panel drawing hooks in here; for
//! now the changes go to the log.

use defmt::*;
use uvlamp_display::WidgetTree;

/// Hand pending screen loads and changed widgets to the panel
pub fn flush(tree: &mut WidgetTree) {
    if let Some(change) = tree.take_screen_change() {
        debug!(
            "Screen {} ({}, {} ms)",
            change.screen, change.transition, change.duration_ms
        );
    }

    for widget in tree.take_dirty() {
        let state = tree.widget(widget);
        trace!(
            "{}: text={} value={} visible={}",
            widget,
            state.text.as_str(),
            state.value,
            state.visible
        );
    }
}
