//! Widget tree
//!
//! Holds the retained state of all widgets across the three screens.

use heapless::String;
use uvlamp_core::state::Screen;
use uvlamp_core::traits::display::TRANSITION_MS;
use uvlamp_core::traits::{Transition, UiBackend, Widget};

/// Maximum characters in a label
pub const LABEL_LEN: usize = 8;

/// Retained state of one widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetState {
    /// Label text (empty for arcs)
    pub text: String<LABEL_LEN>,
    /// Arc value 0-100 (unused for labels)
    pub value: u8,
    /// Whether the widget is drawn
    pub visible: bool,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            text: String::new(),
            value: 0,
            visible: true,
        }
    }
}

/// A screen load waiting to be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenChange {
    /// Screen to show
    pub screen: Screen,
    /// Animation to use
    pub transition: Transition,
    /// Animation length in ms (0 for an immediate swap)
    pub duration_ms: u32,
}

/// Retained widget model
pub struct WidgetTree {
    active: Screen,
    widgets: [WidgetState; Widget::COUNT],
    /// Bit per widget index
    dirty: u8,
    pending: Option<ScreenChange>,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    /// Create a tree showing the main screen with empty widgets
    pub fn new() -> Self {
        Self {
            active: Screen::Main,
            widgets: core::array::from_fn(|_| WidgetState::default()),
            dirty: 0,
            pending: None,
        }
    }

    /// Get the active screen
    pub fn active_screen(&self) -> Screen {
        self.active
    }

    /// Get a widget's state
    pub fn widget(&self, widget: Widget) -> &WidgetState {
        &self.widgets[widget.index()]
    }

    /// Check if a widget changed since the last drain
    pub fn is_dirty(&self, widget: Widget) -> bool {
        self.dirty & (1 << widget.index()) != 0
    }

    /// Drain changed widgets on the active screen
    ///
    /// Changes on other screens stay pending until that screen is shown.
    pub fn take_dirty(&mut self) -> impl Iterator<Item = Widget> {
        let active = self.active;
        let mut taken = 0u8;
        for widget in Widget::ALL {
            if widget.screen() == active && self.is_dirty(widget) {
                taken |= 1 << widget.index();
            }
        }
        self.dirty &= !taken;
        Widget::ALL
            .into_iter()
            .filter(move |widget| taken & (1 << widget.index()) != 0)
    }

    /// Drain the pending screen load, if any
    pub fn take_screen_change(&mut self) -> Option<ScreenChange> {
        self.pending.take()
    }

    fn mark(&mut self, widget: Widget) {
        self.dirty |= 1 << widget.index();
    }
}

impl UiBackend for WidgetTree {
    fn load_screen(&mut self, screen: Screen, transition: Transition) {
        let duration_ms = match transition {
            Transition::None => 0,
            Transition::MoveLeft => TRANSITION_MS,
        };
        self.active = screen;
        self.pending = Some(ScreenChange {
            screen,
            transition,
            duration_ms,
        });
        // Everything on the new screen is drawn fresh
        for widget in Widget::ALL {
            if widget.screen() == screen {
                self.mark(widget);
            }
        }
    }

    fn set_label_text(&mut self, widget: Widget, text: &str) {
        let state = &mut self.widgets[widget.index()];
        if state.text.as_str() == text {
            return;
        }
        state.text.clear();
        for c in text.chars() {
            if state.text.push(c).is_err() {
                break;
            }
        }
        self.mark(widget);
    }

    fn set_arc_value(&mut self, widget: Widget, value: u8) {
        let value = value.min(100);
        let state = &mut self.widgets[widget.index()];
        if state.value == value {
            return;
        }
        state.value = value;
        self.mark(widget);
    }

    fn set_widget_visible(&mut self, widget: Widget, visible: bool) {
        let state = &mut self.widgets[widget.index()];
        if state.visible == visible {
            return;
        }
        state.visible = visible;
        self.mark(widget);
    }
}
