//! Control core coordinating input, navigation, countdown and persistence
//!
//! One [`ControlCore`] owns all loop-side state. Each frame it:
//! - Advances the countdown
//! - Drains the encoder delta
//! - Classifies the primary, then the secondary button
//!
//! in that fixed order, pushing display updates to the UI collaborator and
//! returning the events that happened for the caller to log.

use heapless::Vec;
use uvlamp_hal::flash::NorFlash;

use crate::config::{apply_delta, ControlConfig, MAX_POWER_PERCENT, MAX_TIMER_SECONDS};
use crate::input::{Button, ButtonMailbox, EncoderMailbox, Gesture};
use crate::persist::{ConfigStore, PersistError, PersistedConfig};
use crate::state::{Countdown, EditTarget, EditTransition, Navigator, Screen, TickOutcome};
use crate::traits::{LampOutput, Transition, UiBackend};
use crate::ui;

/// Most events a single frame can produce
pub const MAX_FRAME_EVENTS: usize = 8;

/// Events produced by one frame
pub type FrameEvents = Vec<CoreEvent, MAX_FRAME_EVENTS>;

/// Things that happened inside the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CoreEvent {
    /// Valid configuration found in flash at boot
    ConfigRestored(PersistedConfig),
    /// No valid configuration in flash; zeros used
    ConfigDefaulted,
    /// Flash could not be read at boot; zeros used
    LoadFailed(PersistError),
    /// New screen loaded
    ScreenChanged(Screen),
    /// Edit mode turned on
    EditModeEntered(EditTarget),
    /// Edit mode turned off
    EditModeExited,
    /// Configuration written to flash
    ConfigSaved(PersistedConfig),
    /// Configuration could not be written
    SaveFailed(PersistError),
    /// Countdown started, lamp on
    TimerStarted,
    /// Countdown paused, lamp off
    TimerPaused,
    /// Countdown reached zero, lamp off, rearmed
    TimerExpired,
    /// Countdown rearmed by the user
    TimerReset,
    /// Power setting adjusted
    PowerChanged(u8),
    /// Countdown duration adjusted
    DurationChanged(u8),
}

/// Interrupt-fed mailboxes drained each frame
pub struct InputSources<'a> {
    pub encoder: &'a EncoderMailbox,
    pub primary: &'a ButtonMailbox,
    pub secondary: &'a ButtonMailbox,
}

/// All loop-side state of the lamp
pub struct ControlCore<S, O> {
    navigator: Navigator,
    countdown: Countdown,
    power_percent: u8,
    output: O,
    store: ConfigStore<S>,
    config: ControlConfig,
}

impl<S: NorFlash, O: LampOutput> ControlCore<S, O> {
    /// Create a core with zeroed settings; call [`boot`](Self::boot) next
    pub fn new(store: ConfigStore<S>, output: O, config: ControlConfig) -> Self {
        Self {
            navigator: Navigator::new(),
            countdown: Countdown::new(0),
            power_percent: 0,
            output,
            store,
            config,
        }
    }

    /// Restore settings and bring up the main screen
    pub fn boot<U: UiBackend>(&mut self, ui: &mut U) -> CoreEvent {
        let (restored, event) = match self.store.load() {
            Ok(Some(config)) => (config, CoreEvent::ConfigRestored(config)),
            Ok(None) => (PersistedConfig::default(), CoreEvent::ConfigDefaulted),
            Err(e) => (PersistedConfig::default(), CoreEvent::LoadFailed(e)),
        };

        self.power_percent = restored.power_percent;
        self.countdown = Countdown::new(restored.timer_seconds);
        self.output.set_power(self.power_percent);
        self.output.disable();

        ui::render_timer_setting(ui, self.countdown.configured_seconds());
        ui::render_power_setting(ui, self.power_percent);
        ui::show_adjustment(ui, None);
        ui.load_screen(Screen::Main, Transition::None);
        ui::render_main(ui, &self.countdown, self.power_percent);

        event
    }

    /// Run one control loop iteration
    pub fn run_frame<U: UiBackend>(
        &mut self,
        now_ms: u64,
        inputs: &InputSources<'_>,
        ui: &mut U,
    ) -> FrameEvents {
        let mut events = FrameEvents::new();

        self.process_timer(now_ms, ui, &mut events);
        self.process_encoder(inputs.encoder.take_delta(), ui, &mut events);

        if let Some(gesture) = inputs.primary.poll(now_ms, &self.config) {
            self.handle_gesture(Button::Primary, gesture, now_ms, ui, &mut events);
        }
        if let Some(gesture) = inputs.secondary.poll(now_ms, &self.config) {
            self.handle_gesture(Button::Secondary, gesture, now_ms, ui, &mut events);
        }

        events
    }

    /// Apply a classified gesture
    pub fn handle_gesture<U: UiBackend>(
        &mut self,
        button: Button,
        gesture: Gesture,
        now_ms: u64,
        ui: &mut U,
        events: &mut FrameEvents,
    ) {
        match (button, gesture) {
            (Button::Primary, Gesture::ShortPress) => self.next_screen(ui, events),
            (Button::Primary, Gesture::LongPress) => self.toggle_edit(ui, events),
            (Button::Secondary, _) if self.navigator.screen() != Screen::Main => {}
            (Button::Secondary, Gesture::ShortPress) => {
                let was_running = self.countdown.is_running();
                let running = self
                    .countdown
                    .toggle(now_ms, &mut self.output, self.power_percent);
                if running != was_running {
                    let event = if running {
                        CoreEvent::TimerStarted
                    } else {
                        CoreEvent::TimerPaused
                    };
                    push(events, event);
                }
            }
            (Button::Secondary, Gesture::LongPress) => {
                self.countdown.reset(&mut self.output);
                ui::render_main(ui, &self.countdown, self.power_percent);
                push(events, CoreEvent::TimerReset);
            }
        }
    }

    fn process_timer<U: UiBackend>(&mut self, now_ms: u64, ui: &mut U, events: &mut FrameEvents) {
        let on_main = self.navigator.screen() == Screen::Main;
        match self
            .countdown
            .tick(now_ms, on_main, &mut self.output, &self.config)
        {
            TickOutcome::Idle => {}
            TickOutcome::Expired => {
                ui::render_main(ui, &self.countdown, self.power_percent);
                push(events, CoreEvent::TimerExpired);
            }
            TickOutcome::Progress { seconds, arc } => {
                if let Some(seconds) = seconds {
                    ui::render_main_label(ui, seconds);
                }
                if let Some(arc) = arc {
                    ui::render_main_arc(ui, arc);
                }
            }
        }
    }

    fn process_encoder<U: UiBackend>(&mut self, delta: i32, ui: &mut U, events: &mut FrameEvents) {
        if delta == 0 {
            return;
        }
        // Deltas outside edit mode are drained and dropped
        match self.navigator.edit_target() {
            None => {}
            Some(EditTarget::Power) => {
                self.power_percent = apply_delta(self.power_percent, delta, MAX_POWER_PERCENT);
                ui::render_power_setting(ui, self.power_percent);
                push(events, CoreEvent::PowerChanged(self.power_percent));
            }
            Some(EditTarget::Timer) => {
                let seconds = apply_delta(
                    self.countdown.configured_seconds(),
                    delta,
                    MAX_TIMER_SECONDS,
                );
                self.countdown.set_configured_seconds(seconds);
                ui::render_timer_setting(ui, seconds);
                push(events, CoreEvent::DurationChanged(seconds));
            }
        }
    }

    fn next_screen<U: UiBackend>(&mut self, ui: &mut U, events: &mut FrameEvents) {
        let Some(screen) = self.navigator.advance(self.countdown.is_running()) else {
            return;
        };
        ui.load_screen(screen, Transition::MoveLeft);
        match screen {
            Screen::Main => {
                self.countdown.reset(&mut self.output);
                ui::render_main(ui, &self.countdown, self.power_percent);
            }
            Screen::PowerSetting | Screen::TimerSetting => {
                ui::show_adjustment(ui, self.navigator.edit_target());
            }
        }
        push(events, CoreEvent::ScreenChanged(screen));
    }

    fn toggle_edit<U: UiBackend>(&mut self, ui: &mut U, events: &mut FrameEvents) {
        match self.navigator.toggle_edit() {
            None => {}
            Some(EditTransition::Entered(target)) => {
                ui::show_adjustment(ui, Some(target));
                push(events, CoreEvent::EditModeEntered(target));
            }
            Some(EditTransition::Exited) => {
                ui::show_adjustment(ui, None);
                push(events, CoreEvent::EditModeExited);
                let settings = self.settings();
                let event = match self.store.save(&settings) {
                    Ok(()) => CoreEvent::ConfigSaved(settings),
                    Err(e) => CoreEvent::SaveFailed(e),
                };
                push(events, event);
            }
        }
    }

    /// Current settings as they would be persisted
    pub fn settings(&self) -> PersistedConfig {
        PersistedConfig {
            timer_seconds: self.countdown.configured_seconds(),
            power_percent: self.power_percent,
        }
    }

    /// Get the navigator state
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Get the countdown state
    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    /// Get the configured power
    pub fn power_percent(&self) -> u8 {
        self.power_percent
    }

    /// Get the lamp output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get the configuration store
    pub fn store(&self) -> &ConfigStore<S> {
        &self.store
    }

    /// Get the timing configuration
    pub fn config(&self) -> &ControlConfig {
        &self.config
    }
}

fn push(events: &mut FrameEvents, event: CoreEvent) {
    // A frame produces at most five events
    let pushed = events.push(event);
    debug_assert!(pushed.is_ok(), "frame event buffer full");
}
