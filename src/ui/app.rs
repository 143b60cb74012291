use crate::config::Config;
use crate::counter::{CounterAction, CounterView};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Multiplier for the large-step keys.
pub const LARGE_STEP_FACTOR: u64 = 5;

/// Terminal host state: the latest published view plus display settings.
pub struct App {
    view: CounterView,
    step: u64,
    delay_ms: u64,
    failure_probability: f64,
    animation_tick: u8,
    should_quit: bool,
}

impl App {
    pub fn new(config: &Config, view: CounterView) -> Self {
        Self {
            view,
            step: config.counter.step,
            delay_ms: config.remote.delay_ms,
            failure_probability: config.remote.failure_probability,
            animation_tick: 0,
            should_quit: false,
        }
    }

    pub fn view(&self) -> &CounterView {
        &self.view
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn large_step(&self) -> u64 {
        self.step.saturating_mul(LARGE_STEP_FACTOR)
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    pub fn failure_probability(&self) -> f64 {
        self.failure_probability
    }

    pub fn animation_tick(&self) -> u8 {
        self.animation_tick
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn on_tick(&mut self) {
        if self.view.is_pending() {
            self.animation_tick = self.animation_tick.wrapping_add(1);
        }
    }

    pub fn on_view(&mut self, view: CounterView) {
        if !view.is_pending() {
            self.animation_tick = 0;
        }
        self.view = view;
    }

    /// Map a key press to an action, applying the same gating the controls
    /// show: nothing while an update is pending, no increment at the upper
    /// bound, no decrement at the lower bound.
    pub fn on_key(&mut self, key: KeyEvent) -> Option<CounterAction> {
        let ctrl_c = key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c'));
        if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.request_quit();
            return None;
        }

        if self.view.is_pending() {
            return None;
        }

        match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right | KeyCode::Up
                if self.view.can_increment() =>
            {
                Some(CounterAction::increment(self.step))
            }
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left | KeyCode::Down
                if self.view.can_decrement() =>
            {
                Some(CounterAction::decrement(self.step))
            }
            KeyCode::Char(']') | KeyCode::PageUp if self.view.can_increment() => {
                Some(CounterAction::increment(self.large_step()))
            }
            KeyCode::Char('[') | KeyCode::PageDown if self.view.can_decrement() => {
                Some(CounterAction::decrement(self.large_step()))
            }
            KeyCode::Char('r') | KeyCode::Char('R') => Some(CounterAction::Reset),
            _ => None,
        }
    }
}
