//! Trigger debouncing with hysteresis
//!
//! The analog trigger is turned into select down/up edges using two distinct
//! thresholds. Values inside `[release, press]` never change state.

/// Default value the trigger must exceed to press
pub const DEFAULT_PRESS_THRESHOLD: f32 = 0.2;

/// Default value the trigger must fall below to release
pub const DEFAULT_RELEASE_THRESHOLD: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerThresholds {
    pub press: f32,
    pub release: f32,
}

impl Default for TriggerThresholds {
    fn default() -> Self {
        Self {
            press: DEFAULT_PRESS_THRESHOLD,
            release: DEFAULT_RELEASE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerState {
    #[default]
    Released,
    Pressed,
}

/// State change produced by a trigger sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEdge {
    Down,
    Up,
}

#[derive(Debug, Clone)]
pub struct TriggerDebouncer {
    thresholds: TriggerThresholds,
    state: TriggerState,
    last_value: f32,
}

impl TriggerDebouncer {
    pub fn new(thresholds: TriggerThresholds) -> Self {
        Self {
            thresholds,
            state: TriggerState::Released,
            last_value: 0.0,
        }
    }

    /// Feed one analog value; returns the edge it caused, if any
    pub fn update(&mut self, value: f32) -> Option<TriggerEdge> {
        self.last_value = value;
        match self.state {
            TriggerState::Pressed if value < self.thresholds.release => {
                self.state = TriggerState::Released;
                Some(TriggerEdge::Up)
            }
            TriggerState::Released if value > self.thresholds.press => {
                self.state = TriggerState::Pressed;
                Some(TriggerEdge::Down)
            }
            _ => None,
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    pub fn is_pressed(&self) -> bool {
        self.state == TriggerState::Pressed
    }

    /// Analog value of the last update
    pub fn last_value(&self) -> f32 {
        self.last_value
    }

    pub fn thresholds(&self) -> TriggerThresholds {
        self.thresholds
    }
}

impl Default for TriggerDebouncer {
    fn default() -> Self {
        Self::new(TriggerThresholds::default())
    }
}
