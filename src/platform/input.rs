//! Keyboard and swipe translation into directional/jump intents

use glam::Vec2;

use crate::consts::SWIPE_THRESHOLD_PX;
use crate::sim::TickInput;

/// A resolved player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intent {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    Jump,
}

impl Intent {
    /// Map a DOM-style `KeyboardEvent.code`
    pub fn from_key_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" | "KeyW" => Some(Intent::Up),
            "ArrowDown" | "KeyS" => Some(Intent::Down),
            "ArrowLeft" | "KeyA" => Some(Intent::Left),
            "ArrowRight" | "KeyD" => Some(Intent::Right),
            "Space" => Some(Intent::Jump),
            _ => None,
        }
    }

    /// One-tick input for this intent alone
    pub fn to_tick_input(self) -> TickInput {
        let mut state = IntentState::default();
        state.record(self);
        state.take()
    }
}

/// Recognizes swipes between touch start and touch end
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<Vec2>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Touch started at `pos` (screen pixels, y down)
    pub fn begin(&mut self, pos: Vec2) {
        self.start = Some(pos);
    }

    /// Touch ended at `pos`. Displacements under the threshold are not swipes.
    pub fn end(&mut self, pos: Vec2) -> Intent {
        let Some(start) = self.start.take() else {
            return Intent::None;
        };
        let delta = pos - start;
        if delta.length() < SWIPE_THRESHOLD_PX {
            return Intent::None;
        }

        if delta.x.abs() > delta.y.abs() {
            if delta.x > 0.0 { Intent::Right } else { Intent::Left }
        } else if delta.y > 0.0 {
            Intent::Down
        } else {
            Intent::Up
        }
    }

    /// Touch interrupted (touchcancel); the pending gesture is discarded
    pub fn cancel(&mut self) {
        self.start = None;
    }
}

/// Latest pending intents, consumed once per tick. Last write wins per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentState {
    move_x: i8,
    move_z: i8,
    jump: bool,
}

impl IntentState {
    pub fn record(&mut self, intent: Intent) {
        match intent {
            Intent::None => {}
            Intent::Up => self.move_z = -1,
            Intent::Down => self.move_z = 1,
            Intent::Left => self.move_x = -1,
            Intent::Right => self.move_x = 1,
            Intent::Jump => self.jump = true,
        }
    }

    /// Record a key press; unknown codes are ignored
    pub fn record_key(&mut self, code: &str) {
        if let Some(intent) = Intent::from_key_code(code) {
            self.record(intent);
        }
    }

    /// Input for the next tick; clears everything pending
    pub fn take(&mut self) -> TickInput {
        let input = TickInput {
            move_x: self.move_x,
            move_z: self.move_z,
            jump: self.jump,
            idle_mode: false,
        };
        *self = Self::default();
        input
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
