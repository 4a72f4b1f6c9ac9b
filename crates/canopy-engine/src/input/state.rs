//! Pressed-state record for the four directional actions.
//!
//! Device events are applied synchronously; the simulation only ever reads
//! the resulting flags.

use glam::Vec2;

use crate::input::event::{keys, InputEvent};

/// A directional action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
}

impl Action {
    /// Map a DOM key code to an action. Space doubles as up/jump.
    pub fn from_key(key_code: u32) -> Option<Self> {
        match key_code {
            keys::ARROW_LEFT => Some(Self::Left),
            keys::ARROW_RIGHT => Some(Self::Right),
            keys::ARROW_UP | keys::SPACE => Some(Self::Up),
            keys::ARROW_DOWN => Some(Self::Down),
            _ => None,
        }
    }
}

/// Current press state, written by input handlers and read by the step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, action: Action, pressed: bool) {
        match action {
            Action::Left => self.left = pressed,
            Action::Right => self.right = pressed,
            Action::Up => self.up = pressed,
            Action::Down => self.down = pressed,
        }
    }

    /// Release everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Apply a device event. `viewport` is the canvas size used for touch
    /// zones. Returns true when the event presses up, which callers use as the
    /// jump trigger.
    ///
    /// Touch layout: left/right halves steer (exclusively), the top half is
    /// up, the bottom fifth is down, and the band in between is a vertical
    /// dead zone. Lifting any pointer releases every action.
    pub fn apply(&mut self, event: &InputEvent, viewport: Vec2) -> bool {
        match *event {
            InputEvent::KeyDown { key_code } => match Action::from_key(key_code) {
                Some(action) => {
                    self.set(action, true);
                    action == Action::Up
                }
                None => false,
            },
            InputEvent::KeyUp { key_code } => {
                if let Some(action) = Action::from_key(key_code) {
                    self.set(action, false);
                }
                false
            }
            InputEvent::PointerDown { x, y } => {
                let left_half = x < viewport.x / 2.0;
                self.left = left_half;
                self.right = !left_half;
                self.up = y < viewport.y / 2.0;
                self.down = !self.up && y > viewport.y * 0.8;
                self.up
            }
            InputEvent::PointerUp { .. } => {
                self.clear();
                false
            }
        }
    }
}
