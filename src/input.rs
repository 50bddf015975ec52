//! Keyboard handling
//!
//! A single action key jumps while playing and restarts after a game over.
//! Every other key is only recorded in the pressed-key map.

use std::collections::HashMap;

use crate::sim::{GameState, Phase};

/// Platform key code of the jump/confirm key
pub const ACTION_KEY: &str = "Space";

/// Effect of a key press on the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Jump,
    Restart,
}

/// Result of handling one key-down event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyResponse {
    pub action: Option<InputAction>,
    /// The key belongs to the game; the page should not scroll or type
    pub consumed: bool,
}

/// Tracks raw key state and maps the action key onto state transitions
#[derive(Debug, Default)]
pub struct InputHandler {
    pressed: HashMap<String, bool>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key-down between frames
    pub fn key_down(&mut self, code: &str, state: &mut GameState) -> KeyResponse {
        self.pressed.insert(code.to_string(), true);

        if code != ACTION_KEY {
            return KeyResponse::default();
        }

        let action = match state.phase() {
            Phase::GameOver => {
                state.restart();
                Some(InputAction::Restart)
            }
            Phase::Playing => state.jump().then_some(InputAction::Jump),
        };

        KeyResponse {
            action,
            consumed: true,
        }
    }

    pub fn key_up(&mut self, code: &str) {
        self.pressed.insert(code.to_string(), false);
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.get(code).copied().unwrap_or(false)
    }
}
