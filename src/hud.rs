//! HUD text and visibility derived from game state

use crate::sim::GameState;

pub const INSTRUCTIONS: &str = "Press SPACE to jump";
pub const GAME_OVER: &str = "GAME OVER\nPress SPACE to restart";

/// What the HUD should show this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    pub score_text: String,
    pub instructions_visible: bool,
    pub game_over_visible: bool,
}

impl HudView {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score_text: format!("Score: {}", state.score),
            instructions_visible: !state.is_game_over,
            game_over_visible: state.is_game_over,
        }
    }
}

/// Keeps the last applied view so unchanged frames skip DOM writes
#[derive(Debug, Default)]
pub struct Hud {
    last: Option<HudView>,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields that differ from the last committed view, or None if nothing does
    pub fn diff(&self, view: &HudView) -> Option<HudChanges> {
        let changes = match &self.last {
            None => HudChanges {
                score_text: Some(view.score_text.clone()),
                instructions_visible: Some(view.instructions_visible),
                game_over_visible: Some(view.game_over_visible),
            },
            Some(last) => HudChanges {
                score_text: (last.score_text != view.score_text).then(|| view.score_text.clone()),
                instructions_visible: (last.instructions_visible != view.instructions_visible)
                    .then_some(view.instructions_visible),
                game_over_visible: (last.game_over_visible != view.game_over_visible)
                    .then_some(view.game_over_visible),
            },
        };

        (!changes.is_empty()).then_some(changes)
    }

    /// Record a view as shown. Call only once the changes were applied.
    pub fn commit(&mut self, view: HudView) {
        self.last = Some(view);
    }
}

/// Per-field HUD updates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HudChanges {
    pub score_text: Option<String>,
    pub instructions_visible: Option<bool>,
    pub game_over_visible: Option<bool>,
}

impl HudChanges {
    pub fn is_empty(&self) -> bool {
        self.score_text.is_none()
            && self.instructions_visible.is_none()
            && self.game_over_visible.is_none()
    }
}
