//! Gameplay simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform dependencies:
//! - Fixed per-frame increments only
//! - Seeded RNG only
//! - Steps mutate one explicitly passed `GameState`

pub mod collision;
pub mod decor;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use decor::{DecorShape, Geometry, Material, decor_step};
pub use state::{GameState, Obstacle, Phase, Player, Viewport};
pub use tick::{ObstacleReport, obstacle_step, player_step, progression_step, tick};

/// Default sprite size used by tests (the bunny texture is 26x37)
#[cfg(test)]
pub(crate) fn test_state(seed: u64) -> GameState {
    GameState::new(
        seed,
        crate::GameConfig::default(),
        Viewport::new(800.0, 600.0),
        glam::Vec2::new(26.0, 37.0),
    )
}
