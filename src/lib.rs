//! Bunny Dash - an endless runner over a drifting 3D background
//!
//! Core modules:
//! - `sim`: Per-frame gameplay steps (physics, obstacles, decoration, scoring)
//! - `ticker`: Ordered per-frame step scheduler
//! - `game`: Frame context wiring the steps to rendering and HUD
//! - `renderer`: WebGPU rendering of the 3D background and 2D gameplay layers
//! - `input`: Keyboard mapping to game state transitions
//! - `hud`: On-screen text derived from game state
//! - `assets`: Sprite loading
//! - `config`: Tunable gameplay and server settings
//! - `web`: Browser entry point (wasm only)

pub mod assets;
pub mod config;
pub mod error;
pub mod game;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod ticker;
#[cfg(target_arch = "wasm32")]
mod web;

pub use config::{GameConfig, ServerConfig};
pub use error::{GameError, Result};
pub use ticker::{StepId, Ticker};

/// Game configuration constants
pub mod consts {
    /// Fixed time advanced per frame (assumes a ~60 Hz display, not wall-clock derived)
    pub const FRAME_DT: f32 = 0.016;

    /// Player physics (pixels per frame)
    pub const GRAVITY: f32 = 0.8;
    pub const JUMP_POWER: f32 = -15.0;

    /// Horizontal scroll speed at the start of a run (pixels per frame)
    pub const GAME_SPEED_INITIAL: f32 = 3.0;
    /// Speed gained per point of score
    pub const SPEED_PER_POINT: f32 = 0.0001;

    /// Ground sits this far above the bottom of the screen
    pub const GROUND_OFFSET: f32 = 120.0;

    /// Player sprite placement
    pub const PLAYER_X: f32 = 120.0;
    pub const PLAYER_SCALE: f32 = 0.8;
    /// Running sway: rotation = sin(time * freq) * amplitude
    pub const PLAYER_SWAY_FREQ: f32 = 0.3;
    pub const PLAYER_SWAY_AMPLITUDE: f32 = 0.1;
    /// Collision box is this fraction of the sprite size, centered
    pub const PLAYER_HITBOX_FRACTION: f32 = 1.0 / 1.5;

    /// Obstacles
    pub const OBSTACLE_SPAWN_RATE: f32 = 0.01;
    pub const OBSTACLE_WIDTH: f32 = 25.0;
    pub const OBSTACLE_HEIGHT: f32 = 80.0;
    /// Spawn this far past the right edge
    pub const OBSTACLE_SPAWN_MARGIN: f32 = 50.0;
    /// Top of an obstacle sits this far above ground level
    pub const OBSTACLE_GROUND_OFFSET: f32 = 40.0;
    /// Obstacles left of this x are culled
    pub const OBSTACLE_CULL_X: f32 = -50.0;
    pub const OBSTACLE_REWARD: u64 = 10;

    /// Background decoration pool
    pub const DECOR_POOL_SIZE: usize = 15;
    pub const DECOR_DRIFT_Z: f32 = 0.005;
    pub const DECOR_WRAP_Z: f32 = 5.0;
    pub const DECOR_RESET_Z: f32 = -15.0;
    /// Half-extents of the respawn area (x in [-10, 10], y in [-5, 5])
    pub const DECOR_SPREAD_X: f32 = 10.0;
    pub const DECOR_SPREAD_Y: f32 = 5.0;
    pub const DECOR_FLOAT_AMPLITUDE: f32 = 0.01;
}
