//! Gameplay tuning and server settings
//!
//! Gameplay values default to the constants in [`crate::consts`]; a JSON
//! document can override any subset of them.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable gameplay values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub gravity: f32,
    pub jump_power: f32,
    pub initial_speed: f32,
    pub speed_per_point: f32,
    /// Probability of spawning an obstacle on any given frame
    pub spawn_rate: f32,
    pub obstacle_reward: u64,
    /// Per-frame time increment used for animation
    pub frame_dt: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_power: JUMP_POWER,
            initial_speed: GAME_SPEED_INITIAL,
            speed_per_point: SPEED_PER_POINT,
            spawn_rate: OBSTACLE_SPAWN_RATE,
            obstacle_reward: OBSTACLE_REWARD,
            frame_dt: FRAME_DT,
        }
    }
}

impl GameConfig {
    /// Parse overrides from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Speed for a given score
    pub fn speed_for_score(&self, score: u64) -> f32 {
        self.initial_speed + score as f32 * self.speed_per_point
    }
}

/// Static file server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Base directory holding `web/`, `pkg/` and `media/`
    pub root: std::path::PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            root: std::path::PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    pub const PORT_VAR: &'static str = "BUNNY_DASH_PORT";
    pub const ROOT_VAR: &'static str = "BUNNY_DASH_ROOT";

    /// Read settings from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(Self::PORT_VAR).ok().as_deref(),
            std::env::var(Self::ROOT_VAR).ok().as_deref(),
        )
    }

    fn from_vars(port: Option<&str>, root: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            port: port.and_then(|p| p.parse().ok()).unwrap_or(defaults.port),
            root: root.map(Into::into).unwrap_or(defaults.root),
        }
    }

    pub fn index_file(&self) -> std::path::PathBuf {
        self.root.join("web").join("index.html")
    }

    pub fn modules_dir(&self) -> std::path::PathBuf {
        self.root.join("pkg")
    }

    pub fn system_dir(&self) -> std::path::PathBuf {
        self.root.join("web").join("system")
    }

    pub fn disk_dir(&self) -> std::path::PathBuf {
        self.root.join("media")
    }
}
