//! Game state and core simulation types
//!
//! One `GameState` lives for the whole page session. Every frame step and
//! input handler mutates it in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::decor::{self, DecorShape};
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of gameplay, derived from the play/over flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Active run
    Playing,
    /// Run ended, waiting for restart
    GameOver,
}

/// Screen size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// The player sprite. Position is the sprite center.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub rotation: f32,
    pub scale: f32,
    /// Displayed size (texture size * scale)
    pub size: Vec2,
}

impl Player {
    pub fn new(ground_y: f32, texture_size: Vec2) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, ground_y),
            rotation: 0.0,
            scale: PLAYER_SCALE,
            size: texture_size * PLAYER_SCALE,
        }
    }

    /// Collision box: a centered fraction of the sprite
    pub fn hitbox(&self) -> Rect {
        let size = self.size * PLAYER_HITBOX_FRACTION;
        Rect::new(self.pos.x - size.x / 2.0, self.pos.y - size.y / 2.0, size.x, size.y)
    }
}

/// A moving hazard. Position is the top-left corner.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    /// Spawn rolls and decoration placement
    pub rng: Pcg32,
    pub is_playing: bool,
    pub is_game_over: bool,
    pub score: u64,
    pub game_speed: f32,
    /// Elapsed animation time (advanced by a fixed increment per frame)
    pub time: f32,
    pub player_velocity_y: f32,
    pub is_jumping: bool,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Fixed pool of background shapes
    pub background_shapes: Vec<DecorShape>,
    pub viewport: Viewport,
    /// Fixed at creation; resizing does not move the ground
    pub ground_y: f32,
    /// Frames played in the current run
    pub frame: u64,
    next_id: u32,
}

impl GameState {
    /// Create a new run. `texture_size` is the player sprite's pixel size.
    pub fn new(seed: u64, config: GameConfig, viewport: Viewport, texture_size: Vec2) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ground_y = viewport.height - GROUND_OFFSET;
        let background_shapes = decor::spawn_pool(&mut rng, DECOR_POOL_SIZE);

        Self {
            seed,
            game_speed: config.initial_speed,
            config,
            rng,
            is_playing: true,
            is_game_over: false,
            score: 0,
            time: 0.0,
            player_velocity_y: 0.0,
            is_jumping: false,
            player: Player::new(ground_y, texture_size),
            obstacles: Vec::new(),
            background_shapes,
            viewport,
            ground_y,
            frame: 0,
            next_id: 1,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_game_over {
            Phase::GameOver
        } else {
            Phase::Playing
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Start a jump if playing and grounded. Returns true if a jump began.
    pub fn jump(&mut self) -> bool {
        if !self.is_playing || self.is_jumping {
            return false;
        }
        self.player_velocity_y = self.config.jump_power;
        self.is_jumping = true;
        true
    }

    /// End the run
    pub fn game_over(&mut self) {
        self.is_game_over = true;
        self.is_playing = false;
        log::info!("Game over at score {}", self.score);
    }

    /// Reset the run, keeping the decoration pool and animation time
    pub fn restart(&mut self) {
        self.is_playing = true;
        self.is_game_over = false;
        self.score = 0;
        self.frame = 0;
        self.game_speed = self.config.initial_speed;
        self.player_velocity_y = 0.0;
        self.is_jumping = false;
        self.player.pos.y = self.ground_y;
        self.obstacles.clear();
        log::info!("Game restarted");
    }

    /// Add an obstacle just past the right edge, resting on the ground
    pub fn spawn_obstacle(&mut self) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(
                self.viewport.width + OBSTACLE_SPAWN_MARGIN,
                self.ground_y - OBSTACLE_GROUND_OFFSET,
            ),
        });
        id
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_state() -> GameState {
        crate::sim::test_state(7)
    }

    #[test]
    fn test_initial_state() {
        let state = new_state();
        assert_eq!(state.phase(), Phase::Playing);
        assert!(state.is_playing && !state.is_game_over);
        assert_eq!(state.ground_y, 480.0);
        assert_eq!(state.player.pos, Vec2::new(120.0, 480.0));
        assert_eq!(state.game_speed, 3.0);
        assert_eq!(state.background_shapes.len(), DECOR_POOL_SIZE);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut state = new_state();
        assert!(state.jump());
        assert_eq!(state.player_velocity_y, -15.0);
        assert!(!state.jump());

        let mut state = new_state();
        state.game_over();
        assert!(!state.jump());
        assert!(!state.is_jumping);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = new_state();
        state.spawn_obstacle();
        state.spawn_obstacle();
        state.score = 420;
        state.game_speed = 3.042;
        state.jump();
        state.player.pos.y = 300.0;
        state.game_over();
        assert_eq!(state.phase(), Phase::GameOver);

        state.restart();
        assert!(state.is_playing);
        assert!(!state.is_game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.game_speed, 3.0);
        assert_eq!(state.player_velocity_y, 0.0);
        assert!(!state.is_jumping);
        assert_eq!(state.player.pos.y, state.ground_y);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.background_shapes.len(), DECOR_POOL_SIZE);
    }

    #[test]
    fn test_spawn_position() {
        let mut state = new_state();
        state.spawn_obstacle();
        assert_eq!(state.obstacles[0].pos, Vec2::new(850.0, 440.0));

        // Ground stays put on resize, spawn x follows the new width
        state.resize(Viewport::new(1000.0, 900.0));
        state.spawn_obstacle();
        assert_eq!(state.obstacles[1].pos, Vec2::new(1050.0, 440.0));
        assert_ne!(state.obstacles[0].id, state.obstacles[1].id);
    }

    #[test]
    fn test_player_hitbox_is_centered_inset() {
        let state = new_state();
        let hitbox = state.player.hitbox();
        let size = Vec2::new(26.0, 37.0) * PLAYER_SCALE / 1.5;
        assert!((hitbox.width - size.x).abs() < 1e-4);
        assert!((hitbox.height - size.y).abs() < 1e-4);
        assert!((hitbox.x + hitbox.width / 2.0 - 120.0).abs() < 1e-4);
        assert!((hitbox.y + hitbox.height / 2.0 - 480.0).abs() < 1e-4);
    }
}
