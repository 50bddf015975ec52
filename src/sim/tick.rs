//! Per-frame gameplay steps
//!
//! Each step is a plain function over [`GameState`]. The frame ticker runs
//! them in a fixed order: player, obstacles, decoration, progression.

use rand::Rng;

use super::decor::decor_step;
use super::state::GameState;
use crate::consts::*;

/// What the obstacle step did this frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObstacleReport {
    pub spawned: bool,
    /// Obstacles scrolled off the left edge and removed
    pub cleared: u32,
    /// Id of the obstacle the player hit, if any
    pub hit: Option<u32>,
}

/// Gravity, landing and the running sway
pub fn player_step(state: &mut GameState) {
    if !state.is_playing {
        return;
    }

    if state.is_jumping {
        state.player_velocity_y += state.config.gravity;
        state.player.pos.y += state.player_velocity_y;

        if state.player.pos.y >= state.ground_y {
            state.player.pos.y = state.ground_y;
            state.is_jumping = false;
            state.player_velocity_y = 0.0;
        }
    }

    state.player.rotation = (state.time * PLAYER_SWAY_FREQ).sin() * PLAYER_SWAY_AMPLITUDE;
}

/// Spawn, scroll, collide and cull obstacles.
///
/// Obstacles are walked newest-first so removal keeps the remaining indices
/// valid. The first collision ends the run and stops processing for the frame.
pub fn obstacle_step(state: &mut GameState) -> ObstacleReport {
    let mut report = ObstacleReport::default();
    if !state.is_playing {
        return report;
    }

    if state.rng.random::<f32>() < state.config.spawn_rate {
        state.spawn_obstacle();
        report.spawned = true;
    }

    let player_box = state.player.hitbox();
    for i in (0..state.obstacles.len()).rev() {
        let obstacle = &mut state.obstacles[i];
        obstacle.pos.x -= state.game_speed;

        if player_box.overlaps(&obstacle.bounds()) {
            report.hit = Some(obstacle.id);
            state.game_over();
            return report;
        }

        if obstacle.pos.x < OBSTACLE_CULL_X {
            state.obstacles.remove(i);
            state.score += state.config.obstacle_reward;
            report.cleared += 1;
        }
    }

    report
}

/// Survival score and speed ramp
pub fn progression_step(state: &mut GameState) {
    if !state.is_playing {
        return;
    }

    state.score += 1;
    state.frame += 1;
    state.game_speed = state.config.speed_for_score(state.score);
}

/// Run every gameplay step for one frame, in frame order
pub fn tick(state: &mut GameState) -> ObstacleReport {
    player_step(state);
    let report = obstacle_step(state);
    decor_step(state);
    progression_step(state);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Phase;
    use glam::Vec2;

    fn quiet_state() -> GameState {
        let mut state = crate::sim::test_state(12345);
        state.config.spawn_rate = 0.0;
        state
    }

    #[test]
    fn test_jump_arc_lands_exactly_on_ground() {
        let mut state = quiet_state();
        assert!(state.jump());

        let mut last_vel = state.player_velocity_y;
        let mut frames = 0;
        while state.is_jumping {
            player_step(&mut state);
            if state.is_jumping {
                assert!(state.player_velocity_y >= last_vel);
                assert!(state.player.pos.y < state.ground_y);
                last_vel = state.player_velocity_y;
            }
            frames += 1;
            assert!(frames < 100, "jump never landed");
        }

        assert_eq!(state.player.pos.y, state.ground_y);
        assert_eq!(state.player_velocity_y, 0.0);
        // Displacement -15n + 0.4n(n+1) turns non-negative at n = 37
        assert_eq!(frames, 37);
    }

    #[test]
    fn test_player_sway() {
        let mut state = quiet_state();
        state.time = 2.0;
        player_step(&mut state);
        assert!((state.player.rotation - (0.6f32).sin() * 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_steps_idle_when_game_over() {
        let mut state = quiet_state();
        state.config.spawn_rate = 1.0;
        state.spawn_obstacle();
        state.game_over();
        let x = state.obstacles[0].pos.x;

        player_step(&mut state);
        let report = obstacle_step(&mut state);
        progression_step(&mut state);

        assert_eq!(report, ObstacleReport::default());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, x);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_obstacles_scroll_by_speed() {
        let mut state = quiet_state();
        state.spawn_obstacle();
        state.spawn_obstacle();
        state.obstacles[1].pos.x = 500.0;
        state.game_speed = 4.5;

        let report = obstacle_step(&mut state);
        assert_eq!(report.cleared, 0);
        assert_eq!(state.obstacles[0].pos.x, 845.5);
        assert_eq!(state.obstacles[1].pos.x, 495.5);
    }

    #[test]
    fn test_offscreen_obstacles_are_culled_and_rewarded() {
        let mut state = quiet_state();
        for x in [-48.0, 400.0, -49.0] {
            state.spawn_obstacle();
            state.obstacles.last_mut().unwrap().pos.x = x;
        }
        let keep_id = state.obstacles[1].id;

        let report = obstacle_step(&mut state);
        assert_eq!(report.cleared, 2);
        assert_eq!(state.score, 20);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, keep_id);
    }

    #[test]
    fn test_collision_ends_run_and_stops_processing() {
        let mut state = quiet_state();
        // Oldest obstacle is about to be culled, newest sits on the player
        state.spawn_obstacle();
        state.obstacles[0].pos.x = -49.0;
        let hit_id = state.spawn_obstacle();
        state.obstacles[1].pos = Vec2::new(state.player.pos.x, state.ground_y - 40.0);

        let report = obstacle_step(&mut state);
        assert_eq!(report.hit, Some(hit_id));
        assert_eq!(state.phase(), Phase::GameOver);
        assert!(!state.is_playing);
        // The older obstacle was never reached this frame
        assert_eq!(state.obstacles.len(), 2);
        assert_eq!(state.obstacles[0].pos.x, -49.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_jumping_clears_obstacle() {
        let mut state = quiet_state();
        state.spawn_obstacle();
        state.obstacles[0].pos.x = state.player.pos.x;
        state.player.pos.y = state.ground_y - 200.0;
        state.is_jumping = true;

        let report = obstacle_step(&mut state);
        assert_eq!(report.hit, None);
        assert!(state.is_playing);
    }

    #[test]
    fn test_spawn_roll() {
        let mut state = crate::sim::test_state(1);
        state.config.spawn_rate = 1.0;
        let report = obstacle_step(&mut state);
        assert!(report.spawned);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].pos.x, 850.0 - 3.0);
    }

    #[test]
    fn test_progression() {
        let mut state = quiet_state();
        for _ in 0..5 {
            progression_step(&mut state);
        }
        assert_eq!(state.score, 5);
        assert!((state.game_speed - (3.0 + 5.0 * 0.0001)).abs() < 1e-6);
    }

    #[test]
    fn test_determinism() {
        let mut a = crate::sim::test_state(99999);
        let mut b = crate::sim::test_state(99999);
        a.config.spawn_rate = 0.05;
        b.config.spawn_rate = 0.05;

        for _ in 0..600 {
            tick(&mut a);
            tick(&mut b);
        }

        assert_eq!(a.score, b.score);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.is_game_over, b.is_game_over);
        assert_eq!(a.background_shapes[3].position, b.background_shapes[3].position);
    }
}
