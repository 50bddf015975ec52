//! Frame context
//!
//! `Game` owns everything a frame touches: the simulation state, the camera,
//! the background meshes, the player sprite, the HUD cache and the presenter
//! that puts pixels and text on screen. The seven frame steps are plain
//! functions over `&mut Game` registered with a [`Ticker`] in a fixed order.

use crate::assets::SpriteImage;
use crate::error::Result;
use crate::hud::{Hud, HudChanges, HudView};
use crate::input::{InputHandler, KeyResponse};
use crate::renderer::{BackgroundLayer, Camera, Vertex, build_frame};
use crate::sim::{self, GameState, ObstacleReport, Viewport};
use crate::ticker::Ticker;

/// Output side of a frame: GPU drawing plus HUD text
pub trait Presenter {
    /// Draw one frame's triangle list
    fn draw(&mut self, vertices: &[Vertex]) -> Result<()>;

    /// Apply changed HUD fields
    fn show_hud(&mut self, changes: &HudChanges) -> Result<()>;

    /// Surface size changed (pixels)
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Step names, in registration order
pub const STEP_ORDER: [&str; 7] = [
    "player physics",
    "obstacles",
    "background",
    "progression",
    "camera drift",
    "render",
    "ui sync",
];

pub struct Game {
    pub state: GameState,
    pub camera: Camera,
    pub input: InputHandler,
    pub background: BackgroundLayer,
    pub sprite: SpriteImage,
    pub hud: Hud,
    /// Outcome of the most recent obstacle step
    pub last_report: ObstacleReport,
    presenter: Box<dyn Presenter>,
}

impl Game {
    pub fn new(state: GameState, sprite: SpriteImage, presenter: Box<dyn Presenter>) -> Self {
        let camera = Camera::new(state.viewport.aspect());
        let background = BackgroundLayer::new(&state.background_shapes);

        log::info!(
            "Game created: seed {}, viewport {}x{}, ground at {}",
            state.seed,
            state.viewport.width,
            state.viewport.height,
            state.ground_y
        );

        Self {
            state,
            camera,
            input: InputHandler::new(),
            background,
            sprite,
            hud: Hud::new(),
            last_report: ObstacleReport::default(),
            presenter,
        }
    }

    /// Register the frame steps in their fixed order
    pub fn install(ticker: &mut Ticker<Game>) {
        let steps: [fn(&mut Game) -> Result<()>; 7] = [
            Self::player_physics,
            Self::obstacles,
            Self::background,
            Self::progression,
            Self::camera_drift,
            Self::render,
            Self::ui_sync,
        ];
        for (name, step) in STEP_ORDER.into_iter().zip(steps) {
            ticker.add(name, step);
        }
    }

    fn player_physics(game: &mut Game) -> Result<()> {
        sim::player_step(&mut game.state);
        Ok(())
    }

    fn obstacles(game: &mut Game) -> Result<()> {
        game.last_report = sim::obstacle_step(&mut game.state);
        Ok(())
    }

    fn background(game: &mut Game) -> Result<()> {
        sim::decor_step(&mut game.state);
        Ok(())
    }

    fn progression(game: &mut Game) -> Result<()> {
        sim::progression_step(&mut game.state);
        Ok(())
    }

    fn camera_drift(game: &mut Game) -> Result<()> {
        game.camera.drift(game.state.time);
        Ok(())
    }

    fn render(game: &mut Game) -> Result<()> {
        let frame = build_frame(&game.state, &game.camera, &mut game.background, &game.sprite);
        game.presenter.draw(&frame)
    }

    /// A failed write is not committed, so the next frame retries it
    fn ui_sync(game: &mut Game) -> Result<()> {
        let view = HudView::from_state(&game.state);
        if let Some(changes) = game.hud.diff(&view) {
            game.presenter.show_hud(&changes)?;
            game.hud.commit(view);
        }
        Ok(())
    }

    /// Key pressed between frames
    pub fn key_down(&mut self, code: &str) -> KeyResponse {
        let response = self.input.key_down(code, &mut self.state);
        if let Some(action) = response.action {
            log::debug!("Key {} -> {:?}", code, action);
        }
        response
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    /// Window resized. Ground height stays where it was placed at startup.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let viewport = Viewport::new(width as f32, height as f32);
        self.state.resize(viewport);
        self.camera.set_aspect(viewport.aspect());
        self.presenter.resize(width, height);
        log::debug!("Resized to {}x{}", width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recording {
        frames: Vec<usize>,
        hud: Vec<HudChanges>,
        sizes: Vec<(u32, u32)>,
    }

    struct RecordingPresenter(Rc<RefCell<Recording>>);

    impl Presenter for RecordingPresenter {
        fn draw(&mut self, vertices: &[Vertex]) -> Result<()> {
            self.0.borrow_mut().frames.push(vertices.len());
            Ok(())
        }

        fn show_hud(&mut self, changes: &HudChanges) -> Result<()> {
            self.0.borrow_mut().hud.push(changes.clone());
            Ok(())
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.0.borrow_mut().sizes.push((width, height));
        }
    }

    struct BrokenPresenter;

    impl Presenter for BrokenPresenter {
        fn draw(&mut self, _vertices: &[Vertex]) -> Result<()> {
            Err(GameError::Render("surface lost".into()))
        }

        fn show_hud(&mut self, _changes: &HudChanges) -> Result<()> {
            Ok(())
        }
    }

    fn sprite() -> SpriteImage {
        SpriteImage {
            width: 2,
            height: 2,
            pixels: vec![[255; 4]; 4],
        }
    }

    fn recorded_game() -> (Game, Rc<RefCell<Recording>>) {
        let log = Rc::new(RefCell::new(Recording::default()));
        let game = Game::new(
            crate::sim::test_state(11),
            sprite(),
            Box::new(RecordingPresenter(log.clone())),
        );
        (game, log)
    }

    #[test]
    fn test_install_registers_steps_in_order() {
        let mut ticker = Ticker::new();
        Game::install(&mut ticker);
        assert_eq!(ticker.step_names(), STEP_ORDER.to_vec());
    }

    #[test]
    fn test_frames_render_and_sync_hud() {
        let (mut game, log) = recorded_game();
        let mut ticker = Ticker::new();
        Game::install(&mut ticker);
        ticker.start();

        for _ in 0..3 {
            ticker.tick(&mut game, || {});
        }

        let log = log.borrow();
        assert_eq!(log.frames.len(), 3);
        assert!(log.frames.iter().all(|&n| n > 0));
        // Score changes every frame while playing
        assert_eq!(log.hud.len(), 3);
        assert_eq!(log.hud[2].score_text.as_deref(), Some("Score: 3"));
        assert_eq!(log.hud[0].instructions_visible, Some(true));
        assert_eq!(log.hud[1].instructions_visible, None);
    }

    #[test]
    fn test_camera_follows_time() {
        let (mut game, _log) = recorded_game();
        let mut ticker = Ticker::new();
        Game::install(&mut ticker);
        ticker.start();
        ticker.tick(&mut game, || {});

        let mut expected = Camera::new(game.state.viewport.aspect());
        expected.drift(game.state.time);
        assert_eq!(game.camera.position, expected.position);
    }

    #[test]
    fn test_render_failure_does_not_stop_frame() {
        let mut game = Game::new(crate::sim::test_state(11), sprite(), Box::new(BrokenPresenter));
        let mut ticker = Ticker::new();
        Game::install(&mut ticker);
        ticker.start();

        ticker.tick(&mut game, || {});
        ticker.tick(&mut game, || {});

        assert_eq!(ticker.error_count(), 2);
        // ui sync after the failing render still ran
        assert!(game.hud.diff(&HudView::from_state(&game.state)).is_none());
        assert_eq!(game.state.score, 2);
    }

    /// Fails the first HUD write after game over, then records the rest
    struct FlakyHudPresenter {
        log: Rc<RefCell<Recording>>,
        fail_next_game_over: bool,
    }

    impl Presenter for FlakyHudPresenter {
        fn draw(&mut self, _vertices: &[Vertex]) -> Result<()> {
            Ok(())
        }

        fn show_hud(&mut self, changes: &HudChanges) -> Result<()> {
            if self.fail_next_game_over && changes.game_over_visible == Some(true) {
                self.fail_next_game_over = false;
                return Err(GameError::Platform("element detached".into()));
            }
            self.log.borrow_mut().hud.push(changes.clone());
            Ok(())
        }
    }

    #[test]
    fn test_failed_hud_write_is_retried() {
        let log = Rc::new(RefCell::new(Recording::default()));
        let presenter = FlakyHudPresenter {
            log: log.clone(),
            fail_next_game_over: true,
        };
        let mut game = Game::new(crate::sim::test_state(11), sprite(), Box::new(presenter));
        let mut ticker = Ticker::new();
        Game::install(&mut ticker);
        ticker.start();

        ticker.tick(&mut game, || {});
        game.state.game_over();
        for _ in 0..10 {
            ticker.tick(&mut game, || {});
        }

        assert_eq!(ticker.error_count(), 1);
        let log = log.borrow();
        let shown = log
            .hud
            .iter()
            .rev()
            .find_map(|c| c.game_over_visible);
        assert_eq!(shown, Some(true));
        let hidden = log
            .hud
            .iter()
            .rev()
            .find_map(|c| c.instructions_visible);
        assert_eq!(hidden, Some(false));
    }

    #[test]
    fn test_key_handling() {
        let (mut game, _log) = recorded_game();
        let response = game.key_down(crate::input::ACTION_KEY);
        assert!(response.consumed);
        assert!(game.state.is_jumping);
        assert!(game.input.is_pressed(crate::input::ACTION_KEY));

        game.key_up(crate::input::ACTION_KEY);
        assert!(!game.input.is_pressed(crate::input::ACTION_KEY));

        assert!(!game.key_down("KeyA").consumed);
    }

    #[test]
    fn test_resize_keeps_ground() {
        let (mut game, log) = recorded_game();
        let ground = game.state.ground_y;

        game.resize(1024, 512);
        assert_eq!(game.state.viewport, Viewport::new(1024.0, 512.0));
        assert_eq!(game.state.ground_y, ground);
        assert_eq!(game.camera.aspect, 2.0);

        game.resize(0, 100);
        assert_eq!(log.borrow().sizes, vec![(1024, 512)]);
    }
}
