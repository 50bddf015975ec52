//! Bunny Dash native entry point
//!
//! The game itself runs in the browser (see the library's wasm entry). The
//! native binary plays a headless run with the same frame steps and reports
//! the outcome, which is handy for tuning a config without a browser.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use bunny_dash::assets::{PLAYER_SPRITE, SpriteImage};
    use bunny_dash::game::{Game, Presenter};
    use bunny_dash::hud::HudChanges;
    use bunny_dash::input::ACTION_KEY;
    use bunny_dash::renderer::Vertex;
    use bunny_dash::sim::{GameState, Viewport};
    use bunny_dash::{GameConfig, Ticker};

    const FRAMES: u64 = 60 * 60;
    const VIEWPORT: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    /// Logs frames and HUD changes instead of drawing
    struct LogPresenter;

    impl Presenter for LogPresenter {
        fn draw(&mut self, vertices: &[Vertex]) -> bunny_dash::Result<()> {
            log::trace!("frame: {} triangles", vertices.len() / 3);
            Ok(())
        }

        fn show_hud(&mut self, changes: &HudChanges) -> bunny_dash::Result<()> {
            if let Some(true) = changes.game_over_visible {
                log::info!("HUD: game over shown");
            }
            Ok(())
        }
    }

    pub fn run() -> anyhow::Result<()> {
        let config = match std::env::args().nth(1) {
            Some(path) => GameConfig::from_json(&std::fs::read_to_string(path)?)?,
            None => GameConfig::default(),
        };
        let seed = std::env::var("BUNNY_DASH_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(42);

        let sprite = SpriteImage::decode(
            PLAYER_SPRITE,
            include_bytes!("../media/assets/bunny.png"),
        )?;
        let state = GameState::new(seed, config, VIEWPORT, sprite.size());
        let mut game = Game::new(state, sprite, Box::new(LogPresenter));
        let mut ticker = Ticker::new();
        Game::install(&mut ticker);
        ticker.start();

        let mut best = 0;
        let mut runs = 1;
        for _ in 0..FRAMES {
            // Jump whenever an obstacle is close ahead
            let threat = game.state.obstacles.iter().any(|o| {
                let gap = o.pos.x - game.state.player.pos.x;
                (0.0..60.0).contains(&gap)
            });
            if threat || game.state.is_game_over {
                if game.state.is_game_over {
                    best = best.max(game.state.score);
                    runs += 1;
                }
                game.key_down(ACTION_KEY);
                game.key_up(ACTION_KEY);
            }
            ticker.tick(&mut game, || {});
        }
        best = best.max(game.state.score);

        log::info!(
            "Played {} frames over {} runs, best score {}, {} step errors",
            ticker.frame_count(),
            runs,
            best,
            ticker.error_count()
        );
        println!("best score: {}", best);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Bunny Dash (native) starting...");
    log::info!("The browser build is served by bunny-dash-server; running a headless game");
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the library's wasm_main, this is just to satisfy the compiler
}
