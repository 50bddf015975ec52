//! Browser entry point
//!
//! Loads the sprite, sets up WebGPU on `#canvas`, wires keyboard and resize
//! events and drives the frame ticker from `requestAnimationFrame`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent};

use crate::assets::{PLAYER_SPRITE, load_sprite};
use crate::error::{GameError, Result};
use crate::game::{Game, Presenter};
use crate::hud::HudChanges;
use crate::renderer::{RenderState, Vertex};
use crate::sim::{GameState, Viewport};
use crate::{GameConfig, Ticker};

/// Draws into the canvas and writes HUD text into the page
struct WebPresenter {
    render_state: RenderState,
    score: Option<Element>,
    instructions: Option<Element>,
    game_over: Option<Element>,
}

impl WebPresenter {
    fn new(render_state: RenderState, document: &Document) -> Self {
        Self {
            render_state,
            score: document.get_element_by_id("score"),
            instructions: document.get_element_by_id("instructions"),
            game_over: document.get_element_by_id("game-over"),
        }
    }
}

fn set_visible(el: &Option<Element>, visible: bool) -> Result<()> {
    if let Some(el) = el {
        el.set_attribute("class", if visible { "" } else { "hidden" })
            .map_err(|e| GameError::Platform(format!("{:?}", e)))?;
    }
    Ok(())
}

impl Presenter for WebPresenter {
    fn draw(&mut self, vertices: &[Vertex]) -> Result<()> {
        match self.render_state.render(vertices) {
            Ok(()) => Ok(()),
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.render_state.reconfigure();
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn show_hud(&mut self, changes: &HudChanges) -> Result<()> {
        if let (Some(text), Some(el)) = (&changes.score_text, &self.score) {
            el.set_text_content(Some(text.as_str()));
        }
        if let Some(visible) = changes.instructions_visible {
            set_visible(&self.instructions, visible)?;
        }
        if let Some(visible) = changes.game_over_visible {
            set_visible(&self.game_over, visible)?;
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.render_state.resize(width, height);
    }
}

/// Frame context plus the ticker driving it
struct App {
    game: Game,
    ticker: Ticker<Game>,
}

/// Canvas size in CSS pixels, following the window
fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0) as u32;
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(600.0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (width, height)
}

async fn start() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| GameError::Platform("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| GameError::Platform("no document".into()))?;

    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or_else(|| GameError::Platform("no #canvas element".into()))?
        .dyn_into()
        .map_err(|_| GameError::Platform("#canvas is not a canvas".into()))?;

    let config = match canvas.get_attribute("data-config") {
        Some(json) => GameConfig::from_json(&json)?,
        None => GameConfig::default(),
    };

    let (width, height) = fit_canvas(&window, &canvas);

    // A missing sprite aborts startup
    let sprite = load_sprite(PLAYER_SPRITE).await?;
    log::info!("Loaded {} ({}x{})", PLAYER_SPRITE, sprite.width, sprite.height);

    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
        ..Default::default()
    });
    let surface = instance
        .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
        .map_err(|e| GameError::Render(format!("failed to create surface: {}", e)))?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| GameError::Render(format!("no adapter: {}", e)))?;
    log::info!("Using adapter: {:?}", adapter.get_info().name);

    let render_state = RenderState::new(surface, &adapter, width, height).await?;
    let presenter = WebPresenter::new(render_state, &document);

    let seed = js_sys::Date::now() as u64;
    let state = GameState::new(
        seed,
        config,
        Viewport::new(width as f32, height as f32),
        sprite.size(),
    );
    let mut ticker = Ticker::new();
    Game::install(&mut ticker);
    let app = Rc::new(RefCell::new(App {
        game: Game::new(state, sprite, Box::new(presenter)),
        ticker,
    }));

    setup_input_handlers(&window, app.clone());
    setup_resize_handler(&window, canvas, app.clone());

    if app.borrow_mut().ticker.start() {
        request_animation_frame(app);
    }

    log::info!("Bunny Dash running!");
    Ok(())
}

fn setup_input_handlers(window: &web_sys::Window, app: Rc<RefCell<App>>) {
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let response = app.borrow_mut().game.key_down(&event.code());
            if response.consumed {
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            app.borrow_mut().game.key_up(&event.code());
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_resize_handler(window: &web_sys::Window, canvas: HtmlCanvasElement, app: Rc<RefCell<App>>) {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (width, height) = fit_canvas(&window, &canvas);
        app.borrow_mut().game.resize(width, height);
    });
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn request_animation_frame(app: Rc<RefCell<App>>) {
    let Some(window) = web_sys::window() else {
        log::error!("No window; frame loop stopped");
        return;
    };
    let closure = Closure::once(move |_time: f64| {
        game_loop(app);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(app: Rc<RefCell<App>>) {
    let next = app.clone();
    let mut guard = app.borrow_mut();
    let App { game, ticker } = &mut *guard;
    // The next frame is queued before this one's steps run
    ticker.tick(game, move || request_animation_frame(next));
}

#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
    }

    log::info!("Bunny Dash starting...");

    if let Err(e) = start().await {
        log::error!("Startup failed: {}", e);
    }
}
