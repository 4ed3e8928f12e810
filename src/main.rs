//! Brick Breaker entry point
//!
//! In the browser this wires the canvas, DOM HUD and input events to the
//! game loop. Natively it runs a headless autopilot game and prints a
//! summary, which is handy for checking configs.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, VisibilityState};

    use brick_breaker::GameConfig;
    use brick_breaker::audio::AudioManager;
    use brick_breaker::platform::{FrameClock, HudSink, show_overlay, sync_hud};
    use brick_breaker::renderer::{RenderState, draw};
    use brick_breaker::sim::{GameState, InputState, Key, tick};

    /// HUD backed by the page's DOM elements
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let display = if visible { "display: block" } else { "display: none" };
                let _ = el.set_attribute("style", display);
            }
        }
    }

    impl HudSink for DomHud {
        fn set_score(&mut self, score: u32) {
            self.set_text("score", &score.to_string());
        }

        fn set_lives(&mut self, lives: u8) {
            self.set_text("lives", &lives.to_string());
        }

        fn set_prompt(&mut self, prompt: Option<&str>) {
            if let Some(text) = prompt {
                self.set_text("start-prompt", text);
            }
            self.set_visible("start-prompt", prompt.is_some());
        }

        fn show_game_over(&mut self, title: &str, final_score: &str) {
            self.set_text("gameOverTitle", title);
            self.set_text("finalScore", final_score);
            self.set_visible("gameOver", true);
        }

        fn hide_game_over(&mut self) {
            self.set_visible("gameOver", false);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        clock: FrameClock,
        render_state: Option<RenderState>,
        audio: AudioManager,
        hud: DomHud,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64, document: Document) -> Self {
            let clock = FrameClock::new(config.tick_dt());
            let audio = AudioManager::new(&config.audio);
            Self {
                state: GameState::with_config(config, seed),
                input: InputState::new(),
                clock,
                render_state: None,
                audio,
                hud: DomHud { document },
            }
        }

        /// Run this frame's ticks and push their effects out
        fn update(&mut self, time: f64) {
            let ticks = self.clock.advance(time);
            let mut events = Vec::new();
            for _ in 0..ticks {
                events.extend(tick(&mut self.state, &mut self.input));
            }

            sync_hud(&mut self.hud, &self.state, &events);
            self.audio.play_events(&events);
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let scene = draw(&self.state);
            show_overlay(&mut self.hud, &scene);
            match render_state.render(&scene) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = GameConfig::load();
        let canvas_size = (config.canvas.width, config.canvas.height);

        // Backing store at device resolution, CSS size in canvas pixels
        let dpr = window.device_pixel_ratio();
        let width = (canvas_size.0 as f64 * dpr) as u32;
        let height = (canvas_size.1 as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let _ = canvas.set_attribute(
            "style",
            &format!("width: {}px; height: {}px", canvas_size.0, canvas_size.1),
        );

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(config, seed, document.clone())));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, canvas_size).await;
        game.borrow_mut().render_state = Some(render_state);

        // Initial HUD
        {
            let mut g = game.borrow_mut();
            let (score, lives) = (g.state.score, g.state.lives);
            g.hud.set_score(score);
            g.hud.set_lives(lives);
            g.hud.hide_game_over();
        }

        setup_keyboard(&document, game.clone());
        setup_pointer(&canvas, game.clone());
        setup_restart_button(&document, game.clone());
        setup_visibility(&document, game.clone());

        request_animation_frame(game);

        log::info!("Brick Breaker running!");
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_key_name(&event.key()) else {
                    return;
                };
                let mut g = game.borrow_mut();
                if g.input.key_event(key, event.repeat()) {
                    // Keep space from scrolling the page
                    event.prevent_default();
                    g.audio.resume();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_key_name(&event.key()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = canvas_clone.get_bounding_client_rect();
            if rect.width() <= 0.0 {
                return;
            }
            let mut g = game.borrow_mut();
            // Client pixels to canvas pixels
            let scale = g.state.config.canvas.width / rect.width() as f32;
            let x = (event.client_x() as f32 - rect.left() as f32) * scale;
            g.input.pointer_move(x);
        });
        let _ = canvas
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("restartBtn") else {
            log::warn!("No #restartBtn on the page");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            g.input.request_restart();
            g.audio.resume();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Hidden tabs stop animation frames; drop the gap instead of replaying it
    fn setup_visibility(document: &Document, game: Rc<RefCell<Game>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            if document_clone.visibility_state() == VisibilityState::Hidden {
                g.input.release_all();
                log::debug!("Page hidden, held keys released");
            } else {
                g.clock.reset();
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use brick_breaker::GameConfig;
    use brick_breaker::sim::{GameEvent, GamePhase, GameState, InputState, Key, tick};

    /// Give up after ten simulated minutes; the autopilot can loop forever
    /// against a lone brick
    const MAX_TICKS: u64 = 60 * 60 * 10;

    /// Result of an autopilot run
    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub seed: u64,
        pub ticks: u64,
        pub outcome: Option<String>,
        pub score: u32,
        pub max_score: u32,
        pub lives: u8,
        pub bricks_destroyed: usize,
        pub paddle_hits: u32,
        pub wall_bounces: u32,
    }

    /// Play a full game with the autopilot steering
    pub fn run(config: GameConfig, seed: u64) -> RunSummary {
        let mut state = GameState::with_config(config, seed);
        let mut input = InputState::new();
        input.autopilot = true;

        let mut ticks = 0;
        let mut paddle_hits = 0;
        let mut wall_bounces = 0;

        while ticks < MAX_TICKS && !matches!(state.phase, GamePhase::Ended(_)) {
            if state.phase == GamePhase::NotStarted {
                input.key_down(Key::Start);
            }
            for event in tick(&mut state, &mut input) {
                match event {
                    GameEvent::PaddleHit { .. } => paddle_hits += 1,
                    GameEvent::WallBounce => wall_bounces += 1,
                    _ => {}
                }
            }
            ticks += 1;
        }

        if ticks == MAX_TICKS {
            log::warn!("Stopped after {} ticks without a result", ticks);
        }

        RunSummary {
            seed,
            ticks,
            outcome: state.outcome().map(|o| o.title().to_string()),
            score: state.score,
            max_score: state.max_score(),
            lives: state.lives,
            bricks_destroyed: state.bricks.destroyed_count(),
            paddle_hits,
            wall_bounces,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::process::ExitCode;
    use std::time::{SystemTime, UNIX_EPOCH};

    use brick_breaker::GameConfig;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot game - run with `trunk serve` to play");

    let config = match std::env::args_os().nth(1) {
        Some(path) => match GameConfig::load_file(std::path::Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.to_string_lossy());
                config
            }
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();

    let summary = headless::run(config, seed);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize summary: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
