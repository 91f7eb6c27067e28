//! Flappy Bird entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use flappy_bird::GameConfig;
    use flappy_bird::assets::{SpriteMetrics, SpriteSet};
    use flappy_bird::consts::SIM_DT;
    use flappy_bird::highscores::{HighScores, submit_score};
    use flappy_bird::net::FetchScoreService;
    use flappy_bird::renderer::{SpriteRenderState, build_scene, score_text};
    use flappy_bird::sim::{FixedStep, GameEvent, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FixedStep,
        render_state: Option<SpriteRenderState>,
        metrics: SpriteMetrics,
        last_time: f64,
        config: GameConfig,
        service: Rc<FetchScoreService>,
        high_scores: Rc<RefCell<HighScores>>,
        // Last HUD values written, to skip redundant DOM writes
        shown_score: Option<u32>,
        shown_running: Option<bool>,
    }

    impl Game {
        fn new(seed: u64, config: GameConfig, sprites: &SpriteSet) -> Self {
            Self {
                state: GameState::with_layout(seed, sprites.layout()),
                clock: FixedStep::new(),
                render_state: None,
                metrics: sprites.metrics(),
                last_time: 0.0,
                service: Rc::new(FetchScoreService::new(config.server_base.clone())),
                config,
                high_scores: Rc::new(RefCell::new(HighScores::new())),
                shown_score: None,
                shown_running: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let steps = self.clock.advance(dt);
            for _ in 0..steps {
                for event in tick(&mut self.state) {
                    if let GameEvent::Crashed { score, .. } = event {
                        self.submit_score(score);
                    }
                }
            }
        }

        /// Fire-and-forget save + leaderboard refresh
        fn submit_score(&self, score: u32) {
            let service = self.service.clone();
            let board = self.high_scores.clone();
            let user_id = self.config.user_id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                submit_score(service.as_ref(), &board, &user_id, score).await;
            });
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(ref mut render_state) = self.render_state else {
                return;
            };
            let scene = build_scene(&self.state, &self.metrics);
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

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if self.shown_score != Some(self.state.score) {
                if let Some(el) = document.get_element_by_id("hud-score") {
                    el.set_text_content(Some(&score_text(self.state.score)));
                }
                self.shown_score = Some(self.state.score);
            }

            // Restart / leaderboard buttons only while idle
            let running = self.state.is_running();
            if self.shown_running != Some(running) {
                if let Some(el) = document.get_element_by_id("controls") {
                    let class = if running { "hidden" } else { "" };
                    let _ = el.set_attribute("class", class);
                }
                self.shown_running = Some(running);
            }
        }

        /// Start a new run
        fn restart(&mut self, seed: u64) {
            self.state.restart(seed);
            self.clock.reset();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Bird starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = GameConfig::load();
        let sprites = SpriteSet::fetch(&config.asset_base).await;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, config, &sprites)));
        log::info!("Game initialized with seed: {}", seed);

        // Backing store at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        match init_renderer(&canvas, width, height, &sprites).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Rendering unavailable: {}", e),
        }

        setup_input_handlers(game.clone());
        setup_controls(game.clone());

        request_animation_frame(game);

        log::info!("Flappy Bird running!");
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        sprites: &SpriteSet,
    ) -> Result<SpriteRenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| format!("failed to create surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("failed to get adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        SpriteRenderState::new(surface, &adapter, width, height, sprites)
            .await
            .map_err(|e| format!("failed to create device: {e}"))
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Any key flaps; auto-repeat flaps again
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::KeyboardEvent| {
            game.borrow_mut().state.flap();
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("highscores-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let listing = game.borrow().high_scores.borrow().listing();
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&format!("High scores:\n{}", listing));
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;

    use flappy_bird::GameConfig;
    use flappy_bird::assets::SpriteSet;
    use flappy_bird::highscores::{HighScores, submit_score};
    use flappy_bird::net::HttpScoreService;
    use flappy_bird::sim::{GameEvent, GameState, tick};

    env_logger::init();
    log::info!("Flappy Bird (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let config = GameConfig::load();
    let sprites = SpriteSet::load_from_dir(&config.asset_base);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::with_layout(seed, sprites.layout());
    state.reset();

    // One minute of play at most
    const MAX_TICKS: u32 = 3000;
    let mut final_score = None;
    for _ in 0..MAX_TICKS {
        autopilot(&mut state);
        for event in tick(&mut state) {
            if let GameEvent::Crashed { score, cause } = event {
                log::info!("Autopilot crashed into {:?}", cause);
                final_score = Some(score);
            }
        }
        if !state.is_running() {
            break;
        }
    }
    let score = final_score.unwrap_or(state.score);
    println!("Run finished with score {} after {} ticks", score, state.time_ticks);

    let service = HttpScoreService::new(config.server_base.clone());
    let board = RefCell::new(HighScores::new());
    if pollster::block_on(submit_score(&service, &board, &config.user_id, score)) {
        println!("High scores:\n{}", board.borrow().listing());
    }
}

/// Flap when the bird is about to sink into the lower pipe of the next gap
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &mut flappy_bird::sim::GameState) {
    use flappy_bird::consts::{BIRD_X, CANVAS_HEIGHT, PIPE_GAP};

    let bird = state.bird;
    let target_bottom = state
        .pipes
        .iter()
        .find(|pipe| pipe.trailing_edge() >= BIRD_X)
        .map(|pipe| pipe.gap_bottom(&state.layout) - PIPE_GAP / 4.0)
        .unwrap_or(CANVAS_HEIGHT / 2.0);

    if bird.velocity >= 0.0 && bird.bottom() + bird.velocity >= target_bottom {
        state.flap();
    }
}
