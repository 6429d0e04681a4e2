//! Arena Blaster entry point
//!
//! Handles platform-specific initialization and drives the session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use arena_blaster::renderer::{FlatRenderState, VertexBatch};
    use arena_blaster::sim::seeded_rng;
    use arena_blaster::{FrameScheduler, GameConfig, GameSession, SessionObserver, SharedInput};
    use rand_pcg::Pcg32;

    #[wasm_bindgen]
    extern "C" {
        /// Promise-returning `Element.requestFullscreen()`
        #[wasm_bindgen(method, catch, js_name = requestFullscreen)]
        fn request_fullscreen_promise(this: &Element) -> Result<js_sys::Promise, JsValue>;
    }

    /// Denials arrive either synchronously or as a rejected promise
    fn enter_fullscreen(canvas: &HtmlCanvasElement) {
        match request_fullscreen_promise(canvas) {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    log::warn!("Error attempting to enable fullscreen: {:?}", e);
                }
            }),
            Err(e) => log::warn!("Error attempting to enable fullscreen: {:?}", e),
        }
    }

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// `requestAnimationFrame` backed scheduler
    struct RafScheduler {
        callback: FrameCallback,
        handle: Option<i32>,
    }

    impl FrameScheduler for RafScheduler {
        fn request_next_frame(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(callback) = self.callback.borrow().as_ref() {
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(id) => self.handle = Some(id),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }

        fn cancel(&mut self) {
            if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    /// Mirrors score, lives and game over into the page
    struct DomObserver {
        score: Option<Element>,
        lives: Option<Element>,
        game_over: Option<Element>,
        final_score: Option<Element>,
    }

    impl DomObserver {
        fn new(document: &web_sys::Document) -> Self {
            Self {
                score: document.get_element_by_id("score"),
                lives: document.get_element_by_id("lives"),
                game_over: document.get_element_by_id("gameOver"),
                final_score: document.get_element_by_id("finalScore"),
            }
        }
    }

    impl SessionObserver for DomObserver {
        fn on_score_changed(&mut self, score: u64) {
            if let Some(el) = &self.score {
                el.set_text_content(Some(&score.to_string()));
            }
        }

        fn on_lives_changed(&mut self, lives: u32) {
            if let Some(el) = &self.lives {
                el.set_text_content(Some(&lives.to_string()));
            }
        }

        fn on_game_over(&mut self, final_score: u64) {
            if let Some(el) = &self.final_score {
                el.set_text_content(Some(&final_score.to_string()));
            }
            if let Some(el) = &self.game_over {
                let _ = el.class_list().remove_1("hidden");
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession<Pcg32, RafScheduler>,
        render_state: Option<FlatRenderState>,
        batch: VertexBatch,
        sound_on: bool,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            if !self.session.on_frame(time, &mut self.batch) {
                return;
            }
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Arena Blaster starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = GameConfig::default();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let (width, height) = (config.width as u32, config.height as u32);
        canvas.set_width(width);
        canvas.set_height(height);
        let arena = (config.width, config.height);

        let seed = js_sys::Date::now() as u64;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            callback: callback.clone(),
            handle: None,
        };
        let mut session = GameSession::new(config, seeded_rng(seed), scheduler);
        session.add_observer(Box::new(DomObserver::new(&document)));
        let input = session.input_handle();

        log::info!("Session created with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            render_state: None,
            batch: VertexBatch::new(),
            sound_on: true,
        }));

        {
            let game = game.clone();
            *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                game.borrow_mut().frame(time);
            }));
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
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

        match FlatRenderState::new(surface, &adapter, width, height, arena).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("No GPU device, running without rendering: {e}"),
        }

        setup_key_handlers(input);
        setup_teardown(game.clone());
        setup_buttons(&document, &canvas, game);

        log::info!("Arena Blaster ready");
    }

    fn setup_key_handlers(input: SharedInput) {
        let window = web_sys::window().unwrap();

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let input = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if input.apply_key(&event.key(), pressed) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys held while the window loses focus never see their keyup
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            input.clear();
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().session.stop();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &web_sys::Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing #{id} button");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn hide(document: &web_sys::Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().add_1("hidden");
        }
    }

    fn setup_buttons(
        document: &web_sys::Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        {
            let game = game.clone();
            let doc = document.clone();
            on_click(document, "startBtn", move |_event| {
                if game.borrow_mut().session.start().is_ok() {
                    hide(&doc, "startScreen");
                }
            });
        }

        {
            let game = game.clone();
            let doc = document.clone();
            on_click(document, "restartBtn", move |_event| {
                if game.borrow_mut().session.restart().is_ok() {
                    hide(&doc, "gameOver");
                }
            });
        }

        {
            let doc = document.clone();
            on_click(document, "soundBtn", move |_event| {
                let mut g = game.borrow_mut();
                g.sound_on = !g.sound_on;
                let icon = if g.sound_on {
                    r#"<i class="fas fa-volume-up"></i>"#
                } else {
                    r#"<i class="fas fa-volume-mute"></i>"#
                };
                if let Some(btn) = doc.get_element_by_id("soundBtn") {
                    btn.set_inner_html(icon);
                }
                log::info!("Sound {}", if g.sound_on { "on" } else { "off" });
            });
        }

        {
            let doc = document.clone();
            let canvas = canvas.clone();
            on_click(document, "fullscreenBtn", move |_event| {
                if doc.fullscreen_element().is_none() {
                    enter_fullscreen(&canvas);
                } else {
                    doc.exit_fullscreen();
                }
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use arena_blaster::renderer::VertexBatch;
    use arena_blaster::sim::{GamePhase, seeded_rng};
    use arena_blaster::{FixedStepScheduler, GameConfig, GameSession, InputFlags, SessionObserver};

    /// Five minutes of play at 60 Hz
    const FRAME_CAP: u64 = 60 * 60 * 5;

    struct LogObserver;

    impl SessionObserver for LogObserver {
        fn on_score_changed(&mut self, score: u64) {
            log::debug!("Score: {score}");
        }

        fn on_lives_changed(&mut self, lives: u32) {
            log::info!("Lives: {lives}");
        }

        fn on_game_over(&mut self, final_score: u64) {
            log::info!("Game over, final score {final_score}");
        }
    }

    fn load_config() -> GameConfig {
        let Some(path) = std::env::args().nth(1) else {
            return GameConfig::default();
        };
        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()));
        match parsed {
            Ok(config) => {
                log::info!("Loaded config from {path}");
                config
            }
            Err(e) => {
                log::error!("Ignoring config {path}: {e}");
                GameConfig::default()
            }
        }
    }

    /// Sweep side to side with the trigger held
    fn autopilot(frame: u64) -> InputFlags {
        let sweep_left = (frame / 90) % 2 == 0;
        InputFlags {
            left: sweep_left,
            right: !sweep_left,
            fire: true,
            ..Default::default()
        }
    }

    pub fn run() {
        let config = load_config();
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();
        log::info!("Arena Blaster (headless) starting with seed: {seed}");

        let mut session = GameSession::new(config, seeded_rng(seed), FixedStepScheduler::default());
        session.add_observer(Box::new(LogObserver));
        let input = session.input_handle();
        let mut batch = VertexBatch::new();

        if let Err(e) = session.start() {
            log::error!("{e}");
            return;
        }

        let mut frames = 0;
        while session.phase() == GamePhase::Running && frames < FRAME_CAP {
            input.store(autopilot(frames));
            if session.run_pending(1, &mut batch) == 0 {
                break;
            }
            frames += 1;
        }

        let summary = serde_json::json!({
            "seed": seed,
            "frames": frames,
            "phase": session.phase(),
            "score": session.state().score,
            "lives": session.state().lives,
            "entities": session.state().entity_count(),
            "vertices": batch.vertices().len(),
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to encode summary: {e}"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
