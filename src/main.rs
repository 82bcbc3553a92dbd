//! Dot Blitz entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;

    use dot_blitz::audio::{AudioManager, SoundEffect};
    use dot_blitz::consts::*;
    use dot_blitz::renderer::Renderer;
    use dot_blitz::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use dot_blitz::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Renderer,
        audio: AudioManager,
        settings: Settings,
        highscores: HighScores,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, bounds: Vec2, renderer: Renderer) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);

            Self {
                state: GameState::new(seed, bounds),
                renderer,
                audio,
                settings,
                highscores: HighScores::load(),
                input: TickInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input;
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.fire = None;
                self.input.thrust = Vec2::ZERO;
            }

            self.state.particles.truncate(self.settings.max_particles());
            if !self.settings.background_grid {
                self.state.background.clear();
            }
        }

        /// Drain sim events: audio cues, floating score labels, leaderboard
        fn handle_events(&mut self, document: &Document) {
            for event in self.state.take_events() {
                match event {
                    GameEvent::ProjectileFired => self.audio.play(SoundEffect::Shoot),
                    GameEvent::EnemyHit { pos, score } => {
                        self.audio.play(SoundEffect::Hit);
                        spawn_score_label(document, pos, score);
                    }
                    GameEvent::EnemyDestroyed { pos, score } => {
                        self.audio.play(SoundEffect::Explode);
                        spawn_score_label(document, pos, score);
                    }
                    GameEvent::PowerUpCollected => self.audio.play(SoundEffect::PowerUp),
                    GameEvent::PlayerKilled => {
                        self.audio.play(SoundEffect::Death);
                        let now = js_sys::Date::now();
                        if let Some(rank) = self.highscores.add_score(self.state.score, now) {
                            log::info!("New high score, rank {rank}");
                            self.highscores.save();
                        }
                    }
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            // Start modal only in the menu
            if let Some(el) = document.get_element_by_id("start-modal") {
                let class = if self.state.phase == GamePhase::Menu {
                    "modal"
                } else {
                    "modal hidden"
                };
                let _ = el.set_attribute("class", class);
            }

            // Game-over modal with final and best scores
            if let Some(el) = document.get_element_by_id("game-over-modal") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "modal");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                    if let Some(best_el) = document.get_element_by_id("best-score") {
                        let best = self.highscores.top_score().unwrap_or(self.state.score);
                        best_el.set_text_content(Some(&best.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "modal hidden");
                }
            }
        }

        /// Begin a new run with a fresh spawn sequence
        fn start_run(&mut self) {
            self.audio.resume();
            self.audio.play(SoundEffect::Select);
            self.input = TickInput::default();
            self.accumulator = 0.0;
            self.state.seed = js_sys::Date::now() as u64;
            self.state.start();
        }
    }

    /// Float a score delta up from the hit position, removed after the CSS
    /// animation finishes.
    fn spawn_score_label(document: &Document, pos: Vec2, score: u32) {
        let Ok(el) = document.create_element("div") else {
            return;
        };
        el.set_class_name("score-label");
        el.set_text_content(Some(&score.to_string()));

        if let Ok(html) = el.clone().dyn_into::<HtmlElement>() {
            let style = html.style();
            let _ = style.set_property("left", &format!("{}px", pos.x));
            let _ = style.set_property("top", &format!("{}px", pos.y));
        }

        let Some(body) = document.body() else { return };
        let _ = body.append_child(&el);

        let closure = Closure::once(move || el.remove());
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                800,
            );
        }
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dot Blitz starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fill the viewport; sim coordinates are CSS pixels
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let renderer = Renderer::new(&canvas).expect("failed to create renderer");

        let seed = js_sys::Date::now() as u64;
        let bounds = Vec2::new(width as f32, height as f32);
        let game = Rc::new(RefCell::new(Game::new(seed, bounds, renderer)));

        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_resize(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Dot Blitz running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer tracking feeds the machine-gun aim
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                game.borrow_mut().input.aim = Some(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click fires toward the point
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                let mut g = game.borrow_mut();
                g.input.fire = Some(pos);
                // Browsers keep audio suspended until a gesture lands
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keydown-only movement: each press is a velocity impulse that
        // friction bleeds off. There is deliberately no keyup handling.
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "w" | "W" => g.input.thrust.y -= MOVE_IMPULSE,
                    "s" | "S" => g.input.thrust.y += MOVE_IMPULSE,
                    "a" | "A" => g.input.thrust.x -= MOVE_IMPULSE,
                    "d" | "D" => g.input.thrust.x += MOVE_IMPULSE,
                    "m" | "M" => {
                        g.settings.muted = !g.settings.muted;
                        g.audio.set_muted(g.settings.muted);
                        g.settings.save();
                        log::info!("Muted: {}", g.settings.muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().start_run();
                    log::info!("Run started");
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);

            let mut g = game.borrow_mut();
            g.state.set_bounds(Vec2::new(width as f32, height as f32));
            g.renderer.resize(width as f32, height as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let document = web_sys::window().unwrap().document().unwrap();
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.handle_events(&document);
            g.renderer.render(&g.state);
            g.update_hud(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;

    use dot_blitz::consts::*;
    use dot_blitz::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Dot Blitz (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless smoke run: a minute of simulated play with periodic fire
    let mut state = GameState::new(42, Vec2::new(800.0, 600.0));
    state.start();

    for i in 0u64..(TICK_HZ as u64 * 60) {
        let input = TickInput {
            aim: Some(Vec2::new(400.0, 0.0)),
            fire: i.is_multiple_of(20).then_some(Vec2::new(400.0, 0.0)),
            ..Default::default()
        };
        tick(&mut state, &input);
        state.events.clear();

        if state.phase == GamePhase::GameOver {
            log::info!("Run ended at tick {} with score {}", state.frame, state.score);
            break;
        }
    }

    println!(
        "Simulated {} ticks: score {}, {} enemies alive",
        state.frame,
        state.score,
        state.enemies.len()
    );
}
