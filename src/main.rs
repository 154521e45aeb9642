//! Ball Paddle entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use ball_paddle::Settings;
    use ball_paddle::audio::AudioManager;
    use ball_paddle::frame::FrameClock;
    use ball_paddle::renderer::CanvasRenderer;
    use ball_paddle::sim::{Game, TickInput, tick};
    use ball_paddle::ui::{self, Key, KeyState};

    /// Game instance holding all state
    struct App {
        game: Game,
        renderer: CanvasRenderer,
        audio: AudioManager,
        /// Commands queued by input handlers until the next tick
        input: TickInput,
        keys: KeyState,
        clock: FrameClock,
    }

    impl App {
        /// Run simulation ticks for the time elapsed since the last frame
        fn update(&mut self, time: f64) {
            for _ in 0..self.clock.advance(time) {
                // One-shot commands only go to the first substep
                let input = std::mem::take(&mut self.input);
                tick(&mut self.game, &input);
            }

            let events = self.game.drain_events();
            self.audio.handle_events(&events);
        }

        fn render(&self) {
            self.renderer.render(&self.game);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Ball Paddle starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - cannot start");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        let settings = Settings::load();
        canvas.set_width(settings.field_width as u32);
        canvas.set_height(settings.field_height as u32);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            game: Game::new(settings.field(), seed),
            renderer: CanvasRenderer::new(ctx, settings.field_width, settings.field_height),
            audio: AudioManager::from_settings(&settings),
            input: TickInput::default(),
            keys: KeyState::default(),
            clock: FrameClock::default(),
        }));

        setup_input_handlers(&canvas, app.clone());
        request_animation_frame(app);

        log::info!("Ball Paddle running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Click - hit-test the buttons for the current mode
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let point = Vec2::new(
                    event.client_x() as f32 - rect.left() as f32,
                    event.client_y() as f32 - rect.top() as f32,
                );
                let mut a = app.borrow_mut();
                let field = *a.game.field();
                if let Some(command) = ui::click(a.game.phase(), field.width, field.height, point) {
                    a.input.push(command);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down - arrows, Escape, Space
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom(&event.key(), &event.code()) else {
                    return;
                };
                event.prevent_default();
                let mut a = app.borrow_mut();
                let command = a.keys.key_down(key);
                a.input.push(command);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up - release held arrows
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom(&event.key(), &event.code()) else {
                    return;
                };
                let mut a = app.borrow_mut();
                if let Some(command) = a.keys.key_up(key) {
                    a.input.push(command);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
        }
        request_animation_frame(app);
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

/// Headless demo: the autopilot plays one game and the result is printed
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use serde::Serialize;

    use ball_paddle::Settings;
    use ball_paddle::audio::AudioManager;
    use ball_paddle::difficulty::Difficulty;
    use ball_paddle::sim::{Command, Game, GamePhase, TickInput, autopilot_direction, tick};

    /// Ten minutes of play at 60 ticks per second
    pub const MAX_DEMO_TICKS: u64 = 60 * 60 * 10;

    #[derive(Debug, Serialize)]
    pub struct DemoSummary {
        pub seed: u64,
        pub difficulty: Difficulty,
        pub phase: GamePhase,
        pub score: u32,
        pub lives: u32,
        pub ticks: u64,
    }

    pub fn run(settings: &Settings, seed: u64, difficulty: Difficulty) -> DemoSummary {
        let mut game = Game::new(settings.field(), seed);
        let audio = AudioManager::from_settings(settings);

        let mut input = TickInput::default();
        input.push(Command::SelectDifficulty(difficulty));

        while game.time_ticks() < MAX_DEMO_TICKS {
            input.push(Command::SetPaddleDirection(autopilot_direction(&game)));
            tick(&mut game, &std::mem::take(&mut input));
            audio.handle_events(&game.drain_events());
            if game.phase() != GamePhase::Playing {
                break;
            }
        }

        let (score, lives) = game
            .session()
            .map(|s| (s.score, s.lives))
            .unwrap_or_default();

        DemoSummary {
            seed: game.seed(),
            difficulty,
            phase: game.phase(),
            score,
            lives,
            ticks: game.time_ticks(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ball_paddle::{Difficulty, Settings};

    env_logger::init();
    log::info!("Ball Paddle (native) starting...");
    log::info!("The playable game runs in the browser - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(rand::random);
    let difficulty = match std::env::args().nth(1) {
        Some(name) => Difficulty::from_str(&name).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {name:?}, using medium");
            Difficulty::Medium
        }),
        None => Difficulty::Medium,
    };

    log::info!("Running autopilot demo ({}, seed {})", difficulty.as_str(), seed);
    let summary = demo::run(&settings, seed, difficulty);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode demo summary: {e}"),
    }
}
