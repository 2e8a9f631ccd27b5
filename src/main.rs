//! Cosmic Impact entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::PI;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use cosmic_impact::persistence::SessionStorageHighScore;
    use cosmic_impact::platform::{clock_seed, now_ms};
    use cosmic_impact::sim::{GameEvent, GamePhase};
    use cosmic_impact::view::{FrameView, scale_factor};
    use cosmic_impact::{Binding, Direction, HeldKeys, Session, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session<SessionStorageHighScore>,
        keys: HeldKeys,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(canvas: HtmlCanvasElement, ctx: CanvasRenderingContext2d) -> Self {
            let session = Session::new(clock_seed(), Tuning::load(), SessionStorageHighScore::new());
            let last_phase = session.phase();
            Self {
                session,
                keys: HeldKeys::new(),
                canvas,
                ctx,
                last_phase,
            }
        }

        fn start(&mut self) {
            self.keys.clear();
            self.session.start(now_ms());
        }

        /// Run one simulation tick
        fn update(&mut self) {
            if !self.session.is_running() {
                return;
            }
            let input = self.keys.snapshot();
            let state = self.session.advance(&input, now_ms());
            for event in &state.events {
                if let GameEvent::LifeLost { remaining } = event {
                    log::debug!("Hit! {} lives left", remaining);
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            let tuning = self.session.tuning();
            let width = self.canvas.width() as f64;
            let height = self.canvas.height() as f64;
            let scale = scale_factor(width as f32, tuning);
            let view = FrameView::from_state(self.session.state(), tuning, scale);
            let ctx = &self.ctx;

            ctx.clear_rect(0.0, 0.0, width, height);
            if view.phase != GamePhase::Running {
                return;
            }

            // Ship: upward-pointing glyph inside its box
            let ship = view.ship;
            let (x, y, s) = (ship.pos.x as f64, ship.pos.y as f64, ship.size as f64);
            ctx.set_fill_style_str("#7dd3fc");
            ctx.begin_path();
            ctx.move_to(x + s / 2.0, y);
            ctx.line_to(x + s, y + s);
            ctx.line_to(x + s / 2.0, y + s * 0.75);
            ctx.line_to(x, y + s);
            ctx.close_path();
            ctx.fill();

            // Asteroids: lumpy polygons, shape fixed per id
            ctx.set_fill_style_str("#9ca3af");
            for asteroid in &view.asteroids {
                let center = asteroid.rect.center();
                let radius = asteroid.rect.size as f64 / 2.0;
                ctx.save();
                let _ = ctx.translate(center.x as f64, center.y as f64);
                let _ = ctx.rotate(asteroid.rotation as f64 * PI / 180.0);
                ctx.begin_path();
                const CORNERS: u32 = 9;
                for i in 0..CORNERS {
                    let angle = i as f64 / CORNERS as f64 * 2.0 * PI;
                    let bump = ((asteroid.id.wrapping_mul(2654435761) >> (i * 3)) & 7) as f64 / 7.0;
                    let r = radius * (0.75 + 0.25 * bump);
                    let (px, py) = (r * angle.cos(), r * angle.sin());
                    if i == 0 {
                        ctx.move_to(px, py);
                    } else {
                        ctx.line_to(px, py);
                    }
                }
                ctx.close_path();
                ctx.fill();
                ctx.restore();
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.session.state();

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-lives .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.lives.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-high .hud-value").ok().flatten() {
                el.set_text_content(Some(&state.high_score.to_string()));
            }

            if state.phase == self.last_phase {
                return;
            }
            self.last_phase = state.phase;

            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };
            show("start-screen", state.phase == GamePhase::NotStarted);
            show("controls", state.phase == GamePhase::Running);
            show("game-over", state.phase == GamePhase::GameOver);

            if state.phase == GamePhase::GameOver {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&state.score.to_string()));
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cosmic Impact starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let game = Rc::new(RefCell::new(Game::new(canvas, ctx)));

        setup_keyboard(game.clone());
        setup_direction_buttons(game.clone());
        setup_start_buttons(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Cosmic Impact running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.session.is_running() && g.keys.press_key(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.release_key(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen arrows: press adds the direction, release removes it
    fn setup_direction_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        let buttons = [
            ("btn-up", Direction::Up),
            ("btn-down", Direction::Down),
            ("btn-left", Direction::Left),
            ("btn-right", Direction::Right),
        ];

        for (id, direction) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing control button #{}", id);
                continue;
            };

            for event_name in ["mousedown", "touchstart"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    game.borrow_mut().keys.press(Binding::Buttons, direction);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }

            for event_name in ["mouseup", "mouseleave", "touchend", "touchcancel"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    game.borrow_mut().keys.release(Binding::Buttons, direction);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_start_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for id in ["start-btn", "restart-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().start();
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cosmic_impact::sim::GameEvent;
    use cosmic_impact::{Direction, InputSnapshot, MemoryHighScore, Session, Tuning};

    env_logger::init();
    log::info!("Cosmic Impact (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build to play");

    // Headless run on a simulated 60 Hz clock, weaving left and right
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(cosmic_impact::platform::clock_seed);
    let mut session = Session::new(seed, Tuning::load(), MemoryHighScore::new());
    session.start(0.0);

    let frame_ms = 1000.0 / 60.0;
    let mut frame: u64 = 0;
    while session.is_running() {
        frame += 1;
        let direction = if (frame / 90) % 2 == 0 {
            Direction::Left
        } else {
            Direction::Right
        };
        let state = session.advance(&InputSnapshot::with(&[direction]), frame as f64 * frame_ms);
        for event in &state.events {
            if let GameEvent::LifeLost { remaining } = event {
                println!(
                    "[{:>7.2}s] hit - {} lives left, {} asteroids on field",
                    frame as f64 * frame_ms / 1000.0,
                    remaining,
                    state.asteroids.len()
                );
            }
        }
    }

    let state = session.state();
    println!(
        "\nSeed {}: survived {:.1}s, score {}, high score {}",
        seed,
        frame as f64 * frame_ms / 1000.0,
        state.score,
        state.high_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
