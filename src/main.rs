//! Icebound entry point
//!
//! The browser build runs the canvas game loop. The native build runs a
//! headless session under the autopilot and logs how it ends.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use icebound::renderer::CanvasPainter;
    use icebound::sim::{GameEvent, GameState, TickInput, Viewport, autopilot, tick};
    use icebound::{GameConfig, GameMode, dt_scale, hud};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        painter: CanvasPainter,
        canvas: HtmlCanvasElement,
        /// Keys currently held
        keys: TickInput,
        autopilot: bool,
        last_time: f64,
    }

    impl Game {
        /// Match the backing store to the canvas' CSS size
        fn fit_canvas(&mut self) -> Result<(), JsValue> {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let w = self.canvas.client_width();
            let h = self.canvas.client_height();
            self.canvas.set_width((w as f64 * dpr) as u32);
            self.canvas.set_height((h as f64 * dpr) as u32);
            self.painter.set_pixel_ratio(dpr)?;
            self.state.resize(Viewport::new(w as f32, h as f32));
            Ok(())
        }

        fn update(&mut self, dt: f32) {
            let input = if self.autopilot {
                autopilot(&self.state)
            } else {
                self.keys
            };
            for event in tick(&mut self.state, &input, dt) {
                match event {
                    GameEvent::ChunksGenerated { count } => {
                        log::debug!("{} chunks generated", count)
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }

        /// Set or clear the held flag for a steering key
        fn set_key(&mut self, key: &str, down: bool) -> bool {
            let slot = match key {
                "ArrowUp" | "w" | "W" => &mut self.keys.up,
                "ArrowDown" | "s" | "S" => &mut self.keys.down,
                "ArrowLeft" | "a" | "A" => &mut self.keys.left,
                "ArrowRight" | "d" | "D" => &mut self.keys.right,
                _ => return false,
            };
            *slot = down;
            true
        }

        /// Restart only from the end screen, and only through the button
        fn click(&mut self, x: f32, y: f32) {
            if !self.state.phase.is_terminal() {
                return;
            }
            if hud::restart_button(self.state.viewport()).contains(x, y) {
                self.keys = TickInput::default();
                self.state.reset();
            }
        }
    }

    /// `#open` in the URL selects the unbounded mode
    fn mode_from_location() -> GameMode {
        web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .and_then(|hash| GameMode::from_str(hash.trim_start_matches('#')))
            .unwrap_or_default()
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Icebound starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: web_sys::CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let config = GameConfig::load(mode_from_location());
        let seed = js_sys::Date::now() as u64;
        let viewport = Viewport::new(canvas.client_width() as f32, canvas.client_height() as f32);

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(config, viewport, seed),
            painter: CanvasPainter::new(ctx),
            canvas: canvas.clone(),
            keys: TickInput::default(),
            autopilot: false,
            last_time: 0.0,
        }));
        game.borrow_mut().fit_canvas()?;

        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());

        request_animation_frame(game);

        log::info!("Icebound running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Key down: steering, plus I for the autopilot
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if key == "i" || key == "I" {
                    if !event.repeat() {
                        g.autopilot = !g.autopilot;
                        log::info!("Autopilot {}", if g.autopilot { "on" } else { "off" });
                    }
                } else if g.set_key(&key, true) {
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().set_key(&event.key(), false) {
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Losing focus swallows key-ups; drop everything held
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys = TickInput::default();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click: restart button on the end screen
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .click(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Err(e) = game.borrow_mut().fit_canvas() {
                log::warn!("Resize failed: {:?}", e);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
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

            let dt = if g.last_time > 0.0 {
                dt_scale(((time - g.last_time) / 1000.0) as f32)
            } else {
                1.0
            };
            g.last_time = time;

            g.update(dt);
            if let Err(e) = g.painter.draw(&g.state, g.autopilot) {
                log::error!("Draw failed: {:?}", e);
            }
        }

        // Keep presenting the end screen so a restart needs no new loop
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Icebound failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Icebound (native) starting...");

    let cli = headless::Cli::parse();
    if let Err(e) = headless::run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use icebound::sim::{GameEvent, GameState, SessionPhase, Viewport, autopilot, tick};
    use icebound::{ConfigError, GameConfig, GameMode, hud};

    #[derive(Parser, Debug)]
    #[command(author, version, about = "Run a headless Icebound session under the autopilot")]
    pub struct Cli {
        /// JSON game config; defaults are used when omitted
        pub config: Option<PathBuf>,

        /// Override the config's mode
        #[arg(long, value_enum)]
        pub mode: Option<GameMode>,

        /// Session RNG seed
        #[arg(long, default_value_t = 1)]
        pub seed: u64,

        /// Stop after this many ticks if the session is still running
        #[arg(long, default_value_t = 60 * 60 * 5)]
        pub ticks: u64,
    }

    pub fn run(cli: &Cli) -> Result<(), ConfigError> {
        let mut config = match &cli.config {
            Some(path) => GameConfig::load_from_path(path)?,
            None => GameConfig::default(),
        };
        if let Some(mode) = cli.mode {
            config = config.with_mode(mode)?;
        }

        let mut state = GameState::new(config, Viewport::default(), cli.seed);
        let mut generated = 0;
        while state.time_ticks < cli.ticks && !state.phase.is_terminal() {
            let input = autopilot(&state);
            for event in tick(&mut state, &input, 1.0) {
                match event {
                    GameEvent::ChunksGenerated { count } => generated += count,
                    GameEvent::CoalDepleted => log::warn!("Bunker empty, coasting"),
                    _ => {}
                }
            }
        }

        let outcome = match state.phase {
            SessionPhase::Running => "still under way",
            SessionPhase::GameOver => "wrecked",
            SessionPhase::Won => "arrived",
        };
        log::info!(
            "Session {} after {} ticks: {} chunks, {} icebergs",
            outcome,
            state.time_ticks,
            generated,
            state.world.icebergs().len()
        );
        for line in hud::status_lines(&state) {
            log::info!("{}", line);
        }
        Ok(())
    }

}
