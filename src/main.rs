//! Station Siege entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use station_siege::audio::AudioManager;
    use station_siege::renderer::{CanvasRenderer, NullRenderer};
    use station_siege::sim::{EffectSink, InputState};
    use station_siege::{Session, Settings, Tuning};

    /// Audio plus the HUD counters the DOM mirrors
    struct FrontEnd {
        audio: AudioManager,
        level: u32,
        lives: u32,
        game_over: bool,
        hud_dirty: bool,
    }

    impl EffectSink for FrontEnd {
        fn plasma_fired(&mut self) {
            self.audio.plasma_fired();
        }

        fn station_fired(&mut self) {
            self.audio.station_fired();
        }

        fn station_destroyed(&mut self) {
            self.audio.station_destroyed();
        }

        fn ship_destroyed(&mut self) {
            self.audio.ship_destroyed();
        }

        fn level_changed(&mut self, level: u32) {
            self.audio.level_changed(level);
            self.level = level;
            self.hud_dirty = true;
        }

        fn lives_changed(&mut self, lives: u32) {
            self.lives = lives;
            self.hud_dirty = true;
        }

        fn game_over(&mut self) {
            self.audio.game_over();
            self.game_over = true;
            self.hud_dirty = true;
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputState,
        settings: Settings,
        front: FrontEnd,
        renderer: Option<CanvasRenderer>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                session: Session::new(seed, Tuning::load()),
                input: InputState::default(),
                settings,
                front: FrontEnd {
                    audio,
                    level: 1,
                    lives: 0,
                    game_over: false,
                    hud_dirty: true,
                },
                renderer: None,
            }
        }

        /// One display frame
        fn frame(&mut self) {
            match self.renderer.as_mut() {
                Some(renderer) => self.session.frame(&self.input, &mut self.front, renderer),
                None => self
                    .session
                    .frame(&self.input, &mut self.front, &mut NullRenderer),
            }
        }

        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_mute();
            self.front.audio.set_muted(muted);
            self.settings.save();
        }

        fn start(&mut self) {
            self.front.audio.resume();
            self.session.start();
        }

        fn restart(&mut self) {
            self.front.audio.resume();
            self.front.game_over = false;
            self.front.hud_dirty = true;
            self.input = InputState::default();
            self.session.restart();
        }

        /// Drop held keys and pause when focus leaves the page
        fn auto_pause(&mut self, reason: &str) {
            self.input = InputState::default();
            if self.session.is_started() && !self.session.is_paused() && !self.session.is_game_over()
            {
                self.session.toggle_pause();
                log::info!("Auto-paused ({})", reason);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            if !self.front.hud_dirty {
                return;
            }
            self.front.hud_dirty = false;

            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.front.level.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-lives .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.front.lives.to_string()));
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if self.front.game_over { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
                if self.front.game_over {
                    if let Some(level_el) = document.get_element_by_id("final-level") {
                        level_el.set_text_content(Some(&self.front.level.to_string()));
                    }
                }
            }
        }
    }

    fn js_err(msg: &str) -> JsValue {
        JsValue::from_str(msg)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| js_err(&e.to_string()))?;

        log::info!("Station Siege starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, Settings::load())));
        log::info!("Game initialized with seed: {}", seed);

        {
            let mut g = game.borrow_mut();
            g.renderer = CanvasRenderer::new(&canvas);
            if g.renderer.is_none() {
                log::warn!("Canvas 2D context unavailable - drawing disabled");
            }
        }
        fit_canvas(&canvas, &game);

        setup_keyboard(game.clone())?;
        setup_buttons(&document, game.clone());
        setup_auto_pause(&document, game.clone())?;
        setup_resize(canvas, game.clone())?;

        request_animation_frame(game);

        log::info!("Station Siege running!");
        Ok(())
    }

    /// Match the backing store to the element's layout size
    fn fit_canvas(canvas: &HtmlCanvasElement, game: &Rc<RefCell<Game>>) {
        let w = canvas.client_width().max(1) as u32;
        let h = canvas.client_height().max(1) as u32;
        canvas.set_width(w);
        canvas.set_height(h);

        let mut g = game.borrow_mut();
        g.session.set_viewport(w as f32, h as f32);
        if let Some(renderer) = g.renderer.as_mut() {
            renderer.resize(w as f64, h as f64);
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                match key.as_str() {
                    "m" | "M" => {
                        if !event.repeat() {
                            g.toggle_mute();
                        }
                    }
                    _ => {
                        if set_key(&mut g.input, &key, true) {
                            event.prevent_default();
                        }
                    }
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if set_key(&mut g.input, &event.key(), false) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Map a key to its held flag. Returns false for unbound keys.
    fn set_key(input: &mut InputState, key: &str, down: bool) -> bool {
        match key {
            "ArrowUp" | "w" | "W" => input.thrust = down,
            "ArrowLeft" | "a" | "A" => input.turn_left = down,
            "ArrowRight" | "d" | "D" => input.turn_right = down,
            " " => input.fire = down,
            "p" | "P" | "Escape" => input.pause = down,
            _ => return false,
        }
        true
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().start();
                if let Some(el) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id("start-screen"))
                {
                    let _ = el.set_attribute("class", "hidden");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().auto_pause("tab hidden");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().auto_pause("window blur");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_canvas(&canvas, &game);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.frame();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Station Siege (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the playable web version");

    headless::run(0x5eed, 60 * 60 * 5);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted pilot flying a session with no window
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use station_siege::renderer::NullRenderer;
    use station_siege::sim::{GameEvent, InputState, SimulationState};
    use station_siege::{Session, Tuning, shortest_angle_delta};

    /// Chase the nearest active station, fire in pulses when lined up
    fn autopilot(state: &SimulationState, frame: u64) -> InputState {
        let ship = &state.ship;
        let target = state
            .stations
            .iter()
            .filter(|s| !s.is_spawning())
            .min_by(|a, b| {
                let da = a.pos.distance_squared(ship.pos);
                let db = b.pos.distance_squared(ship.pos);
                da.total_cmp(&db)
            });

        let Some(target) = target else {
            return InputState::default();
        };

        let to_target = target.pos - ship.pos;
        let delta = shortest_angle_delta(ship.angle, to_target.y.atan2(to_target.x));
        let aligned = delta.abs() < 0.1;

        InputState {
            thrust: aligned && to_target.length() > 250.0,
            turn_left: delta < -0.05,
            turn_right: delta > 0.05,
            // Release every other frame so each press is a fresh edge
            fire: aligned && frame % 2 == 0,
            pause: false,
        }
    }

    pub fn run(seed: u64, max_frames: u64) {
        let mut session = Session::new(seed, Tuning::load());
        session.start();

        let mut events: Vec<GameEvent> = Vec::new();
        let mut frames = 0;
        while frames < max_frames && !session.is_game_over() {
            let input = autopilot(session.state(), frames);
            session.frame(&input, &mut events, &mut NullRenderer);
            frames += 1;
        }

        let count = |wanted: &GameEvent| events.iter().filter(|e| *e == wanted).count();
        let state = session.state();
        log::info!(
            "Autopilot ran {} frames: level {}, lives {}, {} stations destroyed, {} ship losses, {} bolts fired, {} station shots{}",
            frames,
            state.progression.level,
            state.progression.lives,
            count(&GameEvent::StationDestroyed),
            count(&GameEvent::ShipDestroyed),
            count(&GameEvent::PlasmaFired),
            count(&GameEvent::StationFired),
            if session.is_game_over() { " (game over)" } else { "" },
        );
    }
}
