//! Drop Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build wires DOM input and a DOM presentation sink to the sim;
//! the native build does a headless smoke run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, KeyboardEvent, MouseEvent, PointerEvent, TouchEvent};

    use drop_dodge::Settings;
    use drop_dodge::consts::*;
    use drop_dodge::sim::{
        ControlMode, GameState, PresentationSink, TickInput, tick,
    };

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        /// DOM elements for active falling objects, by entity id
        sprites: HashMap<u32, Element>,
        settings: Settings,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(state: GameState, settings: Settings) -> Self {
            Self {
                state,
                input: TickInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
                sprites: HashMap::new(),
                settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.start = false;
                self.input.restart = false;
                self.input.advance_level = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Position the player and falling-object sprites in the DOM
        fn render_sprites(&mut self, document: &Document) {
            if let Some(player_el) = document.get_element_by_id("player") {
                let pos = self.state.player.pos;
                let _ = player_el.set_attribute(
                    "style",
                    &format!("transform: translate({:.0}px, {:.0}px)", pos.x, pos.y),
                );
            }

            let Some(arena) = document.get_element_by_id("arena") else {
                return;
            };

            let mut live: Vec<u32> = Vec::with_capacity(self.state.objects.len());
            for obj in self.state.objects.iter() {
                live.push(obj.id);
                let el = self.sprites.entry(obj.id).or_insert_with(|| {
                    let el = document.create_element("div").expect("create sprite");
                    let _ = el.set_attribute("class", "enemy");
                    let _ = arena.append_child(&el);
                    el
                });
                let _ = el.set_attribute(
                    "style",
                    &format!("transform: translate({:.0}px, {:.0}px)", obj.pos.x, obj.pos.y),
                );
            }

            // Drop sprites for objects that left the registry
            self.sprites.retain(|id, el| {
                if live.contains(id) {
                    true
                } else {
                    el.remove();
                    false
                }
            });
        }

        fn update_fps_hud(&self, document: &Document) {
            if !self.settings.show_fps {
                return;
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                el.set_text_content(Some(&self.fps.to_string()));
            }
        }
    }

    /// Presentation sink backed by HUD elements in the page
    struct DomSink {
        document: Document,
    }

    impl DomSink {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
            }
        }
    }

    impl PresentationSink for DomSink {
        fn on_score_update(&mut self, elapsed_secs: u32) {
            self.set_text("hud-time", &format!("Time: {}", elapsed_secs));
        }

        fn on_game_over(&mut self, final_secs: u32) {
            self.set_text("hud-time", &format!("Game Over! Time: {} seconds", final_secs));
        }

        fn on_level_changed(&mut self, level: u32) {
            self.set_text("hud-level", &format!("Level: {}", level));
            self.set_hidden("fight-btn", true);
            self.set_hidden("next-level-btn", true);
            self.set_hidden("restart-btn", true);
        }

        fn on_level_advance_offered(&mut self) {
            self.set_hidden("next-level-btn", false);
        }

        fn on_restart_available(&mut self) {
            self.set_hidden("restart-btn", false);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Drop Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0) as f32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0) as f32;

        let settings = Settings::load();
        let control_mode = settings.resolve_control(width);
        let seed = js_sys::Date::now() as u64;

        log::info!(
            "Session {}x{}, seed {}, controls {:?}",
            width,
            height,
            seed,
            control_mode
        );

        let state = GameState::new(seed, width, height, control_mode);
        let game = Rc::new(RefCell::new(Game::new(state, settings)));

        setup_buttons(&document, game.clone());
        setup_settings(&document, game.clone());
        match control_mode {
            ControlMode::Keys => setup_keyboard(game.clone()),
            ControlMode::Pointer => setup_pointer(&document, game.clone()),
        }

        request_animation_frame(game);

        log::info!("Drop Dodge running!");
    }

    fn on_click(
        document: &Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        apply: impl Fn(&mut TickInput) + 'static,
    ) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                apply(&mut game.borrow_mut().input);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "fight-btn", game.clone(), |input| {
            input.start = true;
        });
        on_click(document, "restart-btn", game.clone(), |input| {
            input.restart = true;
        });
        on_click(document, "next-level-btn", game, |input| {
            input.advance_level = true;
        });
    }

    /// FPS counter toggle; the preference is saved to LocalStorage
    fn setup_settings(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("fps-toggle") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                let shown = g.settings.toggle_show_fps();
                g.settings.save();
                if !shown {
                    if let Some(el) = document.get_element_by_id("hud-fps") {
                        el.set_text_content(None);
                    }
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left_held = true,
                    "ArrowRight" => g.input.right_held = true,
                    " " | "Enter" => g.input.start = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left_held = false,
                    "ArrowRight" => g.input.right_held = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pointer(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut().input.pointer_x = Some(event.client_x() as f32);
            });
            let _ = document
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().input.pointer_x = Some(touch.client_x() as f32);
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);

            let document = web_sys::window().unwrap().document().unwrap();
            let mut sink = DomSink {
                document: document.clone(),
            };
            g.state.flush_events(&mut sink);
            g.render_sprites(&document);
            g.update_fps_hud(&document);
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
    env_logger::init();
    log::info!("Drop Dodge (native) starting...");

    use drop_dodge::consts::TICKS_PER_SECOND;
    use drop_dodge::sim::{ControlMode, GameState, TickInput, tick};

    // Headless smoke run: start a session and let it play out for a while
    let mut state = GameState::new(0xD0D6E, 800.0, 600.0, ControlMode::Keys);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );
    let input = TickInput::default();
    for _ in 0..(10 * TICKS_PER_SECOND) {
        tick(&mut state, &input);
    }
    for event in state.drain_events() {
        log::debug!("{:?}", event);
    }
    println!(
        "phase {:?}, survived {}s, {} objects falling",
        state.phase,
        state.elapsed_secs,
        state.objects.len()
    );
    log::info!("Run with `trunk serve` for the web version");
}
