//! Dipper Quest entry point
//!
//! Handles platform-specific initialization and runs the game loop. The page
//! draws each frame from the JSON snapshot handed to `window.dipperQuestRender`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use serde::Serialize;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent};

    use dipper_quest::sim::{DialogueView, GameEvent, SessionSummary, WorldSnapshot};
    use dipper_quest::{Game, Settings, ViewportRect};

    // Hand the frame to whatever drawing code the page installed
    #[wasm_bindgen(inline_js = "
        export function render_frame(json) {
            if (window.dipperQuestRender) {
                window.dipperQuestRender(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn render_frame(json: &str);
    }

    /// Number of quiz option buttons in the overlay markup
    const QUIZ_BUTTONS: usize = 4;

    #[derive(Serialize)]
    struct Frame<'a> {
        world: &'a WorldSnapshot,
        settings: &'a Settings,
        /// Ship should be drawn dimmed this frame
        ship_dimmed: bool,
    }

    /// Host instance holding the game and page handles
    struct Host {
        game: Game,
        settings: Settings,
        canvas: HtmlCanvasElement,
        last_time: f64,
    }

    impl Host {
        fn viewport_rect(&self) -> ViewportRect {
            let r = self.canvas.get_bounding_client_rect();
            ViewportRect::new(
                r.left() as f32,
                r.top() as f32,
                r.width() as f32,
                r.height() as f32,
            )
        }

        /// Advance the simulation and publish everything the page shows
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                dipper_quest::consts::SIM_DT
            };
            self.last_time = time;
            self.game.update(dt);

            for event in self.game.drain_events() {
                match event {
                    GameEvent::GameOver { score } => log::info!("Game over, final score {}", score),
                    GameEvent::BodyMastered { points, .. } => log::info!("Star mastered (+{})", points),
                    other => log::debug!("{:?}", other),
                }
            }

            let world = self.game.snapshot();
            let blink_phase = (time / 150.0) as u64 % 2 == 0;
            let ship_dimmed = world.invincible
                && (!self.settings.effective_invincible_blink() || blink_phase);
            let frame = Frame {
                world: &world,
                settings: &self.settings,
                ship_dimmed,
            };
            if let Ok(json) = serde_json::to_string(&frame) {
                render_frame(&json);
            }

            let document = web_sys::window().and_then(|w| w.document());
            if let Some(document) = document {
                update_hud(&document, &self.game.summary());
                update_dialogue(&document, self.game.dialogue_view().as_ref());
            }
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn set_disabled(document: &Document, id: &str, disabled: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = if disabled {
                el.set_attribute("disabled", "")
            } else {
                el.remove_attribute("disabled")
            };
        }
    }

    /// Update HUD elements in DOM
    fn update_hud(document: &Document, summary: &SessionSummary) {
        set_text(document, "#hud-score .hud-value", &summary.score.to_string());
        set_text(
            document,
            "#hud-risk .hud-value",
            &format!("{}/{}", summary.risk_buffer, summary.max_risk_buffer),
        );

        set_visible(document, "game-over", summary.game_over);
        if summary.game_over {
            set_text(document, "#final-score", &summary.score.to_string());
            set_text(
                document,
                "#final-stars",
                &format!("{}/{}", summary.visited, summary.total),
            );
            set_visible(document, "portfolio-complete", summary.portfolio_complete);
        }
    }

    /// Update the narrative/quiz overlay
    fn update_dialogue(document: &Document, view: Option<&DialogueView>) {
        let Some(view) = view else {
            set_visible(document, "dialogue", false);
            return;
        };
        set_visible(document, "dialogue", true);
        set_text(document, "#dialogue-title", view.body_name);
        set_text(document, "#dialogue-speaker", view.speaker.unwrap_or(""));
        set_text(document, "#dialogue-text", view.text);

        for i in 0..QUIZ_BUTTONS {
            let id = format!("quiz-option-{}", i);
            match view.options.get(i) {
                Some(text) => {
                    set_visible(document, &id, true);
                    set_text(document, &format!("#{}", id), text);
                    set_disabled(document, &id, view.result.is_some());
                }
                None => set_visible(document, &id, false),
            }
        }

        set_text(
            document,
            "#dialogue-message",
            view.message.as_deref().unwrap_or(""),
        );
        set_text(document, "#dialogue-next", view.advance_label);
        set_disabled(document, "dialogue-next", !view.can_advance);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dipper Quest starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let host = Rc::new(RefCell::new(Host {
            game: Game::new(seed),
            settings: Settings::load(),
            canvas: canvas.clone(),
            last_time: 0.0,
        }));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&document, &canvas, host.clone());
        setup_dialogue_buttons(&document, host.clone());
        setup_restart_button(&document, host.clone());
        setup_teardown(host.clone());

        request_animation_frame(host);

        log::info!("Dipper Quest running!");
    }

    fn setup_input_handlers(document: &Document, canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) {
        // Mouse move - tracked on the whole document so steering continues
        // when the pointer leaves the canvas
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut h = host.borrow_mut();
                let rect = h.viewport_rect();
                let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                h.game.pointer_move(client, rect);
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard - Escape dismisses the overlay, letters toggle display settings
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                let mut h = host.borrow_mut();
                if key == "Escape" {
                    h.game.close_dialogue();
                    return;
                }
                let settings = &mut h.settings;
                match key.as_str() {
                    "m" | "M" => settings.show_minimap = !settings.show_minimap,
                    "c" | "C" => settings.show_constellation = !settings.show_constellation,
                    "x" | "X" => settings.show_multipliers = !settings.show_multipliers,
                    "r" | "R" => settings.reduced_motion = !settings.reduced_motion,
                    _ => return,
                }
                log::info!("Settings: {:?}", settings);
                settings.save();
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click - may open a star's dialogue
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut h = host.borrow_mut();
                let rect = h.viewport_rect();
                let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                h.game.pointer_click(client, rect);
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_dialogue_buttons(document: &Document, host: Rc<RefCell<Host>>) {
        if let Some(btn) = document.get_element_by_id("dialogue-next") {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                host.borrow_mut().game.advance_dialogue();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        for index in 0..QUIZ_BUTTONS {
            if let Some(btn) = document.get_element_by_id(&format!("quiz-option-{}", index)) {
                let host = host.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    host.borrow_mut().game.select_option(index);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_restart_button(document: &Document, host: Rc<RefCell<Host>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                host.borrow_mut().game.restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the simulation when the page goes away
    fn setup_teardown(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            host.borrow_mut().game.stop();
        });
        let _ =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        let running = {
            let mut h = host.borrow_mut();
            h.frame(time);
            h.game.is_running()
        };

        // A stopped game is never rescheduled
        if running {
            request_animation_frame(host);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dipper Quest (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build for the real game");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let config = match args.next() {
        Some(path) => match load_config(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => dipper_quest::SimConfig::default(),
    };

    let summary = match autopilot::run(config, seed) {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("Invalid config: {}", e);
            std::process::exit(1);
        }
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_config(path: &str) -> Result<dipper_quest::SimConfig, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    dipper_quest::SimConfig::from_json(&json).map_err(|e| format!("{}: {}", path, e))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted player: flies to each star in turn and answers its quiz
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use dipper_quest::consts::SIM_DT;
    use dipper_quest::sim::{SessionSummary, world_to_screen};
    use dipper_quest::{ConfigError, Game, SimConfig, ViewportRect};

    /// Give up on a star after this many ticks (~20 s)
    const MAX_TICKS_PER_STAR: u32 = 1200;

    pub fn run(config: SimConfig, seed: u64) -> Result<SessionSummary, ConfigError> {
        let rect = ViewportRect::new(0.0, 0.0, config.viewport_width, config.viewport_height);
        let mut game = Game::with_config(config, seed)?;
        let star_count = game.state().bodies.len();

        for idx in 0..star_count {
            let (name, pos, radius) = {
                let body = &game.state().bodies[idx];
                (body.name, body.pos, body.radius)
            };
            log::info!("Heading for {}", name);

            let mut ticks = 0;
            while game.state().ship.pos.distance(pos) > radius && ticks < MAX_TICKS_PER_STAR {
                if game.summary().game_over {
                    break;
                }
                let state = game.state();
                if let Some(client) =
                    world_to_screen(pos, rect, state.config.viewport_size(), state.camera())
                {
                    game.pointer_move(client, rect);
                }
                game.update(SIM_DT);
                ticks += 1;
            }

            if game.summary().game_over {
                log::info!("Risk buffer depleted on the way to {}", name);
                break;
            }

            let state = game.state();
            let Some(client) =
                world_to_screen(pos, rect, state.config.viewport_size(), state.camera())
            else {
                continue;
            };
            let correct = game.state().bodies[idx].correct_option().unwrap_or(0);
            game.pointer_click(client, rect);
            game.advance_dialogue();
            game.advance_dialogue();
            game.select_option(correct);
            if let Some(view) = game.dialogue_view() {
                log::info!("{}: {}", view.body_name, view.message.unwrap_or_default());
            }
            game.advance_dialogue();
        }

        for event in game.drain_events() {
            log::debug!("{:?}", event);
        }
        let summary = game.summary();
        game.stop();
        Ok(summary)
    }
}
