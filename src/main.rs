//! Asteroid Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, Element, HtmlCanvasElement,
        HtmlElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use asteroid_runner::hud::HudSink;
    use asteroid_runner::render::{
        RenderSink, rock_outline, ship_triangle, star_field, thruster_length,
    };
    use asteroid_runner::sim::Asteroid;
    use asteroid_runner::{GameLoop, LoopControl};
    use glam::Vec2;

    /// Canvas 2D implementation of the render sink
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
    }

    impl RenderSink for CanvasRenderer {
        fn clear(&mut self) {
            self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        }

        fn draw_background(&mut self, time: f32) {
            let ctx = &self.ctx;
            ctx.set_fill_style_str("#fff");
            for star in star_field(time, self.width as f32, self.height as f32) {
                ctx.set_global_alpha(star.alpha as f64);
                ctx.fill_rect(
                    star.pos.x as f64,
                    star.pos.y as f64,
                    star.size as f64,
                    star.size as f64,
                );
            }
            ctx.set_global_alpha(1.0);
        }

        fn draw_player(&mut self, pos: Vec2, size: f32, time: f32) {
            let ctx = &self.ctx;
            let (x, y, s) = (pos.x as f64, pos.y as f64, size as f64);
            ctx.save();
            ctx.set_shadow_color("#00fff2");
            ctx.set_shadow_blur(15.0);

            // Hull
            let [nose, left, right] = ship_triangle(pos, size);
            ctx.set_fill_style_str("#00fff2");
            ctx.begin_path();
            ctx.move_to(nose.x as f64, nose.y as f64);
            ctx.line_to(left.x as f64, left.y as f64);
            ctx.line_to(right.x as f64, right.y as f64);
            ctx.close_path();
            ctx.fill();

            // Cockpit
            ctx.set_shadow_blur(0.0);
            ctx.set_fill_style_str("#002a3a");
            ctx.begin_path();
            let _ = ctx.ellipse(x, y, s * 0.15, s * 0.22, 0.0, 0.0, TAU);
            ctx.fill();

            // Thruster
            let flame = thruster_length(time) as f64;
            ctx.set_fill_style_str("#ff6b00");
            ctx.begin_path();
            ctx.move_to(x, y + s * 0.5);
            ctx.line_to(x - s * 0.12, y + s * 0.5 + flame);
            ctx.line_to(x + s * 0.12, y + s * 0.5 + flame);
            ctx.close_path();
            ctx.fill();

            ctx.restore();
        }

        fn draw_asteroid(&mut self, asteroid: &Asteroid) {
            let ctx = &self.ctx;
            let size = asteroid.size as f64;
            ctx.save();
            let _ = ctx.translate(asteroid.pos.x as f64, asteroid.pos.y as f64);
            let _ = ctx.rotate(asteroid.angle as f64);

            match ctx.create_radial_gradient(0.0, 0.0, size * 0.1, 0.0, 0.0, size * 0.6) {
                Ok(gradient) => {
                    let _ = gradient.add_color_stop(0.0, "#5a524a");
                    let _ = gradient.add_color_stop(1.0, "#2a211a");
                    ctx.set_fill_style_canvas_gradient(&gradient);
                }
                Err(_) => ctx.set_fill_style_str("#3a3129"),
            }

            ctx.begin_path();
            for (i, p) in rock_outline(asteroid).iter().enumerate() {
                if i == 0 {
                    ctx.move_to(p.x as f64, p.y as f64);
                } else {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
            }
            ctx.close_path();
            ctx.fill();

            ctx.set_line_width(2.0);
            ctx.set_stroke_style_str("rgba(255,255,255,0.1)");
            ctx.stroke();

            ctx.restore();
        }
    }

    /// Score and banner elements in the page
    struct DomHud {
        score: Option<Element>,
        message: Option<Element>,
    }

    impl HudSink for DomHud {
        fn set_score_text(&mut self, text: &str) {
            if let Some(el) = &self.score {
                el.set_text_content(Some(text));
            }
        }

        fn show_message(&mut self, text: &str) {
            if let Some(el) = &self.message {
                el.set_text_content(Some(text));
                let _ = el.class_list().remove_1("hidden");
            }
        }

        fn hide_message(&mut self) {
            if let Some(el) = &self.message {
                let _ = el.class_list().add_1("hidden");
            }
        }
    }

    /// Game instance holding all state
    struct App {
        game: GameLoop,
        renderer: CanvasRenderer,
        hud: DomHud,
        joystick_area: Option<Element>,
        joystick_dot: Option<HtmlElement>,
    }

    impl App {
        /// Start trigger; schedules the first frame when a run begins
        fn try_start(app: &Rc<RefCell<App>>) {
            let started = {
                let mut g = app.borrow_mut();
                let g = &mut *g;
                g.game.start(now_ms(), &mut g.hud)
            };
            if started {
                request_animation_frame(app.clone());
            }
        }

        /// Joystick offset of a client point from the joystick center
        fn joystick_offset(&self, client_x: f64, client_y: f64) -> Option<(f32, f32)> {
            let rect = self.joystick_area.as_ref()?.get_bounding_client_rect();
            let cx = rect.left() + rect.width() / 2.0;
            let cy = rect.top() + rect.height() / 2.0;
            Some(((client_x - cx) as f32, (client_y - cy) as f32))
        }

        fn move_dot(&self, offset: Vec2) {
            if let Some(dot) = &self.joystick_dot {
                let style = dot.style();
                let _ = style.set_property("left", &format!("calc(50% + {}px)", offset.x));
                let _ = style.set_property("top", &format!("calc(50% + {}px)", offset.y));
            }
        }

        fn pointer_down(&mut self, client_x: f64, client_y: f64) {
            if let Some((dx, dy)) = self.joystick_offset(client_x, client_y) {
                if let Some(knob) = self.game.input.begin_drag(dx, dy) {
                    self.move_dot(knob);
                }
            }
        }

        fn pointer_move(&mut self, client_x: f64, client_y: f64) {
            if !self.game.input.is_dragging() {
                return;
            }
            if let Some((dx, dy)) = self.joystick_offset(client_x, client_y) {
                if let Some(knob) = self.game.input.drag(dx, dy) {
                    self.move_dot(knob);
                }
            }
        }

        fn pointer_up(&mut self) {
            if !self.game.input.is_dragging() {
                return;
            }
            self.game.input.release_drag();
            self.move_dot(Vec2::ZERO);
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Asteroid Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
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

        let seed = js_sys::Date::now() as u64;
        let game = GameLoop::new(seed);
        canvas.set_width(game.state.tuning.canvas_width as u32);
        canvas.set_height(game.state.tuning.canvas_height as u32);
        log::info!("Game initialized with seed: {}", seed);

        let mut hud = DomHud {
            score: document.get_element_by_id("score"),
            message: document.get_element_by_id("message"),
        };
        if hud.score.is_none() || hud.message.is_none() {
            log::warn!("HUD elements missing; score or messages will not be shown");
        }
        game.show_intro(&mut hud);

        let renderer = CanvasRenderer {
            ctx,
            width: game.state.tuning.canvas_width as f64,
            height: game.state.tuning.canvas_height as f64,
        };
        let joystick_dot = document
            .get_element_by_id("joystickDot")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let app = Rc::new(RefCell::new(App {
            game,
            renderer,
            hud,
            joystick_area: document.get_element_by_id("joystickArea"),
            joystick_dot,
        }));

        setup_keyboard(app.clone());
        setup_joystick(app.clone());
        setup_start_button(app.clone());

        // Paint the idle field behind the title banner
        {
            let mut g = app.borrow_mut();
            let g = &mut *g;
            asteroid_runner::render::draw_frame(&g.game.state, &mut g.renderer, 0.0);
        }

        log::info!("Asteroid Runner ready");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.input.set_key(&event.key(), true);
                if event.code() == "Space" {
                    event.prevent_default();
                    App::try_start(&app);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.input.set_key(&event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys released while unfocused never fire keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.input.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_joystick(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let Some(area) = app.borrow().joystick_area.clone() else {
            log::info!("No joystick area; touch controls disabled");
            return;
        };

        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut()
                        .pointer_down(touch.client_x() as f64, touch.client_y() as f64);
                }
            });
            let _ = area.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut()
                        .pointer_move(touch.client_x() as f64, touch.client_y() as f64);
                }
            });
            let _ = area.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().pointer_up();
            });
            let _ = area.add_event_listener_with_callback_and_add_event_listener_options(
                "touchend",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Mouse drag for trackpads/Chromebooks
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.prevent_default();
                app.borrow_mut()
                    .pointer_down(event.client_x() as f64, event.client_y() as f64);
            });
            let _ = area
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .pointer_move(event.client_x() as f64, event.client_y() as f64);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().pointer_up();
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("startBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                App::try_start(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let control = {
            let mut g = app.borrow_mut();
            let g = &mut *g;
            g.game.frame(time, &mut g.renderer, &mut g.hud)
        };

        if control == LoopControl::Continue {
            request_animation_frame(app);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use asteroid_runner::autopilot::steer;
    use asteroid_runner::hud::{HudSink, RecordingHud};
    use asteroid_runner::render::DrawLog;
    use asteroid_runner::{GameLoop, LoopControl, Tuning, TuningError};

    /// 60 Hz frame time in milliseconds
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Play one run with the autopilot; returns survival seconds
    pub fn run(seed: u64, tuning: Tuning, max_secs: f64) -> Result<f32, TuningError> {
        let mut game = GameLoop::with_tuning(seed, tuning)?;
        let mut hud = RecordingHud::default();
        let mut draw_log = DrawLog::default();

        game.show_intro(&mut hud);
        let mut now = 0.0;
        game.start(now, &mut hud);

        while now < max_secs * 1000.0 {
            now += FRAME_MS;
            let dir = steer(&game.state);
            game.input.clear();
            // Feed the pilot through the joystick like a touch player
            game.input.begin_drag(dir.x * 50.0, dir.y * 50.0);
            if game.frame(now, &mut draw_log, &mut hud) == LoopControl::Stop {
                break;
            }
        }

        if let Some(message) = &hud.message {
            for line in message.lines().filter(|l| !l.is_empty()) {
                log::info!("{}", line);
            }
        } else {
            hud.show_message("Time limit reached");
            log::info!("Survived the full {}s", max_secs);
        }
        log::info!(
            "Frames drawn: {}, asteroids on screen: {}",
            draw_log.frames,
            game.state.asteroids.len()
        );
        Ok(game.state.clock.survival)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroid Runner (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(42);

    let tuning = match std::env::var("ASTEROID_RUNNER_TUNING") {
        Ok(path) => {
            let loaded = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| {
                    asteroid_runner::Tuning::from_json(&json).map_err(|e| e.to_string())
                });
            match loaded {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::error!("Failed to load tuning from {}: {}", path, e);
                    std::process::exit(1);
                }
            }
        }
        Err(_) => asteroid_runner::Tuning::default(),
    };

    log::info!("Seed: {}", seed);
    let survival = match headless::run(seed, tuning, 120.0) {
        Ok(survival) => survival,
        Err(e) => {
            log::error!("Invalid tuning: {}", e);
            std::process::exit(1);
        }
    };
    println!("Survival time: {}s", asteroid_runner::format_seconds(survival));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
