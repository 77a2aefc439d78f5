//! Fidgeteer entry point
//!
//! Handles platform-specific initialization and mounts the widget loops.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, Event, HtmlCanvasElement, HtmlElement, KeyboardEvent, PointerEvent};

    use fidgeteer::Layout;
    use fidgeteer::platform::{AnimationLoop, EventListener, capture, dom};
    use fidgeteer::renderer::overlay::OverlayCanvas;
    use fidgeteer::renderer::{SdfRenderState, build_scene};
    use fidgeteer::sim::{ButtonEffect, Command, FidgetState, PressOutcome, Reaction, Section};

    type AppRef = Rc<RefCell<App>>;

    /// Rolling FPS over the last 60 frames
    struct FpsCounter {
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl FpsCounter {
        fn new() -> Self {
            Self {
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn record(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest sample sits at the next write slot
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }
    }

    fn overlay_id(effect: ButtonEffect) -> Option<&'static str> {
        match effect {
            ButtonEffect::MatrixRain => Some("overlay-matrix"),
            ButtonEffect::Rain => Some("overlay-rain"),
            ButtonEffect::Vortex => Some("overlay-vortex"),
            _ => None,
        }
    }

    /// Application instance holding all state and scoped browser handles
    struct App {
        state: FidgetState,
        canvas: HtmlCanvasElement,
        render_state: Option<SdfRenderState>,
        overlay_canvases: Vec<(ButtonEffect, OverlayCanvas)>,
        effect_layer: Option<HtmlElement>,

        /// Loop and listeners of the mounted section
        section_loop: Option<AnimationLoop>,
        section_listeners: Vec<EventListener>,
        overlay_loops: Vec<(ButtonEffect, AnimationLoop)>,
        /// Page-lifetime listeners (navigation, keys, resize)
        global_listeners: Vec<EventListener>,

        fps: FpsCounter,
        shown_unlocked: Option<usize>,
    }

    impl App {
        fn new(canvas: HtmlCanvasElement, seed: u64) -> Self {
            let (viewport, _) = dom::viewport_metrics();
            let mut overlay_canvases = Vec::new();
            for effect in ButtonEffect::ALL {
                let Some(id) = overlay_id(effect) else {
                    continue;
                };
                match dom::by_id::<HtmlCanvasElement>(id).and_then(OverlayCanvas::new) {
                    Ok(overlay) => overlay_canvases.push((effect, overlay)),
                    Err(e) => log::warn!("Overlay {} unavailable: {:?}", id, e),
                }
            }

            Self {
                state: FidgetState::new(Layout::new(viewport.x, viewport.y), seed),
                canvas,
                render_state: None,
                overlay_canvases,
                effect_layer: dom::by_id::<HtmlElement>("effects").ok(),
                section_loop: None,
                section_listeners: Vec::new(),
                overlay_loops: Vec::new(),
                global_listeners: Vec::new(),
                fps: FpsCounter::new(),
                shown_unlocked: None,
            }
        }

        fn resize(&mut self) {
            let (width, height) = dom::fit_canvas(&self.canvas);
            let (css, dpr) = dom::viewport_metrics();
            self.state.resize(css.x, css.y);
            if let Some(render_state) = &mut self.render_state {
                render_state.resize(width, height, dpr);
            }
            for (_, overlay) in &self.overlay_canvases {
                overlay.resize(css.x, css.y);
            }
        }

        /// One animation frame of the mounted section
        fn frame(&mut self, time: f64) {
            self.state.tick(time);
            self.fps.record(time);

            if self.state.section.uses_canvas() {
                self.render(time);
            }
            if self.state.section == Section::Buttons {
                self.sync_buttons(time);
            }
            self.update_hud(time);
        }

        fn render(&mut self, time: f64) {
            let Some(render_state) = &mut self.render_state else {
                return;
            };
            let scene = build_scene(&self.state, time);
            match render_state.render(&scene, time) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = render_state.size;
                    let ratio = render_state.pixel_ratio;
                    render_state.resize(w, h, ratio);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        fn draw_overlay(&mut self, effect: ButtonEffect, time: f64) {
            let theme = self.state.settings.theme;
            let Some(canvas) = self
                .overlay_canvases
                .iter()
                .find(|(e, _)| *e == effect)
                .map(|(_, c)| c)
            else {
                return;
            };
            let overlays = &mut self.state.overlays;
            match effect {
                ButtonEffect::MatrixRain => {
                    if let Some(matrix) = &mut overlays.matrix {
                        if matrix.update(time) > 0 {
                            canvas.draw_matrix(matrix);
                        }
                    }
                }
                ButtonEffect::Rain => {
                    if let Some(rain) = &mut overlays.rain {
                        if rain.update(time) > 0 {
                            canvas.draw_rain(rain, theme);
                        }
                    }
                }
                ButtonEffect::Vortex => {
                    if let Some(vortex) = &mut overlays.vortex {
                        if vortex.update(time) > 0 {
                            canvas.draw_vortex(vortex, theme);
                        }
                    }
                }
                _ => {}
            }
        }

        /// Mirror button effect state onto the DOM
        fn sync_buttons(&self, time: f64) {
            let buttons = &self.state.buttons;
            if let Some(layer) = &self.effect_layer {
                for effect in ButtonEffect::ALL {
                    dom::set_class(layer, effect.css_class(), buttons.is_active(effect));
                }
                if buttons.is_active(ButtonEffect::PointerWave) {
                    let style = layer.style();
                    let _ = style.set_property("--wave-x", &format!("{:.1}%", buttons.pointer_wave.x));
                    let _ = style.set_property("--wave-y", &format!("{:.1}%", buttons.pointer_wave.y));
                }
            }
            for index in 0..ButtonEffect::ALL.len() {
                dom::set_class_by_id(
                    &format!("button-{index}"),
                    "rippling",
                    buttons.ripple_progress(index, time).is_some(),
                );
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self, time: f64) {
            let hud = self.state.hud(time);

            dom::set_text("hud-score", &hud.score.to_string());
            dom::set_text("hud-speed", hud.speed_label);
            dom::set_text("hud-shapes", &hud.shape_count.to_string());
            dom::set_text(
                "hud-bubbles",
                &format!("{}/{}", hud.bubbles_popped, hud.bubble_count),
            );

            dom::set_visible("hud-fps", self.state.settings.show_fps);
            if self.state.settings.show_fps {
                dom::set_text("hud-fps-value", &self.fps.fps.to_string());
            }

            dom::set_visible("hud-toast", hud.toast.is_some());
            dom::set_text("hud-toast", hud.toast.unwrap_or_default());

            dom::set_visible("hud-challenge", hud.challenge.is_some());
            dom::set_text(
                "hud-challenge-text",
                hud.challenge.as_deref().unwrap_or_default(),
            );
            let remaining = hud
                .challenge_remaining
                .map(|s| format!("{:.1}s", s))
                .unwrap_or_default();
            dom::set_text("hud-challenge-time", &remaining);

            // The list only changes when something unlocks
            let unlocked = hud.achievements.iter().filter(|a| a.2).count();
            if self.shown_unlocked != Some(unlocked) {
                self.shown_unlocked = Some(unlocked);
                let items: String = hud
                    .achievements
                    .iter()
                    .map(|(title, desc, unlocked)| {
                        format!(
                            "<li class=\"{}\"><strong>{}</strong> <span>{}</span></li>",
                            if *unlocked { "unlocked" } else { "locked" },
                            title,
                            desc
                        )
                    })
                    .collect();
                if let Some(list) = dom::document()
                    .ok()
                    .and_then(|d| d.get_element_by_id("hud-achievements"))
                {
                    list.set_inner_html(&items);
                }
            }
        }
    }

    fn apply_theme(app: &App) {
        let theme = app.state.settings.theme;
        if let Some(body) = dom::document().ok().and_then(|d| d.body()) {
            dom::set_class(&body, "dark", theme.is_dark());
            dom::set_class(&body, "light", !theme.is_dark());
        }
        dom::set_text("theme-label", theme.as_str());
        dom::set_text("quality-label", app.state.settings.quality.as_str());
    }

    /// Drop the current section's loop and listeners, then mount `section`
    fn mount_section(app: &AppRef, section: Section) -> Result<(), JsValue> {
        {
            let mut a = app.borrow_mut();
            a.section_loop = None;
            a.section_listeners.clear();
            a.overlay_loops.clear();
            for (_, overlay) in &a.overlay_canvases {
                overlay.clear();
                dom::set_visible(&overlay.canvas().id(), false);
            }
            if let Some(layer) = &a.effect_layer {
                for effect in ButtonEffect::ALL {
                    dom::set_class(layer, effect.css_class(), false);
                }
            }
        }

        for s in Section::ALL {
            dom::set_visible(&format!("section-{}", s.key()), s == section);
        }
        dom::set_visible("canvas", section.uses_canvas());
        dom::set_visible("back", section != Section::Landing);
        dom::set_text("section-title", section.title());

        if section == Section::Landing {
            return Ok(());
        }

        let listeners = if section.uses_canvas() {
            canvas_listeners(app)?
        } else {
            vec![pointer_wave_listener(app)?]
        };

        let weak = Rc::downgrade(app);
        let frame_loop = AnimationLoop::start(move |time| {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().frame(time);
            }
        })?;

        let mut a = app.borrow_mut();
        a.section_listeners = listeners;
        a.section_loop = Some(frame_loop);
        Ok(())
    }

    fn canvas_listeners(app: &AppRef) -> Result<Vec<EventListener>, JsValue> {
        let canvas = app.borrow().canvas.clone();
        let mut listeners = Vec::with_capacity(4);

        {
            let weak = Rc::downgrade(app);
            let target = canvas.clone();
            listeners.push(EventListener::typed(
                &canvas,
                "pointerdown",
                move |event: PointerEvent| {
                    let Some(app) = weak.upgrade() else { return };
                    let _ = target.set_pointer_capture(event.pointer_id());
                    let point = dom::local_point(&target, event.client_x(), event.client_y());
                    let reaction = app.borrow_mut().state.pointer_down(point, dom::now());
                    react(&app, reaction);
                },
            )?);
        }

        {
            let weak = Rc::downgrade(app);
            let target = canvas.clone();
            listeners.push(EventListener::typed(
                &canvas,
                "pointermove",
                move |event: PointerEvent| {
                    let Some(app) = weak.upgrade() else { return };
                    let point = dom::local_point(&target, event.client_x(), event.client_y());
                    let reaction = app.borrow_mut().state.pointer_move(point, dom::now());
                    react(&app, reaction);
                },
            )?);
        }

        for event in ["pointerup", "pointerleave", "pointercancel"] {
            let weak = Rc::downgrade(app);
            listeners.push(EventListener::new(&canvas, event, move |_: Event| {
                if let Some(app) = weak.upgrade() {
                    app.borrow_mut().state.pointer_up();
                }
            })?);
        }

        Ok(listeners)
    }

    /// Viewport-wide pointer tracking for the buttons section
    fn pointer_wave_listener(app: &AppRef) -> Result<EventListener, JsValue> {
        let window = dom::window()?;
        let weak = Rc::downgrade(app);
        EventListener::typed(&window, "pointermove", move |event: PointerEvent| {
            if let Some(app) = weak.upgrade() {
                let point = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                app.borrow_mut().state.pointer_move(point, dom::now());
            }
        })
    }

    fn start_overlay(app: &AppRef, effect: ButtonEffect) -> Result<(), JsValue> {
        let Some(id) = overlay_id(effect) else {
            return Ok(());
        };
        {
            let a = app.borrow();
            if let Some((_, overlay)) = a.overlay_canvases.iter().find(|(e, _)| *e == effect) {
                overlay.resize(a.state.layout.width, a.state.layout.height);
            }
        }
        dom::set_visible(id, true);

        let weak: Weak<RefCell<App>> = Rc::downgrade(app);
        let overlay_loop = AnimationLoop::start(move |time| {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().draw_overlay(effect, time);
            }
        })?;
        let mut a = app.borrow_mut();
        a.overlay_loops.retain(|(e, _)| *e != effect);
        a.overlay_loops.push((effect, overlay_loop));
        Ok(())
    }

    fn stop_overlay(app: &AppRef, effect: ButtonEffect) {
        let mut a = app.borrow_mut();
        a.overlay_loops.retain(|(e, _)| *e != effect);
        if let Some((_, overlay)) = a.overlay_canvases.iter().find(|(e, _)| *e == effect) {
            overlay.clear();
            dom::set_visible(&overlay.canvas().id(), false);
        }
    }

    /// Platform side effects of a state change
    fn react(app: &AppRef, reaction: Reaction) {
        let result = match reaction {
            Reaction::SectionChanged { to, .. } => mount_section(app, to),
            Reaction::ThemeChanged => {
                apply_theme(&app.borrow());
                Ok(())
            }
            Reaction::Button(PressOutcome::Started(effect)) if effect.has_overlay() => {
                start_overlay(app, effect)
            }
            Reaction::Button(PressOutcome::Stopped(effect)) if effect.has_overlay() => {
                stop_overlay(app, effect);
                Ok(())
            }
            Reaction::Button(PressOutcome::NeedsSnapshot) => {
                let mut a = app.borrow_mut();
                let captured = capture::snapshot_to_css(&a.canvas);
                a.state.buttons.begin_glitch(captured, dom::now());
                Ok(())
            }
            Reaction::Button(_) | Reaction::Slider(_) | Reaction::None => Ok(()),
        };
        if let Err(e) = result {
            log::warn!("Failed to apply {:?}", e);
        }
    }

    fn run_command(app: &AppRef, command: Command) {
        let reaction = app.borrow_mut().state.apply(command, dom::now());
        // Settings labels follow every command
        apply_theme(&app.borrow());
        react(app, reaction);
    }

    fn setup_global_listeners(app: &AppRef) -> Result<(), JsValue> {
        let window = dom::window()?;
        let document = dom::document()?;
        let mut listeners = Vec::new();

        // Every control carries its command in a data attribute
        {
            let weak = Rc::downgrade(app);
            listeners.push(EventListener::new(&document, "click", move |event: Event| {
                let Some(app) = weak.upgrade() else { return };
                let command = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest("[data-command]").ok().flatten())
                    .and_then(|el| el.get_attribute("data-command"));
                let Some(raw) = command else { return };
                match Command::parse(&raw) {
                    Some(cmd) => run_command(&app, cmd),
                    None => log::warn!("Unknown command: {}", raw),
                }
            })?);
        }

        // Keyboard
        {
            let weak = Rc::downgrade(app);
            listeners.push(EventListener::typed(
                &window,
                "keydown",
                move |event: KeyboardEvent| {
                    let Some(app) = weak.upgrade() else { return };
                    match event.key().as_str() {
                        "F2" => match app.borrow().state.debug_json() {
                            Ok(json) => log::info!("State:\n{}", json),
                            Err(e) => log::error!("State dump failed: {}", e),
                        },
                        "Escape" => run_command(&app, Command::Navigate(Section::Landing)),
                        _ => {}
                    }
                },
            )?);
        }

        {
            let weak = Rc::downgrade(app);
            listeners.push(EventListener::new(&window, "resize", move |_: Event| {
                if let Some(app) = weak.upgrade() {
                    app.borrow_mut().resize();
                }
            })?);
        }

        app.borrow_mut().global_listeners = listeners;
        Ok(())
    }

    async fn init_gpu(canvas: &HtmlCanvasElement) -> Result<SdfRenderState, JsValue> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (width, height) = dom::fit_canvas(canvas);
        let (_, dpr) = dom::viewport_metrics();
        let mut render_state = SdfRenderState::new(surface, &adapter, width, height, dpr)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get device: {e}")))?;
        render_state.set_start_time(dom::now());
        Ok(render_state)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Fidgeteer starting...");

        dom::set_visible("loading", false);

        let canvas: HtmlCanvasElement = dom::by_id("canvas")?;
        dom::fit_canvas(&canvas);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(canvas.clone(), seed)));
        log::info!("State initialized with seed: {}", seed);

        setup_global_listeners(&app)?;
        apply_theme(&app.borrow());
        mount_section(&app, Section::Landing)?;

        // Widgets stay usable without a GPU; only the canvas goes dark
        match init_gpu(&canvas).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("GPU initialization failed, canvas disabled: {:?}", e);
                dom::set_class(&canvas, "no-gpu", true);
            }
        }

        log::info!("Fidgeteer running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_app::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fidgeteer (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    println!("\nRunning headless widget demo...");
    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a few widgets without a browser and print what happened
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use fidgeteer::Layout;
    use fidgeteer::sim::{Command, FidgetState, Section};

    let mut state = FidgetState::new(Layout::new(1200.0, 800.0), 42);
    let mut now = 0.0;

    state.apply(Command::Navigate(Section::Slide), now);
    state.apply(Command::StartChallenge(0), now);
    for (index, value) in [100.0, 75.0, 50.0, 25.0, 0.0].into_iter().enumerate() {
        now += 200.0;
        state.apply(Command::SetSlider(index, value), now);
    }
    let hud = state.hud(now);
    println!(
        "Sliders {:?} -> score {}, unlocked {}",
        state.sliders.positions,
        hud.score,
        hud.achievements.iter().filter(|a| a.2).count()
    );

    state.apply(Command::Navigate(Section::Spin), now);
    for _ in 0..4 {
        state.apply(Command::SpinFaster, now);
    }
    let mut frames = 0;
    while state.spinner.angular_velocity != 0.0 && frames < 10_000 {
        now += 16.0;
        state.tick(now);
        frames += 1;
    }
    println!("Spinner came to rest after {} frames", frames);

    state.apply(Command::Navigate(Section::Pop), now);
    for index in [0, 0, 5] {
        state.apply(Command::PopBubble(index), now);
    }
    println!(
        "Bubbles popped: {}/{}",
        state.bubbles.popped_count(),
        state.bubbles.len()
    );

    match state.debug_json() {
        Ok(json) => log::debug!("Final state:\n{}", json),
        Err(e) => log::error!("State dump failed: {}", e),
    }
    println!("✓ Headless demo finished");
}
