//! Page state container
//!
//! `FidgetState` owns every widget controller plus the UI settings. The
//! platform layer feeds it commands and pointer input with an explicit
//! timestamp and reads it back to render.

use glam::Vec2;
use serde::Serialize;

use super::bubbles::BubbleGrid;
use super::buttons::{ButtonBoard, ButtonEffect, PressOutcome};
use super::challenge::{self, ActiveChallenge};
use super::effects::{MatrixRain, Rainfall, Vortex};
use super::shapes::ShapeBoard;
use super::sliders::{SliderBank, SliderOutcome};
use super::spinner::{SpeedLabel, Spinner, SpinnerDesign};
use crate::consts::*;
use crate::layout::Layout;
use crate::settings::Settings;

/// Top-level page sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Section {
    #[default]
    Landing,
    Buttons,
    Pop,
    Drag,
    Slide,
    Spin,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Landing,
        Section::Buttons,
        Section::Pop,
        Section::Drag,
        Section::Slide,
        Section::Spin,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Landing => "landing",
            Section::Buttons => "buttons",
            Section::Pop => "pop",
            Section::Drag => "drag",
            Section::Slide => "slide",
            Section::Spin => "spin",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Landing => "Fidgeteer",
            Section::Buttons => "Buttons",
            Section::Pop => "Pop",
            Section::Drag => "Drag",
            Section::Slide => "Slide",
            Section::Spin => "Spin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Section::ALL.into_iter().find(|sec| sec.key() == s)
    }

    /// Sections drawn on the GPU canvas
    pub fn uses_canvas(&self) -> bool {
        matches!(
            self,
            Section::Pop | Section::Drag | Section::Slide | Section::Spin
        )
    }
}

/// A discrete UI action, parsed from `data-command` attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Navigate(Section),
    ToggleTheme,
    CycleQuality,
    ToggleFps,
    PressButton(usize),
    PopBubble(usize),
    ResetBubbles,
    AddBubbleRow,
    RemoveBubbleRow,
    AddShape,
    RemoveShape,
    ResetShapes,
    CycleShape,
    SetSlider(usize, f32),
    AddSlider,
    RemoveSlider,
    StartChallenge(usize),
    /// Start the catalog entry after the last one started
    NextChallenge,
    SpinFaster,
    SpinSlower,
    ToggleDirection,
    ToggleAutoSpin,
    SetDesign(SpinnerDesign),
}

impl Command {
    /// Parse a command string such as `nav:pop`, `button:3` or `spin:design:minimal`
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split(':');
        let head = parts.next()?;
        let arg = parts.next();
        let extra = parts.next();

        let index = |a: Option<&str>| a.and_then(|v| v.parse::<usize>().ok());

        let cmd = match (head, arg) {
            ("nav", Some(section)) => Command::Navigate(Section::from_str(section)?),
            ("theme", None) => Command::ToggleTheme,
            ("quality", None) => Command::CycleQuality,
            ("fps", None) => Command::ToggleFps,
            ("button", a) => Command::PressButton(index(a)?),
            ("bubble", a) => Command::PopBubble(index(a)?),
            ("bubbles", Some("reset")) => Command::ResetBubbles,
            ("bubbles", Some("add-row")) => Command::AddBubbleRow,
            ("bubbles", Some("remove-row")) => Command::RemoveBubbleRow,
            ("shapes", Some("add")) => Command::AddShape,
            ("shapes", Some("remove")) => Command::RemoveShape,
            ("shapes", Some("reset")) => Command::ResetShapes,
            ("shapes", Some("cycle")) => Command::CycleShape,
            ("slider", a) => {
                let value = extra?.parse::<f32>().ok().filter(|v| v.is_finite())?;
                Command::SetSlider(index(a)?, value)
            }
            ("sliders", Some("add")) => Command::AddSlider,
            ("sliders", Some("remove")) => Command::RemoveSlider,
            ("challenge", Some("next")) => Command::NextChallenge,
            ("challenge", a) => Command::StartChallenge(index(a)?),
            ("spin", Some("faster")) => Command::SpinFaster,
            ("spin", Some("slower")) => Command::SpinSlower,
            ("spin", Some("direction")) => Command::ToggleDirection,
            ("spin", Some("auto")) => Command::ToggleAutoSpin,
            ("spin", Some("design")) => Command::SetDesign(SpinnerDesign::from_str(extra?)?),
            _ => return None,
        };
        Some(cmd)
    }
}

/// What the platform layer has to react to after a command or input
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    None,
    SectionChanged { from: Section, to: Section },
    ThemeChanged,
    Button(PressOutcome),
    Slider(SliderOutcome),
}

/// Canvas overlay simulations for the button effects that have one
#[derive(Debug, Clone, Default)]
pub struct Overlays {
    pub matrix: Option<MatrixRain>,
    pub rain: Option<Rainfall>,
    pub vortex: Option<Vortex>,
}

impl Overlays {
    pub fn is_empty(&self) -> bool {
        self.matrix.is_none() && self.rain.is_none() && self.vortex.is_none()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn update(&mut self, now: f64) {
        if let Some(m) = &mut self.matrix {
            m.update(now);
        }
        if let Some(r) = &mut self.rain {
            r.update(now);
        }
        if let Some(v) = &mut self.vortex {
            v.update(now);
        }
    }
}

/// Read-only HUD values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub score: u64,
    /// (title, description, unlocked)
    pub achievements: Vec<(&'static str, &'static str, bool)>,
    pub toast: Option<&'static str>,
    pub challenge: Option<String>,
    /// Seconds left against the nominal limit
    pub challenge_remaining: Option<f64>,
    pub speed_label: &'static str,
    pub shape_count: usize,
    pub bubbles_popped: usize,
    pub bubble_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FidgetState {
    pub settings: Settings,
    pub section: Section,
    pub layout: Layout,
    pub bubbles: BubbleGrid,
    pub shapes: ShapeBoard,
    pub sliders: SliderBank,
    pub spinner: Spinner,
    pub buttons: ButtonBoard,
    #[serde(skip)]
    pub overlays: Overlays,
    /// Slider held by the pointer
    pub slider_grab: Option<usize>,
    seed: u64,
    next_challenge: usize,
}

impl FidgetState {
    pub fn new(layout: Layout, seed: u64) -> Self {
        Self {
            settings: Settings::default(),
            section: Section::Landing,
            layout,
            bubbles: BubbleGrid::new(),
            shapes: ShapeBoard::new(layout.drag_bounds()),
            sliders: SliderBank::new(),
            spinner: Spinner::new(),
            buttons: ButtonBoard::new(),
            overlays: Overlays::default(),
            slider_grab: None,
            seed,
            next_challenge: 0,
        }
    }

    /// Canvas resized (CSS pixels)
    pub fn resize(&mut self, width: f32, height: f32) {
        self.layout = Layout::new(width, height);
        self.shapes.set_bounds(self.layout.drag_bounds());
    }

    fn next_seed(&mut self) -> u64 {
        self.seed = self.seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.seed
    }

    /// Switch sections, unmounting the one being left
    pub fn navigate(&mut self, to: Section) -> Reaction {
        let from = self.section;
        if from == to {
            return Reaction::None;
        }
        self.unmount(from);
        self.section = to;
        log::info!("Section: {} -> {}", from.key(), to.key());
        Reaction::SectionChanged { from, to }
    }

    /// Cancel everything a section scheduled or is holding
    fn unmount(&mut self, section: Section) {
        match section {
            Section::Landing => {}
            Section::Buttons => {
                self.buttons.clear_transients();
                self.overlays.clear();
            }
            Section::Pop => self.bubbles.clear_transients(),
            Section::Drag => self.shapes.pointer_up(),
            Section::Slide => {
                self.slider_grab = None;
                self.sliders.clear_transients();
            }
            Section::Spin => self.spinner.end_drag(),
        }
    }

    pub fn apply(&mut self, command: Command, now: f64) -> Reaction {
        match command {
            Command::Navigate(section) => return self.navigate(section),
            Command::ToggleTheme => {
                self.settings.toggle_theme();
                return Reaction::ThemeChanged;
            }
            Command::CycleQuality => {
                self.settings.cycle_quality();
            }
            Command::ToggleFps => self.settings.show_fps = !self.settings.show_fps,
            Command::PressButton(index) => return self.press_button(index, now),
            Command::PopBubble(index) => {
                self.bubbles.pop(index, now);
            }
            Command::ResetBubbles => self.bubbles.reset(),
            Command::AddBubbleRow => {
                self.bubbles.add_row();
            }
            Command::RemoveBubbleRow => {
                self.bubbles.remove_row();
            }
            Command::AddShape => {
                self.shapes.add_shape();
            }
            Command::RemoveShape => {
                self.shapes.remove_shape();
            }
            Command::ResetShapes => self.shapes.reset(),
            Command::CycleShape => {
                self.shapes.cycle_selected();
            }
            Command::SetSlider(index, value) => {
                return Reaction::Slider(self.sliders.set(index, value, now));
            }
            Command::AddSlider => self.sliders.add_slider(),
            Command::RemoveSlider => {
                self.sliders.remove_slider();
                if self.slider_grab.is_some_and(|i| i >= self.sliders.len()) {
                    self.slider_grab = None;
                }
            }
            Command::StartChallenge(index) => {
                let catalog = challenge::catalog();
                if let Some(c) = catalog.get(index % catalog.len().max(1)) {
                    self.sliders.start_challenge(c.clone(), now);
                    self.next_challenge = (index + 1) % catalog.len();
                }
            }
            Command::NextChallenge => {
                return self.apply(Command::StartChallenge(self.next_challenge), now);
            }
            Command::SpinFaster => self.spinner.adjust_velocity(SPIN_NUDGE),
            Command::SpinSlower => self.spinner.adjust_velocity(-SPIN_NUDGE),
            Command::ToggleDirection => self.spinner.toggle_direction(),
            Command::ToggleAutoSpin => {
                self.spinner.toggle_auto_spin();
            }
            Command::SetDesign(design) => self.spinner.set_design(design),
        }
        Reaction::None
    }

    fn press_button(&mut self, index: usize, now: f64) -> Reaction {
        let outcome = self.buttons.press(index, now);
        match outcome {
            PressOutcome::Started(effect) => self.start_overlay(effect),
            PressOutcome::Stopped(effect) => self.stop_overlay(effect),
            PressOutcome::Ignored | PressOutcome::NeedsSnapshot => {}
        }
        Reaction::Button(outcome)
    }

    fn start_overlay(&mut self, effect: ButtonEffect) {
        let (w, h) = (self.layout.width, self.layout.height);
        let scale = self.settings.quality.particle_scale();
        let seed = self.next_seed();
        match effect {
            ButtonEffect::MatrixRain => self.overlays.matrix = Some(MatrixRain::new(w, h, seed)),
            ButtonEffect::Rain => self.overlays.rain = Some(Rainfall::new(w, h, scale, seed)),
            ButtonEffect::Vortex => self.overlays.vortex = Some(Vortex::new(w, h, scale, seed)),
            _ => {}
        }
    }

    fn stop_overlay(&mut self, effect: ButtonEffect) {
        match effect {
            ButtonEffect::MatrixRain => self.overlays.matrix = None,
            ButtonEffect::Rain => self.overlays.rain = None,
            ButtonEffect::Vortex => self.overlays.vortex = None,
            _ => {}
        }
    }

    // === Pointer input (canvas CSS pixels) ===

    pub fn pointer_down(&mut self, point: Vec2, now: f64) -> Reaction {
        match self.section {
            Section::Pop => {
                if let Some(index) = self.layout.bubble_at(point, self.bubbles.len()) {
                    self.bubbles.pop(index, now);
                }
                Reaction::None
            }
            Section::Drag => {
                self.shapes.pointer_down(self.layout.to_board(point));
                Reaction::None
            }
            Section::Slide => {
                let Some(index) = self.layout.slider_at(point, self.sliders.len()) else {
                    return Reaction::None;
                };
                self.slider_grab = Some(index);
                let value = self.layout.slider_value_at(point.x);
                Reaction::Slider(self.sliders.set(index, value, now))
            }
            Section::Spin => {
                let center = self.layout.spinner_center();
                if point.distance(center) <= self.layout.spinner_radius() {
                    self.spinner.begin_drag(point, center, now);
                }
                Reaction::None
            }
            Section::Landing | Section::Buttons => Reaction::None,
        }
    }

    pub fn pointer_move(&mut self, point: Vec2, now: f64) -> Reaction {
        match self.section {
            Section::Drag => self.shapes.pointer_move(self.layout.to_board(point)),
            Section::Slide => {
                if let Some(index) = self.slider_grab {
                    let value = self.layout.slider_value_at(point.x);
                    // Integer positions: skip no-op moves
                    if self.sliders.positions.get(index) != Some(&value) {
                        return Reaction::Slider(self.sliders.set(index, value, now));
                    }
                }
            }
            Section::Spin => {
                self.spinner
                    .drag_to(point, self.layout.spinner_center(), now)
            }
            Section::Buttons => {
                let viewport = self.layout.viewport();
                self.buttons.track_pointer(point, viewport);
            }
            Section::Landing | Section::Pop => {}
        }
        Reaction::None
    }

    /// Pointer released or left the canvas
    pub fn pointer_up(&mut self) {
        self.shapes.pointer_up();
        self.spinner.end_drag();
        self.slider_grab = None;
    }

    /// Advance the mounted section by one animation frame
    pub fn tick(&mut self, now: f64) {
        match self.section {
            Section::Landing => {}
            Section::Buttons => self.buttons.tick(now),
            Section::Pop => self.bubbles.tick(now),
            Section::Drag => self.shapes.tick(),
            Section::Slide => self.sliders.tick(now),
            Section::Spin => self.spinner.tick(),
        }
    }

    pub fn active_challenge(&self) -> Option<&ActiveChallenge> {
        self.sliders.challenge.as_ref()
    }

    pub fn hud(&self, now: f64) -> HudSnapshot {
        let achievements = &self.sliders.achievements;
        HudSnapshot {
            score: self.sliders.score,
            achievements: achievements
                .entries
                .iter()
                .map(|a| (a.id.title(), a.id.description(), a.unlocked))
                .collect(),
            toast: achievements.toast().map(|id| id.title()),
            challenge: self
                .active_challenge()
                .map(|c| c.challenge.description.clone()),
            challenge_remaining: self
                .active_challenge()
                .and_then(|c| c.remaining(now))
                .map(|ms| ms / 1000.0),
            speed_label: SpeedLabel::classify(self.spinner.angular_velocity).as_str(),
            shape_count: self.shapes.len(),
            bubbles_popped: self.bubbles.popped_count(),
            bubble_count: self.bubbles.len(),
        }
    }

    /// Pretty JSON of the whole state, for debugging
    pub fn debug_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> FidgetState {
        FidgetState::new(Layout::new(1200.0, 800.0), 1)
    }

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("nav:pop"), Some(Command::Navigate(Section::Pop)));
        assert_eq!(Command::parse("theme"), Some(Command::ToggleTheme));
        assert_eq!(Command::parse("button:11"), Some(Command::PressButton(11)));
        assert_eq!(Command::parse("slider:2:40"), Some(Command::SetSlider(2, 40.0)));
        assert_eq!(Command::parse("slider:2:NaN"), None);
        assert_eq!(Command::parse("slider:2:inf"), None);
        assert_eq!(
            Command::parse("spin:design:industrial"),
            Some(Command::SetDesign(SpinnerDesign::Industrial))
        );
        assert_eq!(Command::parse("bubbles:add-row"), Some(Command::AddBubbleRow));
        assert_eq!(Command::parse("nav:nowhere"), None);
        assert_eq!(Command::parse("button"), None);
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn test_navigation_unmounts_previous_section() {
        let mut s = state();
        s.navigate(Section::Pop);
        s.apply(Command::PopBubble(0), 0.0);
        assert!(s.bubbles.is_animating(0));

        let r = s.navigate(Section::Spin);
        assert_eq!(
            r,
            Reaction::SectionChanged {
                from: Section::Pop,
                to: Section::Spin
            }
        );
        assert!(!s.bubbles.is_animating(0));
        // Popped state survives navigation
        assert!(s.bubbles.popped[0]);
        assert_eq!(s.navigate(Section::Spin), Reaction::None);
    }

    #[test]
    fn test_leaving_buttons_stops_overlays() {
        let mut s = state();
        s.navigate(Section::Buttons);
        s.apply(Command::PressButton(4), 0.0);
        s.apply(Command::PressButton(9), 0.0);
        assert!(s.overlays.matrix.is_some());
        assert!(s.overlays.rain.is_some());

        s.apply(Command::PressButton(4), 1.0);
        assert!(s.overlays.matrix.is_none());

        s.navigate(Section::Landing);
        assert!(s.overlays.is_empty());
        assert!(s.buttons.active_effects().is_empty());
    }

    #[test]
    fn test_pointer_pops_bubble_under_it() {
        let mut s = state();
        s.navigate(Section::Pop);
        let p = s.layout.bubble_center(7, s.bubbles.len());
        s.pointer_down(p, 0.0);
        assert!(s.bubbles.popped[7]);
        assert_eq!(s.hud(0.0).bubbles_popped, 1);
    }

    #[test]
    fn test_slider_drag_through_pointer() {
        let mut s = state();
        s.navigate(Section::Slide);
        let track = s.layout.slider_track(1);
        s.pointer_down(track.center(), 0.0);
        assert_eq!(s.slider_grab, Some(1));
        assert_eq!(s.sliders.positions[1], 50.0);

        s.pointer_move(Vec2::new(track.origin.x + track.size.x, track.center().y), 10.0);
        assert_eq!(s.sliders.positions[1], 100.0);
        s.pointer_up();
        assert_eq!(s.slider_grab, None);
    }

    #[test]
    fn test_spinner_drag_through_pointer() {
        let mut s = state();
        s.navigate(Section::Spin);
        let c = s.layout.spinner_center();
        s.pointer_down(c + Vec2::new(50.0, 0.0), 0.0);
        s.pointer_move(c + Vec2::new(0.0, 50.0), 100.0);
        s.pointer_up();
        assert!(s.spinner.angular_velocity > 0.0);
        s.tick(116.0);
        assert_eq!(s.hud(116.0).speed_label, "Super Fast");
    }

    #[test]
    fn test_drag_shape_through_pointer() {
        let mut s = state();
        s.navigate(Section::Drag);
        let start = s.layout.from_board(s.shapes.shapes[0].pos());
        s.pointer_down(start, 0.0);
        s.pointer_move(start + Vec2::new(10.0, 0.0), 16.0);
        s.tick(16.0);
        // Held shape does not integrate
        assert!((s.shapes.shapes[0].motion.vel.x - 3.0).abs() < 1e-5);
        s.pointer_up();
        s.tick(32.0);
        assert!(s.shapes.shapes[0].motion.vel.x < 3.0);
    }

    #[test]
    fn test_challenge_commands_cycle_catalog() {
        let mut s = state();
        s.apply(Command::StartChallenge(0), 0.0);
        assert!(s.active_challenge().is_some());
        let hud = s.hud(1000.0);
        assert_eq!(hud.challenge_remaining, Some(9.0));

        assert_eq!(Command::parse("challenge:next"), Some(Command::NextChallenge));
        s.apply(Command::NextChallenge, 2000.0);
        let second = &challenge::catalog()[1];
        assert_eq!(s.active_challenge().map(|c| &c.challenge), Some(second));

        // Wraps around after the last entry
        s.apply(Command::StartChallenge(3), 3000.0);
        s.apply(Command::NextChallenge, 4000.0);
        let first = &challenge::catalog()[0];
        assert_eq!(s.active_challenge().map(|c| &c.challenge), Some(first));
    }

    #[test]
    fn test_theme_command() {
        let mut s = state();
        assert_eq!(s.apply(Command::ToggleTheme, 0.0), Reaction::ThemeChanged);
        assert!(s.settings.theme.is_dark());
    }

    #[test]
    fn test_debug_json_contains_sections() {
        let s = state();
        let json = s.debug_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["section"], "Landing");
        assert_eq!(value["sliders"]["positions"].as_array().map(|a| a.len()), Some(5));
    }
}
