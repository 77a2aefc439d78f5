//! Button grid: twelve buttons, each bound to a visual effect
//!
//! One-shot effects run for a fixed duration and ignore presses while
//! running. Toggle effects flip on every press. Every press also starts a
//! short click ripple on the pressed button.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::transient::{Transient, expire_all};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonEffect {
    ColorExplosion,
    DinoRun,
    Glitch,
    PointerWave,
    MatrixRain,
    Vortex,
    Fireworks,
    NeonGlow,
    Butterflies,
    Rain,
    PulseRing,
    Sparkles,
}

impl ButtonEffect {
    /// Button order in the grid
    pub const ALL: [ButtonEffect; 12] = [
        ButtonEffect::ColorExplosion,
        ButtonEffect::DinoRun,
        ButtonEffect::Glitch,
        ButtonEffect::PointerWave,
        ButtonEffect::MatrixRain,
        ButtonEffect::Vortex,
        ButtonEffect::Fireworks,
        ButtonEffect::NeonGlow,
        ButtonEffect::Butterflies,
        ButtonEffect::Rain,
        ButtonEffect::PulseRing,
        ButtonEffect::Sparkles,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Run time for one-shot effects, `None` for toggles
    pub fn duration_ms(&self) -> Option<f64> {
        match self {
            ButtonEffect::ColorExplosion => Some(1500.0),
            ButtonEffect::DinoRun => Some(3000.0),
            ButtonEffect::Glitch => Some(600.0),
            ButtonEffect::Fireworks => Some(2000.0),
            ButtonEffect::Butterflies => Some(4000.0),
            ButtonEffect::PulseRing => Some(1000.0),
            ButtonEffect::Sparkles => Some(2000.0),
            ButtonEffect::PointerWave
            | ButtonEffect::MatrixRain
            | ButtonEffect::Vortex
            | ButtonEffect::NeonGlow
            | ButtonEffect::Rain => None,
        }
    }

    pub fn is_toggle(&self) -> bool {
        self.duration_ms().is_none()
    }

    /// Effects drawn on their own canvas overlay
    pub fn has_overlay(&self) -> bool {
        matches!(
            self,
            ButtonEffect::MatrixRain | ButtonEffect::Vortex | ButtonEffect::Rain
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            ButtonEffect::ColorExplosion => "Explode",
            ButtonEffect::DinoRun => "Dino",
            ButtonEffect::Glitch => "Glitch",
            ButtonEffect::PointerWave => "Wave",
            ButtonEffect::MatrixRain => "Matrix",
            ButtonEffect::Vortex => "Vortex",
            ButtonEffect::Fireworks => "Fireworks",
            ButtonEffect::NeonGlow => "Neon",
            ButtonEffect::Butterflies => "Butterflies",
            ButtonEffect::Rain => "Rain",
            ButtonEffect::PulseRing => "Pulse",
            ButtonEffect::Sparkles => "Sparkles",
        }
    }

    /// CSS class toggled on the effect layer while the effect is on
    pub fn css_class(&self) -> &'static str {
        match self {
            ButtonEffect::ColorExplosion => "color-explosion",
            ButtonEffect::DinoRun => "dino-run",
            ButtonEffect::Glitch => "glitch-effect",
            ButtonEffect::PointerWave => "pointer-wave",
            ButtonEffect::MatrixRain => "matrix-rain",
            ButtonEffect::Vortex => "vortex",
            ButtonEffect::Fireworks => "fireworks",
            ButtonEffect::NeonGlow => "neon-glow",
            ButtonEffect::Butterflies => "butterflies",
            ButtonEffect::Rain => "rain",
            ButtonEffect::PulseRing => "pulse-ring",
            ButtonEffect::Sparkles => "sparkles",
        }
    }
}

/// Result of pressing a button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    Started(ButtonEffect),
    Stopped(ButtonEffect),
    /// One-shot already running
    Ignored,
    /// Caller must capture the surface, then call `begin_glitch`
    NeedsSnapshot,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ButtonBoard {
    /// Running one-shot effects
    pub running: Vec<Transient<ButtonEffect>>,
    /// Toggle effects currently on
    pub toggled: Vec<ButtonEffect>,
    /// Click ripples by button index
    pub ripples: Vec<Transient<usize>>,
    /// Pointer position as percent of the viewport, tracked while the wave is on
    pub pointer_wave: Vec2,
    glitch_pending: bool,
}

impl ButtonBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, effect: ButtonEffect) -> bool {
        self.toggled.contains(&effect) || self.running.iter().any(|t| t.value == effect)
    }

    /// Every effect currently on, in grid order
    pub fn active_effects(&self) -> Vec<ButtonEffect> {
        ButtonEffect::ALL
            .into_iter()
            .filter(|&e| self.is_active(e))
            .collect()
    }

    /// Press button `index`
    pub fn press(&mut self, index: usize, now: f64) -> PressOutcome {
        let Some(effect) = ButtonEffect::from_index(index) else {
            return PressOutcome::Ignored;
        };
        self.ripples.push(Transient::new(index, now, RIPPLE_MS));

        match effect.duration_ms() {
            None => {
                if let Some(pos) = self.toggled.iter().position(|&e| e == effect) {
                    self.toggled.remove(pos);
                    log::info!("Effect off: {}", effect.label());
                    PressOutcome::Stopped(effect)
                } else {
                    self.toggled.push(effect);
                    log::info!("Effect on: {}", effect.label());
                    PressOutcome::Started(effect)
                }
            }
            Some(_) if self.is_active(effect) => PressOutcome::Ignored,
            Some(_) if effect == ButtonEffect::Glitch => {
                if self.glitch_pending {
                    return PressOutcome::Ignored;
                }
                self.glitch_pending = true;
                PressOutcome::NeedsSnapshot
            }
            Some(duration) => {
                self.running.push(Transient::new(effect, now, duration));
                log::info!("Effect started: {}", effect.label());
                PressOutcome::Started(effect)
            }
        }
    }

    /// Finish a glitch press once the snapshot attempt is done. A failed
    /// snapshot skips the effect.
    pub fn begin_glitch(&mut self, snapshot_ok: bool, now: f64) -> bool {
        if !std::mem::take(&mut self.glitch_pending) || !snapshot_ok {
            return false;
        }
        if let Some(duration) = ButtonEffect::Glitch.duration_ms() {
            self.running
                .push(Transient::new(ButtonEffect::Glitch, now, duration));
        }
        true
    }

    /// Track the pointer as a percentage of the viewport. Ignored unless
    /// the pointer wave is on.
    pub fn track_pointer(&mut self, point: Vec2, viewport: Vec2) {
        if !self.toggled.contains(&ButtonEffect::PointerWave) {
            return;
        }
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return;
        }
        self.pointer_wave = point / viewport * 100.0;
    }

    /// Ripple progress in [0, 1] for a button, if one is playing
    pub fn ripple_progress(&self, index: usize, now: f64) -> Option<f32> {
        self.ripples
            .iter()
            .rev()
            .find(|t| t.value == index)
            .map(|t| 1.0 - t.remaining_fraction(now, RIPPLE_MS))
    }

    /// Expire finished one-shots and ripples
    pub fn tick(&mut self, now: f64) {
        for t in self.running.iter().filter(|t| t.is_expired(now)) {
            log::info!("Effect finished: {}", t.value.label());
        }
        expire_all(&mut self.running, now);
        expire_all(&mut self.ripples, now);
    }

    /// Stop everything (section unmount)
    pub fn clear_transients(&mut self) {
        self.running.clear();
        self.ripples.clear();
        self.toggled.clear();
        self.glitch_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(effect: ButtonEffect) -> usize {
        ButtonEffect::ALL
            .iter()
            .position(|&e| e == effect)
            .unwrap()
    }

    #[test]
    fn test_twelve_buttons_five_toggles() {
        assert_eq!(ButtonEffect::ALL.len(), 12);
        let toggles = ButtonEffect::ALL.iter().filter(|e| e.is_toggle()).count();
        assert_eq!(toggles, 5);
        assert!(ButtonEffect::ALL.iter().filter(|e| e.has_overlay()).all(|e| e.is_toggle()));
    }

    #[test]
    fn test_one_shot_ignores_presses_while_running() {
        let mut b = ButtonBoard::new();
        let i = index_of(ButtonEffect::ColorExplosion);
        assert_eq!(b.press(i, 0.0), PressOutcome::Started(ButtonEffect::ColorExplosion));
        assert_eq!(b.press(i, 1000.0), PressOutcome::Ignored);
        b.tick(1500.0);
        assert!(!b.is_active(ButtonEffect::ColorExplosion));
        assert_eq!(b.press(i, 1500.0), PressOutcome::Started(ButtonEffect::ColorExplosion));
    }

    #[test]
    fn test_toggle_flips() {
        let mut b = ButtonBoard::new();
        let i = index_of(ButtonEffect::MatrixRain);
        assert_eq!(b.press(i, 0.0), PressOutcome::Started(ButtonEffect::MatrixRain));
        assert!(b.is_active(ButtonEffect::MatrixRain));
        b.tick(100_000.0);
        assert!(b.is_active(ButtonEffect::MatrixRain));
        assert_eq!(b.press(i, 1.0), PressOutcome::Stopped(ButtonEffect::MatrixRain));
        assert!(!b.is_active(ButtonEffect::MatrixRain));
    }

    #[test]
    fn test_every_press_ripples() {
        let mut b = ButtonBoard::new();
        let i = index_of(ButtonEffect::DinoRun);
        b.press(i, 0.0);
        b.press(i, 100.0);
        assert_eq!(b.ripples.len(), 2);
        assert!((b.ripple_progress(i, 400.0).unwrap_or_default() - 0.5).abs() < 1e-4);
        b.tick(700.0);
        assert!(b.ripple_progress(i, 700.0).is_none());
    }

    #[test]
    fn test_glitch_waits_for_snapshot() {
        let mut b = ButtonBoard::new();
        let i = index_of(ButtonEffect::Glitch);
        assert_eq!(b.press(i, 0.0), PressOutcome::NeedsSnapshot);
        assert!(!b.is_active(ButtonEffect::Glitch));
        assert_eq!(b.press(i, 5.0), PressOutcome::Ignored);
        assert!(b.begin_glitch(true, 10.0));
        assert!(b.is_active(ButtonEffect::Glitch));
        b.tick(610.0);
        assert!(!b.is_active(ButtonEffect::Glitch));
    }

    #[test]
    fn test_failed_snapshot_skips_glitch() {
        let mut b = ButtonBoard::new();
        b.press(index_of(ButtonEffect::Glitch), 0.0);
        assert!(!b.begin_glitch(false, 1.0));
        assert!(!b.is_active(ButtonEffect::Glitch));
        // Not stuck pending
        assert_eq!(b.press(index_of(ButtonEffect::Glitch), 2.0), PressOutcome::NeedsSnapshot);
    }

    #[test]
    fn test_pointer_wave_tracks_only_when_on() {
        let mut b = ButtonBoard::new();
        let viewport = Vec2::new(200.0, 100.0);
        b.track_pointer(Vec2::new(100.0, 50.0), viewport);
        assert_eq!(b.pointer_wave, Vec2::ZERO);
        b.press(index_of(ButtonEffect::PointerWave), 0.0);
        b.track_pointer(Vec2::new(100.0, 25.0), viewport);
        assert_eq!(b.pointer_wave, Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_out_of_range_press() {
        let mut b = ButtonBoard::new();
        assert_eq!(b.press(12, 0.0), PressOutcome::Ignored);
        assert!(b.ripples.is_empty());
    }

    #[test]
    fn test_clear_transients_stops_everything() {
        let mut b = ButtonBoard::new();
        b.press(0, 0.0);
        b.press(4, 0.0);
        b.clear_transients();
        assert!(b.active_effects().is_empty());
        assert!(b.ripples.is_empty());
    }
}
