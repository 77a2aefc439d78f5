//! Scene building: widget state to a primitive list
//!
//! Pure CPU code. The pipeline uploads whatever this produces.

use std::f32::consts::TAU;

use glam::Vec2;

use super::palette::{self, Rgba};
use super::primitive::{MAX_PRIMITIVES, Primitive};
use crate::consts::SHAPE_SIZE;
use crate::sim::shapes::{SHAPE_PALETTE, ShapeKind};
use crate::sim::spinner::SpinnerDesign;
use crate::sim::{FidgetState, Section};

/// One frame worth of primitives
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    /// Background gradient (top, bottom)
    pub background: (Rgba, Rgba),
    /// Primitives that did not fit
    pub dropped: usize,
}

impl Scene {
    fn new(background: (Rgba, Rgba)) -> Self {
        Self {
            primitives: Vec::with_capacity(MAX_PRIMITIVES),
            background,
            dropped: 0,
        }
    }

    pub fn push(&mut self, p: Primitive) {
        if self.primitives.len() < MAX_PRIMITIVES {
            self.primitives.push(p);
        } else {
            self.dropped += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

pub fn build_scene(state: &FidgetState, now: f64) -> Scene {
    let theme = state.settings.theme;
    let background = match state.section {
        Section::Slide => {
            let tint = palette::slider_backdrop(state.sliders.average(), theme);
            (tint, palette::background(theme).1)
        }
        _ => palette::background(theme),
    };
    let mut scene = Scene::new(background);

    if state.section.uses_canvas() {
        let panel = state.layout.panel;
        scene.push(Primitive::rounded_box(
            panel.center(),
            panel.size * 0.5,
            16.0,
            palette::panel(theme),
        ));
    }

    match state.section {
        Section::Pop => bubbles(&mut scene, state, now),
        Section::Drag => shapes(&mut scene, state),
        Section::Slide => sliders(&mut scene, state),
        Section::Spin => spinner(&mut scene, state),
        Section::Landing | Section::Buttons => {}
    }
    scene
}

fn bubbles(scene: &mut Scene, state: &FidgetState, now: f64) {
    let theme = state.settings.theme;
    let count = state.bubbles.len();
    let radius = state.layout.bubble_radius(count);
    let (top, bottom) = palette::bubble(theme);

    for (i, &popped) in state.bubbles.popped.iter().enumerate() {
        let center = state.layout.bubble_center(i, count);
        let prim = match state.bubbles.pop_progress(i, now) {
            // Squash then settle
            Some(t) => {
                let squash = 1.0 - 0.3 * (t * std::f32::consts::PI).sin();
                Primitive::circle(center, radius * squash, palette::lighten(top, 0.5 * (1.0 - t)))
                    .gradient(palette::popped_bubble(theme))
                    .glowing(8.0 * (1.0 - t))
            }
            None if popped => Primitive::circle(center, radius * 0.85, palette::popped_bubble(theme)),
            None => Primitive::circle(center, radius, palette::lighten(top, 0.2))
                .gradient(bottom)
                .glowing(3.0),
        };
        scene.push(prim);
    }
}

fn shapes(scene: &mut Scene, state: &FidgetState) {
    let half = SHAPE_SIZE / 2.0;
    for shape in &state.shapes.shapes {
        let center = state.layout.from_board(shape.pos());
        let (from, to) = SHAPE_PALETTE[shape.color % SHAPE_PALETTE.len()];
        let color = [from[0], from[1], from[2], 1.0];
        let color2 = [to[0], to[1], to[2], 1.0];
        let prim = match shape.kind {
            ShapeKind::Circle => Primitive::circle(center, half, color),
            ShapeKind::Square => {
                Primitive::rounded_box(center, Vec2::splat(half), SHAPE_SIZE / 6.0, color)
            }
            ShapeKind::Triangle => Primitive::triangle(center, half, color),
            ShapeKind::Hexagon => Primitive::hexagon(center, half, color),
        };
        let prim = prim
            .rotated(shape.motion.rotation.to_radians())
            .gradient(color2)
            .glowing(if shape.is_active { 12.0 } else { 2.0 });
        scene.push(prim);
    }
}

fn sliders(scene: &mut Scene, state: &FidgetState) {
    let theme = state.settings.theme;
    for (i, &value) in state.sliders.positions.iter().enumerate() {
        let track = state.layout.slider_track(i);
        let half = track.size * 0.5;
        let (from, to) = palette::SLIDER_FILLS[i % palette::SLIDER_FILLS.len()];

        scene.push(Primitive::rounded_box(track.center(), half, half.y, palette::track(theme)));

        let fill_w = track.size.x * value / 100.0;
        if fill_w > 0.5 {
            let fill_center = Vec2::new(track.origin.x + fill_w / 2.0, track.center().y);
            scene.push(
                Primitive::rounded_box(fill_center, Vec2::new(fill_w / 2.0, half.y), half.y, from)
                    .gradient(to),
            );
        }

        let held = state.slider_grab == Some(i);
        let thumb = Vec2::new(track.origin.x + fill_w, track.center().y);
        scene.push(
            Primitive::circle(thumb, track.size.y, palette::WHITE)
                .gradient(palette::lighten(to, 0.6))
                .glowing(if held { 10.0 } else { 3.0 }),
        );
    }
}

fn spinner(scene: &mut Scene, state: &FidgetState) {
    let theme = state.settings.theme;
    let center = state.layout.spinner_center();
    let r = state.layout.spinner_radius();
    let angle = state.spinner.angle.to_radians();
    let (from, to) = palette::spinner(theme);
    let hub = palette::hub(theme);
    let glow = (state.spinner.angular_velocity.abs() / 100.0).min(12.0);

    // Point on the spinner's arm `k` of `n` at distance `d`
    let arm = |k: usize, n: usize, d: f32| {
        let a = angle + k as f32 * TAU / n as f32 - std::f32::consts::FRAC_PI_2;
        center + Vec2::new(a.cos(), a.sin()) * d
    };

    match state.spinner.design {
        SpinnerDesign::Classic => {
            for k in 0..3 {
                let p = arm(k, 3, r * 0.55);
                scene.push(Primitive::circle(p, r * 0.4, from).gradient(to).glowing(glow));
                scene.push(Primitive::ring(p, r * 0.22, r * 0.06, hub));
            }
            scene.push(Primitive::circle(center, r * 0.42, from).gradient(to));
            scene.push(Primitive::circle(center, r * 0.2, hub));
        }
        SpinnerDesign::Minimal => {
            scene.push(Primitive::ring(center, r * 0.8, r * 0.08, from).glowing(glow));
            scene.push(Primitive::circle(arm(0, 1, r * 0.8), r * 0.1, to));
            scene.push(Primitive::circle(center, r * 0.12, hub));
        }
        SpinnerDesign::Geometric => {
            for k in 0..3 {
                let p = arm(k, 3, r * 0.55);
                let facing = angle + k as f32 * TAU / 3.0;
                scene.push(
                    Primitive::triangle(p, r * 0.38, from)
                        .rotated(facing)
                        .gradient(to)
                        .glowing(glow),
                );
            }
            scene.push(Primitive::hexagon(center, r * 0.35, to).rotated(angle).gradient(from));
            scene.push(Primitive::circle(center, r * 0.12, hub));
        }
        SpinnerDesign::Industrial => {
            for k in 0..3 {
                let facing = angle + k as f32 * TAU / 3.0;
                let p = arm(k, 3, r * 0.45);
                scene.push(
                    Primitive::rounded_box(p, Vec2::new(r * 0.16, r * 0.45), r * 0.05, hub)
                        .rotated(facing),
                );
                scene.push(Primitive::ring(arm(k, 3, r * 0.8), r * 0.18, r * 0.07, from).glowing(glow));
            }
            scene.push(Primitive::hexagon(center, r * 0.3, from).rotated(angle).gradient(to));
            scene.push(Primitive::ring(center, r * 0.12, r * 0.05, hub));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_BUBBLE_ROWS;
    use crate::layout::Layout;
    use crate::renderer::primitive::{PRIM_HEXAGON, PRIM_TRIANGLE};
    use crate::sim::Command;

    fn state(section: Section) -> FidgetState {
        let mut s = FidgetState::new(Layout::new(1200.0, 800.0), 9);
        s.navigate(section);
        s
    }

    #[test]
    fn test_landing_draws_only_background() {
        let s = state(Section::Landing);
        assert!(build_scene(&s, 0.0).is_empty());
    }

    #[test]
    fn test_pop_draws_panel_plus_every_bubble() {
        let mut s = state(Section::Pop);
        s.apply(Command::PopBubble(2), 0.0);
        let scene = build_scene(&s, 300.0);
        assert_eq!(scene.len(), 1 + 24);
        // Mid-animation bubble is squashed
        let popping = scene.primitives[1 + 2];
        assert!(popping.size[0] < s.layout.bubble_radius(s.bubbles.len()));
    }

    #[test]
    fn test_largest_grid_fits_primitive_budget() {
        let mut s = state(Section::Pop);
        for _ in 0..30 {
            s.apply(Command::AddBubbleRow, 0.0);
        }
        assert_eq!(s.bubbles.rows(), MAX_BUBBLE_ROWS);
        let scene = build_scene(&s, 0.0);
        assert_eq!(scene.len(), 1 + s.bubbles.len());
        assert!(scene.len() <= MAX_PRIMITIVES);
        assert_eq!(scene.dropped, 0);
    }

    #[test]
    fn test_drag_uses_shape_kinds_and_rotation() {
        let mut s = state(Section::Drag);
        s.apply(Command::CycleShape, 0.0);
        s.apply(Command::CycleShape, 0.0);
        s.apply(Command::AddShape, 0.0);
        s.apply(Command::CycleShape, 0.0);
        s.apply(Command::AddShape, 0.0);
        s.shapes.shapes[1].motion.rotation = 90.0;

        let scene = build_scene(&s, 0.0);
        assert_eq!(scene.len(), 4);
        assert_eq!(scene.primitives[2].kind, PRIM_TRIANGLE);
        assert!((scene.primitives[2].rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
        assert_eq!(scene.primitives[3].kind, PRIM_HEXAGON);
    }

    #[test]
    fn test_slider_fill_tracks_value() {
        let s = state(Section::Slide);
        let scene = build_scene(&s, 0.0);
        // Panel, then (track, fill, thumb) per slider
        assert_eq!(scene.len(), 1 + 3 * 5);
        let track = s.layout.slider_track(0);
        let fill = scene.primitives[2];
        assert!((fill.size[0] * 2.0 - track.size.x * 0.3).abs() < 1e-3);
    }

    #[test]
    fn test_slide_background_follows_average() {
        let low = {
            let mut s = state(Section::Slide);
            s.sliders.positions = vec![0.0; 5];
            build_scene(&s, 0.0).background.0
        };
        let high = {
            let mut s = state(Section::Slide);
            s.sliders.positions = vec![100.0; 5];
            build_scene(&s, 0.0).background.0
        };
        assert_ne!(low, high);
    }

    #[test]
    fn test_every_spinner_design_draws() {
        for design in SpinnerDesign::ALL {
            let mut s = state(Section::Spin);
            s.apply(Command::SetDesign(design), 0.0);
            let scene = build_scene(&s, 0.0);
            assert!(scene.len() > 2, "{design:?} drew nothing");
            assert_eq!(scene.dropped, 0);
        }
    }
}
