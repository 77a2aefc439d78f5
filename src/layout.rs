//! Screen layout for the canvas widgets
//!
//! Everything is in CSS pixels with the origin at the top-left of the
//! canvas. Widgets are placed inside a centered panel below the nav bar.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::BUBBLE_ROW_SIZE;
use crate::sim::motion::Bounds;

const PANEL_MAX_WIDTH: f32 = 560.0;
const PANEL_MARGIN: f32 = 16.0;
/// Space reserved above the panel for nav and HUD
const PANEL_TOP: f32 = 96.0;

const SLIDER_FIRST_Y: f32 = 48.0;
const SLIDER_SPACING: f32 = 56.0;
const SLIDER_PAD_X: f32 = 32.0;
pub const SLIDER_TRACK_HEIGHT: f32 = 12.0;
/// Vertical grab distance from a track's center line
const SLIDER_GRAB: f32 = 18.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size * 0.5
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.origin.x
            && p.y >= self.origin.y
            && p.x <= self.origin.x + self.size.x
            && p.y <= self.origin.y + self.size.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub panel: Rect,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let panel_w = (width - 2.0 * PANEL_MARGIN).clamp(1.0, PANEL_MAX_WIDTH);
        let panel_h = (height - PANEL_TOP - PANEL_MARGIN).max(1.0);
        let origin = Vec2::new((width - panel_w) / 2.0, PANEL_TOP.min(height - panel_h));
        Self {
            width,
            height,
            panel: Rect::new(origin, Vec2::new(panel_w, panel_h)),
        }
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    // === Bubbles ===

    /// Square cell side for a grid of `count` bubbles. Every row fits
    /// inside the panel.
    fn bubble_cell(&self, count: usize) -> f32 {
        let rows = count.div_ceil(BUBBLE_ROW_SIZE).max(1) as f32;
        (self.panel.size.x / BUBBLE_ROW_SIZE as f32).min(self.panel.size.y / rows)
    }

    /// Top-left of the grid, centered horizontally in the panel
    fn bubble_origin(&self, count: usize) -> Vec2 {
        let width = self.bubble_cell(count) * BUBBLE_ROW_SIZE as f32;
        self.panel.origin + Vec2::new((self.panel.size.x - width) * 0.5, 0.0)
    }

    pub fn bubble_radius(&self, count: usize) -> f32 {
        self.bubble_cell(count) * 0.4
    }

    pub fn bubble_center(&self, index: usize, count: usize) -> Vec2 {
        let cell = self.bubble_cell(count);
        let col = (index % BUBBLE_ROW_SIZE) as f32;
        let row = (index / BUBBLE_ROW_SIZE) as f32;
        self.bubble_origin(count) + Vec2::new((col + 0.5) * cell, (row + 0.5) * cell)
    }

    /// Bubble under `point` in a grid of `count`, if any
    pub fn bubble_at(&self, point: Vec2, count: usize) -> Option<usize> {
        let local = point - self.bubble_origin(count);
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let cell = self.bubble_cell(count);
        let col = (local.x / cell) as usize;
        let row = (local.y / cell) as usize;
        if col >= BUBBLE_ROW_SIZE {
            return None;
        }
        let index = row * BUBBLE_ROW_SIZE + col;
        let hit = index < count
            && point.distance(self.bubble_center(index, count)) <= self.bubble_radius(count);
        hit.then_some(index)
    }

    // === Sliders ===

    pub fn slider_track(&self, index: usize) -> Rect {
        let y = self.panel.origin.y + SLIDER_FIRST_Y + index as f32 * SLIDER_SPACING;
        let x = self.panel.origin.x + SLIDER_PAD_X;
        let w = (self.panel.size.x - 2.0 * SLIDER_PAD_X).max(1.0);
        Rect::new(
            Vec2::new(x, y - SLIDER_TRACK_HEIGHT / 2.0),
            Vec2::new(w, SLIDER_TRACK_HEIGHT),
        )
    }

    /// Slider track under `point`, if any
    pub fn slider_at(&self, point: Vec2, count: usize) -> Option<usize> {
        (0..count).find(|&i| {
            let track = self.slider_track(i);
            let c = track.center();
            (point.y - c.y).abs() <= SLIDER_GRAB
                && point.x >= track.origin.x - SLIDER_GRAB
                && point.x <= track.origin.x + track.size.x + SLIDER_GRAB
        })
    }

    /// Slider value (whole percent) for a pointer x position
    pub fn slider_value_at(&self, x: f32) -> f32 {
        let track = self.slider_track(0);
        ((x - track.origin.x) / track.size.x * 100.0)
            .round()
            .clamp(0.0, 100.0)
    }

    // === Spinner ===

    pub fn spinner_center(&self) -> Vec2 {
        self.panel.center()
    }

    pub fn spinner_radius(&self) -> f32 {
        self.panel.size.min_element() * 0.3
    }

    // === Drag board ===

    pub fn drag_bounds(&self) -> Bounds {
        Bounds::new(self.panel.size.x, self.panel.size.y)
    }

    /// Canvas point to shape board coordinates
    pub fn to_board(&self, point: Vec2) -> Vec2 {
        point - self.panel.origin
    }

    /// Shape board point to canvas coordinates
    pub fn from_board(&self, point: Vec2) -> Vec2 {
        point + self.panel.origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_BUBBLE_ROWS;

    #[test]
    fn test_panel_is_centered_and_capped() {
        let l = Layout::new(1200.0, 800.0);
        assert_eq!(l.panel.size.x, PANEL_MAX_WIDTH);
        assert!((l.panel.center().x - 600.0).abs() < 1e-4);

        let narrow = Layout::new(300.0, 800.0);
        assert_eq!(narrow.panel.size.x, 300.0 - 2.0 * PANEL_MARGIN);
    }

    #[test]
    fn test_bubble_hit_testing() {
        let l = Layout::new(1200.0, 800.0);
        for i in [0, 5, 6, 23] {
            assert_eq!(l.bubble_at(l.bubble_center(i, 24), 24), Some(i));
        }
        // Beyond the live grid
        assert_eq!(l.bubble_at(l.bubble_center(24, 24), 24), None);
        // Gap between bubbles
        let r = l.bubble_radius(24);
        let gap = l.bubble_center(0, 24) + Vec2::new(r + 2.0, r + 2.0);
        assert_eq!(l.bubble_at(gap, 24), None);
        assert_eq!(l.bubble_at(Vec2::ZERO, 24), None);
    }

    #[test]
    fn test_tall_bubble_grid_stays_in_panel() {
        let l = Layout::new(1200.0, 800.0);
        let count = MAX_BUBBLE_ROWS * BUBBLE_ROW_SIZE;
        let r = l.bubble_radius(count);
        for i in [0, BUBBLE_ROW_SIZE - 1, count - BUBBLE_ROW_SIZE, count - 1] {
            let c = l.bubble_center(i, count);
            assert!(l.panel.contains(c - Vec2::splat(r)), "bubble {i} starts outside");
            assert!(l.panel.contains(c + Vec2::splat(r)), "bubble {i} ends outside");
            assert_eq!(l.bubble_at(c, count), Some(i));
        }
        // Shrinks as rows are added
        assert!(r < l.bubble_radius(24));
    }

    #[test]
    fn test_slider_tracks_and_values() {
        let l = Layout::new(1200.0, 800.0);
        let track = l.slider_track(2);
        assert_eq!(l.slider_at(track.center(), 5), Some(2));
        assert_eq!(l.slider_at(track.center(), 2), None);
        assert_eq!(l.slider_value_at(track.origin.x), 0.0);
        assert_eq!(l.slider_value_at(track.origin.x + track.size.x), 100.0);
        assert_eq!(l.slider_value_at(track.origin.x + track.size.x * 0.5), 50.0);
        assert_eq!(l.slider_value_at(-500.0), 0.0);
    }

    #[test]
    fn test_board_coordinates_round_trip() {
        let l = Layout::new(1000.0, 700.0);
        let p = Vec2::new(321.0, 456.0);
        assert_eq!(l.from_board(l.to_board(p)), p);
        assert_eq!(l.drag_bounds().width, l.panel.size.x);
    }
}
