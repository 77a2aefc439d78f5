//! Draggable shapes with drag-to-throw
//!
//! The board owns every shape. At most one shape is being dragged; that
//! shape is skipped by the integrator until the pointer is released.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::motion::{Bounds, Motion, integrate};
use super::sdf::{hexagon_vertices, sd_circle, sd_polygon, sd_rounded_box, to_local, triangle_vertices};
use crate::consts::*;

/// Shape outlines, in the order the selector cycles through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    #[default]
    Circle,
    Square,
    Triangle,
    Hexagon,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Triangle,
        ShapeKind::Hexagon,
    ];

    pub fn next(self) -> Self {
        match self {
            ShapeKind::Circle => ShapeKind::Square,
            ShapeKind::Square => ShapeKind::Triangle,
            ShapeKind::Triangle => ShapeKind::Hexagon,
            ShapeKind::Hexagon => ShapeKind::Circle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Square => "Square",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Hexagon => "Hexagon",
        }
    }

    /// Signed distance from a point in the shape's local frame
    pub fn distance(&self, local: Vec2, size: f32) -> f32 {
        let half = size / 2.0;
        match self {
            ShapeKind::Circle => sd_circle(local, Vec2::ZERO, half),
            ShapeKind::Square => sd_rounded_box(local, Vec2::splat(half), size / 6.0),
            ShapeKind::Triangle => sd_polygon(local, &triangle_vertices(size)),
            ShapeKind::Hexagon => sd_polygon(local, &hexagon_vertices(size)),
        }
    }
}

/// Gradient pairs for new shapes, picked by the shape count at creation
pub const SHAPE_PALETTE: [([f32; 3], [f32; 3]); 4] = [
    ([0.51, 0.55, 0.97], [0.66, 0.33, 0.97]), // indigo -> purple
    ([0.98, 0.44, 0.52], [0.93, 0.28, 0.60]), // rose -> pink
    ([0.13, 0.83, 0.93], [0.23, 0.51, 0.96]), // cyan -> blue
    ([0.20, 0.83, 0.60], [0.08, 0.72, 0.65]), // emerald -> teal
];

/// A draggable shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: u32,
    pub kind: ShapeKind,
    /// Index into `SHAPE_PALETTE`
    pub color: usize,
    pub motion: Motion,
    pub is_active: bool,
}

impl Shape {
    pub fn pos(&self) -> Vec2 {
        self.motion.pos
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let local = to_local(point, self.motion.pos, self.motion.rotation);
        self.kind.distance(local, SHAPE_SIZE) <= 0.0
    }
}

/// Drag interaction state
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { shape_id: u32, last_pointer: Vec2 },
}

/// The drag widget controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeBoard {
    pub shapes: Vec<Shape>,
    pub bounds: Bounds,
    pub selected: ShapeKind,
    pub drag: DragState,
    next_id: u32,
}

impl ShapeBoard {
    /// Create a board with one resting shape at the center
    pub fn new(bounds: Bounds) -> Self {
        let mut board = Self {
            shapes: Vec::new(),
            bounds,
            selected: ShapeKind::default(),
            drag: DragState::Idle,
            next_id: 1,
        };
        board.add_shape();
        board
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Update the play area (canvas resize)
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Add a shape of the selected kind at the center
    pub fn add_shape(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        let shape = Shape {
            id,
            kind: self.selected,
            color: self.shapes.len() % SHAPE_PALETTE.len(),
            motion: Motion {
                pos: self.bounds.center(),
                vel: Vec2::ZERO,
                rotation: 0.0,
            },
            is_active: false,
        };
        self.shapes.push(shape);
        id
    }

    /// Remove the most recently added shape, keeping at least one
    pub fn remove_shape(&mut self) -> bool {
        if self.shapes.len() <= 1 {
            return false;
        }
        if let Some(removed) = self.shapes.pop() {
            if matches!(self.drag, DragState::Dragging { shape_id, .. } if shape_id == removed.id) {
                self.drag = DragState::Idle;
            }
        }
        true
    }

    /// Stop every shape in place
    pub fn reset(&mut self) {
        for shape in &mut self.shapes {
            shape.motion.vel = Vec2::ZERO;
        }
    }

    /// Cycle the kind used for new shapes
    pub fn cycle_selected(&mut self) -> ShapeKind {
        self.selected = self.selected.next();
        self.selected
    }

    /// Topmost shape under the pointer
    pub fn shape_at(&self, point: Vec2) -> Option<u32> {
        self.shapes
            .iter()
            .rev()
            .find(|s| s.contains(point))
            .map(|s| s.id)
    }

    pub fn active_id(&self) -> Option<u32> {
        match self.drag {
            DragState::Dragging { shape_id, .. } => Some(shape_id),
            DragState::Idle => None,
        }
    }

    /// Pointer pressed. Starts a drag if a shape is under the pointer.
    pub fn pointer_down(&mut self, point: Vec2) -> Option<u32> {
        if self.active_id().is_some() {
            return None;
        }
        let id = self.shape_at(point)?;
        for shape in &mut self.shapes {
            shape.is_active = shape.id == id;
        }
        self.drag = DragState::Dragging {
            shape_id: id,
            last_pointer: point,
        };
        Some(id)
    }

    /// Pointer moved. Drags the active shape and records its throw velocity.
    pub fn pointer_move(&mut self, point: Vec2) {
        let DragState::Dragging { shape_id, last_pointer } = self.drag else {
            return;
        };
        let delta = point - last_pointer;
        self.drag = DragState::Dragging {
            shape_id,
            last_pointer: point,
        };
        if let Some(shape) = self.shapes.iter_mut().find(|s| s.id == shape_id) {
            shape.motion.pos += delta;
            shape.motion.vel = delta * THROW_GAIN;
        }
    }

    /// Pointer released or left the surface
    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
        for shape in &mut self.shapes {
            shape.is_active = false;
        }
    }

    /// Advance every free shape by one frame
    pub fn tick(&mut self) {
        let active = self.active_id();
        let bounds = self.bounds;
        for shape in &mut self.shapes {
            if Some(shape.id) == active {
                continue;
            }
            shape.motion = integrate(shape.motion, bounds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> ShapeBoard {
        ShapeBoard::new(Bounds::new(400.0, 300.0))
    }

    #[test]
    fn test_new_board_has_one_centered_shape() {
        let b = board();
        assert_eq!(b.len(), 1);
        assert_eq!(b.shapes[0].pos(), Vec2::new(200.0, 150.0));
        assert_eq!(b.shapes[0].kind, ShapeKind::Circle);
    }

    #[test]
    fn test_add_uses_selected_kind_and_palette() {
        let mut b = board();
        assert_eq!(b.cycle_selected(), ShapeKind::Square);
        b.add_shape();
        assert_eq!(b.shapes[1].kind, ShapeKind::Square);
        assert_eq!(b.shapes[1].color, 1);
        assert_ne!(b.shapes[0].id, b.shapes[1].id);
    }

    #[test]
    fn test_remove_keeps_last_shape() {
        let mut b = board();
        b.add_shape();
        assert!(b.remove_shape());
        assert!(!b.remove_shape());
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_selector_cycles_back() {
        let mut b = board();
        for _ in 0..ShapeKind::ALL.len() {
            b.cycle_selected();
        }
        assert_eq!(b.selected, ShapeKind::Circle);
    }

    #[test]
    fn test_drag_moves_shape_and_sets_throw() {
        let mut b = board();
        let start = Vec2::new(200.0, 150.0);
        let id = b.pointer_down(start).expect("shape under pointer");
        assert!(b.shapes[0].is_active);

        b.pointer_move(start + Vec2::new(10.0, -4.0));
        assert_eq!(b.shapes[0].pos(), Vec2::new(210.0, 146.0));
        assert!((b.shapes[0].motion.vel - Vec2::new(3.0, -1.2)).length() < 1e-5);

        // Active shape ignores the integrator
        b.tick();
        assert_eq!(b.shapes[0].pos(), Vec2::new(210.0, 146.0));

        b.pointer_up();
        assert_eq!(b.active_id(), None);
        assert!(!b.shapes.iter().any(|s| s.id == id && s.is_active));

        // Released shape flies with the throw velocity
        b.tick();
        assert!((b.shapes[0].pos() - Vec2::new(213.0, 144.8)).length() < 1e-4);
    }

    #[test]
    fn test_pointer_down_on_empty_space_is_ignored() {
        let mut b = board();
        assert_eq!(b.pointer_down(Vec2::new(5.0, 5.0)), None);
        assert_eq!(b.drag, DragState::Idle);
    }

    #[test]
    fn test_only_one_drag_at_a_time() {
        let mut b = board();
        b.add_shape();
        let center = Vec2::new(200.0, 150.0);
        let first = b.pointer_down(center).expect("hit");
        // The most recently added shape is on top
        assert_eq!(first, b.shapes[1].id);
        assert_eq!(b.pointer_down(center), None);
        assert_eq!(b.shapes.iter().filter(|s| s.is_active).count(), 1);
    }

    #[test]
    fn test_reset_stops_everything() {
        let mut b = board();
        b.shapes[0].motion.vel = Vec2::new(4.0, 4.0);
        b.reset();
        assert_eq!(b.shapes[0].motion.vel, Vec2::ZERO);
    }

    #[test]
    fn test_removing_dragged_shape_ends_drag() {
        let mut b = board();
        b.add_shape();
        b.pointer_down(Vec2::new(200.0, 150.0));
        assert!(b.remove_shape());
        assert_eq!(b.drag, DragState::Idle);
    }

    #[test]
    fn test_hexagon_hit_respects_clipped_corners() {
        let mut b = board();
        b.shapes[0].kind = ShapeKind::Hexagon;
        let c = b.shapes[0].pos();
        assert!(b.shape_at(c).is_some());
        assert!(b.shape_at(c + Vec2::new(23.0, -23.0)).is_none());
    }
}
