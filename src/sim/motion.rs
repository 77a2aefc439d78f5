//! Per-frame motion integration with wall bounce and friction
//!
//! Runs once per animation frame for every body that is not being dragged.
//! Units are pixels per frame; there is no time normalization.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned play area starting at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// Kinematic state of one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual rotation in degrees
    pub rotation: f32,
}

/// Advance one axis. Returns the new (position, velocity) before friction.
#[inline]
fn bounce_axis(pos: f32, vel: f32, bound: f32) -> (f32, f32) {
    let next = pos + vel;
    if next < 0.0 {
        (0.0, -vel * WALL_RESTITUTION)
    } else if next > bound {
        (bound.max(0.0), -vel * WALL_RESTITUTION)
    } else {
        (next, vel)
    }
}

/// Integrate one frame: move, reflect off walls, apply friction, spin
pub fn integrate(motion: Motion, bounds: Bounds) -> Motion {
    let (x, vx) = bounce_axis(motion.pos.x, motion.vel.x, bounds.width);
    let (y, vy) = bounce_axis(motion.pos.y, motion.vel.y, bounds.height);

    let vel = Vec2::new(vx, vy) * MOTION_FRICTION;
    let rotation = motion.rotation + (vel.x.abs() + vel.y.abs()) * ROTATION_COUPLING;

    Motion {
        pos: Vec2::new(x, y),
        vel,
        rotation,
    }
}
