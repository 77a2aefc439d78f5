//! GPU primitive list
//!
//! The fragment shader evaluates every primitive's signed distance field
//! per pixel, so the CPU side only has to describe what is on screen.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::palette::Rgba;

/// Uniform array capacity (must match `MAX_PRIMITIVES` in the shader)
pub const MAX_PRIMITIVES: usize = 128;

pub const PRIM_CIRCLE: u32 = 0;
pub const PRIM_BOX: u32 = 1;
pub const PRIM_TRIANGLE: u32 = 2;
pub const PRIM_HEXAGON: u32 = 3;
pub const PRIM_RING: u32 = 4;

/// One SDF primitive. 64 bytes, vec4-aligned for uniform arrays.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Primitive {
    /// Center (CSS px)
    pub center: [f32; 2],
    /// Radius in x for round kinds, half extents for boxes
    pub size: [f32; 2],
    /// Radians
    pub rotation: f32,
    pub kind: u32,
    /// Corner radius for boxes, stroke width for rings
    pub corner: f32,
    /// Soft halo width (px), 0 for none
    pub glow: f32,
    /// Gradient start (top of the local frame)
    pub color: Rgba,
    /// Gradient end (bottom of the local frame)
    pub color2: Rgba,
}

impl Primitive {
    fn new(kind: u32, center: Vec2, size: Vec2, color: Rgba) -> Self {
        Self {
            center: center.to_array(),
            size: size.to_array(),
            rotation: 0.0,
            kind,
            corner: 0.0,
            glow: 0.0,
            color,
            color2: color,
        }
    }

    pub fn circle(center: Vec2, radius: f32, color: Rgba) -> Self {
        Self::new(PRIM_CIRCLE, center, Vec2::splat(radius), color)
    }

    pub fn rounded_box(center: Vec2, half_size: Vec2, corner: f32, color: Rgba) -> Self {
        Self {
            corner,
            ..Self::new(PRIM_BOX, center, half_size, color)
        }
    }

    /// Triangle inscribed in a square of half extent `half`
    pub fn triangle(center: Vec2, half: f32, color: Rgba) -> Self {
        Self::new(PRIM_TRIANGLE, center, Vec2::splat(half), color)
    }

    /// Flat-topped hexagon inscribed in a square of half extent `half`
    pub fn hexagon(center: Vec2, half: f32, color: Rgba) -> Self {
        Self::new(PRIM_HEXAGON, center, Vec2::splat(half), color)
    }

    pub fn ring(center: Vec2, radius: f32, width: f32, color: Rgba) -> Self {
        Self {
            corner: width,
            ..Self::new(PRIM_RING, center, Vec2::splat(radius), color)
        }
    }

    pub fn rotated(mut self, radians: f32) -> Self {
        self.rotation = radians;
        self
    }

    pub fn gradient(mut self, to: Rgba) -> Self {
        self.color2 = to;
        self
    }

    pub fn glowing(mut self, width: f32) -> Self {
        self.glow = width;
        self
    }
}
