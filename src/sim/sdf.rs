//! Signed distance functions for pointer hit testing
//!
//! The same shapes are evaluated in the fragment shader, so a point that
//! hits here is a point that is drawn.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to a box centered at the origin with rounded corners
pub fn sd_rounded_box(p: Vec2, half_size: Vec2, corner: f32) -> f32 {
    let corner = corner.min(half_size.x).min(half_size.y);
    let q = p.abs() - half_size + Vec2::splat(corner);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - corner
}

/// Signed distance to a closed polygon (vertices in order)
pub fn sd_polygon(p: Vec2, vertices: &[Vec2]) -> f32 {
    let n = vertices.len();
    if n < 3 {
        return f32::MAX;
    }
    let mut d = (p - vertices[0]).length_squared();
    let mut sign = 1.0;
    let mut j = n - 1;
    for i in 0..n {
        let e = vertices[j] - vertices[i];
        let w = p - vertices[i];
        let t = (w.dot(e) / e.length_squared()).clamp(0.0, 1.0);
        let b = w - e * t;
        d = d.min(b.length_squared());

        let c = [
            p.y >= vertices[i].y,
            p.y < vertices[j].y,
            e.x * w.y > e.y * w.x,
        ];
        if c.iter().all(|&x| x) || c.iter().all(|&x| !x) {
            sign = -sign;
        }
        j = i;
    }
    sign * d.sqrt()
}

/// Triangle inscribed in a `size` square: apex top-center, base along the bottom
pub fn triangle_vertices(size: f32) -> [Vec2; 3] {
    let h = size / 2.0;
    [Vec2::new(0.0, -h), Vec2::new(h, h), Vec2::new(-h, h)]
}

/// Flat-topped hexagon inscribed in a `size` square
pub fn hexagon_vertices(size: f32) -> [Vec2; 6] {
    let h = size / 2.0;
    let q = size / 4.0;
    [
        Vec2::new(-q, -h),
        Vec2::new(q, -h),
        Vec2::new(h, 0.0),
        Vec2::new(q, h),
        Vec2::new(-q, h),
        Vec2::new(-h, 0.0),
    ]
}

/// Rotate a point by `-degrees` (world to local for a body rotated by `degrees`)
#[inline]
pub fn to_local(p: Vec2, center: Vec2, degrees: f32) -> Vec2 {
    let (s, c) = (-degrees.to_radians()).sin_cos();
    let d = p - center;
    Vec2::new(d.x * c - d.y * s, d.x * s + d.y * c)
}
