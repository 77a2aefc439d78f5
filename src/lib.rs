//! Fidgeteer - a browser fidget toy
//!
//! Core modules:
//! - `sim`: Pure widget state (motion, spinner inertia, slider waves, scoring)
//! - `layout`: Canvas geometry shared by hit testing and rendering
//! - `renderer`: WebGPU SDF pipeline and canvas overlays
//! - `platform`: Browser glue (frame loops, scoped listeners, DOM helpers)
//! - `settings`: In-memory UI preferences (theme, quality)

pub mod layout;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use layout::Layout;
pub use settings::{QualityPreset, Settings, Theme};

use glam::Vec2;

/// Compile-time configuration
pub mod consts {
    /// Bubbles per grid row
    pub const BUBBLE_ROW_SIZE: usize = 6;
    /// Initial bubble count (four rows)
    pub const INITIAL_BUBBLES: usize = 24;
    /// How long a popped bubble stays in its pop animation (ms)
    pub const BUBBLE_POP_MS: f64 = 600.0;
    /// Row cap, so the whole grid fits one frame's primitive budget
    pub const MAX_BUBBLE_ROWS: usize = 21;

    /// Initial slider positions
    pub const INITIAL_SLIDERS: [f32; 5] = [30.0, 50.0, 70.0, 40.0, 60.0];
    pub const SLIDER_MIN: f32 = 0.0;
    pub const SLIDER_MAX: f32 = 100.0;
    /// Offset used when appending a slider after the last one
    pub const SLIDER_APPEND_STEP: f32 = 20.0;

    /// Wave propagation tuning
    pub const WAVE_INFLUENCE: f32 = 0.3;
    pub const WAVE_GAIN: f32 = 10.0;

    /// Motion integrator tuning (per frame)
    pub const WALL_RESTITUTION: f32 = 0.9;
    pub const MOTION_FRICTION: f32 = 0.99;
    pub const ROTATION_COUPLING: f32 = 0.5;
    /// Throw velocity estimator gain applied to pointer deltas
    pub const THROW_GAIN: f32 = 0.3;
    /// Rendered side length of a draggable shape (px)
    pub const SHAPE_SIZE: f32 = 48.0;

    /// Spinner tuning
    pub const SPIN_FRICTION: f32 = 0.98;
    /// Below this angular speed (deg/s) the spinner snaps to rest
    pub const SPIN_REST_THRESHOLD: f32 = 0.1;
    /// Nominal frame time used to integrate spinner angle
    pub const SPIN_FRAME_TIME: f32 = 0.016;
    pub const SPIN_MAX_SPEED: f32 = 1000.0;
    pub const SPIN_NUDGE: f32 = 50.0;
    /// Degrees per frame added by passive auto-spin
    pub const AUTO_SPIN_STEP: f32 = 2.0;

    /// Scoring
    pub const CHALLENGE_BONUS: u64 = 500;
    /// Challenges completed within this window unlock Speed Demon (ms)
    pub const SPEED_WINDOW_MS: f64 = 3000.0;
    /// How long the "last achievement" toast stays up (ms)
    pub const ACHIEVEMENT_TOAST_MS: f64 = 3000.0;
    /// Tolerance used by the alignment and symmetry predicates
    pub const MATCH_EPSILON: f32 = 2.0;
    /// Minimum neighbour step for the alternating (wave) pattern
    pub const WAVE_PATTERN_STEP: f32 = 15.0;

    /// Button click ripple duration (ms)
    pub const RIPPLE_MS: f64 = 600.0;

    /// Fixed overlay effect steps (ms)
    pub const MATRIX_STEP_MS: f64 = 33.0;
    pub const PARTICLE_STEP_MS: f64 = 16.0;
    /// Maximum catch-up steps per frame to avoid a spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Normalize an angle in degrees to [-180, 180]
#[inline]
pub fn normalize_degrees(mut angle: f32) -> f32 {
    while angle > 180.0 {
        angle -= 360.0;
    }
    while angle < -180.0 {
        angle += 360.0;
    }
    angle
}

/// Angle (degrees) of a point relative to a center, screen coordinates
#[inline]
pub fn pointer_angle(point: Vec2, center: Vec2) -> f32 {
    let offset = point - center;
    offset.y.atan2(offset.x).to_degrees()
}

/// Clamp a value into the slider range
#[inline]
pub fn clamp_percent(value: f32) -> f32 {
    value.clamp(consts::SLIDER_MIN, consts::SLIDER_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees_wraps_both_ways() {
        assert!((normalize_degrees(190.0) - (-170.0)).abs() < 1e-4);
        assert!((normalize_degrees(-190.0) - 170.0).abs() < 1e-4);
        assert_eq!(normalize_degrees(45.0), 45.0);
    }

    #[test]
    fn test_pointer_angle_quadrants() {
        let c = Vec2::new(10.0, 10.0);
        assert!((pointer_angle(Vec2::new(20.0, 10.0), c)).abs() < 1e-4);
        // Screen y grows downward, so "below" the center is +90
        assert!((pointer_angle(Vec2::new(10.0, 20.0), c) - 90.0).abs() < 1e-4);
    }
}
