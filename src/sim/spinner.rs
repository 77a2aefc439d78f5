//! Fidget spinner with drag-to-spin inertia
//!
//! Angles are in degrees, angular velocity in degrees per second. Manual
//! rotation samples the pointer angle around the spinner center; released
//! spinners coast and decay by a fixed friction factor per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{normalize_degrees, pointer_angle};

/// Spin direction, also the sign convention for manual drags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Clockwise => 1.0,
            Direction::CounterClockwise => -1.0,
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Visual spinner designs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinnerDesign {
    #[default]
    Classic,
    Minimal,
    Geometric,
    Industrial,
}

impl SpinnerDesign {
    pub const ALL: [SpinnerDesign; 4] = [
        SpinnerDesign::Classic,
        SpinnerDesign::Minimal,
        SpinnerDesign::Geometric,
        SpinnerDesign::Industrial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpinnerDesign::Classic => "Classic",
            SpinnerDesign::Minimal => "Minimal",
            SpinnerDesign::Geometric => "Geometric",
            SpinnerDesign::Industrial => "Industrial",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(SpinnerDesign::Classic),
            "minimal" => Some(SpinnerDesign::Minimal),
            "geometric" => Some(SpinnerDesign::Geometric),
            "industrial" => Some(SpinnerDesign::Industrial),
            _ => None,
        }
    }
}

/// Display bucket for the current angular speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedLabel {
    Stopped,
    Slow,
    Medium,
    Fast,
    SuperFast,
}

impl SpeedLabel {
    pub fn classify(velocity: f32) -> Self {
        let speed = velocity.abs();
        if speed < SPIN_REST_THRESHOLD {
            SpeedLabel::Stopped
        } else if speed < 100.0 {
            SpeedLabel::Slow
        } else if speed < 300.0 {
            SpeedLabel::Medium
        } else if speed < 600.0 {
            SpeedLabel::Fast
        } else {
            SpeedLabel::SuperFast
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedLabel::Stopped => "Stopped",
            SpeedLabel::Slow => "Slow",
            SpeedLabel::Medium => "Medium",
            SpeedLabel::Fast => "Fast",
            SpeedLabel::SuperFast => "Super Fast",
        }
    }
}

/// Last pointer sample while dragging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinSample {
    /// Pointer offset from the spinner center
    pub offset: Vec2,
    /// Sample time (ms)
    pub time: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spinner {
    /// Accumulated angle (degrees, unbounded)
    pub angle: f32,
    /// Angular velocity (degrees/second)
    pub angular_velocity: f32,
    pub direction: Direction,
    pub design: SpinnerDesign,
    /// Passive auto-spin (fixed step per frame)
    pub auto_spin: bool,
    /// Present while the pointer holds the spinner
    pub grab: Option<SpinSample>,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    pub fn speed_label(&self) -> SpeedLabel {
        SpeedLabel::classify(self.angular_velocity)
    }

    /// Grab the spinner at `point` (spinner centered at `center`)
    pub fn begin_drag(&mut self, point: Vec2, center: Vec2, now: f64) {
        self.grab = Some(SpinSample {
            offset: point - center,
            time: now,
        });
    }

    /// Rotate by the pointer's angular travel since the last sample
    pub fn drag_to(&mut self, point: Vec2, center: Vec2, now: f64) {
        let Some(last) = self.grab else {
            return;
        };
        let last_angle = pointer_angle(last.offset, Vec2::ZERO);
        let new_angle = pointer_angle(point, center);
        let delta = normalize_degrees(new_angle - last_angle);

        let elapsed = ((now - last.time) / 1000.0) as f32;
        if elapsed > 0.0 {
            self.angular_velocity = delta / elapsed * self.direction.sign();
        }
        self.angle += delta;

        self.grab = Some(SpinSample {
            offset: point - center,
            time: now,
        });
    }

    /// Release the spinner; it keeps the last measured velocity
    pub fn end_drag(&mut self) {
        self.grab = None;
    }

    /// Nudge the speed in the current direction
    pub fn adjust_velocity(&mut self, delta: f32) {
        let v = self.angular_velocity + delta * self.direction.sign();
        self.angular_velocity = v.clamp(-SPIN_MAX_SPEED, SPIN_MAX_SPEED);
    }

    /// Reverse direction and the current spin
    pub fn toggle_direction(&mut self) {
        self.direction = self.direction.flipped();
        self.angular_velocity = -self.angular_velocity;
    }

    pub fn toggle_auto_spin(&mut self) -> bool {
        self.auto_spin = !self.auto_spin;
        self.auto_spin
    }

    pub fn set_design(&mut self, design: SpinnerDesign) {
        self.design = design;
    }

    /// Advance one frame of free spin
    pub fn tick(&mut self) {
        if self.is_dragging() {
            return;
        }
        let v = self.angular_velocity;
        self.angular_velocity = if v.abs() < SPIN_REST_THRESHOLD {
            0.0
        } else {
            v * SPIN_FRICTION
        };
        self.angle += self.angular_velocity * SPIN_FRAME_TIME;

        if self.auto_spin {
            self.angle = (self.angle + AUTO_SPIN_STEP).rem_euclid(360.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_labels() {
        assert_eq!(SpeedLabel::classify(0.05), SpeedLabel::Stopped);
        assert_eq!(SpeedLabel::classify(-50.0), SpeedLabel::Slow);
        assert_eq!(SpeedLabel::classify(100.0), SpeedLabel::Medium);
        assert_eq!(SpeedLabel::classify(599.9), SpeedLabel::Fast);
        assert_eq!(SpeedLabel::classify(-600.0), SpeedLabel::SuperFast);
    }

    #[test]
    fn test_friction_reaches_exact_zero_without_sign_flip() {
        let mut s = Spinner::new();
        s.angular_velocity = 200.0;
        let mut prev = s.angular_velocity;
        for _ in 0..2000 {
            s.tick();
            assert!(s.angular_velocity >= 0.0);
            assert!(s.angular_velocity <= prev);
            prev = s.angular_velocity;
        }
        assert_eq!(s.angular_velocity, 0.0);
    }

    #[test]
    fn test_angle_integrates_with_nominal_frame_time() {
        let mut s = Spinner::new();
        s.angular_velocity = 100.0;
        s.tick();
        assert!((s.angle - 98.0 * 0.016).abs() < 1e-4);
    }

    #[test]
    fn test_drag_measures_velocity() {
        let mut s = Spinner::new();
        let c = Vec2::new(100.0, 100.0);
        s.begin_drag(Vec2::new(150.0, 100.0), c, 0.0);
        // Quarter turn in 100ms
        s.drag_to(Vec2::new(100.0, 150.0), c, 100.0);
        assert!((s.angle - 90.0).abs() < 1e-3);
        assert!((s.angular_velocity - 900.0).abs() < 1e-2);

        // Dragging suspends friction
        s.tick();
        assert!((s.angular_velocity - 900.0).abs() < 1e-2);
        s.end_drag();
        s.tick();
        assert!(s.angular_velocity < 900.0);
    }

    #[test]
    fn test_drag_across_the_seam_is_short_way_round() {
        let mut s = Spinner::new();
        let c = Vec2::ZERO;
        // Just above and just below the negative x axis
        s.begin_drag(Vec2::new(-100.0, -1.0), c, 0.0);
        s.drag_to(Vec2::new(-100.0, 1.0), c, 16.0);
        assert!(s.angle.abs() < 5.0, "angle jumped: {}", s.angle);
    }

    #[test]
    fn test_counterclockwise_drag_sign() {
        let mut s = Spinner::new();
        s.toggle_direction();
        let c = Vec2::ZERO;
        s.begin_drag(Vec2::new(10.0, 0.0), c, 0.0);
        s.drag_to(Vec2::new(0.0, 10.0), c, 1000.0);
        assert!((s.angular_velocity + 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_elapsed_keeps_velocity() {
        let mut s = Spinner::new();
        s.angular_velocity = 42.0;
        let c = Vec2::ZERO;
        s.begin_drag(Vec2::new(10.0, 0.0), c, 5.0);
        s.drag_to(Vec2::new(0.0, 10.0), c, 5.0);
        assert_eq!(s.angular_velocity, 42.0);
    }

    #[test]
    fn test_toggle_direction_negates_velocity() {
        let mut s = Spinner::new();
        s.angular_velocity = 250.0;
        s.toggle_direction();
        assert_eq!(s.direction, Direction::CounterClockwise);
        assert_eq!(s.angular_velocity, -250.0);
    }

    #[test]
    fn test_adjust_velocity_clamps() {
        let mut s = Spinner::new();
        for _ in 0..30 {
            s.adjust_velocity(SPIN_NUDGE);
        }
        assert_eq!(s.angular_velocity, SPIN_MAX_SPEED);
        s.toggle_direction();
        s.adjust_velocity(SPIN_NUDGE);
        assert_eq!(s.angular_velocity, -SPIN_MAX_SPEED);
    }

    #[test]
    fn test_auto_spin_wraps() {
        let mut s = Spinner::new();
        s.angle = 359.0;
        s.toggle_auto_spin();
        s.tick();
        assert!((s.angle - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_design_parsing() {
        assert_eq!(SpinnerDesign::from_str("Geometric"), Some(SpinnerDesign::Geometric));
        assert_eq!(SpinnerDesign::from_str("nope"), None);
    }
}
