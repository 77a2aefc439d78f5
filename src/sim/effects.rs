//! Particle simulations behind the canvas overlay effects
//!
//! Each overlay advances on its own fixed step. Randomness comes from a
//! seeded `Pcg32` so a run is reproducible for a given seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Fixed-step clock for an overlay (ms)
#[derive(Debug, Clone)]
pub struct StepClock {
    pub interval_ms: f64,
    accumulator: f64,
    last: Option<f64>,
}

impl StepClock {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            accumulator: 0.0,
            last: None,
        }
    }

    /// Number of steps due at `now`, capped at `MAX_SUBSTEPS`
    pub fn advance(&mut self, now: f64) -> u32 {
        let Some(last) = self.last.replace(now) else {
            return 0;
        };
        self.accumulator += (now - last).max(0.0);

        let mut steps = 0;
        while self.accumulator >= self.interval_ms && steps < MAX_SUBSTEPS {
            self.accumulator -= self.interval_ms;
            steps += 1;
        }
        // Drop backlog after a long stall
        if steps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        steps
    }
}

/// Binary "digital rain" columns
#[derive(Debug, Clone)]
pub struct MatrixRain {
    /// Row index of each column's head
    pub drops: Vec<u32>,
    /// Glyph drawn at each head on the last step
    pub glyphs: Vec<char>,
    pub height: f32,
    pub clock: StepClock,
    rng: Pcg32,
}

pub const MATRIX_GLYPHS: [char; 2] = ['0', '1'];
pub const MATRIX_FONT_PX: f32 = 14.0;
/// Chance a column past the bottom restarts on a given step
pub const MATRIX_RESET_CHANCE: f64 = 0.025;

impl MatrixRain {
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        let columns = (width / MATRIX_FONT_PX).floor().max(0.0) as usize;
        Self {
            drops: vec![1; columns],
            glyphs: vec![MATRIX_GLYPHS[0]; columns],
            height,
            clock: StepClock::new(MATRIX_STEP_MS),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn step(&mut self) {
        for (drop, glyph) in self.drops.iter_mut().zip(self.glyphs.iter_mut()) {
            *glyph = MATRIX_GLYPHS[self.rng.random_range(0..MATRIX_GLYPHS.len())];
            if *drop as f32 * MATRIX_FONT_PX > self.height && self.rng.random_bool(MATRIX_RESET_CHANCE) {
                *drop = 0;
            }
            *drop += 1;
        }
    }

    pub fn update(&mut self, now: f64) -> u32 {
        let steps = self.clock.advance(now);
        for _ in 0..steps {
            self.step();
        }
        steps
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Raindrop {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub length: f32,
}

/// Falling streaks
#[derive(Debug, Clone)]
pub struct Rainfall {
    pub drops: Vec<Raindrop>,
    pub width: f32,
    pub height: f32,
    pub clock: StepClock,
    rng: Pcg32,
}

pub const RAIN_DROPS: usize = 100;

impl Rainfall {
    pub fn new(width: f32, height: f32, count_scale: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let count = scaled_count(RAIN_DROPS, count_scale);
        let drops = (0..count)
            .map(|_| Raindrop {
                x: rng.random_range(0.0..=width.max(0.0)),
                y: rng.random_range(0.0..=height.max(0.0)),
                speed: rng.random_range(5.0..15.0),
                length: rng.random_range(10.0..30.0),
            })
            .collect();
        Self {
            drops,
            width,
            height,
            clock: StepClock::new(PARTICLE_STEP_MS),
            rng,
        }
    }

    pub fn step(&mut self) {
        for drop in &mut self.drops {
            drop.y += drop.speed;
            if drop.y > self.height {
                drop.y = -drop.length;
                drop.x = self.rng.random_range(0.0..=self.width.max(0.0));
            }
        }
    }

    pub fn update(&mut self, now: f64) -> u32 {
        let steps = self.clock.advance(now);
        for _ in 0..steps {
            self.step();
        }
        steps
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VortexParticle {
    /// Radians
    pub angle: f32,
    pub radius: f32,
    /// Radians per step
    pub speed: f32,
}

/// Particles spiralling out from the viewport centre
#[derive(Debug, Clone)]
pub struct Vortex {
    pub particles: Vec<VortexParticle>,
    pub width: f32,
    pub height: f32,
    pub clock: StepClock,
}

pub const VORTEX_PARTICLES: usize = 200;
const VORTEX_GROWTH: f32 = 0.1;

impl Vortex {
    pub fn new(width: f32, height: f32, count_scale: f32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let count = scaled_count(VORTEX_PARTICLES, count_scale);
        let particles = (0..count)
            .map(|_| VortexParticle {
                angle: rng.random_range(0.0..std::f32::consts::TAU),
                radius: rng.random_range(0.0..200.0),
                speed: rng.random_range(0.01..0.03),
            })
            .collect();
        Self {
            particles,
            width,
            height,
            clock: StepClock::new(PARTICLE_STEP_MS),
        }
    }

    pub fn step(&mut self) {
        let max_radius = self.width.max(self.height);
        for p in &mut self.particles {
            p.angle += p.speed;
            p.radius += VORTEX_GROWTH;
            if p.radius > max_radius {
                p.radius = 0.0;
            }
        }
    }

    pub fn update(&mut self, now: f64) -> u32 {
        let steps = self.clock.advance(now);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Screen position of a particle
    pub fn position(&self, p: &VortexParticle) -> (f32, f32) {
        (
            self.width / 2.0 + p.angle.cos() * p.radius,
            self.height / 2.0 + p.angle.sin() * p.radius,
        )
    }

    /// Hue in degrees derived from the particle angle
    pub fn hue(p: &VortexParticle) -> f32 {
        p.angle.to_degrees().rem_euclid(360.0)
    }
}

fn scaled_count(base: usize, scale: f32) -> usize {
    ((base as f32 * scale.max(0.0)).round() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clock_fixed_steps() {
        let mut clock = StepClock::new(33.0);
        assert_eq!(clock.advance(0.0), 0);
        assert_eq!(clock.advance(20.0), 0);
        assert_eq!(clock.advance(70.0), 2);
        // Long stall is capped and the backlog dropped
        assert_eq!(clock.advance(10_000.0), MAX_SUBSTEPS);
        assert_eq!(clock.advance(10_010.0), 0);
    }

    #[test]
    fn test_matrix_columns_and_reset() {
        let mut m = MatrixRain::new(140.0, 28.0, 7);
        assert_eq!(m.drops.len(), 10);
        for _ in 0..2000 {
            m.step();
        }
        // Columns past the bottom eventually restart
        assert!(m.drops.iter().all(|&d| d < 2000));
        assert!(m.glyphs.iter().all(|g| MATRIX_GLYPHS.contains(g)));
    }

    #[test]
    fn test_matrix_deterministic_for_seed() {
        let mut a = MatrixRain::new(280.0, 50.0, 42);
        let mut b = MatrixRain::new(280.0, 50.0, 42);
        for _ in 0..300 {
            a.step();
            b.step();
        }
        assert_eq!(a.drops, b.drops);
        assert_eq!(a.glyphs, b.glyphs);
    }

    #[test]
    fn test_rain_wraps_above_top() {
        let mut r = Rainfall::new(300.0, 200.0, 1.0, 1);
        assert_eq!(r.drops.len(), RAIN_DROPS);
        for d in &r.drops {
            assert!((5.0..15.0).contains(&d.speed));
            assert!((10.0..30.0).contains(&d.length));
        }
        for _ in 0..500 {
            r.step();
            for d in &r.drops {
                assert!(d.y <= 200.0 + 15.0);
                assert!(d.y >= -30.0);
                assert!((0.0..=300.0).contains(&d.x));
            }
        }
    }

    #[test]
    fn test_quality_scales_counts() {
        assert_eq!(Rainfall::new(10.0, 10.0, 0.5, 0).drops.len(), 50);
        assert_eq!(Vortex::new(10.0, 10.0, 0.25, 0).particles.len(), 50);
        assert_eq!(Vortex::new(10.0, 10.0, 0.0, 0).particles.len(), 1);
    }

    #[test]
    fn test_vortex_radius_resets_beyond_viewport() {
        let mut v = Vortex::new(100.0, 50.0, 1.0, 3);
        for p in &mut v.particles {
            p.radius = 99.85;
        }
        v.step();
        assert!(v.particles.iter().all(|p| p.radius > 99.9 && p.radius <= 100.0));
        v.step();
        assert!(v.particles.iter().all(|p| p.radius == 0.0));
        let p = v.particles[0];
        assert_eq!(v.position(&p), (50.0, 25.0));
    }

    #[test]
    fn test_vortex_hue_in_range() {
        let p = VortexParticle {
            angle: -1.0,
            radius: 0.0,
            speed: 0.0,
        };
        let hue = Vortex::hue(&p);
        assert!((0.0..360.0).contains(&hue));
    }
}
