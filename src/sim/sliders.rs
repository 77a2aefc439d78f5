//! Slider bank: wave-coupled sliders with achievements and challenges

use serde::{Deserialize, Serialize};

use super::achievements::{AchievementId, Achievements};
use super::challenge::{ActiveChallenge, Challenge};
use super::wave::propagate_wave;
use crate::clamp_percent;
use crate::consts::*;

/// What a single slider move caused
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliderOutcome {
    /// Points added by this move
    pub points: u64,
    pub unlocked: Vec<AchievementId>,
    pub challenge_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderBank {
    pub positions: Vec<f32>,
    pub score: u64,
    pub achievements: Achievements,
    pub challenge: Option<ActiveChallenge>,
}

impl Default for SliderBank {
    fn default() -> Self {
        Self::new()
    }
}

impl SliderBank {
    pub fn new() -> Self {
        Self::with_positions(&INITIAL_SLIDERS)
    }

    /// Bank with the given positions (clamped). Falls back to one centered slider.
    pub fn with_positions(positions: &[f32]) -> Self {
        let mut positions: Vec<f32> = positions.iter().map(|&p| clamp_percent(p)).collect();
        if positions.is_empty() {
            positions.push(50.0);
        }
        Self {
            positions,
            score: 0,
            achievements: Achievements::new(),
            challenge: None,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn average(&self) -> f32 {
        if self.positions.is_empty() {
            return 0.0;
        }
        self.positions.iter().sum::<f32>() / self.positions.len() as f32
    }

    /// Append a slider 20 above the last one (wrapping at 100)
    pub fn add_slider(&mut self) {
        let last = self.positions.last().copied().unwrap_or(50.0);
        self.positions.push((last + SLIDER_APPEND_STEP) % 100.0);
    }

    /// Remove the last slider, keeping at least one
    pub fn remove_slider(&mut self) -> bool {
        if self.positions.len() <= 1 {
            return false;
        }
        self.positions.pop();
        true
    }

    /// Direct input on one slider. Propagates the wave, then scores.
    /// Out-of-range indices and non-finite values are ignored.
    pub fn set(&mut self, index: usize, value: f32, now: f64) -> SliderOutcome {
        if index >= self.positions.len() || !value.is_finite() {
            return SliderOutcome::default();
        }
        self.positions = propagate_wave(&self.positions, index, clamp_percent(value));

        let mut outcome = SliderOutcome::default();
        let before: Vec<bool> = AchievementId::ALL
            .iter()
            .map(|&id| self.achievements.is_unlocked(id))
            .collect();

        outcome.points += self.achievements.evaluate(&self.positions, now);
        if self.challenge.is_some() {
            let (points, completed) = self.check_challenge(now);
            outcome.points += points;
            outcome.challenge_completed = completed;
        }

        outcome.unlocked = AchievementId::ALL
            .iter()
            .zip(before)
            .filter(|&(&id, was)| !was && self.achievements.is_unlocked(id))
            .map(|(&id, _)| id)
            .collect();
        self.score += outcome.points;
        outcome
    }

    /// Start a challenge, replacing any running one
    pub fn start_challenge(&mut self, challenge: Challenge, now: f64) {
        log::info!("Challenge started: {}", challenge.description);
        self.challenge = Some(ActiveChallenge {
            challenge,
            started_at: now,
        });
    }

    /// Score the running challenge against the current positions.
    /// Returns (points, completed).
    fn check_challenge(&mut self, now: f64) -> (u64, bool) {
        let Some(active) = &self.challenge else {
            return (0, false);
        };
        if !active.challenge.is_complete(&self.positions) {
            return (0, false);
        }

        let mut points = 0;
        let in_window = active.elapsed(now) <= SPEED_WINDOW_MS;
        if in_window
            && active.challenge.time_limit.is_some()
            && !self.achievements.is_unlocked(AchievementId::Speed)
        {
            points += self.achievements.unlock(AchievementId::Speed, now);
        }

        points += CHALLENGE_BONUS;
        log::info!(
            "Challenge complete in {:.1}s: {}",
            active.elapsed(now) / 1000.0,
            active.challenge.description
        );
        self.challenge = None;
        (points, true)
    }

    /// Expire transient notifications
    pub fn tick(&mut self, now: f64) {
        self.achievements.tick(now);
    }

    /// Drop the pending toast (section unmount)
    pub fn clear_transients(&mut self) {
        self.achievements.last_unlocked = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::challenge::Challenge;

    fn stairs(time_limit: Option<f64>) -> Challenge {
        Challenge::new(&[100.0, 75.0, 50.0, 25.0, 0.0], 5.0, time_limit, "stairs")
    }

    #[test]
    fn test_initial_positions() {
        let bank = SliderBank::new();
        assert_eq!(bank.positions, INITIAL_SLIDERS.to_vec());
        assert_eq!(bank.score, 0);
    }

    #[test]
    fn test_non_finite_value_is_ignored() {
        let mut bank = SliderBank::new();
        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert_eq!(bank.set(0, bad, 0.0), SliderOutcome::default());
            assert_eq!(bank.positions, INITIAL_SLIDERS.to_vec());
        }

        // Later moves still propagate normally
        bank.set(1, 60.0, 10.0);
        assert!(bank.positions.iter().all(|v| v.is_finite()));
        assert_eq!(bank.positions[1], 60.0);
    }

    #[test]
    fn test_add_wraps_and_remove_floors() {
        let mut bank = SliderBank::new();
        bank.add_slider();
        assert_eq!(bank.positions.last(), Some(&80.0));
        bank.add_slider();
        assert_eq!(bank.positions.last(), Some(&0.0));

        while bank.remove_slider() {}
        assert_eq!(bank.len(), 1);
        assert!(!bank.remove_slider());
    }

    #[test]
    fn test_set_clamps_requested_value() {
        let mut bank = SliderBank::new();
        bank.set(0, 140.0, 0.0);
        assert_eq!(bank.positions[0], 100.0);
        assert!(bank.positions.iter().all(|p| (0.0..=100.0).contains(p)));
    }

    #[test]
    fn test_set_out_of_range_is_noop() {
        let mut bank = SliderBank::new();
        let before = bank.positions.clone();
        assert_eq!(bank.set(9, 10.0, 0.0), SliderOutcome::default());
        assert_eq!(bank.positions, before);
    }

    #[test]
    fn test_challenge_completion_scores_500() {
        let mut bank = SliderBank::with_positions(&[98.0, 75.0, 50.0, 25.0, 0.0]);
        bank.start_challenge(stairs(None), 0.0);
        // Move index 2 by zero: no wave, positions already match
        let outcome = bank.set(2, 50.0, 1000.0);
        assert!(outcome.challenge_completed);
        assert_eq!(outcome.points, 500);
        assert_eq!(bank.score, 500);
        assert!(bank.challenge.is_none());
    }

    #[test]
    fn test_fast_timed_challenge_unlocks_speed_demon() {
        let mut bank = SliderBank::with_positions(&[98.0, 75.0, 50.0, 25.0, 0.0]);
        bank.start_challenge(stairs(Some(10_000.0)), 0.0);
        let outcome = bank.set(2, 50.0, 2500.0);
        assert_eq!(outcome.points, 500 + 1500);
        assert_eq!(outcome.unlocked, vec![AchievementId::Speed]);
        assert_eq!(bank.achievements.toast(), Some(AchievementId::Speed));
    }

    #[test]
    fn test_slow_timed_challenge_scores_only_completion() {
        let mut bank = SliderBank::with_positions(&[98.0, 75.0, 50.0, 25.0, 0.0]);
        bank.start_challenge(stairs(Some(10_000.0)), 0.0);
        let outcome = bank.set(2, 50.0, 3001.0);
        assert_eq!(outcome.points, 500);
        assert!(!bank.achievements.is_unlocked(AchievementId::Speed));
    }

    #[test]
    fn test_speed_demon_only_once() {
        let mut bank = SliderBank::with_positions(&[98.0, 75.0, 50.0, 25.0, 0.0]);
        bank.start_challenge(stairs(Some(10_000.0)), 0.0);
        bank.set(2, 50.0, 100.0);
        bank.start_challenge(stairs(Some(10_000.0)), 200.0);
        let outcome = bank.set(2, 50.0, 300.0);
        assert_eq!(outcome.points, 500);
        assert_eq!(bank.score, 500 + 1500 + 500);
    }

    #[test]
    fn test_incomplete_challenge_stays_active_past_limit() {
        let mut bank = SliderBank::new();
        bank.start_challenge(stairs(Some(1000.0)), 0.0);
        bank.set(0, 31.0, 60_000.0);
        bank.tick(60_000.0);
        assert!(bank.challenge.is_some());
    }

    #[test]
    fn test_alignment_reported_in_outcome() {
        let mut bank = SliderBank::with_positions(&[50.0, 50.0, 50.0, 50.0, 51.0]);
        let outcome = bank.set(4, 50.0, 0.0);
        assert!(outcome.unlocked.contains(&AchievementId::Perfect));
        assert!(outcome.unlocked.contains(&AchievementId::Symmetry));
        assert_eq!(outcome.points, 1500);
        // Still aligned on the next move, nothing new
        assert_eq!(bank.set(4, 50.0, 10.0).points, 0);
    }

    #[test]
    fn test_average() {
        let bank = SliderBank::new();
        assert!((bank.average() - 50.0).abs() < 1e-5);
    }
}
