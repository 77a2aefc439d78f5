//! Slider challenges: match a target pattern within a tolerance

use serde::{Deserialize, Serialize};

/// A target slider pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub target_positions: Vec<f32>,
    /// Inclusive distance allowed from each target
    pub tolerance: f32,
    /// Nominal time limit (ms). Informational: an expired challenge stays active.
    pub time_limit: Option<f64>,
    pub description: String,
}

impl Challenge {
    pub fn new(targets: &[f32], tolerance: f32, time_limit: Option<f64>, description: &str) -> Self {
        Self {
            target_positions: targets.to_vec(),
            tolerance,
            time_limit,
            description: description.to_string(),
        }
    }

    /// Every slider is within tolerance of its target. A slider with no
    /// target makes the challenge incomplete.
    pub fn is_complete(&self, values: &[f32]) -> bool {
        values.iter().enumerate().all(|(i, v)| {
            self.target_positions
                .get(i)
                .is_some_and(|t| (v - t).abs() <= self.tolerance)
        })
    }
}

/// Built-in challenge catalog
pub fn catalog() -> Vec<Challenge> {
    vec![
        Challenge::new(
            &[100.0, 75.0, 50.0, 25.0, 0.0],
            5.0,
            Some(10_000.0),
            "Build a staircase down from left to right",
        ),
        Challenge::new(
            &[50.0, 50.0, 50.0, 50.0, 50.0],
            3.0,
            None,
            "Bring every slider to the middle",
        ),
        Challenge::new(
            &[80.0, 40.0, 10.0, 40.0, 80.0],
            5.0,
            Some(8_000.0),
            "Carve a valley",
        ),
        Challenge::new(
            &[20.0, 80.0, 20.0, 80.0, 20.0],
            6.0,
            Some(12_000.0),
            "Zig-zag between low and high",
        ),
    ]
}

/// The running challenge and when it started
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveChallenge {
    pub challenge: Challenge,
    /// Start time (ms)
    pub started_at: f64,
}

impl ActiveChallenge {
    pub fn elapsed(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }

    /// Time left against the nominal limit (ms), if the challenge has one
    pub fn remaining(&self, now: f64) -> Option<f64> {
        self.challenge
            .time_limit
            .map(|limit| (limit - self.elapsed(now)).max(0.0))
    }
}
