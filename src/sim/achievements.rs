//! Slider achievements
//!
//! A fixed catalog of one-shot unlocks driven by pure predicates over the
//! slider positions.

use serde::{Deserialize, Serialize};

use super::transient::{Transient, expire_slot};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    /// All sliders at the same position
    Perfect,
    /// Alternating up/down pattern
    Wave,
    /// Challenge finished inside the speed window
    Speed,
    /// Mirror-symmetric pattern
    Symmetry,
}

impl AchievementId {
    pub const ALL: [AchievementId; 4] = [
        AchievementId::Perfect,
        AchievementId::Wave,
        AchievementId::Speed,
        AchievementId::Symmetry,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            AchievementId::Perfect => "perfect",
            AchievementId::Wave => "wave",
            AchievementId::Speed => "speed",
            AchievementId::Symmetry => "symmetry",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AchievementId::Perfect => "Perfect Alignment",
            AchievementId::Wave => "Wave Master",
            AchievementId::Speed => "Speed Demon",
            AchievementId::Symmetry => "Symmetry Expert",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::Perfect => "Get all sliders to the same position",
            AchievementId::Wave => "Create a perfect wave pattern",
            AchievementId::Speed => "Move all sliders to target positions in under 3 seconds",
            AchievementId::Symmetry => "Create a perfectly symmetrical pattern",
        }
    }

    /// Score awarded on unlock
    pub fn bonus(&self) -> u64 {
        match self {
            AchievementId::Perfect => 1000,
            AchievementId::Wave => 800,
            AchievementId::Speed => 1500,
            AchievementId::Symmetry => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub unlocked: bool,
    /// Unlock time (ms)
    pub timestamp: Option<f64>,
}

/// All sliders within `MATCH_EPSILON` of the first one
pub fn is_aligned(values: &[f32]) -> bool {
    let Some(&first) = values.first() else {
        return false;
    };
    values.iter().all(|v| (v - first).abs() < MATCH_EPSILON)
}

/// Odd indices rise and even indices fall by more than `WAVE_PATTERN_STEP`.
/// A single slider has no neighbours to violate the pattern.
pub fn is_alternating(values: &[f32]) -> bool {
    if values.is_empty() {
        return false;
    }
    values.windows(2).enumerate().all(|(k, pair)| {
        let i = k + 1;
        let diff = pair[1] - pair[0];
        if i % 2 == 1 {
            diff > WAVE_PATTERN_STEP
        } else {
            diff < -WAVE_PATTERN_STEP
        }
    })
}

/// First half mirrors the second half within `MATCH_EPSILON`
pub fn is_symmetric(values: &[f32]) -> bool {
    let len = values.len();
    if len <= 1 {
        return false;
    }
    (0..len / 2).all(|i| (values[i] - values[len - 1 - i]).abs() < MATCH_EPSILON)
}

/// Catalog state plus the transient "last unlocked" toast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievements {
    pub entries: Vec<Achievement>,
    pub last_unlocked: Option<Transient<AchievementId>>,
}

impl Default for Achievements {
    fn default() -> Self {
        Self::new()
    }
}

impl Achievements {
    pub fn new() -> Self {
        Self {
            entries: AchievementId::ALL
                .iter()
                .map(|&id| Achievement {
                    id,
                    unlocked: false,
                    timestamp: None,
                })
                .collect(),
            last_unlocked: None,
        }
    }

    pub fn get(&self, id: AchievementId) -> Option<&Achievement> {
        self.entries.iter().find(|a| a.id == id)
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.get(id).is_some_and(|a| a.unlocked)
    }

    pub fn unlocked_count(&self) -> usize {
        self.entries.iter().filter(|a| a.unlocked).count()
    }

    /// Unlock `id` if still locked. Returns the bonus awarded (0 if already unlocked).
    pub fn unlock(&mut self, id: AchievementId, now: f64) -> u64 {
        let Some(entry) = self.entries.iter_mut().find(|a| a.id == id) else {
            return 0;
        };
        if entry.unlocked {
            return 0;
        }
        entry.unlocked = true;
        entry.timestamp = Some(now);
        self.last_unlocked = Some(Transient::new(id, now, ACHIEVEMENT_TOAST_MS));
        log::info!("Achievement unlocked: {}", id.title());
        id.bonus()
    }

    /// Run the pattern predicates for every achievement still locked.
    /// Returns the total bonus awarded.
    pub fn evaluate(&mut self, values: &[f32], now: f64) -> u64 {
        let mut bonus = 0;
        if !self.is_unlocked(AchievementId::Perfect) && is_aligned(values) {
            bonus += self.unlock(AchievementId::Perfect, now);
        }
        if !self.is_unlocked(AchievementId::Wave) && is_alternating(values) {
            bonus += self.unlock(AchievementId::Wave, now);
        }
        if !self.is_unlocked(AchievementId::Symmetry) && is_symmetric(values) {
            bonus += self.unlock(AchievementId::Symmetry, now);
        }
        bonus
    }

    /// The toast to show, if any
    pub fn toast(&self) -> Option<AchievementId> {
        self.last_unlocked.as_ref().map(|t| t.value)
    }

    /// Expire the toast
    pub fn tick(&mut self, now: f64) {
        expire_slot(&mut self.last_unlocked, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_predicate() {
        assert!(is_aligned(&[50.0, 51.5, 48.5]));
        assert!(!is_aligned(&[50.0, 52.0]));
        assert!(!is_aligned(&[]));
    }

    #[test]
    fn test_alternating_predicate() {
        assert!(is_alternating(&[20.0, 60.0, 30.0, 80.0, 10.0]));
        assert!(!is_alternating(&[20.0, 30.0, 10.0]));
        // Starting downward is not the pattern
        assert!(!is_alternating(&[80.0, 20.0, 90.0]));
        assert!(is_alternating(&[42.0]));
    }

    #[test]
    fn test_symmetry_predicate() {
        assert!(is_symmetric(&[50.0, 50.0]));
        assert!(!is_symmetric(&[10.0, 90.0]));
        assert!(is_symmetric(&[10.0, 40.0, 99.0, 41.0, 11.0]));
        assert!(!is_symmetric(&[50.0]));
    }

    #[test]
    fn test_alignment_unlocks_once() {
        let mut a = Achievements::new();
        let values = [50.0; 5];
        let first = a.evaluate(&values, 10.0);
        // Aligned sliders are also symmetric
        assert_eq!(first, 1000 + 500);
        assert_eq!(a.evaluate(&values, 20.0), 0);
        assert_eq!(a.get(AchievementId::Perfect).and_then(|x| x.timestamp), Some(10.0));
        assert_eq!(a.unlocked_count(), 2);
    }

    #[test]
    fn test_toast_expires_after_three_seconds() {
        let mut a = Achievements::new();
        a.unlock(AchievementId::Wave, 1000.0);
        assert_eq!(a.toast(), Some(AchievementId::Wave));
        a.tick(3999.0);
        assert!(a.toast().is_some());
        a.tick(4000.0);
        assert!(a.toast().is_none());
    }

    #[test]
    fn test_unlock_twice_awards_nothing() {
        let mut a = Achievements::new();
        assert_eq!(a.unlock(AchievementId::Speed, 0.0), 1500);
        assert_eq!(a.unlock(AchievementId::Speed, 1.0), 0);
        assert_eq!(a.get(AchievementId::Speed).and_then(|x| x.timestamp), Some(0.0));
    }

    #[test]
    fn test_catalog_ids_unique() {
        let a = Achievements::new();
        for id in AchievementId::ALL {
            assert_eq!(a.entries.iter().filter(|e| e.id == id).count(), 1);
        }
    }
}
