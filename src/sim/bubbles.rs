//! Bubble-wrap grid

use serde::{Deserialize, Serialize};

use super::transient::{Transient, expire_all};
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BubbleGrid {
    /// One flag per bubble, row-major, `BUBBLE_ROW_SIZE` per row
    pub popped: Vec<bool>,
    /// Bubbles currently playing their pop animation
    pub animating: Vec<Transient<usize>>,
}

impl Default for BubbleGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl BubbleGrid {
    pub fn new() -> Self {
        Self {
            popped: vec![false; INITIAL_BUBBLES],
            animating: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.popped.len()
    }

    pub fn is_empty(&self) -> bool {
        self.popped.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.popped.len() / BUBBLE_ROW_SIZE
    }

    pub fn popped_count(&self) -> usize {
        self.popped.iter().filter(|&&p| p).count()
    }

    pub fn is_animating(&self, index: usize) -> bool {
        self.animating.iter().any(|t| t.value == index)
    }

    /// Pop progress in [0, 1] for a bubble mid-animation
    pub fn pop_progress(&self, index: usize, now: f64) -> Option<f32> {
        self.animating
            .iter()
            .find(|t| t.value == index)
            .map(|t| 1.0 - t.remaining_fraction(now, BUBBLE_POP_MS))
    }

    /// Pop a bubble. Returns false when out of range, already popped or
    /// still animating.
    pub fn pop(&mut self, index: usize, now: f64) -> bool {
        let Some(flag) = self.popped.get_mut(index) else {
            return false;
        };
        if *flag || self.animating.iter().any(|t| t.value == index) {
            return false;
        }
        *flag = true;
        self.animating.push(Transient::new(index, now, BUBBLE_POP_MS));
        true
    }

    /// Unpop everything
    pub fn reset(&mut self) {
        self.popped.iter_mut().for_each(|p| *p = false);
        self.animating.clear();
    }

    /// Append a row, up to `MAX_BUBBLE_ROWS`
    pub fn add_row(&mut self) -> bool {
        if self.rows() >= MAX_BUBBLE_ROWS {
            return false;
        }
        self.popped.extend([false; BUBBLE_ROW_SIZE]);
        true
    }

    /// Drop the last row, keeping at least one
    pub fn remove_row(&mut self) -> bool {
        if self.popped.len() <= BUBBLE_ROW_SIZE {
            return false;
        }
        let len = self.popped.len() - BUBBLE_ROW_SIZE;
        self.popped.truncate(len);
        self.animating.retain(|t| t.value < len);
        true
    }

    /// Clear finished pop animations
    pub fn tick(&mut self, now: f64) {
        expire_all(&mut self.animating, now);
    }

    /// Cancel pending animations (section unmount)
    pub fn clear_transients(&mut self) {
        self.animating.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_grid() {
        let g = BubbleGrid::new();
        assert_eq!(g.len(), 24);
        assert_eq!(g.rows(), 4);
        assert_eq!(g.popped_count(), 0);
    }

    #[test]
    fn test_pop_is_irreversible_and_once() {
        let mut g = BubbleGrid::new();
        assert!(g.pop(3, 0.0));
        assert!(g.popped[3]);
        assert!(!g.pop(3, 10.0));
        g.tick(1000.0);
        assert!(!g.pop(3, 1000.0));
        assert!(g.popped[3]);
        assert_eq!(g.popped_count(), 1);
    }

    #[test]
    fn test_animation_clears_after_600ms() {
        let mut g = BubbleGrid::new();
        g.pop(0, 100.0);
        g.tick(699.0);
        assert!(g.is_animating(0));
        assert!((g.pop_progress(0, 400.0).unwrap_or_default() - 0.5).abs() < 1e-4);
        g.tick(700.0);
        assert!(!g.is_animating(0));
    }

    #[test]
    fn test_pop_out_of_range() {
        let mut g = BubbleGrid::new();
        assert!(!g.pop(24, 0.0));
    }

    #[test]
    fn test_remove_only_row_is_noop() {
        let mut g = BubbleGrid::new();
        while g.remove_row() {}
        assert_eq!(g.len(), BUBBLE_ROW_SIZE);
        assert!(!g.remove_row());
        assert_eq!(g.len(), BUBBLE_ROW_SIZE);
    }

    #[test]
    fn test_remove_row_drops_trailing_animations() {
        let mut g = BubbleGrid::new();
        g.pop(23, 0.0);
        g.pop(2, 0.0);
        g.remove_row();
        assert_eq!(g.len(), 18);
        assert!(!g.is_animating(23));
        assert!(g.is_animating(2));
    }

    #[test]
    fn test_reset_and_grow() {
        let mut g = BubbleGrid::new();
        g.pop(1, 0.0);
        g.add_row();
        assert_eq!(g.len(), 30);
        g.reset();
        assert_eq!(g.popped_count(), 0);
        assert!(g.animating.is_empty());
        assert!(g.pop(1, 5.0));
    }

    #[test]
    fn test_add_row_stops_at_cap() {
        let mut g = BubbleGrid::new();
        while g.add_row() {}
        assert_eq!(g.rows(), MAX_BUBBLE_ROWS);
        assert!(!g.add_row());
        assert_eq!(g.len(), MAX_BUBBLE_ROWS * BUBBLE_ROW_SIZE);
    }
}
