//! Slider wave propagation
//!
//! Moving one slider drags its neighbours along with a falloff by index
//! distance. Pure function of the sequence and the single change.

use crate::clamp_percent;
use crate::consts::{WAVE_GAIN, WAVE_INFLUENCE};

/// Influence of a change at `changed` on index `i` in a sequence of `len`
#[inline]
pub fn influence(i: usize, changed: usize, len: usize) -> f32 {
    let distance = i.abs_diff(changed) as f32 / len as f32;
    (1.0 - distance).powi(2) * WAVE_INFLUENCE
}

/// Set `values[changed] = value` and perturb every other entry.
///
/// The perturbation is `delta * influence * WAVE_GAIN` where `delta` is the
/// signed change of the moved slider. Perturbed entries are clamped into
/// [0, 100]; the changed entry is stored exactly as given.
pub fn propagate_wave(values: &[f32], changed: usize, value: f32) -> Vec<f32> {
    let mut next = values.to_vec();
    let Some(previous) = values.get(changed).copied() else {
        return next;
    };
    let delta = value - previous;
    let len = values.len();

    for (i, v) in next.iter_mut().enumerate() {
        if i == changed {
            *v = value;
        } else {
            *v = clamp_percent(*v + delta * influence(i, changed, len) * WAVE_GAIN);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_index_is_exact() {
        let out = propagate_wave(&[30.0, 50.0, 70.0, 40.0, 60.0], 2, 85.0);
        assert_eq!(out[2], 85.0);
    }

    #[test]
    fn test_neighbours_follow_with_falloff() {
        let values = [50.0; 5];
        let out = propagate_wave(&values, 0, 52.0);
        // delta 2: index 1 gets 2 * (0.8^2 * 0.3) * 10 = 3.84
        assert!((out[1] - 53.84).abs() < 1e-4);
        assert!(out[1] > out[2] && out[2] > out[3] && out[3] > out[4]);
        assert!(out[4] > 50.0);
    }

    #[test]
    fn test_negative_delta_pushes_down_and_clamps() {
        let values = [0.0, 3.0, 100.0];
        let out = propagate_wave(&values, 2, 0.0);
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 0.0);
        assert_eq!(out[2], 0.0);
    }

    #[test]
    fn test_single_slider() {
        assert_eq!(propagate_wave(&[10.0], 0, 90.0), vec![90.0]);
    }

    #[test]
    fn test_out_of_range_index_is_noop() {
        let values = vec![1.0, 2.0];
        assert_eq!(propagate_wave(&values, 7, 50.0), values);
    }

    #[test]
    fn test_no_change_no_wave() {
        let values = vec![30.0, 50.0, 70.0];
        assert_eq!(propagate_wave(&values, 1, 50.0), values);
    }
}
