//! Class-label bookkeeping.
//!
//! Raw targets are numeric labels in the first column of each target row. These helpers
//! discover the label set, turn labels into network target vectors, and turn a single
//! network output back into a decision.

use crate::{Error, Result};

/// Fractional part above which a single-output prediction rounds up.
pub const ROUND_UP_THRESHOLD: f64 = 0.65;

/// Sorted, duplicate-free labels found in the first column of `targets`.
///
/// The list always contains `0.0`, even when no target uses it. Empty target rows are
/// skipped.
pub fn target_classes(targets: &[Vec<f64>]) -> Vec<f64> {
    let mut classes: Vec<f64> = std::iter::once(0.0)
        .chain(targets.iter().filter_map(|row| row.first().copied()))
        .collect();
    sort_unique(&mut classes);
    classes
}

/// Sort by `total_cmp` and drop repeats, treating identical NaNs as equal.
pub(crate) fn sort_unique(values: &mut Vec<f64>) {
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| a.total_cmp(b).is_eq());
}

/// Index of `key` in `classes`.
pub fn position_of(classes: &[f64], key: f64) -> Option<usize> {
    classes.iter().position(|&c| c == key)
}

/// Rounds `y` down unless its fractional part exceeds [`ROUND_UP_THRESHOLD`].
pub fn round_with_bias(y: f64) -> f64 {
    let floor = y.floor();
    if y > floor + ROUND_UP_THRESHOLD {
        floor + 1.0
    } else {
        floor
    }
}

/// Encode a raw label as an `output_nodes`-wide target vector.
///
/// - `output_nodes == 1`: the label itself, `[label]`.
/// - `output_nodes > 1`: one-hot with `1.0` at index `label`. The label must be a
///   non-negative integer below `output_nodes`.
pub fn encode_target(label: f64, output_nodes: usize) -> Result<Vec<f64>> {
    if output_nodes == 0 {
        return Err(Error::InvalidTopology(
            "output_nodes must be > 0".to_owned(),
        ));
    }
    if output_nodes == 1 {
        return Ok(vec![label]);
    }

    if !(label.is_finite() && label >= 0.0 && label.fract() == 0.0) {
        return Err(Error::Format(format!(
            "label {label} is not a non-negative integer class"
        )));
    }
    let idx = label as usize;
    if idx >= output_nodes {
        return Err(Error::Format(format!(
            "label {label} does not fit in {output_nodes} output nodes"
        )));
    }

    let mut one_hot = vec![0.0; output_nodes];
    one_hot[idx] = 1.0;
    Ok(one_hot)
}
