//! Value-range tracking for training diagnostics.
//!
//! A [`RangeTracker`] records the smallest and largest values it has been shown. Pass one
//! into [`crate::Classifier::train`] to see how far activations, errors and gradients
//! spread during a run, which helps spot saturated sigmoids or exploding updates.

use crate::Matrix;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeTracker {
    min: f64,
    max: f64,
    count: usize,
}

impl Default for RangeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeTracker {
    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }

    /// Record a single value. NaN is counted but does not move the bounds.
    #[inline]
    pub fn observe(&mut self, value: f64) {
        self.count += 1;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    pub fn observe_matrix(&mut self, m: &Matrix) {
        for &v in m.as_slice() {
            self.observe(v);
        }
    }

    /// Smallest value seen, or `None` before anything was observed.
    pub fn min(&self) -> Option<f64> {
        (self.min <= self.max).then_some(self.min)
    }

    /// Largest value seen, or `None` before anything was observed.
    pub fn max(&self) -> Option<f64> {
        (self.min <= self.max).then_some(self.max)
    }

    /// Number of values observed.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tracker_has_no_bounds() {
        let t = RangeTracker::new();
        assert_eq!(t.min(), None);
        assert_eq!(t.max(), None);
        assert_eq!(t.count(), 0);
    }

    #[test]
    fn tracks_min_and_max_across_matrices() {
        let mut t = RangeTracker::new();
        t.observe(0.5);
        t.observe_matrix(&Matrix::from_column(&[-2.0, 3.5, 1.0]).unwrap());
        assert_eq!(t.min(), Some(-2.0));
        assert_eq!(t.max(), Some(3.5));
        assert_eq!(t.count(), 4);

        t.reset();
        assert_eq!(t.min(), None);
    }
}
