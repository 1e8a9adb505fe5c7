//! Metrics.
//!
//! Metrics are evaluation helpers (they do not participate in backprop). The canonical
//! score is confusion-tally accuracy; binary networks can also report
//! sensitivity/specificity.

use crate::data::table_width;
use crate::labels::{position_of, target_classes};
use crate::{Classifier, Error, Result};

/// Correct/incorrect prediction counts keyed by the predicted class.
///
/// `incorrect[i]` / `correct[i]` count predictions of `classes[i]`. Predictions that are
/// not in the class list land in `unlisted`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionTally {
    pub incorrect: Vec<usize>,
    pub correct: Vec<usize>,
    /// `[incorrect, correct]` for predictions outside the class list.
    pub unlisted: [usize; 2],
}

impl ConfusionTally {
    pub fn new(num_classes: usize) -> Self {
        Self {
            incorrect: vec![0; num_classes],
            correct: vec![0; num_classes],
            unlisted: [0; 2],
        }
    }

    pub fn record(&mut self, position: Option<usize>, is_correct: bool) {
        match position {
            Some(p) if is_correct => self.correct[p] += 1,
            Some(p) => self.incorrect[p] += 1,
            None => self.unlisted[usize::from(is_correct)] += 1,
        }
    }

    pub fn total_correct(&self) -> usize {
        self.correct.iter().sum::<usize>() + self.unlisted[1]
    }

    pub fn total(&self) -> usize {
        self.total_correct() + self.incorrect.iter().sum::<usize>() + self.unlisted[0]
    }

    /// Fraction of correct predictions; `0.0` for an empty tally.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.total_correct() as f64 / total as f64
    }
}

/// Detection rates of a single-output classifier. Label `0` is negative, anything else
/// positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryScore {
    /// True-positive rate, `tp / (tp + fn)`.
    pub sensitivity: f64,
    /// True-negative rate, `tn / (tn + fp)`.
    pub specificity: f64,
    /// Mean of sensitivity and specificity.
    pub efficiency: f64,
}

impl Classifier {
    /// Prediction tally against raw labels (column 0 of each target row).
    ///
    /// Uses the class list from the last `train`; if there is none, it is derived from
    /// `targets` without being stored.
    pub fn confusion(&self, data: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<ConfusionTally> {
        let labels = labels_of(data, targets)?;
        let derived;
        let classes = if self.classes().is_empty() {
            derived = target_classes(targets);
            derived.as_slice()
        } else {
            self.classes()
        };

        let mut tally = ConfusionTally::new(classes.len());
        for (row, label) in data.iter().zip(labels) {
            let prediction = self.predict(row)?;
            tally.record(position_of(classes, prediction), prediction == label);
        }
        Ok(tally)
    }

    /// Accuracy: correct predictions over all predictions.
    pub fn score(&self, data: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
        Ok(self.confusion(data, targets)?.accuracy())
    }

    /// Sensitivity, specificity and efficiency for a single-output network.
    pub fn binary_score(&self, data: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<BinaryScore> {
        if self.output_nodes() != 1 {
            return Err(Error::InvalidTopology(format!(
                "binary score needs a single output node, network has {}",
                self.output_nodes()
            )));
        }
        let labels = labels_of(data, targets)?;

        let (mut tp, mut tn, mut fp, mut fn_) = (0usize, 0usize, 0usize, 0usize);
        for (row, label) in data.iter().zip(labels) {
            let predicted_positive = self.predict(row)? != 0.0;
            match (label != 0.0, predicted_positive) {
                (true, true) => tp += 1,
                (true, false) => fn_ += 1,
                (false, false) => tn += 1,
                (false, true) => fp += 1,
            }
        }

        let sensitivity = ratio(tp, tp + fn_);
        let specificity = ratio(tn, tn + fp);
        Ok(BinaryScore {
            sensitivity,
            specificity,
            efficiency: (sensitivity + specificity) / 2.0,
        })
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn labels_of(data: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<Vec<f64>> {
    table_width(data, "evaluation data")?;
    if data.len() != targets.len() {
        return Err(Error::DimensionMismatch(format!(
            "data/targets length mismatch: {} vs {}",
            data.len(),
            targets.len()
        )));
    }
    targets
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.first()
                .copied()
                .ok_or_else(|| Error::DimensionMismatch(format!("target row {i} is empty")))
        })
        .collect()
}
