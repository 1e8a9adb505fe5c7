use std::path::PathBuf;

use log::{debug, info};
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::data::table_width;
use crate::labels::{encode_target, target_classes};
use crate::{Classifier, Error, Matrix, RangeTracker, Result};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    /// Number of epochs. Each epoch is `N` random draws (with replacement) from the
    /// `N` training rows, not a pass over every row.
    pub epochs: usize,
    /// When set, every layer is written there as CSV after the last epoch.
    pub checkpoint_dir: Option<PathBuf>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            checkpoint_dir: None,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(Error::InvalidTopology("epochs must be > 0".to_owned()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// Total single-example updates applied.
    pub steps: usize,
    /// Mean of `0.5 * |target - output|^2` over the steps of the last epoch.
    pub final_error: f64,
}

impl Classifier {
    /// Train with per-example stochastic updates.
    ///
    /// `data` holds one feature row per example, `targets` the matching raw label rows
    /// (label in column 0). The class list is rediscovered from `targets` first.
    ///
    /// Every step draws an example uniformly at random, runs the forward pass, and sweeps
    /// the layers from last to first. Each layer is updated in place; the error handed to
    /// the layer before it uses the weights as they were before that update.
    ///
    /// Layers are written to disk only when `cfg.checkpoint_dir` is set; the default
    /// config persists nothing.
    ///
    /// On error the call stops immediately. Updates applied by earlier steps are kept.
    pub fn train<R: Rng + ?Sized>(
        &mut self,
        data: &[Vec<f64>],
        targets: &[Vec<f64>],
        cfg: &TrainConfig,
        rng: &mut R,
        mut tracker: Option<&mut RangeTracker>,
    ) -> Result<TrainReport> {
        cfg.validate()?;
        let width = table_width(data, "training data")?;
        if width != self.input_nodes() {
            return Err(Error::DimensionMismatch(format!(
                "training rows have {width} features, network expects {}",
                self.input_nodes()
            )));
        }
        if targets.len() != data.len() {
            return Err(Error::DimensionMismatch(format!(
                "data/targets length mismatch: {} vs {}",
                data.len(),
                targets.len()
            )));
        }

        self.classes = target_classes(targets);

        let output_nodes = self.output_nodes();
        let mut encoded = Vec::with_capacity(targets.len());
        for (i, row) in targets.iter().enumerate() {
            let label = row.first().copied().ok_or_else(|| {
                Error::DimensionMismatch(format!("target row {i} is empty"))
            })?;
            encoded.push(encode_target(label, output_nodes)?);
        }

        info!(
            "training {:?} on {} examples for {} epochs, classes={:?}",
            self.sizes(),
            data.len(),
            cfg.epochs,
            self.classes
        );

        let n = data.len();
        let mut final_error = 0.0;
        for epoch in 0..cfg.epochs {
            let mut epoch_error = 0.0;
            for _ in 0..n {
                let idx = rng.gen_range(0..n);
                epoch_error += self.train_step(&data[idx], &encoded[idx], tracker.as_deref_mut())?;
            }
            final_error = epoch_error / n as f64;
            debug!("epoch {epoch}: mean error {final_error:.6}");
        }

        if let Some(dir) = &cfg.checkpoint_dir {
            self.save(dir)?;
        }

        let steps = cfg.epochs * n;
        info!("training finished after {steps} steps, final error {final_error:.6}");
        Ok(TrainReport { steps, final_error })
    }

    /// One forward/backward pass on a single example. Returns `0.5 * |target - output|^2`
    /// measured before the update.
    fn train_step(
        &mut self,
        features: &[f64],
        target: &[f64],
        mut tracker: Option<&mut RangeTracker>,
    ) -> Result<f64> {
        let input = self.input_column(features)?;
        let outputs = self.forward_cached(input)?;
        let target = Matrix::from_column(target)?;

        let mut error = target.subtract(&outputs[outputs.len() - 1])?;
        let step_error = 0.5 * error.as_slice().iter().map(|e| e * e).sum::<f64>();

        if let Some(t) = tracker.as_deref_mut() {
            for out in &outputs[1..] {
                t.observe_matrix(out);
            }
            t.observe_matrix(&error);
        }

        for idx in (0..self.num_layers()).rev() {
            let layer = &mut self.layers_mut()[idx];
            let weights_t = layer.weights().transpose();
            let gradient = layer.back_propagate(&outputs[idx + 1], &outputs[idx], &error)?;
            if let Some(t) = tracker.as_deref_mut() {
                t.observe_matrix(&gradient);
            }
            if idx > 0 {
                error = weights_t.multiply(&gradient)?;
                if let Some(t) = tracker.as_deref_mut() {
                    t.observe_matrix(&error);
                }
            }
        }

        Ok(step_error)
    }
}
