use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::labels::{round_with_bias, sort_unique};
use crate::{Activation, Error, Layer, Matrix, Result};

/// Per-layer settings applied when a classifier creates or loads its layers.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierConfig {
    pub learning_rate: f64,
    pub activation: Activation,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-3,
            activation: Activation::Sigmoid,
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::InvalidTopology(format!(
                "learning rate must be finite and > 0, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

/// A multilayer perceptron used as a classifier.
///
/// Layers are applied in order; each layer's `output_nodes` equals the next layer's
/// `input_nodes`. The class list is discovered from raw targets by
/// [`Classifier::train`] and used by the scoring helpers.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier {
    layers: Vec<Layer>,
    pub(crate) classes: Vec<f64>,
}

impl Classifier {
    /// Build a freshly initialized network from layer widths `[input, hidden..., output]`.
    pub fn new_with_seed(sizes: &[usize], config: ClassifierConfig, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new_with_rng(sizes, config, &mut rng)
    }

    pub fn new_with_rng<R: Rng + ?Sized>(
        sizes: &[usize],
        config: ClassifierConfig,
        rng: &mut R,
    ) -> Result<Self> {
        if sizes.len() < 2 {
            return Err(Error::InvalidTopology(
                "sizes must include input and output node counts".to_owned(),
            ));
        }
        if sizes.contains(&0) {
            return Err(Error::InvalidTopology(format!(
                "all layer sizes must be > 0, got {sizes:?}"
            )));
        }
        config.validate()?;

        let mut layers = Vec::with_capacity(sizes.len() - 1);
        for w in sizes.windows(2) {
            layers.push(Layer::new_with_rng(
                w[0],
                w[1],
                config.activation,
                config.learning_rate,
                rng,
            )?);
        }
        Ok(Self {
            layers,
            classes: Vec::new(),
        })
    }

    /// Assemble a network from existing layers (e.g. loaded from disk).
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self> {
        if layers.is_empty() {
            return Err(Error::InvalidTopology(
                "classifier must have at least one layer".to_owned(),
            ));
        }
        for (i, pair) in layers.windows(2).enumerate() {
            if pair[0].output_nodes() != pair[1].input_nodes() {
                return Err(Error::InvalidTopology(format!(
                    "layer {} has {} output nodes but layer {} expects {} inputs",
                    i,
                    pair[0].output_nodes(),
                    i + 1,
                    pair[1].input_nodes()
                )));
            }
        }
        Ok(Self {
            layers,
            classes: Vec::new(),
        })
    }

    #[inline]
    pub fn input_nodes(&self) -> usize {
        self.layers[0].input_nodes()
    }

    #[inline]
    pub fn output_nodes(&self) -> usize {
        self.layers[self.layers.len() - 1].output_nodes()
    }

    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    #[inline]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[inline]
    pub fn layer(&self, idx: usize) -> Option<&Layer> {
        self.layers.get(idx)
    }

    /// Layer widths `[input, hidden..., output]`.
    pub fn sizes(&self) -> Vec<usize> {
        std::iter::once(self.input_nodes())
            .chain(self.layers.iter().map(Layer::output_nodes))
            .collect()
    }

    /// Class labels discovered by the last `train` call (empty before training).
    #[inline]
    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    /// Replace the class list, e.g. for a network loaded from disk that was never trained
    /// in this process. The list is sorted and deduplicated.
    pub fn set_classes(&mut self, mut classes: Vec<f64>) {
        sort_unique(&mut classes);
        self.classes = classes;
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Final activation vector for one feature row.
    pub fn predict_output(&self, features: &[f64]) -> Result<Vec<f64>> {
        Ok(self.feed_forward(features)?.to_vec())
    }

    /// Class decision for one feature row.
    ///
    /// - more than one output node: index of the largest output (first one on ties)
    /// - a single output node: the output rounded down, unless its fractional part
    ///   exceeds [`crate::labels::ROUND_UP_THRESHOLD`]
    pub fn predict(&self, features: &[f64]) -> Result<f64> {
        Ok(decide(&self.feed_forward(features)?))
    }

    /// Decisions for every row of `rows`.
    pub fn predict_all(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    fn feed_forward(&self, features: &[f64]) -> Result<Matrix> {
        let mut x = self.input_column(features)?;
        for layer in &self.layers {
            x = layer.feed_forward(&x)?;
        }
        Ok(x)
    }

    /// Forward pass keeping every layer's output. Index 0 is the input column itself.
    pub(crate) fn forward_cached(&self, input: Matrix) -> Result<Vec<Matrix>> {
        let mut outputs = Vec::with_capacity(self.layers.len() + 1);
        outputs.push(input);
        for layer in &self.layers {
            let next = layer.feed_forward(&outputs[outputs.len() - 1])?;
            outputs.push(next);
        }
        Ok(outputs)
    }

    pub(crate) fn input_column(&self, features: &[f64]) -> Result<Matrix> {
        if features.len() != self.input_nodes() {
            return Err(Error::DimensionMismatch(format!(
                "feature row has len {}, network expects {}",
                features.len(),
                self.input_nodes()
            )));
        }
        Matrix::from_column(features)
    }
}

fn decide(output: &Matrix) -> f64 {
    if output.rows() * output.cols() > 1 {
        output.argmax() as f64
    } else {
        round_with_bias(output.as_slice()[0])
    }
}
