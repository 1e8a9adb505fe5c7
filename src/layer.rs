use rand::Rng;

use crate::{Activation, Error, Matrix, Result};

/// Lower/upper bound of the uniform draw used for fresh weights and biases.
pub const INIT_LOW: f64 = -1.0;
pub const INIT_HIGH: f64 = 1.0;

/// A dense layer: `activate(weights · input + bias)`.
///
/// Weights have shape `(output_nodes, input_nodes)`, the bias is `(output_nodes, 1)`.
/// Both are updated in place by [`Layer::back_propagate`] and never resized.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    weights: Matrix,
    bias: Matrix,
    activation: Activation,
    learning_rate: f64,
}

impl Layer {
    /// Layer with weights and bias drawn uniformly from `[-1, 1)`.
    pub fn new_with_rng<R: Rng + ?Sized>(
        input_nodes: usize,
        output_nodes: usize,
        activation: Activation,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if input_nodes == 0 || output_nodes == 0 {
            return Err(Error::InvalidTopology(format!(
                "layer node counts must be > 0, got input_nodes={input_nodes} output_nodes={output_nodes}"
            )));
        }
        validate_learning_rate(learning_rate)?;

        let mut weights = Matrix::new(output_nodes, input_nodes)?;
        weights.randomize_uniform(INIT_HIGH, INIT_LOW, rng);
        let mut bias = Matrix::new(output_nodes, 1)?;
        bias.randomize_uniform(INIT_HIGH, INIT_LOW, rng);

        Ok(Self {
            weights,
            bias,
            activation,
            learning_rate,
        })
    }

    /// Layer from existing parameters. Node counts are inferred from the weight shape.
    pub fn from_parts(
        weights: Matrix,
        bias: Matrix,
        activation: Activation,
        learning_rate: f64,
    ) -> Result<Self> {
        if bias.shape() != (weights.rows(), 1) {
            return Err(Error::DimensionMismatch(format!(
                "bias shape {}x{} does not match weights with {} rows (expected {}x1)",
                bias.rows(),
                bias.cols(),
                weights.rows(),
                weights.rows()
            )));
        }
        validate_learning_rate(learning_rate)?;

        Ok(Self {
            weights,
            bias,
            activation,
            learning_rate,
        })
    }

    #[inline]
    pub fn input_nodes(&self) -> usize {
        self.weights.cols()
    }

    #[inline]
    pub fn output_nodes(&self) -> usize {
        self.weights.rows()
    }

    #[inline]
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    #[inline]
    pub fn bias(&self) -> &Matrix {
        &self.bias
    }

    #[inline]
    pub fn activation(&self) -> Activation {
        self.activation
    }

    #[inline]
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Forward pass for a single `(input_nodes, 1)` column.
    pub fn feed_forward(&self, input: &Matrix) -> Result<Matrix> {
        if input.shape() != (self.input_nodes(), 1) {
            return Err(Error::DimensionMismatch(format!(
                "layer expects a {}x1 input, got {}x{}",
                self.input_nodes(),
                input.rows(),
                input.cols()
            )));
        }

        let mut output = self.weights.multiply(input)?.add(&self.bias)?;
        let act = self.activation;
        output.map_in_place(|z| act.activate(z));
        Ok(output)
    }

    /// Local backprop step.
    ///
    /// - `output`: what `feed_forward` returned for `input` (post-activation)
    /// - `input`: the column fed into this layer
    /// - `error`: error signal at this layer's output, `target - output` for the last layer
    ///
    /// Adds `lr * (activation'(output) ⊙ error) · inputᵀ` to the weights and the same
    /// scaled gradient to the bias, then returns that gradient. The error signal for the
    /// previous layer is `weightsᵀ · gradient`, using the weights from *before* this call.
    pub fn back_propagate(
        &mut self,
        output: &Matrix,
        input: &Matrix,
        error: &Matrix,
    ) -> Result<Matrix> {
        if output.shape() != self.bias.shape() {
            return Err(Error::DimensionMismatch(format!(
                "layer output is {}x{}, expected {}x1",
                output.rows(),
                output.cols(),
                self.output_nodes()
            )));
        }
        if input.shape() != (self.input_nodes(), 1) {
            return Err(Error::DimensionMismatch(format!(
                "layer input is {}x{}, expected {}x1",
                input.rows(),
                input.cols(),
                self.input_nodes()
            )));
        }

        let act = self.activation;
        let mut gradient = output.map(|y| act.derivative(y)).hadamard(error)?;
        gradient.scalar_multiply(self.learning_rate);

        let weight_delta = gradient.multiply(&input.transpose())?;
        self.weights = self.weights.add(&weight_delta)?;
        self.bias = self.bias.add(&gradient)?;

        Ok(gradient)
    }
}

fn validate_learning_rate(lr: f64) -> Result<()> {
    if !(lr.is_finite() && lr > 0.0) {
        return Err(Error::InvalidTopology(format!(
            "learning rate must be finite and > 0, got {lr}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixed_layer(lr: f64) -> Layer {
        let weights = Matrix::from_rows(&[vec![0.5, -0.25], vec![0.1, 0.8]]).unwrap();
        let bias = Matrix::from_column(&[0.05, -0.3]).unwrap();
        Layer::from_parts(weights, bias, Activation::Sigmoid, lr).unwrap()
    }

    fn half_sq_error(layer: &Layer, input: &Matrix, target: &Matrix) -> f64 {
        let out = layer.feed_forward(input).unwrap();
        let diff = target.subtract(&out).unwrap();
        0.5 * diff.as_slice().iter().map(|d| d * d).sum::<f64>()
    }

    #[test]
    fn rejects_non_positive_node_counts() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = Layer::new_with_rng(0, 3, Activation::Sigmoid, 0.1, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidTopology(_)));
        assert!(Layer::new_with_rng(2, 0, Activation::Sigmoid, 0.1, &mut rng).is_err());
        assert!(Layer::new_with_rng(2, 2, Activation::Sigmoid, 0.0, &mut rng).is_err());
    }

    #[test]
    fn random_init_has_expected_shapes_and_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let layer = Layer::new_with_rng(4, 3, Activation::Tanh, 0.1, &mut rng).unwrap();
        assert_eq!(layer.weights().shape(), (3, 4));
        assert_eq!(layer.bias().shape(), (3, 1));
        assert_eq!(layer.input_nodes(), 4);
        assert_eq!(layer.output_nodes(), 3);
        assert!(
            layer
                .weights()
                .as_slice()
                .iter()
                .chain(layer.bias().as_slice())
                .all(|&v| (INIT_LOW..INIT_HIGH).contains(&v))
        );
    }

    #[test]
    fn from_parts_checks_bias_shape() {
        let weights = Matrix::new(2, 3).unwrap();
        let bias = Matrix::new(3, 1).unwrap();
        assert!(matches!(
            Layer::from_parts(weights, bias, Activation::Sigmoid, 0.1),
            Err(Error::DimensionMismatch(_))
        ));
    }

    #[test]
    fn feed_forward_is_deterministic() {
        let layer = fixed_layer(0.1);
        let input = Matrix::from_column(&[1.0, 2.0]).unwrap();
        let a = layer.feed_forward(&input).unwrap();
        let b = layer.feed_forward(&input).unwrap();
        assert_eq!(a, b);

        // sigmoid(0.5 - 0.5 + 0.05)
        let expected = 1.0 / (1.0 + (-0.05_f64).exp());
        assert!((a.as_slice()[0] - expected).abs() < 1e-12);
    }

    #[test]
    fn feed_forward_rejects_wrong_input_rows() {
        let layer = fixed_layer(0.1);
        let input = Matrix::from_column(&[1.0, 2.0, 3.0]).unwrap();
        assert!(matches!(
            layer.feed_forward(&input),
            Err(Error::DimensionMismatch(_))
        ));
    }

    #[test]
    fn back_propagate_descends_squared_error() {
        let lr = 1e-3;
        let layer = fixed_layer(lr);
        let input = Matrix::from_column(&[0.3, -0.7]).unwrap();
        let target = Matrix::from_column(&[1.0, 0.0]).unwrap();

        let mut updated = layer.clone();
        let output = updated.feed_forward(&input).unwrap();
        let error = target.subtract(&output).unwrap();
        let gradient = updated.back_propagate(&output, &input, &error).unwrap();
        assert_eq!(gradient.shape(), (2, 1));

        // Each weight moves by -lr * dL/dw, with L = 0.5 * |target - output|^2.
        let eps = 1e-6;
        for r in 0..2 {
            for c in 0..2 {
                let mut plus = layer.clone();
                let mut minus = layer.clone();
                let w = layer.weights().get(r, c).unwrap();
                plus.weights.set(r, c, w + eps).unwrap();
                minus.weights.set(r, c, w - eps).unwrap();
                let numeric = (half_sq_error(&plus, &input, &target)
                    - half_sq_error(&minus, &input, &target))
                    / (2.0 * eps);

                let delta = updated.weights().get(r, c).unwrap() - w;
                assert!(
                    (delta + lr * numeric).abs() < 1e-9,
                    "w[{r}][{c}] delta={delta} numeric={numeric}"
                );
            }
        }

        let bias_delta = updated.bias().subtract(layer.bias()).unwrap();
        assert!(bias_delta.approx_eq(&gradient, 1e-15));
    }
}
