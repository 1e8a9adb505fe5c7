//! A from-scratch multilayer-perceptron classifier.
//!
//! `mlp-classifier` implements the whole stack by hand: a dense `f64` [`Matrix`], per-layer
//! feed-forward and backpropagation, and the label bookkeeping that turns network outputs
//! into class decisions. There is no external linear-algebra or autodiff dependency.
//!
//! # Training regimen
//!
//! [`Classifier::train`] performs `epochs * N` single-example updates. Each update draws
//! one of the `N` rows uniformly at random (with replacement), runs the forward pass and
//! sweeps the layers from output to input. Each layer adds
//! `lr * (activation'(output) ⊙ error) · inputᵀ` to its weights, where the output error is
//! `target - output`.
//!
//! # Decisions
//!
//! - More than one output node: the index of the largest output, so labels are expected
//!   to be `0..output_nodes` and targets are one-hot encoded.
//! - A single output node: the output rounded down unless its fractional part exceeds
//!   [`labels::ROUND_UP_THRESHOLD`] (`0.65`).
//!
//! # Randomness
//!
//! Every random draw comes from an explicit [`rand::Rng`]. Seed one with
//! `StdRng::seed_from_u64` for reproducible runs.
//!
//! # Quick start
//!
//! ```rust
//! use mlp_classifier::{Classifier, ClassifierConfig, TrainConfig};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn main() -> mlp_classifier::Result<()> {
//! let mut xs = Vec::new();
//! let mut ys = Vec::new();
//! for _ in 0..10 {
//!     xs.push(vec![0.0, 0.0]);
//!     ys.push(vec![0.0]);
//!     xs.push(vec![1.0, 1.0]);
//!     ys.push(vec![1.0]);
//! }
//!
//! let config = ClassifierConfig {
//!     learning_rate: 0.5,
//!     ..ClassifierConfig::default()
//! };
//! let mut net = Classifier::new_with_seed(&[2, 4, 2], config, 0)?;
//! let mut rng = StdRng::seed_from_u64(0);
//! net.train(&xs, &ys, &TrainConfig { epochs: 50, ..TrainConfig::default() }, &mut rng, None)?;
//!
//! assert_eq!(net.classes(), &[0.0, 1.0]);
//! let accuracy = net.score(&xs, &ys)?;
//! assert!((0.0..=1.0).contains(&accuracy));
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod classifier;
pub mod data;
pub mod error;
pub mod labels;
pub mod layer;
pub(crate) mod matmul;
pub mod matrix;
pub mod metrics;
pub mod persist;
pub mod range;
pub mod scale;
pub mod train;

#[cfg(feature = "serde")]
pub mod serde_model;

pub use activation::Activation;
pub use classifier::{Classifier, ClassifierConfig};
pub use data::{TargetColumn, partition, read_csv, read_csv_plain, write_csv};
pub use error::{Error, Result};
pub use labels::{encode_target, round_with_bias, target_classes};
pub use layer::Layer;
pub use matrix::Matrix;
pub use metrics::{BinaryScore, ConfusionTally};
pub use persist::{load_layers, save_layers};
pub use range::RangeTracker;
pub use scale::{Normalizer, StandardScaler};
pub use train::{TrainConfig, TrainReport};
