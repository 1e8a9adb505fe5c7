//! Activation functions.
//!
//! A layer computes a pre-activation value `z = W x + b` and then applies an activation
//! element-wise: `y = activate(z)`.
//!
//! The derivative is always expressed in terms of the *activated* output `y`, not `z`.
//! Backprop only keeps the outputs of each layer, and for the supported functions the
//! derivative has a closed form in `y` (e.g. `y * (1 - y)` for the logistic sigmoid).

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Element-wise activation function, selected once per layer.
pub enum Activation {
    /// Logistic sigmoid, `1 / (1 + e^-x)`.
    #[default]
    Sigmoid,
    Tanh,
    Identity,
}

impl Activation {
    /// Look an activation up by its registry name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sigmoid" => Ok(Activation::Sigmoid),
            "tanh" => Ok(Activation::Tanh),
            "identity" => Ok(Activation::Identity),
            other => Err(Error::Format(format!("unknown activation `{other}`"))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Tanh => "tanh",
            Activation::Identity => "identity",
        }
    }

    #[inline]
    pub fn activate(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Tanh => x.tanh(),
            Activation::Identity => x,
        }
    }

    /// Derivative of the activation, given the activated output `y`.
    #[inline]
    pub fn derivative(self, y: f64) -> f64 {
        match self {
            Activation::Sigmoid => y * (1.0 - y),
            Activation::Tanh => 1.0 - y * y,
            Activation::Identity => 1.0,
        }
    }
}

impl FromStr for Activation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Activation::from_name(s)
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
