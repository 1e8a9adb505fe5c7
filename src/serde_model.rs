//! JSON snapshots of a classifier (feature: `serde`).
//!
//! The snapshot is a separate, versioned DTO rather than a serde derive on `Classifier`,
//! so the in-memory types can change without breaking saved files. Loading rebuilds the
//! network through the regular constructors; any rejection surfaces as `Error::Format`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Activation, Classifier, Error, Layer, Matrix, Result};

pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedClassifier {
    pub format_version: u32,
    /// Class labels as stored by the last `train`.
    pub classes: Vec<f64>,
    pub layers: Vec<SerializedLayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedLayer {
    pub input_nodes: usize,
    pub output_nodes: usize,
    pub activation: Activation,
    pub learning_rate: f64,
    /// Row-major (output_nodes, input_nodes).
    pub weights: Vec<f64>,
    pub bias: Vec<f64>,
}

impl SerializedLayer {
    /// Rebuild the layer, checking the declared node counts against the buffers.
    fn into_layer(self) -> Result<Layer> {
        let (inputs, outputs) = (self.input_nodes, self.output_nodes);
        if inputs.checked_mul(outputs) != Some(self.weights.len()) || self.bias.len() != outputs
        {
            return Err(Error::Format(format!(
                "declared {inputs} -> {outputs} nodes but holds {} weights and {} biases",
                self.weights.len(),
                self.bias.len()
            )));
        }
        if let Some(bad) = self.weights.iter().chain(&self.bias).find(|v| !v.is_finite()) {
            return Err(Error::Format(format!("non-finite parameter {bad}")));
        }

        let weights = Matrix::from_flat(outputs, inputs, self.weights)?;
        let bias = Matrix::from_flat(outputs, 1, self.bias)?;
        Layer::from_parts(weights, bias, self.activation, self.learning_rate)
    }
}

impl From<&Classifier> for SerializedClassifier {
    fn from(model: &Classifier) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            classes: model.classes().to_vec(),
            layers: model.layers().iter().map(SerializedLayer::from).collect(),
        }
    }
}

impl From<&Layer> for SerializedLayer {
    fn from(layer: &Layer) -> Self {
        Self {
            input_nodes: layer.input_nodes(),
            output_nodes: layer.output_nodes(),
            activation: layer.activation(),
            learning_rate: layer.learning_rate(),
            weights: layer.weights().to_vec(),
            bias: layer.bias().to_vec(),
        }
    }
}

impl TryFrom<SerializedClassifier> for Classifier {
    type Error = Error;

    fn try_from(snapshot: SerializedClassifier) -> std::result::Result<Self, Self::Error> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(Error::Format(format!(
                "snapshot format_version {} cannot be read (supported: {SNAPSHOT_FORMAT_VERSION})",
                snapshot.format_version
            )));
        }

        let layers = snapshot
            .layers
            .into_iter()
            .enumerate()
            .map(|(i, layer)| {
                layer
                    .into_layer()
                    .map_err(|e| Error::Format(format!("snapshot layer {}: {e}", i + 1)))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut model = Classifier::from_layers(layers)
            .map_err(|e| Error::Format(format!("snapshot layers do not form a network: {e}")))?;
        model.set_classes(snapshot.classes);
        Ok(model)
    }
}

impl Classifier {
    pub fn to_json_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&SerializedClassifier::from(self))
            .map_err(|e| Error::Format(format!("failed to serialize classifier: {e}")))
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let ser: SerializedClassifier = serde_json::from_str(s)
            .map_err(|e| Error::Format(format!("failed to parse classifier json: {e}")))?;
        ser.try_into()
    }

    /// Save a pretty-printed JSON snapshot.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = self.to_json_string_pretty()?;
        let p = path.as_ref();
        std::fs::write(p, s)
            .map_err(|e| Error::Io(format!("failed to write {}: {e}", p.display())))
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let s = std::fs::read_to_string(p)
            .map_err(|e| Error::Io(format!("failed to read {}: {e}", p.display())))?;
        Self::from_json_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClassifierConfig;

    #[test]
    fn json_roundtrip_preserves_parameters() {
        let mut net =
            Classifier::new_with_seed(&[3, 4, 2], ClassifierConfig::default(), 11).unwrap();
        net.set_classes(vec![1.0, 0.0]);

        let json = net.to_json_string_pretty().unwrap();
        assert!(json.contains("\"activation\": \"sigmoid\""));

        let loaded = Classifier::from_json_str(&json).unwrap();
        assert_eq!(loaded.sizes(), net.sizes());
        assert_eq!(loaded.classes(), &[0.0, 1.0]);
        for (a, b) in loaded.layers().iter().zip(net.layers()) {
            assert!(a.weights().approx_eq(b.weights(), 1e-12));
            assert!(a.bias().approx_eq(b.bias(), 1e-12));
            assert_eq!(a.activation(), b.activation());
        }
    }

    #[test]
    fn rejects_unknown_version() {
        let bad = r#"{"format_version":999,"classes":[],"layers":[]}"#;
        let err = Classifier::from_json_str(bad).unwrap_err();
        assert!(format!("{err}").contains("format_version"));
    }

    #[test]
    fn rejects_non_finite_parameters() {
        let net = Classifier::new_with_seed(&[2, 1], ClassifierConfig::default(), 0).unwrap();
        let mut ser = SerializedClassifier::from(&net);
        ser.layers[0].bias[0] = f64::INFINITY;
        assert!(matches!(
            Classifier::try_from(ser),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn rejects_buffers_that_disagree_with_node_counts() {
        let net = Classifier::new_with_seed(&[2, 2], ClassifierConfig::default(), 0).unwrap();
        let mut ser = SerializedClassifier::from(&net);
        ser.layers[0].bias.pop();
        assert!(matches!(
            Classifier::try_from(ser),
            Err(Error::Format(_))
        ));

        let empty = r#"{"format_version":1,"classes":[],"layers":[]}"#;
        assert!(matches!(
            Classifier::from_json_str(empty),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn rejects_mismatched_widths() {
        let net = Classifier::new_with_seed(&[2, 3, 1], ClassifierConfig::default(), 0).unwrap();
        let mut ser = SerializedClassifier::from(&net);
        ser.layers[1].input_nodes = 2;
        ser.layers[1].weights.truncate(2);
        assert!(matches!(
            Classifier::try_from(ser),
            Err(Error::Format(_))
        ));
    }
}
