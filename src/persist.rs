//! CSV persistence of layer parameters.
//!
//! Layer `i` (1-indexed) is stored as two files in a directory:
//! `weights_matrix<i>.csv` (shape `(output_nodes, input_nodes)`) and `bias_matrix<i>.csv`
//! (shape `(output_nodes, 1)`), both row-major with six decimals.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, trace};

use crate::data::{read_csv_plain, write_csv};
use crate::{Classifier, ClassifierConfig, Error, Layer, Matrix, Result};

pub fn weights_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("weights_matrix{index}.csv"))
}

pub fn bias_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("bias_matrix{index}.csv"))
}

impl Layer {
    /// Write this layer's weights and bias as layer number `index` (1-indexed).
    pub fn save<P: AsRef<Path>>(&self, dir: P, index: usize) -> Result<()> {
        let dir = dir.as_ref();
        write_csv(weights_path(dir, index), &self.weights().to_rows())?;
        write_csv(bias_path(dir, index), &self.bias().to_rows())?;
        trace!("saved layer {index} to {}", dir.display());
        Ok(())
    }

    /// Read layer number `index` (1-indexed). Node counts come from the weights file.
    pub fn load<P: AsRef<Path>>(dir: P, index: usize, config: &ClassifierConfig) -> Result<Self> {
        let dir = dir.as_ref();
        let weights = read_matrix(&weights_path(dir, index))?;
        let bias = read_matrix(&bias_path(dir, index))?;
        let layer = Layer::from_parts(weights, bias, config.activation, config.learning_rate)?;
        trace!(
            "loaded layer {index} ({} -> {}) from {}",
            layer.input_nodes(),
            layer.output_nodes(),
            dir.display()
        );
        Ok(layer)
    }
}

/// Write `layers` as layer files `1..=layers.len()`, creating `dir` if needed.
pub fn save_layers<P: AsRef<Path>>(dir: P, layers: &[Layer]) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .map_err(|e| Error::Io(format!("failed to create {}: {e}", dir.display())))?;
    for (i, layer) in layers.iter().enumerate() {
        layer.save(dir, i + 1)?;
    }
    info!("saved {} layers to {}", layers.len(), dir.display());
    Ok(())
}

/// Load layers `1, 2, ...` from `dir` until the next weights file is missing.
///
/// At least one layer is required. Adjacent widths are not checked here.
pub fn load_layers<P: AsRef<Path>>(dir: P, config: &ClassifierConfig) -> Result<Vec<Layer>> {
    let dir = dir.as_ref();
    config.validate()?;

    let mut layers = Vec::new();
    while weights_path(dir, layers.len() + 1).is_file() {
        layers.push(Layer::load(dir, layers.len() + 1, config)?);
    }
    if layers.is_empty() {
        return Err(Error::Io(format!(
            "no layer files found in {} (expected {})",
            dir.display(),
            weights_path(dir, 1).display()
        )));
    }

    info!("loaded {} layers from {}", layers.len(), dir.display());
    Ok(layers)
}

impl Classifier {
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        save_layers(dir, self.layers())
    }

    /// Rebuild a network from the layer files in `dir`.
    ///
    /// The class list of the loaded network is empty; set it with
    /// [`Classifier::set_classes`] or by training.
    pub fn load<P: AsRef<Path>>(dir: P, config: &ClassifierConfig) -> Result<Self> {
        Classifier::from_layers(load_layers(dir, config)?)
    }
}

fn read_matrix(path: &Path) -> Result<Matrix> {
    let rows = read_csv_plain(path)?;
    Matrix::from_rows(&rows)
        .map_err(|e| Error::Format(format!("{} is not a valid matrix: {e}", path.display())))
}
