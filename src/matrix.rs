//! Dense matrices.
//!
//! A [`Matrix`] stores `rows * cols` doubles contiguously in row-major order. The shape is
//! fixed at construction and both dimensions are at least 1.
//!
//! Binary algebra (`add`, `subtract`, `multiply`, `hadamard`, `map`, `transpose`) returns a
//! new matrix. The scalar operations and `map_in_place` are the only mutators.

use rand::Rng;

use crate::matmul::gemm;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    /// Row-major, `rows * cols` long.
    data: Vec<f64>,
}

impl Matrix {
    /// Zero-filled matrix with shape `(rows, cols)`.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::DimensionMismatch(format!(
                "matrix dims must be > 0, got {rows}x{cols}"
            )));
        }
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        })
    }

    /// Build a matrix from a flat row-major buffer.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::DimensionMismatch(format!(
                "matrix dims must be > 0, got {rows}x{cols}"
            )));
        }
        if data.len() != rows * cols {
            return Err(Error::DimensionMismatch(format!(
                "buffer length {} does not match {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Column vector (`values.len() x 1`) from a 1-D slice.
    pub fn from_column(values: &[f64]) -> Result<Self> {
        Self::from_flat(values.len(), 1, values.to_vec())
    }

    /// Matrix from nested rows. Every row must have the same, non-zero length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(Error::DimensionMismatch(
                "matrix rows must not be empty".to_owned(),
            ));
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::DimensionMismatch(format!(
                    "row {i} has len {}, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Row-major view of all elements.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Element at `(row, col)`, or `None` when out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Overwrite the element at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::DimensionMismatch(format!(
                "index ({row}, {col}) out of range for {}x{}",
                self.rows, self.cols
            )));
        }
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    /// The `idx`-th row, or `None` when out of range.
    #[inline]
    pub fn row(&self, idx: usize) -> Option<&[f64]> {
        (idx < self.rows).then(|| &self.data[idx * self.cols..(idx + 1) * self.cols])
    }

    /// Flatten into a row-major `Vec`.
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Split into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }

    pub fn add(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other, "add")?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    pub fn subtract(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other, "subtract")?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    /// Elementwise product of two equal-shaped matrices.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other, "hadamard")?;
        Ok(self.zip_with(other, |a, b| a * b))
    }

    /// Matrix product `self · other`.
    pub fn multiply(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::DimensionMismatch(format!(
                "multiply: lhs cols {} do not match rhs rows {} ({}x{} * {}x{})",
                self.cols, other.rows, self.rows, self.cols, other.rows, other.cols
            )));
        }

        let mut data = vec![0.0; self.rows * other.cols];
        gemm(
            self.rows,
            other.cols,
            self.cols,
            &self.data,
            &other.data,
            &mut data,
        );
        Ok(Matrix {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = vec![0.0; self.data.len()];
        for i in 0..self.rows {
            for j in 0..self.cols {
                data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// New matrix with `f` applied to every element.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn map_in_place<F: Fn(f64) -> f64>(&mut self, f: F) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    pub fn scalar_add(&mut self, k: f64) {
        self.map_in_place(|v| v + k);
    }

    pub fn scalar_subtract(&mut self, k: f64) {
        self.map_in_place(|v| v - k);
    }

    pub fn scalar_multiply(&mut self, k: f64) {
        self.map_in_place(|v| v * k);
    }

    /// Fill every cell with an independent draw from `[lo, hi)`.
    pub fn randomize_uniform<R: Rng + ?Sized>(&mut self, hi: f64, lo: f64, rng: &mut R) {
        let span = hi - lo;
        for v in &mut self.data {
            *v = span * rng.r#gen::<f64>() + lo;
        }
    }

    /// Row-major flat index of the largest element. Ties keep the first occurrence.
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (idx, &v) in self.data.iter().enumerate().skip(1) {
            if v > self.data[best] {
                best = idx;
            }
        }
        best
    }

    /// True when shapes match and every element differs by at most `tol`.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= tol)
    }

    fn check_same_shape(&self, other: &Matrix, op: &str) -> Result<()> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(Error::DimensionMismatch(format!(
                "{op}: shapes {}x{} and {}x{} differ",
                self.rows, self.cols, other.rows, other.cols
            )));
        }
        Ok(())
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(&self, other: &Matrix, f: F) -> Matrix {
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }
}
