//! Feature scaling.
//!
//! Both scalers are fit once on training features and then applied to every table the
//! classifier consumes, so training and inference see the same transform.

use crate::data::table_width;
use crate::{Error, Result};

/// Per-column standardization, `(x - mean) / stddev`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    stddev: Vec<f64>,
}

impl StandardScaler {
    /// Fit column means and population standard deviations.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
        let width = table_width(rows, "scaler fit data")?;
        let n = rows.len() as f64;

        let mut mean = vec![0.0; width];
        for row in rows {
            for (m, &v) in mean.iter_mut().zip(row) {
                *m += v;
            }
        }
        for m in &mut mean {
            *m /= n;
        }

        let mut stddev = vec![0.0; width];
        for row in rows {
            for ((s, &m), &v) in stddev.iter_mut().zip(&mean).zip(row) {
                let d = v - m;
                *s += d * d;
            }
        }
        for s in &mut stddev {
            *s = (*s / n).sqrt();
        }

        Ok(Self { mean, stddev })
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn stddev(&self) -> &[f64] {
        &self.stddev
    }

    /// Standardize `rows`. Constant columns (zero deviation) map to `0.0`.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        check_width(rows, self.mean.len())?;
        Ok(rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(self.mean.iter().zip(&self.stddev))
                    .map(|(&v, (&m, &s))| if s == 0.0 { 0.0 } else { (v - m) / s })
                    .collect()
            })
            .collect())
    }
}

/// Per-column min/max scaling into a caller-chosen `[low, high]` range.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizer {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl Normalizer {
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
        let width = table_width(rows, "normalizer fit data")?;
        let mut min = vec![f64::INFINITY; width];
        let mut max = vec![f64::NEG_INFINITY; width];
        for row in rows {
            for (j, &v) in row.iter().enumerate() {
                min[j] = min[j].min(v);
                max[j] = max[j].max(v);
            }
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> &[f64] {
        &self.min
    }

    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// Map every column affinely so the fitted min lands on `low` and max on `high`.
    ///
    /// Columns that were constant during fit map to `(low + high) / 2`.
    pub fn transform(&self, rows: &[Vec<f64>], low: f64, high: f64) -> Result<Vec<Vec<f64>>> {
        check_width(rows, self.min.len())?;
        let mid = (low + high) / 2.0;
        Ok(rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(self.min.iter().zip(&self.max))
                    .map(|(&v, (&lo, &hi))| {
                        if lo == hi {
                            mid
                        } else {
                            (high - low) * (v - lo) / (hi - lo) + low
                        }
                    })
                    .collect()
            })
            .collect())
    }
}

fn check_width(rows: &[Vec<f64>], expected: usize) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != expected {
            return Err(Error::DimensionMismatch(format!(
                "row {i} has len {}, scaler was fit on {expected} columns",
                row.len()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn standard_scaler_centers_and_scales() {
        let rows = vec![vec![1.0, 10.0], vec![3.0, 10.0]];
        let s = StandardScaler::fit(&rows).unwrap();
        assert_eq!(s.mean(), &[2.0, 10.0]);
        assert_eq!(s.stddev(), &[1.0, 0.0]);

        let t = s.transform(&rows).unwrap();
        assert!(close(t[0][0], -1.0) && close(t[1][0], 1.0));
        // Constant column.
        assert_eq!(t[0][1], 0.0);
    }

    #[test]
    fn normalizer_maps_into_range() {
        let rows = vec![vec![0.0, 5.0], vec![10.0, 5.0], vec![5.0, 5.0]];
        let n = Normalizer::fit(&rows).unwrap();
        let t = n.transform(&rows, -1.0, 1.0).unwrap();
        assert!(close(t[0][0], -1.0));
        assert!(close(t[1][0], 1.0));
        assert!(close(t[2][0], 0.0));
        // Constant column lands on the midpoint.
        assert_eq!(t[0][1], 0.0);

        let unit = n.transform(&[vec![2.5, 7.0]], 0.0, 1.0).unwrap();
        assert!(close(unit[0][0], 0.25));
        assert!(close(unit[0][1], 0.5));
    }

    #[test]
    fn scalers_reject_bad_shapes() {
        assert!(StandardScaler::fit(&[]).is_err());
        assert!(Normalizer::fit(&[vec![1.0], vec![1.0, 2.0]]).is_err());

        let s = StandardScaler::fit(&[vec![1.0, 2.0]]).unwrap();
        assert!(matches!(
            s.transform(&[vec![1.0]]),
            Err(Error::DimensionMismatch(_))
        ));
    }
}
