//! Numeric tables and CSV I/O.
//!
//! Tables are plain `Vec<Vec<f64>>` rows. Files are headerless, comma-delimited and must
//! carry a `.csv` extension. Values are written as fixed-point with six decimals, which is
//! also the format used for persisted weights.

use std::path::Path;

use log::trace;

use crate::{Error, Result};

/// Decimal digits used when writing values.
pub const WRITE_PRECISION: usize = 6;

/// Which column of a row holds the target label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetColumn {
    First,
    Last,
}

/// Read a numeric table from a CSV file.
///
/// `preprocess` runs on every raw cell before it is parsed, e.g. to map categorical tokens
/// such as `"g"`/`"b"` to `"1"`/`"0"`.
pub fn read_csv<P, F>(path: P, preprocess: F) -> Result<Vec<Vec<f64>>>
where
    P: AsRef<Path>,
    F: Fn(&str) -> String,
{
    let path = path.as_ref();
    ensure_csv(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| Error::Io(format!("failed to open {}: {e}", path.display())))?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = Vec::with_capacity(record.len());
        for (col, cell) in record.iter().enumerate() {
            let cell = preprocess(cell);
            let value = cell.trim().parse::<f64>().map_err(|e| {
                Error::Format(format!(
                    "{} row {line} col {col}: cannot parse `{cell}` as a number: {e}",
                    path.display()
                ))
            })?;
            row.push(value);
        }
        rows.push(row);
    }

    trace!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Read a numeric table without cell preprocessing.
pub fn read_csv_plain<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<f64>>> {
    read_csv(path, str::to_owned)
}

/// Write a numeric table to a CSV file, replacing any existing file.
pub fn write_csv<P: AsRef<Path>>(path: P, rows: &[Vec<f64>]) -> Result<()> {
    let path = path.as_ref();
    ensure_csv(path)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| Error::Io(format!("failed to create {}: {e}", path.display())))?;

    for row in rows {
        writer.write_record(row.iter().map(|v| format!("{:.*}", WRITE_PRECISION, v)))?;
    }
    writer
        .flush()
        .map_err(|e| Error::Io(format!("failed to write {}: {e}", path.display())))?;

    trace!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Split full rows into `(inputs, targets)`, taking the target from `position`.
///
/// Each target row holds exactly one value. Rows must have at least two columns.
pub fn partition(
    rows: &[Vec<f64>],
    position: TargetColumn,
) -> Result<(Vec<Vec<f64>>, Vec<Vec<f64>>)> {
    let mut inputs = Vec::with_capacity(rows.len());
    let mut targets = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        if row.len() < 2 {
            return Err(Error::DimensionMismatch(format!(
                "row {i} has {} columns, need at least 2 to partition",
                row.len()
            )));
        }
        let (input, target) = match position {
            TargetColumn::First => (&row[1..], &row[..1]),
            TargetColumn::Last => (&row[..row.len() - 1], &row[row.len() - 1..]),
        };
        inputs.push(input.to_vec());
        targets.push(target.to_vec());
    }

    Ok((inputs, targets))
}

/// Validate a table is non-empty and rectangular, returning its column count.
pub(crate) fn table_width(rows: &[Vec<f64>], what: &str) -> Result<usize> {
    let width = match rows.first() {
        Some(row) if !row.is_empty() => row.len(),
        _ => {
            return Err(Error::DimensionMismatch(format!(
                "{what} must not be empty"
            )));
        }
    };
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(Error::DimensionMismatch(format!(
                "{what} row {i} has len {}, expected {width}",
                row.len()
            )));
        }
    }
    Ok(width)
}

fn ensure_csv(path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(()),
        _ => Err(Error::UnsupportedFileType(path.display().to_string())),
    }
}
