//! Cost Data Loader Module
//! Reads monthly cost records from CSV (Polars) or spreadsheet (calamine) files.

use super::model::{CostRecord, Dataset};
use calamine::{open_workbook_auto, Data, Reader};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns every source must provide (matched case-insensitively).
pub const REQUIRED_COLUMNS: [&str; 4] = ["YEAR", "MONTH", "COST", "ELECTRICITY"];

/// Token treated as a missing value.
const NA_TOKEN: &str = "NA";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Data source not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to read data source: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Failed to load spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("Spreadsheet has no worksheets")]
    EmptyWorkbook,
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("Unsupported file format: .{0}")]
    UnsupportedFormat(String),
}

/// Loads cost datasets from disk.
pub struct DataLoader;

impl DataLoader {
    /// Load a dataset, dispatching on the file extension.
    ///
    /// The result is fully materialized and sorted by (year, month).
    pub fn load(path: &Path) -> Result<Dataset, LoadError> {
        if let Err(e) = std::fs::metadata(path) {
            return Err(match e.kind() {
                std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
                _ => LoadError::Io(e),
            });
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        let dataset = match ext.as_str() {
            "csv" => Self::load_csv(path)?,
            "xlsx" | "xlsm" | "xls" | "ods" => Self::load_spreadsheet(path)?,
            other => return Err(LoadError::UnsupportedFormat(other.to_string())),
        };

        log::info!(
            "Loaded {} cost records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(path: &Path) -> Result<Dataset, LoadError> {
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .with_null_values(Some(NullValues::AllColumnsSingle(NA_TOKEN.into())))
            .finish()?
            .collect()?;

        let headers: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let indices = locate_columns(&headers)?;

        // Non-numeric cells become null through the non-strict cast
        let mut columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(indices.len());
        for idx in indices {
            let values = df.column(&headers[idx])?.cast(&DataType::Float64)?;
            columns.push(values.f64()?.into_iter().collect());
        }

        let rows = (0..df.height()).map(|i| {
            [
                columns[0][i],
                columns[1][i],
                columns[2][i],
                columns[3][i],
            ]
        });
        Ok(build_dataset(rows, path))
    }

    /// Load the first worksheet of an Excel or OpenDocument file.
    pub fn load_spreadsheet(path: &Path) -> Result<Dataset, LoadError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoadError::EmptyWorkbook)??;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .map(|header| header.iter().map(|cell| cell.to_string()).collect())
            .unwrap_or_default();
        let indices = locate_columns(&headers)?;

        let rows = rows.map(|row| indices.map(|idx| row.get(idx).and_then(cell_value)));
        Ok(build_dataset(rows, path))
    }
}

/// Find the position of each required column in a header row.
fn locate_columns(headers: &[String]) -> Result<[usize; 4], LoadError> {
    let mut indices = [0usize; 4];
    let mut missing = Vec::new();

    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
        {
            Some(idx) => indices[slot] = idx,
            None => missing.push(name.to_string()),
        }
    }

    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(LoadError::MissingColumns(missing))
    }
}

/// Numeric value of a spreadsheet cell; `NA`, blanks and text are missing.
fn cell_value(cell: &Data) -> Option<f64> {
    let value = match cell {
        Data::Int(v) => *v as f64,
        Data::Float(v) => *v,
        Data::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    value.is_finite().then_some(value)
}

/// Whole number that fits `T`; fractions, overflow and NaN give `None`.
fn whole_number<T: TryFrom<i64>>(value: Option<f64>) -> Option<T> {
    let value = value.filter(|v| v.is_finite() && v.fract() == 0.0)?;
    if value < i64::MIN as f64 || value > i64::MAX as f64 {
        return None;
    }
    T::try_from(value as i64).ok()
}

/// Turn raw `[year, month, cost, electricity]` rows into a sorted dataset.
///
/// Rows whose year or month is missing or not a whole number are dropped.
fn build_dataset(
    rows: impl IntoIterator<Item = [Option<f64>; 4]>,
    source: &Path,
) -> Dataset {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for [year, month, cost, electricity] in rows {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        match (whole_number::<i32>(year), whole_number::<u32>(month)) {
            (Some(year), Some(month)) => records.push(CostRecord {
                year,
                month,
                cost: finite(cost),
                electricity: finite(electricity),
            }),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!(
            "Dropped {} rows without a valid year or month from {}",
            dropped,
            source.display()
        );
    }

    Dataset::new(records)
}
