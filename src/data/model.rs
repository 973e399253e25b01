//! Cost record and dataset types.

use std::collections::BTreeSet;

/// One month of utility costs.
///
/// `cost` and `electricity` are `None` when the source cell was missing
/// (`NA` or empty).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostRecord {
    pub year: i32,
    pub month: u32,
    pub cost: Option<f64>,
    pub electricity: Option<f64>,
}

impl CostRecord {
    #[cfg(test)]
    pub fn new(year: i32, month: u32, cost: f64, electricity: f64) -> Self {
        Self {
            year,
            month,
            cost: Some(cost),
            electricity: Some(electricity),
        }
    }

    /// Chronological label such as `2022-03`.
    ///
    /// The month is zero padded so labels sort the same way as the records.
    pub fn period_label(&self) -> String {
        format!("{}-{:02}", self.year, self.month)
    }
}

/// Immutable, ordered set of cost records.
///
/// Records are always kept in ascending (year, month) order; rows sharing
/// the same period keep their source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<CostRecord>,
}

impl Dataset {
    pub fn new(mut records: Vec<CostRecord>) -> Self {
        records.sort_by_key(|r| (r.year, r.month));
        Self { records }
    }

    pub fn records(&self) -> &[CostRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct years present in the dataset, ascending.
    pub fn years(&self) -> BTreeSet<i32> {
        self.records.iter().map(|r| r.year).collect()
    }

    /// Most recent year in the dataset.
    pub fn latest_year(&self) -> Option<i32> {
        self.records.last().map(|r| r.year)
    }

    /// First and last year in the dataset.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some((first.year, last.year)),
            _ => None,
        }
    }
}
