//! Statistics Calculator Module
//! Computes the cost metrics and per-year totals shown in the report.

use crate::data::CostRecord;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;

/// Summed costs of one year.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearTotals {
    pub total_cost: f64,
    pub total_electricity: f64,
}

/// Summary of a filtered view.
///
/// `min_cost`, `max_cost` and `avg_cost` are rounded half to even and fall
/// back to 0 when the view has no cost values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostSummary {
    pub count: usize,
    pub min_cost: f64,
    pub max_cost: f64,
    pub avg_cost: f64,
    pub per_year_totals: BTreeMap<i32, YearTotals>,
}

/// Handles the cost aggregations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute the summary of a filtered view.
    pub fn summarize(rows: &[CostRecord]) -> CostSummary {
        let costs: Vec<f64> = rows.iter().filter_map(|r| r.cost).collect();

        let mut summary = CostSummary {
            count: rows.len(),
            per_year_totals: Self::per_year_totals(rows),
            ..CostSummary::default()
        };

        if costs.is_empty() {
            return summary;
        }

        let sum: f64 = costs.iter().sum();
        summary.min_cost = Self::round(Statistics::min(costs.iter()));
        summary.max_cost = Self::round(Statistics::max(costs.iter()));
        summary.avg_cost = Self::round(sum / costs.len() as f64);
        summary
    }

    /// Sum cost and electricity per year, ascending by year.
    ///
    /// Missing values add nothing to a total.
    pub fn per_year_totals(rows: &[CostRecord]) -> BTreeMap<i32, YearTotals> {
        let mut totals: BTreeMap<i32, YearTotals> = BTreeMap::new();
        for row in rows {
            let entry = totals.entry(row.year).or_default();
            entry.total_cost += row.cost.unwrap_or(0.0);
            entry.total_electricity += row.electricity.unwrap_or(0.0);
        }
        totals
    }

    /// Round half to even, used for every rounded metric.
    pub fn round(value: f64) -> f64 {
        value.round_ties_even()
    }
}
