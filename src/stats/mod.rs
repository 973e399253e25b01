//! Stats module - cost metrics and totals

mod calculator;

pub use calculator::{CostSummary, StatsCalculator, YearTotals};
