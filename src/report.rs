//! Filter/aggregate pipeline.
//!
//! One call per render: resolve the selection, filter the dataset, then
//! summarize the filtered rows. Pure; no state survives between calls.

use crate::data::{CostRecord, DataProcessor, Dataset, Selection};
use crate::stats::{CostSummary, StatsCalculator};

/// Filtered view and its summary for one selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostReport {
    pub view: Vec<CostRecord>,
    pub summary: CostSummary,
}

/// Run the pipeline for `selection` over `dataset`.
pub fn apply(dataset: &Dataset, selection: &Selection) -> CostReport {
    let view = DataProcessor::filter(dataset, selection);
    let summary = StatsCalculator::summarize(&view);
    log::debug!(
        "Report for {:?}/{:?}: {} of {} rows",
        selection.years,
        selection.months,
        view.len(),
        dataset.len()
    );
    CostReport { view, summary }
}
