//! Data Processor Module
//! Resolves the user's year/month selection and filters the dataset.

use super::model::{CostRecord, Dataset};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

/// Calendar months a selection can widen to.
pub const ALL_MONTHS: RangeInclusive<u32> = 1..=12;

/// Years and months picked in the filter panel.
///
/// An empty component widens to every value of that component as long as
/// the other component is non-empty (see [`Selection::resolve`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub years: BTreeSet<i32>,
    pub months: BTreeSet<u32>,
}

impl Selection {
    pub fn new(
        years: impl IntoIterator<Item = i32>,
        months: impl IntoIterator<Item = u32>,
    ) -> Self {
        Self {
            years: years.into_iter().collect(),
            months: months.into_iter().collect(),
        }
    }

    /// Initial selection: the most recent year, no month filter.
    pub fn default_for(dataset: &Dataset) -> Self {
        Self::new(dataset.latest_year(), [])
    }

    /// Apply the widening rules against `dataset`.
    ///
    /// Empty years with chosen months become every year in the dataset.
    /// Empty months with chosen years become all twelve months. When both
    /// are empty nothing is widened and nothing will match.
    pub fn resolve(&self, dataset: &Dataset) -> Selection {
        let mut resolved = self.clone();

        if resolved.years.is_empty() && !resolved.months.is_empty() {
            resolved.years = dataset.years();
        }
        if resolved.months.is_empty() && !resolved.years.is_empty() {
            resolved.months = ALL_MONTHS.collect();
        }

        resolved
    }

    /// Whether a record falls inside this selection, taken literally.
    pub fn matches(&self, record: &CostRecord) -> bool {
        self.years.contains(&record.year) && self.months.contains(&record.month)
    }
}

/// Produces filtered views of a dataset.
pub struct DataProcessor;

impl DataProcessor {
    /// Rows of `dataset` matching the resolved `selection`, in dataset order.
    pub fn filter(dataset: &Dataset, selection: &Selection) -> Vec<CostRecord> {
        let resolved = selection.resolve(dataset);
        dataset
            .records()
            .iter()
            .filter(|r| resolved.matches(r))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(vec![
            CostRecord::new(2021, 1, 10.0, 1.0),
            CostRecord::new(2021, 7, 20.0, 2.0),
            CostRecord::new(2022, 1, 30.0, 3.0),
            CostRecord::new(2022, 7, 40.0, 4.0),
            CostRecord::new(2023, 1, 50.0, 5.0),
        ])
    }

    fn periods(rows: &[CostRecord]) -> Vec<(i32, u32)> {
        rows.iter().map(|r| (r.year, r.month)).collect()
    }

    #[test]
    fn test_both_empty_matches_nothing() {
        let ds = sample();
        let selection = Selection::default();
        assert_eq!(selection.resolve(&ds), Selection::default());
        assert!(DataProcessor::filter(&ds, &selection).is_empty());
    }

    #[test]
    fn test_empty_years_widen_to_dataset_years() {
        let ds = sample();
        let resolved = Selection::new([], [1]).resolve(&ds);
        assert_eq!(resolved, Selection::new([2021, 2022, 2023], [1]));

        let rows = DataProcessor::filter(&ds, &Selection::new([], [1]));
        assert_eq!(periods(&rows), vec![(2021, 1), (2022, 1), (2023, 1)]);
    }

    #[test]
    fn test_empty_months_widen_to_all_months() {
        let ds = sample();
        let resolved = Selection::new([2022], []).resolve(&ds);
        assert_eq!(resolved.months, ALL_MONTHS.collect::<BTreeSet<u32>>());

        let rows = DataProcessor::filter(&ds, &Selection::new([2022], []));
        assert_eq!(periods(&rows), vec![(2022, 1), (2022, 7)]);
    }

    #[test]
    fn test_explicit_selection_not_widened() {
        let ds = sample();
        let selection = Selection::new([2021, 2023], [1, 7]);
        assert_eq!(selection.resolve(&ds), selection);

        let rows = DataProcessor::filter(&ds, &selection);
        assert_eq!(periods(&rows), vec![(2021, 1), (2021, 7), (2023, 1)]);
    }

    #[test]
    fn test_out_of_range_values_match_nothing() {
        let ds = sample();
        assert!(DataProcessor::filter(&ds, &Selection::new([2022], [13])).is_empty());
        assert!(DataProcessor::filter(&ds, &Selection::new([], [0])).is_empty());
        assert!(DataProcessor::filter(&ds, &Selection::new([1999], [])).is_empty());
    }

    #[test]
    fn test_month_only_on_empty_dataset() {
        let ds = Dataset::default();
        assert!(DataProcessor::filter(&ds, &Selection::new([], [1, 2])).is_empty());
    }

    #[test]
    fn test_default_selection() {
        assert_eq!(
            Selection::default_for(&sample()),
            Selection::new([2023], [])
        );
        assert_eq!(Selection::default_for(&Dataset::default()), Selection::default());
    }
}
