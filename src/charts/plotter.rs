//! Chart Plotter Module
//! Creates the yearly totals and monthly time-series charts using egui_plot.

use crate::data::Dataset;
use crate::stats::YearTotals;
use egui::Color32;
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use std::collections::BTreeMap;

pub const COST_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const ELECTRICITY_COLOR: Color32 = Color32::from_rgb(243, 156, 18); // Orange

/// Points along a categorical x axis; point `i` is labelled `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySeries {
    pub labels: Vec<String>,
    pub points: Vec<[f64; 2]>,
}

/// Cost and electricity for every record, against the period label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub labels: Vec<String>,
    pub cost: Vec<[f64; 2]>,
    pub electricity: Vec<[f64; 2]>,
}

impl TimeSeries {
    /// Build the series from the whole dataset, which is already in
    /// chronological order. Missing values leave gaps in their line.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut series = Self::default();
        for (i, record) in dataset.records().iter().enumerate() {
            let x = i as f64;
            series.labels.push(record.period_label());
            if let Some(cost) = record.cost {
                series.cost.push([x, cost]);
            }
            if let Some(electricity) = record.electricity {
                series.electricity.push([x, electricity]);
            }
        }
        series
    }
}

/// Creates report charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Total cost per year, one point per year in ascending order.
    ///
    /// Years are plotted as categories so the axis shows `2022`, not `2022.0`.
    pub fn yearly_series(totals: &BTreeMap<i32, YearTotals>) -> CategorySeries {
        let mut series = CategorySeries::default();
        for (i, (year, total)) in totals.iter().enumerate() {
            series.labels.push(year.to_string());
            series.points.push([i as f64, total.total_cost]);
        }
        series
    }

    /// Label for an axis mark; blank between categories.
    pub fn category_label(labels: &[String], value: f64) -> String {
        if value < 0.0 || value.fract() != 0.0 {
            return String::new();
        }
        labels.get(value as usize).cloned().unwrap_or_default()
    }

    /// Draw the line chart of total cost per year.
    pub fn draw_yearly_totals_chart(
        ui: &mut egui::Ui,
        totals: &BTreeMap<i32, YearTotals>,
        currency: &str,
        height: f32,
    ) {
        let series = Self::yearly_series(totals);
        let axis_labels = series.labels.clone();
        let hover_labels = series.labels.clone();

        Plot::new("yearly_totals")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label(format!("Total cost ({})", currency))
            .x_axis_formatter(move |mark, _range| Self::category_label(&axis_labels, mark.value))
            .label_formatter(move |_name, value| {
                format!(
                    "{}\n{:.2}",
                    Self::category_label(&hover_labels, value.x.round()),
                    value.y
                )
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(series.points.iter().copied()))
                        .color(COST_COLOR)
                        .width(2.0)
                        .name("Total cost"),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(series.points.iter().copied()))
                        .radius(4.0)
                        .color(COST_COLOR),
                );
            });
    }

    /// Draw cost and electricity for every month of the dataset.
    pub fn draw_time_series_chart(
        ui: &mut egui::Ui,
        series: &TimeSeries,
        currency: &str,
        height: f32,
    ) {
        let axis_labels = series.labels.clone();
        let hover_labels = series.labels.clone();

        Plot::new("monthly_time_series")
            .height(height)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_label("Monthly bills")
            .y_axis_label(format!("Cost ({})", currency))
            .x_axis_formatter(move |mark, _range| Self::category_label(&axis_labels, mark.value))
            .label_formatter(move |name, value| {
                let period = Self::category_label(&hover_labels, value.x.round());
                if name.is_empty() {
                    format!("{}\n{:.2}", period, value.y)
                } else {
                    format!("{}\n{}\n{:.2}", name, period, value.y)
                }
            })
            .show(ui, |plot_ui| {
                for (points, color, name) in [
                    (&series.cost, COST_COLOR, "Total cost"),
                    (&series.electricity, ELECTRICITY_COLOR, "Electricity bill"),
                ] {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(color)
                            .width(1.5)
                            .name(name),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(2.5)
                            .color(color)
                            .name(name),
                    );
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CostRecord;

    #[test]
    fn test_yearly_series() {
        let mut totals = BTreeMap::new();
        totals.insert(
            2023,
            YearTotals {
                total_cost: 50.0,
                total_electricity: 5.0,
            },
        );
        totals.insert(
            2022,
            YearTotals {
                total_cost: 300.0,
                total_electricity: 30.0,
            },
        );

        let series = ChartPlotter::yearly_series(&totals);
        assert_eq!(series.labels, vec!["2022", "2023"]);
        assert_eq!(series.points, vec![[0.0, 300.0], [1.0, 50.0]]);
    }

    #[test]
    fn test_category_label() {
        let labels = vec!["2022".to_string(), "2023".to_string()];
        assert_eq!(ChartPlotter::category_label(&labels, 1.0), "2023");
        assert_eq!(ChartPlotter::category_label(&labels, 0.5), "");
        assert_eq!(ChartPlotter::category_label(&labels, -1.0), "");
        assert_eq!(ChartPlotter::category_label(&labels, 2.0), "");
    }

    #[test]
    fn test_time_series_skips_missing_values() {
        let ds = Dataset::new(vec![
            CostRecord::new(2022, 2, 200.0, 20.0),
            CostRecord {
                year: 2022,
                month: 1,
                cost: Some(100.0),
                electricity: None,
            },
        ]);

        let series = TimeSeries::from_dataset(&ds);
        assert_eq!(series.labels, vec!["2022-01", "2022-02"]);
        assert_eq!(series.cost, vec![[0.0, 100.0], [1.0, 200.0]]);
        assert_eq!(series.electricity, vec![[1.0, 20.0]]);
    }
}
