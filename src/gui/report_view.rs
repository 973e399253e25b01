//! Report View Widget
//! Central panel with the header, cost metrics, yearly totals and charts.

use crate::charts::{ChartPlotter, TimeSeries};
use crate::data::Dataset;
use crate::report::CostReport;
use crate::stats::CostSummary;
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;
const YEARLY_CHART_HEIGHT: f32 = 220.0;
const TIME_SERIES_HEIGHT: f32 = 320.0;

/// Scrollable report area for the current dataset and selection.
#[derive(Default)]
pub struct ReportView {
    header: String,
    series: TimeSeries,
}

impl ReportView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the parts that depend only on the dataset.
    pub fn set_dataset(&mut self, dataset: &Dataset, title: &str) {
        self.header = header_text(title, dataset);
        self.series = TimeSeries::from_dataset(dataset);
    }

    pub fn clear(&mut self) {
        self.header.clear();
        self.series = TimeSeries::default();
    }

    pub fn show(
        &self,
        ui: &mut egui::Ui,
        report: Option<&CostReport>,
        error: Option<&str>,
        currency: &str,
    ) {
        if let Some(error) = error {
            ui.add_space(10.0);
            ui.label(
                RichText::new(format!("⚠ {}", error))
                    .size(16.0)
                    .color(Color32::from_rgb(220, 53, 69)),
            );
            return;
        }

        let Some(report) = report else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(&self.header).size(24.0).strong());
                ui.label(
                    RichText::new(format!("Version: {}", env!("CARGO_PKG_VERSION")))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(SECTION_SPACING);

                Self::draw_metrics(ui, &report.summary, currency);
                ui.add_space(SECTION_SPACING);

                ui.columns(2, |columns| {
                    Self::draw_totals_table(&mut columns[0], &report.summary, currency);
                    if report.summary.per_year_totals.is_empty() {
                        columns[1].label(RichText::new("No data").color(Color32::GRAY));
                    } else {
                        ChartPlotter::draw_yearly_totals_chart(
                            &mut columns[1],
                            &report.summary.per_year_totals,
                            currency,
                            YEARLY_CHART_HEIGHT,
                        );
                    }
                });
                ui.add_space(SECTION_SPACING);

                ui.label(
                    RichText::new("Monthly cost over the years")
                        .size(16.0)
                        .strong(),
                );
                ChartPlotter::draw_time_series_chart(
                    ui,
                    &self.series,
                    currency,
                    TIME_SERIES_HEIGHT,
                );
            });
    }

    /// Min/max/avg monthly cost boxes.
    fn draw_metrics(ui: &mut egui::Ui, summary: &CostSummary, currency: &str) {
        let metrics = [
            ("Min. monthly Cost", summary.min_cost),
            ("Max. monthly Cost", summary.max_cost),
            ("Avg. monthly Cost", summary.avg_cost),
        ];

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::GRAY))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.columns(metrics.len(), |columns| {
                    for (column, (label, value)) in columns.iter_mut().zip(metrics) {
                        column.label(
                            RichText::new(format!("{} ({})", label, currency))
                                .size(12.0)
                                .color(Color32::GRAY),
                        );
                        column.label(RichText::new(format!("{:.0}", value)).size(28.0));
                    }
                });
                ui.label(
                    RichText::new(format!("{} monthly bills selected", summary.count))
                        .size(11.0)
                        .color(Color32::GRAY),
                );
            });
    }

    fn draw_totals_table(ui: &mut egui::Ui, summary: &CostSummary, currency: &str) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("yearly_totals_table")
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label(RichText::new("Year").strong());
                        ui.label(RichText::new(format!("Total cost ({})", currency)).strong());
                        ui.label(RichText::new(format!("Electricity ({})", currency)).strong());
                        ui.end_row();

                        for (year, totals) in &summary.per_year_totals {
                            ui.label(year.to_string());
                            ui.label(format!("{:.2}", totals.total_cost));
                            ui.label(format!("{:.2}", totals.total_electricity));
                            ui.end_row();
                        }
                    });
            });
    }
}

/// Report heading with the dataset's year range, e.g. `MONTHLY COSTS (2019-2024)`.
pub fn header_text(title: &str, dataset: &Dataset) -> String {
    match dataset.year_range() {
        Some((first, last)) => format!("{} ({}-{})", title, first, last),
        None => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CostRecord;

    #[test]
    fn test_header_text() {
        let ds = Dataset::new(vec![
            CostRecord::new(2024, 1, 1.0, 1.0),
            CostRecord::new(2019, 5, 1.0, 1.0),
        ]);
        assert_eq!(header_text("MONTHLY COSTS", &ds), "MONTHLY COSTS (2019-2024)");
        assert_eq!(header_text("MONTHLY COSTS", &Dataset::default()), "MONTHLY COSTS");
    }

    #[test]
    fn test_set_dataset_and_clear() {
        let ds = Dataset::new(vec![CostRecord::new(2022, 3, 10.0, 1.0)]);
        let mut view = ReportView::new();
        view.set_dataset(&ds, "COSTS");
        assert_eq!(view.header, "COSTS (2022-2022)");
        assert_eq!(view.series.labels, vec!["2022-03"]);

        view.clear();
        assert!(view.header.is_empty());
        assert!(view.series.labels.is_empty());
    }
}
