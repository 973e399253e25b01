//! Control Panel Widget
//! Left side panel with the data source, year/month filters and the
//! filtered rows.

use crate::data::{CostRecord, Selection, ALL_MONTHS};
use egui::{Color32, RichText, ScrollArea};
use std::path::Path;

/// Left side control panel with source selection and filters.
pub struct ControlPanel {
    pub selection: Selection,
    pub years: Vec<i32>,
    pub source_name: String,
    pub status: String,
    pub has_error: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            years: Vec::new(),
            source_name: "No file selected".to_string(),
            status: "Ready".to_string(),
            has_error: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the selectable years after a dataset load.
    ///
    /// With `reset` the selection goes back to `default`; otherwise chosen
    /// years no longer present are dropped and the rest is kept.
    pub fn update_years(
        &mut self,
        years: impl IntoIterator<Item = i32>,
        default: Selection,
        reset: bool,
    ) {
        self.years = years.into_iter().collect();
        if reset {
            self.selection = default;
        } else {
            self.selection.years.retain(|y| self.years.contains(y));
        }
    }

    pub fn toggle_year(&mut self, year: i32) {
        if !self.selection.years.remove(&year) {
            self.selection.years.insert(year);
        }
    }

    pub fn toggle_month(&mut self, month: u32) {
        if !self.selection.months.remove(&month) {
            self.selection.months.insert(month);
        }
    }

    pub fn set_source(&mut self, path: &Path) {
        self.source_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
    }

    pub fn set_status(&mut self, status: impl Into<String>, is_error: bool) {
        self.status = status.into();
        self.has_error = is_error;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, view: &[CostRecord]) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 Cost Report")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&self.source_name).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Open…").clicked() {
                            action = ControlPanelAction::OpenFile;
                        }
                        if ui.button("⟳ Reload").clicked() {
                            action = ControlPanelAction::Reload;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filter Section =====
        let before = self.selection.clone();

        ui.horizontal(|ui| {
            ui.label(RichText::new("Filter by Year:").size(14.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Clear").clicked() {
                    self.selection.years.clear();
                }
                if ui.small_button("All").clicked() {
                    self.selection.years = self.years.iter().copied().collect();
                }
            });
        });
        ui.add_space(5.0);
        ui.horizontal_wrapped(|ui| {
            for year in self.years.clone() {
                let selected = self.selection.years.contains(&year);
                if ui.selectable_label(selected, year.to_string()).clicked() {
                    self.toggle_year(year);
                }
            }
        });

        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Filter by Month:").size(14.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Clear").clicked() {
                    self.selection.months.clear();
                }
                if ui.small_button("All").clicked() {
                    self.selection.months = ALL_MONTHS.collect();
                }
            });
        });
        ui.add_space(5.0);
        ui.horizontal_wrapped(|ui| {
            for month in ALL_MONTHS {
                let selected = self.selection.months.contains(&month);
                if ui.selectable_label(selected, month.to_string()).clicked() {
                    self.toggle_month(month);
                }
            }
        });

        if self.selection != before && action == ControlPanelAction::None {
            action = ControlPanelAction::SelectionChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filtered Rows =====
        ui.label(
            RichText::new(format!("🗒 Selected Months ({})", view.len()))
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);
        Self::draw_view_table(ui, view);

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status =====
        let status_color = if self.has_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn draw_view_table(ui: &mut egui::Ui, view: &[CostRecord]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt("filtered_rows")
                    .max_height(260.0)
                    .show(ui, |ui| {
                        egui::Grid::new("filtered_rows_grid")
                            .striped(true)
                            .min_col_width(50.0)
                            .spacing([8.0, 4.0])
                            .show(ui, |ui| {
                                for header in ["Year", "Month", "Cost", "Electricity"] {
                                    ui.label(RichText::new(header).strong().size(11.0));
                                }
                                ui.end_row();

                                for record in view {
                                    ui.label(RichText::new(record.year.to_string()).size(11.0));
                                    ui.label(RichText::new(record.month.to_string()).size(11.0));
                                    ui.label(RichText::new(format_value(record.cost)).size(11.0));
                                    ui.label(
                                        RichText::new(format_value(record.electricity)).size(11.0),
                                    );
                                    ui.end_row();
                                }
                            });
                    });
            });
    }
}

/// Two-decimal value, `NA` when missing.
pub fn format_value(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "NA".to_string())
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    OpenFile,
    Reload,
    SelectionChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_years_reset() {
        let mut panel = ControlPanel::new();
        panel.selection = Selection::new([2020], [3]);
        panel.update_years([2021, 2022], Selection::new([2022], []), true);

        assert_eq!(panel.years, vec![2021, 2022]);
        assert_eq!(panel.selection, Selection::new([2022], []));
    }

    #[test]
    fn test_update_years_keeps_selection() {
        let mut panel = ControlPanel::new();
        panel.selection = Selection::new([2020, 2021], [3]);
        panel.update_years([2021, 2022], Selection::new([2022], []), false);

        assert_eq!(panel.selection, Selection::new([2021], [3]));
    }

    #[test]
    fn test_toggles() {
        let mut panel = ControlPanel::new();
        panel.toggle_year(2022);
        panel.toggle_month(4);
        panel.toggle_month(5);
        panel.toggle_month(4);
        assert_eq!(panel.selection, Selection::new([2022], [5]));

        panel.toggle_year(2022);
        assert!(panel.selection.years.is_empty());
    }

    #[test]
    fn test_set_source_uses_file_name() {
        let mut panel = ControlPanel::new();
        panel.set_source(Path::new("vic/Analitika-stroski.xlsx"));
        assert_eq!(panel.source_name, "Analitika-stroski.xlsx");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(12.5)), "12.50");
        assert_eq!(format_value(None), "NA");
    }
}
