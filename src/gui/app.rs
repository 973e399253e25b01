//! Cost Report Main Application
//! Main window with the filter panel and the report view.

use crate::config::ReportConfig;
use crate::data::{DatasetCache, Dataset, LoadError, Selection};
use crate::gui::{ControlPanel, ControlPanelAction, ReportView};
use crate::report::{self, CostReport};
use egui::SidePanel;
use std::sync::Arc;

/// Main application window.
pub struct CostReportApp {
    config: ReportConfig,
    cache: DatasetCache,
    dataset: Option<Arc<Dataset>>,
    control_panel: ControlPanel,
    report_view: ReportView,

    // Report for `report_selection`, recomputed when the selection changes
    report: Option<CostReport>,
    report_selection: Option<Selection>,

    // Set after a failed load; cleared by Reload or Open
    load_error: Option<String>,
}

impl CostReportApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ReportConfig) -> Self {
        let cache = DatasetCache::new(config.data_path.clone(), config.cache_ttl());
        let mut control_panel = ControlPanel::new();
        control_panel.set_source(cache.source());

        let mut app = Self {
            config,
            cache,
            dataset: None,
            control_panel,
            report_view: ReportView::new(),
            report: None,
            report_selection: None,
            load_error: None,
        };
        app.refresh_dataset();
        app
    }

    /// Fetch the dataset through the cache; reads the source only once the
    /// cached entry has expired.
    fn refresh_dataset(&mut self) {
        match self.cache.get() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => self.handle_load_error(e),
        }
    }

    fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        if let Some(current) = &self.dataset {
            if Arc::ptr_eq(current, &dataset) {
                return;
            }
        }

        if dataset.is_empty() {
            log::warn!("{} contains no cost records", self.cache.source().display());
        }

        // A fresh source starts from the default selection; a reload keeps it
        let reset = self.dataset.is_none();
        self.control_panel
            .update_years(dataset.years(), Selection::default_for(&dataset), reset);
        self.control_panel.set_status(
            format!("Loaded {} monthly records", dataset.len()),
            false,
        );
        self.report_view.set_dataset(&dataset, &self.config.title);

        self.dataset = Some(dataset);
        self.report = None;
        self.report_selection = None;
        self.load_error = None;
    }

    fn handle_load_error(&mut self, error: LoadError) {
        log::error!(
            "Failed to load {}: {}",
            self.cache.source().display(),
            error
        );
        self.control_panel
            .set_status(format!("Error: {}", error), true);
        self.load_error = Some(error.to_string());
        self.dataset = None;
        self.report = None;
        self.report_selection = None;
        self.report_view.clear();
    }

    /// Ask for another data file and load it.
    fn handle_open_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Spreadsheets", &["xlsx", "xlsm", "xls", "ods", "csv"])
            .pick_file()
        else {
            return; // User cancelled
        };

        log::info!("Switching data source to {}", path.display());
        self.cache.set_source(&path);
        self.control_panel.set_source(&path);
        self.dataset = None;
        self.refresh_dataset();
    }

    fn handle_reload(&mut self) {
        match self.cache.reload() {
            Ok(dataset) => self.set_dataset(dataset),
            Err(e) => self.handle_load_error(e),
        }
    }

    /// Run the filter/aggregate pipeline when the selection has changed.
    fn update_report(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        if self.report_selection.as_ref() == Some(&self.control_panel.selection) {
            return;
        }

        let selection = self.control_panel.selection.clone();
        self.report = Some(report::apply(dataset, &selection));
        self.report_selection = Some(selection);
    }
}

impl eframe::App for CostReportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Cache check each frame; no automatic retry after a failure
        if self.load_error.is_none() {
            self.refresh_dataset();
        }
        self.update_report();

        // Left panel - Filters
        let action = SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| {
                        let view = self
                            .report
                            .as_ref()
                            .map(|r| r.view.as_slice())
                            .unwrap_or(&[]);
                        self.control_panel.show(ui, view)
                    })
                    .inner
            })
            .inner;

        match action {
            ControlPanelAction::OpenFile => self.handle_open_file(),
            ControlPanelAction::Reload => self.handle_reload(),
            ControlPanelAction::SelectionChanged => {
                self.update_report();
                ctx.request_repaint();
            }
            ControlPanelAction::None => {}
        }

        // Central panel - Report
        egui::CentralPanel::default().show(ctx, |ui| {
            self.report_view.show(
                ui,
                self.report.as_ref(),
                self.load_error.as_deref(),
                &self.config.currency_symbol,
            );
        });
    }
}
