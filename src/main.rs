//! Cost Report - Monthly Utility Cost Viewer
//!
//! Loads a spreadsheet of monthly cost records, filters it by year and month
//! and shows summary metrics, yearly totals and charts.

mod charts;
mod config;
mod data;
mod gui;
mod report;
mod stats;

use anyhow::Context;
use clap::Parser;
use config::{Cli, ReportConfig};
use eframe::egui;
use gui::CostReportApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ReportConfig::from_cli(&cli).context("Failed to load configuration")?;
    log::info!(
        "Starting cost report for {} (cache ttl {}s)",
        config.data_path.display(),
        config.cache_ttl_secs
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Cost Report"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Cost Report",
        options,
        Box::new(move |cc| Ok(Box::new(CostReportApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the UI: {}", e))
}
