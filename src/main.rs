//! Pairscope - CSV Dataset Explorer & Pair-Plot Viewer
//!
//! A Rust application for browsing a directory of CSV datasets and viewing
//! pairwise scatter-plot matrices of their numeric columns.

mod charts;
mod config;
mod data;
mod gui;

use config::AppConfig;
use eframe::egui;
use gui::PairscopeApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = AppConfig::load_or_default();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("Pairscope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Pairscope",
        options,
        Box::new(|cc| Ok(Box::new(PairscopeApp::new(cc, config)))),
    )
}
