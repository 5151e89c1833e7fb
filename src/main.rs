//! SimView - Second-order system response viewer
//!
//! Sends mass-spring-damper or RLC constants to a simulation service and
//! plots the returned response functions.

mod api;
mod charts;
mod config;
mod controller;
mod form;
mod gui;

use config::AppConfig;
use eframe::egui;
use gui::SimViewApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default configuration");
        AppConfig::default()
    });

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("SimView"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "SimView",
        options,
        Box::new(|cc| Ok(Box::new(SimViewApp::new(cc, config)))),
    )
}
