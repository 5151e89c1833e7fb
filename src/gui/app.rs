//! SimView Main Application
//! Main window with the constants form, the response chart and the
//! validation dialog.

use crate::api::SimulationClient;
use crate::charts::{SampleGrid, StaticChartExporter};
use crate::config::AppConfig;
use crate::controller::{PageController, SubmitOutcome};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::{Color32, RichText, SidePanel};
use std::sync::Arc;

/// Main application window.
pub struct SimViewApp {
    page: PageController,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl SimViewApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let client = SimulationClient::new(config.endpoint.clone());
        tracing::info!(endpoint = %client.endpoint(), samples = config.sample_count, "starting");
        Self {
            page: PageController::new(Arc::new(client), SampleGrid::from_config(&config)),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        }
    }

    fn handle_submit(&mut self) {
        match self.page.submit() {
            SubmitOutcome::Sent => tracing::info!("simulation requested"),
            SubmitOutcome::Invalid(_) | SubmitOutcome::Busy => {}
        }
    }

    /// Handle PNG export - render the current chart to a user-chosen file
    fn handle_export_png(&mut self) {
        if self.page.chart().is_empty() {
            self.page.set_status("No chart to export");
            return;
        }

        // Ask user for output location
        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("response.png")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartExporter::export_png(
            self.page.chart(),
            self.page.system_label(),
            &output_path,
        ) {
            Ok(()) => {
                self.page
                    .set_status(format!("Complete! Exported {}", output_path.display()));
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                self.page.set_status(format!("Error: {:#}", e));
            }
        }
    }

    /// Modal listing the missing required fields.
    fn show_error_dialog(&mut self, ctx: &egui::Context) {
        let Some(err) = self.page.error_dialog() else {
            return;
        };
        let message = err.to_string();

        let mut close = false;
        egui::Window::new("Incomplete form")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(
                    RichText::new("All constants and the forcing type are required.")
                        .color(Color32::from_rgb(220, 53, 69)),
                );
                ui.add_space(5.0);
                ui.label(message);
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        close = true;
                    }
                });
            });

        if close {
            self.page.dismiss_error_dialog();
        }
    }
}

impl eframe::App for SimViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.page.poll();

        // Request repaint while a request is in flight
        if self.page.is_busy() {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, &mut self.page);

                    match action {
                        ControlPanelAction::Submit => self.handle_submit(),
                        ControlPanelAction::Clean => self.page.reset(),
                        ControlPanelAction::ExportPng => self.handle_export_png(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer
                .show(ui, self.page.chart(), self.page.system_label());
        });

        self.show_error_dialog(ctx);
    }
}
