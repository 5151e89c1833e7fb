//! Chart Viewer Widget
//! Central panel showing the system-type label and the response chart.

use crate::charts::{ChartPlotter, ChartState};
use egui::{Color32, RichText};

/// Central chart area. Tracks which chart revision it last drew so a fresh
/// update refits the plot bounds.
#[derive(Default)]
pub struct ChartViewer {
    drawn_revision: Option<u64>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `chart` changed since the last frame.
    fn needs_refit(&mut self, chart: &ChartState) -> bool {
        let changed = self.drawn_revision != Some(chart.revision());
        self.drawn_revision = Some(chart.revision());
        changed
    }

    /// Draw the chart viewer
    pub fn show(&mut self, ui: &mut egui::Ui, chart: &ChartState, system_label: &str) {
        let refit = self.needs_refit(chart);

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, Color32::from_rgb(100, 149, 237)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    let title = if system_label.is_empty() {
                        "Response".to_string()
                    } else {
                        format!("Response: {}", system_label)
                    };
                    ui.label(RichText::new(title).size(18.0).strong());
                    ui.add_space(8.0);

                    if chart.is_empty() {
                        ui.centered_and_justified(|ui| {
                            ui.label(RichText::new("No Data").size(20.0));
                        });
                        return;
                    }

                    ChartPlotter::draw_response_chart(ui, chart, refit);
                });
            });
    }
}
