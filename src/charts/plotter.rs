//! Chart Plotter Module
//! Draws the response chart interactively using egui_plot.

use crate::charts::ChartState;
use crate::form::SystemKind;
use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints};

pub const AXIS_TEXT_COLOR: Color32 = Color32::WHITE;

/// Draws the chart state with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Y-axis title for the template currently drawn.
    pub fn y_axis_title(kind: Option<SystemKind>) -> &'static str {
        match kind {
            Some(SystemKind::Electrical) => "q(t), i(t)",
            _ => "Y(t)",
        }
    }

    /// Draw the line chart. `refit` resets zoom/pan to the new data.
    pub fn draw_response_chart(ui: &mut egui::Ui, chart: &ChartState, refit: bool) {
        let mut plot = Plot::new("response_chart")
            .legend(Legend::default())
            .x_axis_label(RichText::new("Time (t)").color(AXIS_TEXT_COLOR))
            .y_axis_label(RichText::new(Self::y_axis_title(chart.kind())).color(AXIS_TEXT_COLOR))
            .allow_scroll(false)
            .include_x(0.0);

        if refit {
            plot = plot.reset();
        }

        plot.show(ui, |plot_ui| {
            for dataset in chart.datasets() {
                let points = PlotPoints::from(chart.points(dataset));
                let mut line = Line::new(points)
                    .color(dataset.style.color)
                    .width(dataset.style.width)
                    .name(dataset.label());
                if dataset.style.fill {
                    line = line.fill(0.0);
                }
                plot_ui.line(line);
            }
        });
    }
}
