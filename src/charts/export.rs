//! Static Chart Exporter
//! Renders the current chart to a PNG file with plotters.
//!
//! Layout: title with the system-type label, time on the x-axis, one line per
//! dataset in its template color, legend in the upper right.

use crate::charts::{ChartPlotter, ChartState};
use anyhow::{bail, Context};
use plotters::prelude::*;
use std::path::Path;

pub const EXPORT_WIDTH: u32 = 1400;
pub const EXPORT_HEIGHT: u32 = 800;

pub struct StaticChartExporter;

impl StaticChartExporter {
    /// Write `chart` as a PNG to `path`.
    pub fn export_png(chart: &ChartState, title: &str, path: &Path) -> anyhow::Result<()> {
        if chart.is_empty() {
            bail!("nothing to export: the chart is empty");
        }

        let labels = chart.labels();
        let t_min = labels.first().copied().unwrap_or(0.0);
        let t_max = labels.last().copied().unwrap_or(1.0).max(t_min + f64::EPSILON);
        let (y_min, y_max) = Self::padded_range(chart.value_range().unwrap_or((-1.0, 1.0)));

        let root = BitMapBackend::new(path, (EXPORT_WIDTH, EXPORT_HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let caption = if title.is_empty() { "Response" } else { title };
        let mut plot = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(t_min..t_max, y_min..y_max)?;

        plot.configure_mesh()
            .x_desc("Time (t)")
            .y_desc(ChartPlotter::y_axis_title(chart.kind()))
            .draw()?;

        for dataset in chart.datasets() {
            let c = dataset.style.color;
            let color = RGBColor(c.r(), c.g(), c.b());
            let width = dataset.style.width.round() as u32;
            let segments = Self::finite_segments(&chart.points(dataset));

            // One legend entry per dataset, however many segments it has
            for (i, segment) in segments.into_iter().enumerate() {
                let series = plot.draw_series(LineSeries::new(segment, color.stroke_width(width)))?;
                if i == 0 {
                    series
                        .label(dataset.label())
                        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
                }
            }
        }

        plot.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()
            .with_context(|| format!("failed to write {}", path.display()))?;

        tracing::info!(path = %path.display(), "chart exported");
        Ok(())
    }

    /// Split `[t, y]` pairs into runs of finite values, so gaps stay gaps.
    fn finite_segments(points: &[[f64; 2]]) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for &[t, y] in points {
            if y.is_finite() {
                current.push((t, y));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// Pad the value range by 5% so lines do not touch the frame.
    fn padded_range((lo, hi): (f64, f64)) -> (f64, f64) {
        let span = hi - lo;
        if span <= f64::EPSILON {
            (lo - 1.0, hi + 1.0)
        } else {
            (lo - span * 0.05, hi + span * 0.05)
        }
    }
}
