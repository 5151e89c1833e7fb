//! Chart State Module
//! The single chart owned by the page: time labels plus one dataset per
//! displayed response function.

use crate::charts::series::{sample_all, ExpressionError, ResponseFunctions, SampleGrid};
use crate::form::SystemKind;
use egui::Color32;

pub const PRIMARY_COLOR: Color32 = Color32::from_rgb(75, 192, 192); // Teal
pub const FIRST_DERIVATIVE_COLOR: Color32 = Color32::from_rgb(255, 183, 135); // Peach
pub const SECOND_DERIVATIVE_COLOR: Color32 = Color32::from_rgb(218, 107, 255); // Violet

const LINE_WIDTH: f32 = 2.0;

/// Fixed label and line style for one series of a template.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub label: &'static str,
    pub color: Color32,
    pub width: f32,
    pub fill: bool,
}

const MECHANICAL_TEMPLATE: [SeriesStyle; 3] = [
    SeriesStyle {
        label: "Y(t)",
        color: PRIMARY_COLOR,
        width: LINE_WIDTH,
        fill: false,
    },
    SeriesStyle {
        label: "V(t)",
        color: FIRST_DERIVATIVE_COLOR,
        width: LINE_WIDTH,
        fill: false,
    },
    SeriesStyle {
        label: "A(t)",
        color: SECOND_DERIVATIVE_COLOR,
        width: LINE_WIDTH,
        fill: false,
    },
];

const ELECTRICAL_TEMPLATE: [SeriesStyle; 2] = [
    SeriesStyle {
        label: "q(t)",
        color: PRIMARY_COLOR,
        width: LINE_WIDTH,
        fill: false,
    },
    SeriesStyle {
        label: "i(t)",
        color: FIRST_DERIVATIVE_COLOR,
        width: LINE_WIDTH,
        fill: false,
    },
];

/// Dataset template for a system kind. Series `i` is fed by expression `i`.
pub fn template(kind: SystemKind) -> &'static [SeriesStyle] {
    match kind {
        SystemKind::Mechanical => &MECHANICAL_TEMPLATE,
        SystemKind::Electrical => &ELECTRICAL_TEMPLATE,
    }
}

/// One plotted series, aligned index by index with the chart labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub style: SeriesStyle,
    pub values: Vec<f64>,
}

impl Dataset {
    pub fn label(&self) -> &'static str {
        self.style.label
    }
}

/// Chart contents. Created once and mutated in place on every update.
#[derive(Debug, Default)]
pub struct ChartState {
    labels: Vec<f64>,
    datasets: Vec<Dataset>,
    kind: Option<SystemKind>,
    /// Bumped on every update so the viewer knows to refit its bounds.
    revision: u64,
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the chart from response expressions, or empty it when `clean`.
    ///
    /// On an expression error the chart keeps its previous contents.
    pub fn update(
        &mut self,
        functions: &ResponseFunctions,
        kind: SystemKind,
        grid: &SampleGrid,
        clean: bool,
    ) -> Result<(), ExpressionError> {
        if clean {
            self.clear();
            return Ok(());
        }

        let styles = template(kind);
        let labels = grid.points();
        let expressions: Vec<&str> = (0..styles.len())
            .filter_map(|i| functions.get(i))
            .collect();
        let series = sample_all(&expressions, &labels)?;

        self.labels = labels;
        self.datasets = styles
            .iter()
            .zip(series)
            .map(|(style, values)| Dataset {
                style: *style,
                values,
            })
            .collect();
        self.kind = Some(kind);
        self.revision += 1;

        tracing::debug!(
            samples = self.labels.len(),
            series = self.datasets.len(),
            ?kind,
            "chart updated"
        );
        Ok(())
    }

    pub fn clear(&mut self) {
        self.labels.clear();
        self.datasets.clear();
        self.kind = None;
        self.revision += 1;
    }

    pub fn labels(&self) -> &[f64] {
        &self.labels
    }

    pub fn datasets(&self) -> &[Dataset] {
        &self.datasets
    }

    /// System kind of the template currently drawn.
    pub fn kind(&self) -> Option<SystemKind> {
        self.kind
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// `[t, y]` pairs of one dataset.
    pub fn points(&self, dataset: &Dataset) -> Vec<[f64; 2]> {
        self.labels
            .iter()
            .zip(dataset.values.iter())
            .map(|(&t, &y)| [t, y])
            .collect()
    }

    /// Min and max over all finite values, if any.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.datasets
            .iter()
            .flat_map(|d| d.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
