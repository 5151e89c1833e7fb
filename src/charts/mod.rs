//! Charts module - Response sampling, chart state and rendering

mod chart;
mod export;
mod plotter;
mod series;

pub use chart::{template, ChartState, Dataset, SeriesStyle};
pub use export::StaticChartExporter;
pub use plotter::ChartPlotter;
pub use series::{sample_expression, ExpressionError, ResponseFunctions, SampleGrid};
