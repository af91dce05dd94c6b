//! Charts
//!
//! Both charts draw through the [`Canvas`] trait and position everything
//! with the layout engine.
//!
//! - **canvas**: drawing trait and the recording backend
//! - **svg**: SVG backend
//! - **growth**: compounding comparison line chart
//! - **seasonality**: monthly return bar chart

pub mod canvas;
pub mod growth;
pub mod seasonality;
pub mod svg;

pub use canvas::{Canvas, DrawOp, PathSegment, RecordingCanvas, TextAlign};
pub use growth::{growth_series, render_growth_chart, GrowthChartConfig};
pub use seasonality::{
    format_return, render_seasonality_chart, BarCategory, SeasonalityChartConfig,
};
pub use svg::{to_svg, SvgCanvas};

use serde::Serialize;

const AXIS_COLOR: &str = "#e5e7eb";
const GRID_COLOR: &str = "#f3f4f6";
const LABEL_COLOR: &str = "#6b7280";
const TEXT_COLOR: &str = "#1f2937";

/// One plotted datum of a fixed-length series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub index: usize,
    pub value: f64,
}
