//! Growth-comparison chart
//!
//! Two compounding series from the same starting value, drawn as polylines
//! on a shared vertical scale.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::canvas::{Canvas, TextAlign};
use super::{SeriesPoint, AXIS_COLOR, GRID_COLOR, LABEL_COLOR, TEXT_COLOR};
use crate::labels::Labels;
use crate::layout::{PlotFrame, ValueRange};

pub const SERIES_A_COLOR: &str = "#3b82f6";
pub const SERIES_B_COLOR: &str = "#10b981";

/// Number of horizontal gridline intervals
const GRID_STEPS: usize = 5;
const POINT_RADIUS: f64 = 4.0;

/// Growth chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthChartConfig {
    #[serde(default = "default_start_value")]
    pub start_value: f64,

    /// Per-period growth of the first (baseline) strategy
    #[serde(default = "default_rate_a")]
    pub rate_a: f64,

    /// Per-period growth of the second strategy
    #[serde(default = "default_rate_b")]
    pub rate_b: f64,

    #[serde(default = "default_period_count")]
    pub period_count: usize,

    /// Axis label per period
    #[serde(default = "default_period_labels")]
    pub labels: Vec<String>,
}

fn default_start_value() -> f64 {
    50_000.0
}

fn default_rate_a() -> f64 {
    0.123
}

fn default_rate_b() -> f64 {
    // Baseline plus 1.8 points
    0.141
}

fn default_period_count() -> usize {
    10
}

fn default_period_labels() -> Vec<String> {
    (2015..=2024).map(|y| y.to_string()).collect()
}

impl Default for GrowthChartConfig {
    fn default() -> Self {
        Self {
            start_value: default_start_value(),
            rate_a: default_rate_a(),
            rate_b: default_rate_b(),
            period_count: default_period_count(),
            labels: default_period_labels(),
        }
    }
}

impl GrowthChartConfig {
    /// Both series, baseline first
    pub fn series(&self) -> (Vec<SeriesPoint>, Vec<SeriesPoint>) {
        (
            growth_series(self.start_value, self.rate_a, self.period_count),
            growth_series(self.start_value, self.rate_b, self.period_count),
        )
    }
}

/// Compounding series: `v[0] = start`, `v[i] = v[i - 1] * (1 + rate)`
pub fn growth_series(start: f64, rate: f64, count: usize) -> Vec<SeriesPoint> {
    let mut series = Vec::with_capacity(count);
    let mut value = start;

    for index in 0..count {
        if index > 0 {
            value *= 1.0 + rate;
        }
        series.push(SeriesPoint { index, value });
    }

    series
}

/// Draw the growth comparison onto `canvas`
pub fn render_growth_chart<C: Canvas + ?Sized>(
    canvas: &mut C,
    frame: &PlotFrame,
    config: &GrowthChartConfig,
    labels: &Labels,
) {
    let (series_a, series_b) = config.series();
    let values_a: Vec<f64> = series_a.iter().map(|p| p.value).collect();
    let values_b: Vec<f64> = series_b.iter().map(|p| p.value).collect();

    let range = match ValueRange::over(&[values_a.as_slice(), values_b.as_slice()]) {
        Some(range) => range,
        None => {
            tracing::debug!("Growth chart has no finite values, nothing to draw");
            return;
        }
    };
    let count = config.period_count;

    // Axes
    canvas.set_stroke_style(AXIS_COLOR);
    canvas.set_line_width(1.0);
    canvas.begin_path();
    canvas.move_to(frame.left(), frame.top());
    canvas.line_to(frame.left(), frame.bottom());
    canvas.line_to(frame.right(), frame.bottom());
    canvas.stroke();

    // Gridlines
    canvas.set_stroke_style(GRID_COLOR);
    canvas.set_line_width(0.5);
    for i in 0..=GRID_STEPS {
        let y = frame.top() + frame.plot_height() * i as f64 / GRID_STEPS as f64;
        canvas.begin_path();
        canvas.move_to(frame.left(), y);
        canvas.line_to(frame.right(), y);
        canvas.stroke();
    }

    for (values, color) in [(&values_a, SERIES_A_COLOR), (&values_b, SERIES_B_COLOR)] {
        draw_polyline(canvas, frame, &range, values, color);
    }

    // Period labels and markers
    canvas.set_font("14px DM Sans");
    canvas.set_text_align(TextAlign::Center);
    for i in 0..count {
        let x = frame.x_for(i, count);

        if let Some(label) = config.labels.get(i) {
            canvas.set_fill_style(LABEL_COLOR);
            canvas.fill_text(label, x, frame.bottom() + 30.0);
        }

        for (values, color) in [(&values_a, SERIES_A_COLOR), (&values_b, SERIES_B_COLOR)] {
            canvas.set_fill_style(color);
            canvas.begin_path();
            canvas.arc(x, frame.y_for(values[i], &range), POINT_RADIUS, 0.0, TAU);
            canvas.fill();
        }
    }

    // Legend
    let legend_x = frame.width - 250.0;
    canvas.set_text_align(TextAlign::Left);
    for (row, (color, key)) in [(SERIES_A_COLOR, "legend.growth.a"), (SERIES_B_COLOR, "legend.growth.b")]
        .into_iter()
        .enumerate()
    {
        let y = 20.0 + 20.0 * row as f64;
        canvas.set_fill_style(color);
        canvas.fill_rect(legend_x, y, 20.0, 3.0);
        canvas.set_fill_style(TEXT_COLOR);
        canvas.fill_text(labels.get(key), legend_x + 25.0, y + 5.0);
    }

    // Final values
    canvas.set_font("bold 16px DM Sans");
    for (row, (values, color)) in [(&values_a, SERIES_A_COLOR), (&values_b, SERIES_B_COLOR)]
        .into_iter()
        .enumerate()
    {
        if let Some(last) = values.last() {
            canvas.set_fill_style(color);
            let text = format!("{}€", labels.format_grouped(*last));
            canvas.fill_text(&text, legend_x, 70.0 + 20.0 * row as f64);
        }
    }

    tracing::debug!(periods = count, min = range.min, max = range.max, "Rendered growth chart");
}

fn draw_polyline<C: Canvas + ?Sized>(
    canvas: &mut C,
    frame: &PlotFrame,
    range: &ValueRange,
    values: &[f64],
    color: &str,
) {
    canvas.set_stroke_style(color);
    canvas.set_line_width(3.0);
    canvas.begin_path();

    for (i, value) in values.iter().enumerate() {
        let x = frame.x_for(i, values.len());
        let y = frame.y_for(*value, range);
        if i == 0 {
            canvas.move_to(x, y);
        } else {
            canvas.line_to(x, y);
        }
    }

    canvas.stroke();
}
