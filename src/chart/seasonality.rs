//! Seasonality bar chart
//!
//! One bar per calendar month around a dashed zero baseline. Bars are
//! coloured by [`BarCategory`].

use serde::{Deserialize, Serialize};

use super::canvas::{Canvas, TextAlign};
use super::{AXIS_COLOR, LABEL_COLOR, TEXT_COLOR};
use crate::labels::Labels;
use crate::layout::{band_for_index, PlotFrame, ValueRange};

const ZERO_LINE_COLOR: &str = "#9ca3af";
const BAR_FILL: f64 = 0.8;

/// Seasonality chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityChartConfig {
    /// Bar labels; empty means short month names from the label table
    #[serde(default)]
    pub labels: Vec<String>,

    /// Average return per month, in percent
    #[serde(default = "default_values")]
    pub values: Vec<f64>,

    /// Indices drawn in the highlight colour when positive
    #[serde(default = "default_highlighted")]
    pub highlighted_indices: Vec<usize>,
}

/// S&P 500 average monthly returns, 1950-2025
fn default_values() -> Vec<f64> {
    vec![1.2, -0.1, 0.5, 1.2, 0.1, 0.8, 1.7, 0.7, -0.7, 0.5, 1.5, 1.3]
}

/// July, November, December
fn default_highlighted() -> Vec<usize> {
    vec![6, 10, 11]
}

impl Default for SeasonalityChartConfig {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            values: default_values(),
            highlighted_indices: default_highlighted(),
        }
    }
}

impl SeasonalityChartConfig {
    pub fn category(&self, index: usize) -> Option<BarCategory> {
        self.values
            .get(index)
            .map(|v| BarCategory::classify(*v, self.highlighted_indices.contains(&index)))
    }

    fn label(&self, index: usize, labels: &Labels) -> Option<String> {
        if self.labels.is_empty() {
            (index < 12).then(|| labels.month_short(index as u32))
        } else {
            self.labels.get(index).cloned()
        }
    }
}

/// Colour category of a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarCategory {
    Negative,
    Highlighted,
    Neutral,
}

impl BarCategory {
    /// Negative values win over highlighting
    pub fn classify(value: f64, highlighted: bool) -> Self {
        if value < 0.0 {
            BarCategory::Negative
        } else if highlighted {
            BarCategory::Highlighted
        } else {
            BarCategory::Neutral
        }
    }

    pub fn bar_color(&self) -> &'static str {
        match self {
            BarCategory::Negative => "#ef4444",
            BarCategory::Highlighted => "#059669",
            BarCategory::Neutral => "#f59e0b",
        }
    }

    pub fn label_color(&self) -> &'static str {
        match self {
            BarCategory::Negative => "#dc2626",
            BarCategory::Highlighted => "#059669",
            BarCategory::Neutral => "#d97706",
        }
    }

    fn legend_key(&self) -> &'static str {
        match self {
            BarCategory::Negative => "legend.seasonality.negative",
            BarCategory::Highlighted => "legend.seasonality.highlighted",
            BarCategory::Neutral => "legend.seasonality.neutral",
        }
    }
}

/// Signed percentage label, `+1.2%` / `-0.7%`
pub fn format_return(value: f64) -> String {
    if value > 0.0 {
        format!("+{}%", value)
    } else {
        format!("{}%", value)
    }
}

/// Draw the seasonality bars onto `canvas`
pub fn render_seasonality_chart<C: Canvas + ?Sized>(
    canvas: &mut C,
    frame: &PlotFrame,
    config: &SeasonalityChartConfig,
    labels: &Labels,
) {
    let range = match ValueRange::over(&[config.values.as_slice()]) {
        Some(range) => range.including(0.0),
        None => {
            tracing::debug!("Seasonality chart has no values, nothing to draw");
            return;
        }
    };
    let count = config.values.len();

    // Axes
    canvas.set_stroke_style(AXIS_COLOR);
    canvas.set_line_width(1.0);
    canvas.begin_path();
    canvas.move_to(frame.left(), frame.top());
    canvas.line_to(frame.left(), frame.bottom());
    canvas.line_to(frame.right(), frame.bottom());
    canvas.stroke();

    // Zero baseline
    let zero_y = frame.y_for(0.0, &range);
    canvas.set_stroke_style(ZERO_LINE_COLOR);
    canvas.set_line_width(1.0);
    canvas.set_line_dash(&[5.0, 5.0]);
    canvas.begin_path();
    canvas.move_to(frame.left(), zero_y);
    canvas.line_to(frame.right(), zero_y);
    canvas.stroke();
    canvas.set_line_dash(&[]);

    for (i, &value) in config.values.iter().enumerate() {
        if !value.is_finite() {
            tracing::warn!(index = i, "Skipping non-finite seasonality value");
            continue;
        }

        let category = BarCategory::classify(value, config.highlighted_indices.contains(&i));
        let band = band_for_index(i, count, frame.left(), frame.right(), BAR_FILL);
        let value_y = frame.y_for(value, &range);
        let top = value_y.min(zero_y);
        let height = (value_y - zero_y).abs();

        canvas.set_fill_style(category.bar_color());
        canvas.fill_rect(band.x, top, band.width, height);

        canvas.set_text_align(TextAlign::Center);
        if let Some(label) = config.label(i, labels) {
            canvas.set_fill_style(LABEL_COLOR);
            canvas.set_font("13px DM Sans");
            canvas.fill_text(&label, band.center(), frame.bottom() + 25.0);
        }

        let label_y = if value >= 0.0 { top - 8.0 } else { top + height + 18.0 };
        canvas.set_fill_style(category.label_color());
        canvas.set_font("bold 13px DM Sans");
        canvas.fill_text(&format_return(value), band.center(), label_y);
    }

    // Title
    canvas.set_fill_style(TEXT_COLOR);
    canvas.set_font("bold 16px DM Sans");
    canvas.set_text_align(TextAlign::Left);
    canvas.fill_text(labels.get("chart.seasonality.title"), frame.left(), frame.top() - 15.0);

    // Legend
    canvas.set_font("12px DM Sans");
    let legend_x = frame.width - 280.0;
    let legend_y = 30.0;
    for (row, category) in [BarCategory::Highlighted, BarCategory::Neutral, BarCategory::Negative]
        .iter()
        .enumerate()
    {
        let y = legend_y + 25.0 * row as f64;
        canvas.set_fill_style(category.bar_color());
        canvas.fill_rect(legend_x, y, 15.0, 15.0);
        canvas.set_fill_style(TEXT_COLOR);
        canvas.fill_text(labels.get(category.legend_key()), legend_x + 20.0, y + 11.0);
    }

    tracing::debug!(bars = count, "Rendered seasonality chart");
}
