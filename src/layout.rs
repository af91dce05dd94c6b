//! Layout Engine
//!
//! Pure geometry shared by every chart: value projection, evenly spaced
//! x positions, bar slots and the plot frame.
//!
//! # Coordinates
//!
//! ```text
//!  (0,0) ───────────────────────────── (width,0)
//!    │   padding                           │
//!    │   ┌─────────── plot area ───────┐   │
//!    │   │ top                         │   │
//!    │   │ left                  right │   │
//!    │   │ bottom                      │   │
//!    │   └─────────────────────────────┘   │
//!  (0,height) ─────────────────────── (width,height)
//! ```
//!
//! Canvas y grows downward, so vertical projections map the domain minimum
//! to `bottom` and the maximum to `top` (an inverted pixel range).

use serde::{Deserialize, Serialize};

/// Map `value` from `[domain_min, domain_max]` onto `[pixel_min, pixel_max]`.
///
/// A flat domain (`domain_min == domain_max`) maps everything to the
/// midpoint of the pixel range.
pub fn project(value: f64, domain_min: f64, domain_max: f64, pixel_min: f64, pixel_max: f64) -> f64 {
    pixel_min + (pixel_max - pixel_min) * normalize(value, domain_min, domain_max)
}

/// Position of `value` inside the domain as a fraction (0.0 at min, 1.0 at max).
pub fn normalize(value: f64, domain_min: f64, domain_max: f64) -> f64 {
    let span = domain_max - domain_min;
    if span == 0.0 || !span.is_finite() {
        return 0.5;
    }
    (value - domain_min) / span
}

/// X coordinate of point `index` when `count` points are spread across
/// `[pixel_min, pixel_max]` with the first and last points on the edges.
pub fn x_for_index(index: usize, count: usize, pixel_min: f64, pixel_max: f64) -> f64 {
    if count <= 1 {
        return pixel_min;
    }
    pixel_min + (pixel_max - pixel_min) * index as f64 / (count - 1) as f64
}

/// Horizontal slot for one bar in a bar chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    /// Left edge of the bar
    pub x: f64,
    /// Bar width
    pub width: f64,
}

impl Band {
    /// Horizontal centre of the bar
    pub fn center(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

/// Slot `index` of `count` equal slots across the pixel range.
///
/// The bar fills `fill` of its slot (0.8 leaves a 10% gap on each side).
pub fn band_for_index(index: usize, count: usize, pixel_min: f64, pixel_max: f64, fill: f64) -> Band {
    if count == 0 {
        return Band {
            x: pixel_min,
            width: 0.0,
        };
    }

    let spacing = (pixel_max - pixel_min) / count as f64;
    let fill = fill.clamp(0.0, 1.0);

    Band {
        x: pixel_min + spacing * index as f64 + spacing * (1.0 - fill) / 2.0,
        width: spacing * fill,
    }
}

/// Closed value range over one or more series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Range over the union of every slice. Non-finite values are ignored.
    ///
    /// Returns `None` when no finite value is present.
    pub fn over(series: &[&[f64]]) -> Option<Self> {
        let mut values = series
            .iter()
            .flat_map(|s| s.iter().copied())
            .filter(|v| v.is_finite());

        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

        Some(Self { min, max })
    }

    /// Widen the range so it contains `value`
    pub fn including(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    /// Project a value of this range onto a pixel range
    pub fn project(&self, value: f64, pixel_min: f64, pixel_max: f64) -> f64 {
        project(value, self.min, self.max, pixel_min, pixel_max)
    }
}

/// Logical drawing surface with uniform padding around the plot area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotFrame {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for PlotFrame {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 500.0,
            padding: 60.0,
        }
    }
}

impl PlotFrame {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    pub fn left(&self) -> f64 {
        self.padding
    }

    pub fn right(&self) -> f64 {
        self.width - self.padding
    }

    pub fn top(&self) -> f64 {
        self.padding
    }

    pub fn bottom(&self) -> f64 {
        self.height - self.padding
    }

    pub fn plot_width(&self) -> f64 {
        self.right() - self.left()
    }

    pub fn plot_height(&self) -> f64 {
        self.bottom() - self.top()
    }

    /// Vertical pixel for a value of `range` (min at the bottom, max at the top)
    pub fn y_for(&self, value: f64, range: &ValueRange) -> f64 {
        range.project(value, self.bottom(), self.top())
    }

    /// Horizontal pixel for point `index` of `count`
    pub fn x_for(&self, index: usize, count: usize) -> f64 {
        x_for_index(index, count, self.left(), self.right())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_is_monotonic() {
        let mut previous = f64::NEG_INFINITY;
        for i in 0..=20 {
            let value = -5.0 + i as f64;
            let y = project(value, -5.0, 15.0, 0.0, 100.0);
            assert!(y > previous);
            previous = y;
        }

        assert_eq!(project(-5.0, -5.0, 15.0, 0.0, 100.0), 0.0);
        assert_eq!(project(15.0, -5.0, 15.0, 0.0, 100.0), 100.0);
        assert_eq!(project(5.0, -5.0, 15.0, 0.0, 100.0), 50.0);
    }

    #[test]
    fn test_project_flat_domain_is_midpoint() {
        for value in [-1.0, 0.0, 3.0, 1e9] {
            assert_eq!(project(value, 3.0, 3.0, 0.0, 100.0), 50.0);
        }
        assert!(!project(1.0, 1.0, 1.0, 440.0, 60.0).is_nan());
    }

    #[test]
    fn test_project_inverted_range() {
        // Vertical axis: domain min at the bottom
        assert_eq!(project(0.0, 0.0, 10.0, 440.0, 60.0), 440.0);
        assert_eq!(project(10.0, 0.0, 10.0, 440.0, 60.0), 60.0);
    }

    #[test]
    fn test_x_for_index_edges() {
        assert_eq!(x_for_index(0, 1, 60.0, 740.0), 60.0);
        assert_eq!(x_for_index(0, 0, 60.0, 740.0), 60.0);

        for count in 2..12 {
            assert_eq!(x_for_index(0, count, 60.0, 740.0), 60.0);
            assert_eq!(x_for_index(count - 1, count, 60.0, 740.0), 740.0);
        }

        assert_eq!(x_for_index(1, 3, 0.0, 100.0), 50.0);
    }

    #[test]
    fn test_band_for_index() {
        let band = band_for_index(0, 12, 60.0, 740.0, 0.8);
        let spacing = 680.0 / 12.0;
        assert!((band.x - (60.0 + spacing * 0.1)).abs() < 1e-9);
        assert!((band.width - spacing * 0.8).abs() < 1e-9);

        let last = band_for_index(11, 12, 60.0, 740.0, 0.8);
        assert!((last.x + last.width - (740.0 - spacing * 0.1)).abs() < 1e-9);

        let empty = band_for_index(0, 0, 60.0, 740.0, 0.8);
        assert_eq!(empty.width, 0.0);
    }

    #[test]
    fn test_value_range_union() {
        let a = [50.0, 60.0, 70.0];
        let b = [40.0, 65.0, 90.0];
        let range = ValueRange::over(&[&a, &b]).unwrap();
        assert_eq!(range.min, 40.0);
        assert_eq!(range.max, 90.0);

        assert!(ValueRange::over(&[]).is_none());
        assert!(ValueRange::over(&[&[f64::NAN]]).is_none());

        let widened = ValueRange { min: 0.5, max: 1.7 }.including(0.0);
        assert_eq!(widened.min, 0.0);
        assert_eq!(widened.max, 1.7);
    }

    #[test]
    fn test_plot_frame_edges() {
        let frame = PlotFrame::default();
        assert_eq!(frame.left(), 60.0);
        assert_eq!(frame.right(), 740.0);
        assert_eq!(frame.top(), 60.0);
        assert_eq!(frame.bottom(), 440.0);

        let range = ValueRange { min: 0.0, max: 10.0 };
        assert_eq!(frame.y_for(0.0, &range), 440.0);
        assert_eq!(frame.y_for(10.0, &range), 60.0);
    }
}
