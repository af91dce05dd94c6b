//! Immediate-mode drawing surface
//!
//! [`Canvas`] mirrors the subset of the HTML5 2D context the charts use.
//! [`RecordingCanvas`] resolves every drawing call against the current
//! style state and keeps the result as a [`DrawOp`] list, which the SVG
//! backend serializes and tests inspect.

use serde::Serialize;

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// 2D drawing surface
pub trait Canvas {
    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    /// Dash pattern; an empty slice means solid
    fn set_line_dash(&mut self, segments: &[f64]);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Arc around `(x, y)`, angles in radians, clockwise in screen space
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// One segment of the current path
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Arc { x: f64, y: f64, radius: f64, start: f64, end: f64 },
}

/// A resolved drawing operation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Stroke {
        path: Vec<PathSegment>,
        color: String,
        width: f64,
        dash: Vec<f64>,
    },
    Fill {
        path: Vec<PathSegment>,
        color: String,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: String,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        color: String,
        font: String,
        align: TextAlign,
    },
}

/// Canvas that records resolved operations
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    fill_style: String,
    stroke_style: String,
    line_width: f64,
    line_dash: Vec<f64>,
    font: String,
    text_align: TextAlign,
    path: Vec<PathSegment>,
    ops: Vec<DrawOp>,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        // HTML5 canvas initial state
        Self {
            fill_style: "#000000".to_string(),
            stroke_style: "#000000".to_string(),
            line_width: 1.0,
            line_dash: Vec::new(),
            font: "10px sans-serif".to_string(),
            text_align: TextAlign::Left,
            path: Vec::new(),
            ops: Vec::new(),
        }
    }
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Recorded `fill_rect` calls as `(x, y, width, height, color)`
    pub fn rects(&self) -> Vec<(f64, f64, f64, f64, &str)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect {
                    x,
                    y,
                    width,
                    height,
                    color,
                } => Some((*x, *y, *width, *height, color.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Recorded text as `(text, x, y, color)`
    pub fn texts(&self) -> Vec<(&str, f64, f64, &str)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText {
                    text, x, y, color, ..
                } => Some((text.as_str(), *x, *y, color.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Recorded strokes as `(path, color, width, dash)`
    pub fn strokes(&self) -> Vec<(&[PathSegment], &str, f64, &[f64])> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Stroke {
                    path,
                    color,
                    width,
                    dash,
                } => Some((path.as_slice(), color.as_str(), *width, dash.as_slice())),
                _ => None,
            })
            .collect()
    }

    pub fn find_text(&self, text: &str) -> Option<(f64, f64, &str)> {
        self.texts()
            .into_iter()
            .find(|(t, ..)| *t == text)
            .map(|(_, x, y, color)| (x, y, color))
    }
}

impl Canvas for RecordingCanvas {
    fn set_fill_style(&mut self, color: &str) {
        self.fill_style = color.to_string();
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.stroke_style = color.to_string();
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = width;
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.line_dash = segments.to_vec();
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.text_align = align;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(PathSegment::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(PathSegment::LineTo { x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.path.push(PathSegment::Arc {
            x,
            y,
            radius,
            start: start_angle,
            end: end_angle,
        });
    }

    fn stroke(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Stroke {
            path: self.path.clone(),
            color: self.stroke_style.clone(),
            width: self.line_width,
            dash: self.line_dash.clone(),
        });
    }

    fn fill(&mut self) {
        if self.path.is_empty() {
            return;
        }
        self.ops.push(DrawOp::Fill {
            path: self.path.clone(),
            color: self.fill_style.clone(),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color: self.fill_style.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            color: self.fill_style.clone(),
            font: self.font.clone(),
            align: self.text_align,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ops_capture_current_style() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_stroke_style("#e5e7eb");
        canvas.set_line_dash(&[5.0, 5.0]);
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(10.0, 0.0);
        canvas.stroke();
        canvas.set_line_dash(&[]);

        canvas.set_fill_style("#059669");
        canvas.fill_rect(1.0, 2.0, 3.0, 4.0);
        canvas.set_text_align(TextAlign::Center);
        canvas.fill_text("Ian", 5.0, 6.0);

        let strokes = canvas.strokes();
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].1, "#e5e7eb");
        assert_eq!(strokes[0].3, &[5.0, 5.0]);

        assert_eq!(canvas.rects(), vec![(1.0, 2.0, 3.0, 4.0, "#059669")]);
        assert_eq!(canvas.find_text("Ian"), Some((5.0, 6.0, "#059669")));
    }

    #[test]
    fn test_begin_path_resets() {
        let mut canvas = RecordingCanvas::new();
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.begin_path();
        canvas.arc(1.0, 1.0, 4.0, 0.0, std::f64::consts::TAU);
        canvas.fill();

        match &canvas.ops()[0] {
            DrawOp::Fill { path, .. } => assert_eq!(path.len(), 1),
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_empty_path_draws_nothing() {
        let mut canvas = RecordingCanvas::new();
        canvas.begin_path();
        canvas.stroke();
        canvas.fill();
        assert!(canvas.is_empty());
    }
}
