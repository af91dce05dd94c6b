//! SVG backend
//!
//! [`SvgCanvas`] records drawing calls and serializes them into a
//! standalone SVG document sized to the chart frame.

use std::f64::consts::{PI, TAU};
use std::fmt::Write;

use super::canvas::{Canvas, DrawOp, PathSegment, RecordingCanvas, TextAlign};
use crate::dom::escape;
use crate::layout::PlotFrame;

/// Canvas producing SVG markup
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    frame: PlotFrame,
    recorder: RecordingCanvas,
}

impl SvgCanvas {
    pub fn new(frame: PlotFrame) -> Self {
        Self {
            frame,
            recorder: RecordingCanvas::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        self.recorder.ops()
    }

    /// Serialize everything drawn so far
    pub fn finish(&self) -> String {
        to_svg(&self.frame, self.recorder.ops())
    }
}

impl Canvas for SvgCanvas {
    fn set_fill_style(&mut self, color: &str) {
        self.recorder.set_fill_style(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.recorder.set_stroke_style(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.recorder.set_line_width(width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.recorder.set_line_dash(segments);
    }

    fn set_font(&mut self, font: &str) {
        self.recorder.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.recorder.set_text_align(align);
    }

    fn begin_path(&mut self) {
        self.recorder.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.recorder.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.recorder.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.recorder.arc(x, y, radius, start_angle, end_angle);
    }

    fn stroke(&mut self) {
        self.recorder.stroke();
    }

    fn fill(&mut self) {
        self.recorder.fill();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.recorder.fill_rect(x, y, width, height);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.recorder.fill_text(text, x, y);
    }
}

/// Serialize recorded operations as an SVG document
pub fn to_svg(frame: &PlotFrame, ops: &[DrawOp]) -> String {
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = num(frame.width),
        h = num(frame.height)
    );

    for op in ops {
        match op {
            DrawOp::Stroke {
                path,
                color,
                width,
                dash,
            } => {
                let _ = write!(
                    svg,
                    "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"",
                    path_data(path),
                    escape(color),
                    num(*width)
                );
                if !dash.is_empty() {
                    let pattern: Vec<String> = dash.iter().map(|d| num(*d)).collect();
                    let _ = write!(svg, " stroke-dasharray=\"{}\"", pattern.join(" "));
                }
                svg.push_str("/>\n");
            }
            DrawOp::Fill { path, color } => {
                let _ = writeln!(
                    svg,
                    "  <path d=\"{}\" fill=\"{}\"/>",
                    path_data(path),
                    escape(color)
                );
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                let _ = writeln!(
                    svg,
                    "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                    num(*x),
                    num(*y),
                    num(*width),
                    num(*height),
                    escape(color)
                );
            }
            DrawOp::FillText {
                text,
                x,
                y,
                color,
                font,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => "start",
                    TextAlign::Center => "middle",
                    TextAlign::Right => "end",
                };
                let _ = writeln!(
                    svg,
                    "  <text x=\"{}\" y=\"{}\" fill=\"{}\" text-anchor=\"{}\" style=\"font: {}\">{}</text>",
                    num(*x),
                    num(*y),
                    escape(color),
                    anchor,
                    escape(font),
                    escape(text)
                );
            }
        }
    }

    svg.push_str("</svg>\n");
    svg
}

/// SVG path data for canvas path segments
fn path_data(path: &[PathSegment]) -> String {
    let mut d = String::new();

    for segment in path {
        match segment {
            PathSegment::MoveTo { x, y } => {
                let _ = write!(d, "M{} {} ", num(*x), num(*y));
            }
            PathSegment::LineTo { x, y } => {
                let _ = write!(d, "L{} {} ", num(*x), num(*y));
            }
            PathSegment::Arc {
                x,
                y,
                radius,
                start,
                end,
            } => {
                let point = |angle: f64| (x + radius * angle.cos(), y + radius * angle.sin());
                let (sx, sy) = point(*start);
                let sweep = end - start;

                // Canvas connects the current point to the arc start
                let command = if d.is_empty() { "M" } else { "L" };
                let _ = write!(d, "{}{} {} ", command, num(sx), num(sy));

                if sweep.abs() >= TAU - 1e-9 {
                    // A full circle cannot be one SVG arc: draw two halves
                    let (mx, my) = point(start + PI);
                    let r = num(*radius);
                    let _ = write!(
                        d,
                        "A{r} {r} 0 1 1 {} {} A{r} {r} 0 1 1 {} {} Z ",
                        num(mx),
                        num(my),
                        num(sx),
                        num(sy)
                    );
                } else {
                    let (ex, ey) = point(*end);
                    let large_arc = u8::from(sweep.abs() > PI);
                    let sweep_flag = u8::from(sweep > 0.0);
                    let r = num(*radius);
                    let _ = write!(
                        d,
                        "A{r} {r} 0 {} {} {} {} ",
                        large_arc,
                        sweep_flag,
                        num(ex),
                        num(ey)
                    );
                }
            }
        }
    }

    d.trim_end().to_string()
}

/// Compact number formatting: at most two decimals, no trailing zeros
fn num(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
