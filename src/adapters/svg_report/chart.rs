//! Standalone SVG line charts with day ticks on the time axis.

use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::domain::metrics::format_amount;

const WIDTH: f64 = 1200.0;
const HEIGHT: f64 = 600.0;
const PAD_LEFT: f64 = 100.0;
const PAD_RIGHT: f64 = 30.0;
const PAD_TOP: f64 = 50.0;
const PAD_BOTTOM: f64 = 110.0;
const Y_TICKS: usize = 6;
const MAX_X_TICKS: usize = 31;
const MARKER_SIZE: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YFormat {
    Dollars,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    TriangleUp,
    TriangleDown,
}

/// A line; `None` entries break it into separate segments.
#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub color: &'static str,
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn new(label: &str, color: &'static str, values: Vec<Option<f64>>) -> Self {
        Series {
            label: label.to_string(),
            color,
            values,
        }
    }

    pub fn dense(label: &str, color: &'static str, values: &[f64]) -> Self {
        Self::new(label, color, values.iter().copied().map(Some).collect())
    }
}

/// Scatter points at `(index, value)`.
#[derive(Debug, Clone)]
pub struct Markers {
    pub label: String,
    pub color: &'static str,
    pub shape: MarkerShape,
    pub points: Vec<(usize, f64)>,
}

#[derive(Debug, Clone)]
pub struct Chart<'a> {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub y_format: YFormat,
    pub times: &'a [NaiveDateTime],
    pub series: Vec<Series>,
    pub markers: Vec<Markers>,
}

struct Frame {
    min_y: f64,
    max_y: f64,
    len: usize,
}

impl Frame {
    fn plot_width() -> f64 {
        WIDTH - PAD_LEFT - PAD_RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - PAD_TOP - PAD_BOTTOM
    }

    fn x(&self, index: usize) -> f64 {
        if self.len > 1 {
            PAD_LEFT + index as f64 * Self::plot_width() / (self.len - 1) as f64
        } else {
            PAD_LEFT + Self::plot_width() / 2.0
        }
    }

    fn y(&self, value: f64) -> f64 {
        HEIGHT - PAD_BOTTOM - (value - self.min_y) / (self.max_y - self.min_y) * Self::plot_height()
    }
}

impl Chart<'_> {
    pub fn render(&self) -> String {
        let Some(frame) = self.frame() else {
            return empty_svg(&self.title);
        };

        let mut svg = Vec::new();
        svg.push(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="sans-serif" font-size="12">"#,
            w = WIDTH,
            h = HEIGHT
        ));
        svg.push(r#"<rect width="100%" height="100%" fill="white"/>"#.to_string());
        svg.push(format!(
            r#"<text x="{:.1}" y="28" text-anchor="middle" font-size="18">{}</text>"#,
            WIDTH / 2.0,
            escape(&self.title)
        ));

        self.write_grid(&mut svg, &frame);
        for series in &self.series {
            write_series(&mut svg, &frame, series);
        }
        for markers in &self.markers {
            write_markers(&mut svg, &frame, markers);
        }
        self.write_legend(&mut svg);

        svg.push("</svg>\n".to_string());
        svg.join("\n")
    }

    fn frame(&self) -> Option<Frame> {
        let len = self.times.len();
        if len == 0 {
            return None;
        }

        let values = self
            .series
            .iter()
            .flat_map(|s| s.values.iter().flatten().copied())
            .chain(self.markers.iter().flat_map(|m| m.points.iter().map(|p| p.1)))
            .filter(|v| v.is_finite());

        let (mut min_y, mut max_y) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min_y.is_finite() {
            return None;
        }
        if max_y - min_y <= f64::EPSILON * max_y.abs().max(1.0) {
            min_y -= 1.0;
            max_y += 1.0;
        }

        Some(Frame { min_y, max_y, len })
    }

    fn write_grid(&self, svg: &mut Vec<String>, frame: &Frame) {
        let bottom = HEIGHT - PAD_BOTTOM;
        let right = WIDTH - PAD_RIGHT;

        for i in 0..Y_TICKS {
            let value = frame.min_y + (frame.max_y - frame.min_y) * i as f64 / (Y_TICKS - 1) as f64;
            let y = frame.y(value);
            let label = match self.y_format {
                YFormat::Dollars => format!("${}", format_amount(value)),
                YFormat::Plain => format!("{:.2}", value),
            };
            svg.push(format!(
                r##"<line x1="{PAD_LEFT:.1}" y1="{y:.1}" x2="{right:.1}" y2="{y:.1}" stroke="#dddddd"/>"##
            ));
            svg.push(format!(
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"#,
                PAD_LEFT - 6.0,
                y + 4.0,
                escape(&label)
            ));
        }

        for (index, time) in day_ticks(self.times) {
            let x = frame.x(index);
            svg.push(format!(
                r##"<line x1="{x:.1}" y1="{PAD_TOP:.1}" x2="{x:.1}" y2="{bottom:.1}" stroke="#dddddd"/>"##
            ));
            svg.push(format!(
                r#"<text x="{x:.1}" y="{:.1}" text-anchor="end" transform="rotate(-45 {x:.1} {:.1})">{}</text>"#,
                bottom + 16.0,
                bottom + 16.0,
                time.format("%Y-%m-%d")
            ));
        }

        svg.push(format!(
            r#"<rect x="{PAD_LEFT:.1}" y="{PAD_TOP:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="black"/>"#,
            Frame::plot_width(),
            Frame::plot_height()
        ));
        svg.push(format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            PAD_LEFT + Frame::plot_width() / 2.0,
            HEIGHT - 12.0,
            self.x_label
        ));
        svg.push(format!(
            r#"<text x="20" y="{y:.1}" text-anchor="middle" transform="rotate(-90 20 {y:.1})">{}</text>"#,
            self.y_label,
            y = PAD_TOP + Frame::plot_height() / 2.0
        ));
    }

    fn write_legend(&self, svg: &mut Vec<String>) {
        let entries = self
            .series
            .iter()
            .map(|s| (s.label.as_str(), s.color, None::<MarkerShape>))
            .chain(
                self.markers
                    .iter()
                    .map(|m| (m.label.as_str(), m.color, Some(m.shape))),
            );

        let x = PAD_LEFT + 12.0;
        for (row, (label, color, shape)) in entries.enumerate() {
            let y = PAD_TOP + 18.0 + row as f64 * 18.0;
            match shape {
                None => {
                    svg.push(format!(
                        r#"<line x1="{x:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{color}" stroke-width="2"/>"#,
                        x + 20.0
                    ));
                }
                Some(shape) => {
                    svg.push(triangle(x + 10.0, y, shape, color));
                }
            }
            svg.push(format!(
                r#"<text x="{:.1}" y="{:.1}">{}</text>"#,
                x + 28.0,
                y + 4.0,
                escape(label)
            ));
        }
    }
}

fn write_series(svg: &mut Vec<String>, frame: &Frame, series: &Series) {
    let mut path = Vec::new();
    let mut pen_down = false;
    for (i, value) in series.values.iter().enumerate().take(frame.len) {
        match value.filter(|v| v.is_finite()) {
            Some(v) => {
                let cmd = if pen_down { 'L' } else { 'M' };
                path.push(format!("{}{:.1},{:.1}", cmd, frame.x(i), frame.y(v)));
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    if path.is_empty() {
        return;
    }
    svg.push(format!(
        r#"<path d="{}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
        path.join(" "),
        series.color
    ));
}

fn write_markers(svg: &mut Vec<String>, frame: &Frame, markers: &Markers) {
    for &(index, value) in &markers.points {
        if index >= frame.len || !value.is_finite() {
            continue;
        }
        svg.push(triangle(
            frame.x(index),
            frame.y(value),
            markers.shape,
            markers.color,
        ));
    }
}

fn triangle(x: f64, y: f64, shape: MarkerShape, color: &str) -> String {
    let s = MARKER_SIZE;
    let points = match shape {
        MarkerShape::TriangleUp => [(x, y - s), (x - s, y + s), (x + s, y + s)],
        MarkerShape::TriangleDown => [(x, y + s), (x - s, y - s), (x + s, y - s)],
    };
    format!(
        r#"<polygon points="{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}" fill="{}"/>"#,
        points[0].0, points[0].1, points[1].0, points[1].1, points[2].0, points[2].1, color
    )
}

/// First index on or after each midnight between the first and last time.
/// Days are skipped evenly when the span exceeds `MAX_X_TICKS`.
pub fn day_ticks(times: &[NaiveDateTime]) -> Vec<(usize, NaiveDateTime)> {
    let (Some(&first), Some(&last)) = (times.first(), times.last()) else {
        return Vec::new();
    };

    let mut day = first.date().and_time(NaiveTime::MIN);
    if day < first {
        day += Duration::days(1);
    }
    let span_days = (last - day).num_days().max(0) as usize + 1;
    let step = span_days.div_ceil(MAX_X_TICKS).max(1) as i64;

    let mut ticks = Vec::new();
    let mut index = 0;
    while day <= last {
        while index < times.len() && times[index] < day {
            index += 1;
        }
        if index == times.len() {
            break;
        }
        ticks.push((index, day));
        day += Duration::days(step);
    }
    ticks
}

fn empty_svg(title: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}"><text x="{x:.0}" y="{y:.0}" text-anchor="middle">{} (no data available)</text></svg>
"#,
        escape(title),
        w = WIDTH,
        h = HEIGHT,
        x = WIDTH / 2.0,
        y = HEIGHT / 2.0
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
