//! Chart geometry for the sentiment dashboard.
//!
//! Every function here is pure: it maps snapshot numbers to render primitives
//! (arc dash lengths, wedge paths, polylines, bar widths) in a fixed SVG
//! coordinate space. Degenerate input (empty series, zero totals, a single
//! point) produces empty or centered geometry, never a panic or a NaN.

pub mod bar;
pub mod dashboard;
pub mod gauge;
pub mod line;
pub mod pie;

pub use bar::{bar, negative_by_date, Bar, BarChart};
pub use dashboard::DashboardCharts;
pub use gauge::{gauge, ColorBand, Gauge};
pub use line::{line, line_with_keys, plotted_days, Gridline, LineChart, LineSeries, SentimentKey, XLabel};
pub use pie::{pie, PieChart, PieSlice};

/// A point in chart space (SVG user units, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Formats a coordinate for path data with a fixed precision so identical
/// input always yields byte-identical strings.
pub(crate) fn fmt_coord(value: f64) -> String {
    let rounded = format!("{value:.2}");
    // "-0.00" and "0.00" must not differ.
    if rounded == "-0.00" {
        "0.00".to_string()
    } else {
        rounded
    }
}

/// Non-finite and negative inputs count as zero.
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
