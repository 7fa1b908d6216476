//! Donut chart built from wedge paths.
//!
//! Angles are in degrees, start at 0 (the positive x axis) and grow clockwise
//! in screen space. Each slice is a closed wedge from the centre; the hole is
//! drawn on top by the renderer using [`PieChart::hole_radius`].

use newsdash_core::DistributionEntry;
use serde::Serialize;

use crate::{fmt_coord, non_negative, Point};

pub const PIE_CENTER: Point = Point::new(50.0, 50.0);
pub const PIE_RADIUS: f64 = 40.0;
pub const PIE_HOLE_RADIUS: f64 = 25.0;
pub const DEFAULT_SLICE_COLOR: &str = "#8B5CF6";

const FULL_TURN_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub span: f64,
    pub large_arc: bool,
    /// Share of the total, rounded to the nearest whole percent.
    pub percentage: u32,
    /// SVG path data for the wedge.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub total: f64,
    pub center: Point,
    pub radius: f64,
    pub hole_radius: f64,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

/// Lays out `entries` as consecutive wedges.
///
/// Negative values count as zero. When the total is zero no slices are
/// produced.
#[must_use]
pub fn pie(entries: &[DistributionEntry]) -> PieChart {
    let total: f64 = entries.iter().map(|e| non_negative(e.value)).sum();

    let mut chart = PieChart {
        total,
        center: PIE_CENTER,
        radius: PIE_RADIUS,
        hole_radius: PIE_HOLE_RADIUS,
        slices: Vec::new(),
    };

    if total <= 0.0 {
        return chart;
    }

    let mut angle = 0.0;
    for entry in entries {
        let value = non_negative(entry.value);
        let span = value / total * 360.0;
        let start_angle = angle;
        let end_angle = angle + span;
        angle = end_angle;

        chart.slices.push(PieSlice {
            name: entry.name.clone(),
            value,
            color: entry
                .color
                .clone()
                .unwrap_or_else(|| DEFAULT_SLICE_COLOR.to_string()),
            start_angle,
            end_angle,
            span,
            large_arc: span > 180.0,
            percentage: rounded_percent(value, total),
            path: wedge_path(start_angle, end_angle, span),
        });
    }

    chart
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rounded_percent(value: f64, total: f64) -> u32 {
    (value / total * 100.0).round() as u32
}

fn point_on_circle(angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(
        PIE_CENTER.x + PIE_RADIUS * rad.cos(),
        PIE_CENTER.y + PIE_RADIUS * rad.sin(),
    )
}

fn wedge_path(start_angle: f64, end_angle: f64, span: f64) -> String {
    let r = fmt_coord(PIE_RADIUS);

    // A single arc cannot close on its own start point; draw two halves.
    if span >= 360.0 - FULL_TURN_EPSILON {
        let right = Point::new(PIE_CENTER.x + PIE_RADIUS, PIE_CENTER.y);
        let left = Point::new(PIE_CENTER.x - PIE_RADIUS, PIE_CENTER.y);
        return format!(
            "M {rx} {ry} A {r} {r} 0 1 1 {lx} {ly} A {r} {r} 0 1 1 {rx} {ry} Z",
            rx = fmt_coord(right.x),
            ry = fmt_coord(right.y),
            lx = fmt_coord(left.x),
            ly = fmt_coord(left.y),
        );
    }

    let from = point_on_circle(start_angle);
    let to = point_on_circle(end_angle);
    let large_arc = u8::from(span > 180.0);

    format!(
        "M {cx} {cy} L {x1} {y1} A {r} {r} 0 {large_arc} 1 {x2} {y2} Z",
        cx = fmt_coord(PIE_CENTER.x),
        cy = fmt_coord(PIE_CENTER.y),
        x1 = fmt_coord(from.x),
        y1 = fmt_coord(from.y),
        x2 = fmt_coord(to.x),
        y2 = fmt_coord(to.y),
    )
}
