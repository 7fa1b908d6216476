//! Multi-series sentiment trend line.
//!
//! Plots up to [`MAX_POINTS`] days in chronological order inside a
//! [`LINE_WIDTH`] x [`LINE_HEIGHT`] viewport with [`LINE_PADDING`] on every
//! side.

use chrono::{Datelike, NaiveDate};
use newsdash_core::DailySentiment;
use serde::Serialize;

use crate::{fmt_coord, Point};

pub const LINE_WIDTH: f64 = 600.0;
pub const LINE_HEIGHT: f64 = 300.0;
pub const LINE_PADDING: f64 = 40.0;
pub const MAX_POINTS: usize = 7;
pub const GRIDLINES: usize = 5;
pub const MARKER_RADIUS: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentKey {
    Positive,
    Neutral,
    Negative,
}

impl SentimentKey {
    pub const ALL: [SentimentKey; 3] = [
        SentimentKey::Positive,
        SentimentKey::Neutral,
        SentimentKey::Negative,
    ];

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            SentimentKey::Positive => "#10B981",
            SentimentKey::Neutral => "#6B7280",
            SentimentKey::Negative => "#EF4444",
        }
    }

    #[must_use]
    pub fn value(self, day: &DailySentiment) -> u64 {
        match self {
            SentimentKey::Positive => day.positive,
            SentimentKey::Neutral => day.neutral,
            SentimentKey::Negative => day.negative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gridline {
    pub y: f64,
    pub label: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XLabel {
    pub x: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub key: SentimentKey,
    pub color: &'static str,
    pub points: Vec<Point>,
    /// Polyline path data; empty when there are no points.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Largest plotted value, never below 1.
    pub max_value: f64,
    pub gridlines: Vec<Gridline>,
    pub series: Vec<LineSeries>,
    pub x_labels: Vec<XLabel>,
    pub marker_radius: f64,
}

impl LineChart {
    /// `true` when there were no days to plot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_labels.is_empty()
    }
}

/// Plots all three sentiment keys.
#[must_use]
pub fn line(series: &[DailySentiment]) -> LineChart {
    line_with_keys(series, &SentimentKey::ALL)
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn line_with_keys(series: &[DailySentiment], keys: &[SentimentKey]) -> LineChart {
    let days = plotted_days(series);

    let max_value = days
        .iter()
        .flat_map(|day| keys.iter().map(move |key| key.value(day) as f64))
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let chart_width = LINE_WIDTH - 2.0 * LINE_PADDING;
    let chart_height = LINE_HEIGHT - 2.0 * LINE_PADDING;
    let count = days.len();

    let x_at = |i: usize| -> f64 {
        if count <= 1 {
            LINE_PADDING + chart_width / 2.0
        } else {
            LINE_PADDING + (i as f64 / (count - 1) as f64) * chart_width
        }
    };
    let y_at = |v: f64| -> f64 { LINE_HEIGHT - LINE_PADDING - (v / max_value) * chart_height };

    let gridlines = (0..GRIDLINES)
        .map(|i| {
            let fraction = i as f64 / (GRIDLINES - 1) as f64;
            Gridline {
                y: LINE_HEIGHT - LINE_PADDING - fraction * chart_height,
                label: round_label(max_value * fraction),
            }
        })
        .collect();

    let series = keys
        .iter()
        .map(|&key| {
            let points: Vec<Point> = days
                .iter()
                .enumerate()
                .map(|(i, day)| Point::new(x_at(i), y_at(key.value(day) as f64)))
                .collect();
            LineSeries {
                key,
                color: key.color(),
                path: polyline(&points),
                points,
            }
        })
        .collect();

    let x_labels = days
        .iter()
        .enumerate()
        .map(|(i, day)| XLabel {
            x: x_at(i),
            text: day_label(day, i),
        })
        .collect();

    LineChart {
        width: LINE_WIDTH,
        height: LINE_HEIGHT,
        padding: LINE_PADDING,
        max_value,
        gridlines,
        series,
        x_labels,
        marker_radius: MARKER_RADIUS,
    }
}

/// Picks the days to plot, oldest first.
///
/// When every entry carries a parseable date the entries are sorted by date
/// and the most recent [`MAX_POINTS`] kept. Otherwise the input is taken as
/// newest-first, which is how the analytics service emits it.
#[must_use]
pub fn plotted_days(series: &[DailySentiment]) -> Vec<&DailySentiment> {
    let dated: Option<Vec<(NaiveDate, &DailySentiment)>> = series
        .iter()
        .map(|day| parse_day(day).map(|date| (date, day)))
        .collect();

    match dated {
        Some(mut dated) if !dated.is_empty() => {
            dated.sort_by_key(|(date, _)| *date);
            let skip = dated.len().saturating_sub(MAX_POINTS);
            dated.into_iter().skip(skip).map(|(_, day)| day).collect()
        }
        _ => {
            let mut recent: Vec<&DailySentiment> = series.iter().take(MAX_POINTS).collect();
            recent.reverse();
            recent
        }
    }
}

fn parse_day(day: &DailySentiment) -> Option<NaiveDate> {
    let raw = day.date.as_deref()?;
    let prefix = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()
}

fn day_label(day: &DailySentiment, index: usize) -> String {
    match parse_day(day) {
        Some(date) => date.day().to_string(),
        None => (index + 1).to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_label(value: f64) -> u64 {
    value.round() as u64
}

fn polyline(points: &[Point]) -> String {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let cmd = if i == 0 { 'M' } else { 'L' };
            format!("{cmd} {} {}", fmt_coord(p.x), fmt_coord(p.y))
        })
        .collect::<Vec<_>>()
        .join(" ")
}
