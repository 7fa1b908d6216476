//! Semicircle sentiment gauge.
//!
//! The arc spans the upper half of a circle of radius [`GAUGE_RADIUS`]
//! centred at [`GAUGE_CENTER`]. The coloured portion is drawn with a stroke
//! dash whose length is proportional to the score.

use std::f64::consts::PI;

use serde::Serialize;

use crate::{fmt_coord, Point};

pub const GAUGE_RADIUS: f64 = 80.0;
pub const GAUGE_CENTER: Point = Point::new(100.0, 90.0);
pub const NEEDLE_LENGTH: f64 = 60.0;

/// Length of the semicircle: `π · r`.
pub const GAUGE_ARC_LENGTH: f64 = PI * GAUGE_RADIUS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorBand {
    Good,
    Warn,
    Bad,
}

impl ColorBand {
    /// `>= 70` good, `>= 40` warn, otherwise bad.
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score >= 70.0 {
            ColorBand::Good
        } else if score >= 40.0 {
            ColorBand::Warn
        } else {
            ColorBand::Bad
        }
    }

    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            ColorBand::Good => "#10B981",
            ColorBand::Warn => "#F59E0B",
            ColorBand::Bad => "#EF4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    /// Score after clamping to `[0, 100]`.
    pub score: f64,
    pub arc_length: f64,
    pub dash_length: f64,
    /// Needle rotation in degrees about the centre: -90 at 0, +90 at 100.
    pub needle_rotation_deg: f64,
    pub band: ColorBand,
}

/// Computes gauge geometry for a `[0, 100]` score.
///
/// Out-of-range scores are clamped; a non-finite score reads as 0.
#[must_use]
pub fn gauge(score: f64) -> Gauge {
    let score = if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let sweep = score / 100.0;

    Gauge {
        score,
        arc_length: GAUGE_ARC_LENGTH,
        dash_length: sweep * GAUGE_ARC_LENGTH,
        needle_rotation_deg: sweep * 180.0 - 90.0,
        band: ColorBand::for_score(score),
    }
}

impl Gauge {
    /// `false` for a zero score: the coloured arc is skipped entirely.
    #[must_use]
    pub fn draws_arc(&self) -> bool {
        self.dash_length > 0.0
    }

    #[must_use]
    pub fn color(&self) -> &'static str {
        self.band.color()
    }

    /// `stroke-dasharray` value for the coloured arc.
    #[must_use]
    pub fn dash_array(&self) -> String {
        format!(
            "{} {}",
            fmt_coord(self.dash_length),
            fmt_coord(self.arc_length)
        )
    }

    /// Path data for the background (and coloured) semicircle.
    #[must_use]
    pub fn arc_path(&self) -> String {
        let left = GAUGE_CENTER.x - GAUGE_RADIUS;
        let right = GAUGE_CENTER.x + GAUGE_RADIUS;
        format!(
            "M {} {} A {r} {r} 0 0 1 {} {}",
            fmt_coord(left),
            fmt_coord(GAUGE_CENTER.y),
            fmt_coord(right),
            fmt_coord(GAUGE_CENTER.y),
            r = fmt_coord(GAUGE_RADIUS),
        )
    }

    /// Needle tip after rotation. The unrotated needle points straight up.
    #[must_use]
    pub fn needle_tip(&self) -> Point {
        let theta = self.needle_rotation_deg.to_radians();
        Point::new(
            GAUGE_CENTER.x + NEEDLE_LENGTH * theta.sin(),
            GAUGE_CENTER.y - NEEDLE_LENGTH * theta.cos(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_score_has_no_arc_and_points_left() {
        let g = gauge(0.0);
        assert!(approx(g.dash_length, 0.0));
        assert!(approx(g.needle_rotation_deg, -90.0));
        assert!(!g.draws_arc());
        assert_eq!(g.band, ColorBand::Bad);
        let tip = g.needle_tip();
        assert!(approx(tip.x, 40.0));
        assert!(approx(tip.y, 90.0));
    }

    #[test]
    fn full_score_fills_arc_and_points_right() {
        let g = gauge(100.0);
        assert!(approx(g.dash_length, GAUGE_ARC_LENGTH));
        assert!(approx(g.needle_rotation_deg, 90.0));
        assert!(g.draws_arc());
        assert_eq!(g.band, ColorBand::Good);
    }

    #[test]
    fn arc_length_matches_radius_80() {
        assert!((GAUGE_ARC_LENGTH - 251.327).abs() < 0.001);
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(gauge(70.0).band, ColorBand::Good);
        assert_eq!(gauge(69.9).band, ColorBand::Warn);
        assert_eq!(gauge(40.0).band, ColorBand::Warn);
        assert_eq!(gauge(39.9).band, ColorBand::Bad);
    }

    #[test]
    fn midpoint_needle_is_vertical() {
        let g = gauge(50.0);
        assert!(approx(g.needle_rotation_deg, 0.0));
        let tip = g.needle_tip();
        assert!(approx(tip.x, 100.0));
        assert!(approx(tip.y, 30.0));
    }

    #[test]
    fn out_of_range_and_nan_scores_are_clamped() {
        assert!(approx(gauge(150.0).score, 100.0));
        assert!(approx(gauge(-5.0).score, 0.0));
        let g = gauge(f64::NAN);
        assert!(approx(g.score, 0.0));
        assert!(!g.draws_arc());
    }

    #[test]
    fn identical_input_is_identical_output() {
        assert_eq!(gauge(63.2), gauge(63.2));
        assert_eq!(gauge(63.2).dash_array(), gauge(63.2).dash_array());
    }

    #[test]
    fn arc_path_spans_the_diameter() {
        assert_eq!(
            gauge(10.0).arc_path(),
            "M 20.00 90.00 A 80.00 80.00 0 0 1 180.00 90.00"
        );
    }
}
