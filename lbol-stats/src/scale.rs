//! Deviation-score utilities shared by the scatter plot, the detail panel
//! and the encounter tables.

use serde::Serialize;
use std::fmt;

use crate::constants::{
    DEVIATION_CENTER, DEVIATION_PER_IQR, DISTRIBUTION_AXIS, DISTRIBUTION_TICKS, HEAT_ALPHA,
};
use crate::data::BoxplotSummary;
use crate::numbers::unit_to_channel;

/// Position of `value` inside `[scale_min, scale_max]` as a 0–100 percentage.
///
/// Values outside the range are clamped. Degenerate or non-finite ranges
/// yield 0.
#[must_use]
pub fn to_percent(value: f64, scale_min: f64, scale_max: f64) -> f64 {
    if !(scale_max > scale_min) || value.is_nan() {
        return 0.0;
    }
    let range = scale_max - scale_min;
    if !range.is_finite() {
        return 0.0;
    }
    (value.clamp(scale_min, scale_max) - scale_min) / range * 100.0
}

/// An RGBA color rendered as a CSS `rgba(..)` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 0.0,
    };

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.a == 0.0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Green → yellow → red heat color for `value` within `[min, max]`.
///
/// `reverse` flips the direction so that high values read as good.
/// Identical bounds produce [`Rgba::TRANSPARENT`].
#[must_use]
pub fn color_for_value(value: f64, min: f64, max: f64, reverse: bool) -> Rgba {
    if min == max || !min.is_finite() || !max.is_finite() {
        return Rgba::TRANSPARENT;
    }
    let mut norm = (value - min) / (max - min);
    norm = if norm.is_nan() { 0.0 } else { norm.clamp(0.0, 1.0) };
    if reverse {
        norm = 1.0 - norm;
    }
    let (r, g) = if norm < 0.5 {
        (unit_to_channel(norm * 2.0), 255)
    } else {
        (255, unit_to_channel(1.0 - (norm - 0.5) * 2.0))
    };
    Rgba {
        r,
        g,
        b: 0,
        a: HEAT_ALPHA,
    }
}

/// Raw statistic corresponding to a deviation score.
#[must_use]
pub fn raw_for_deviation(median: f64, iqr: f64, score: f64) -> f64 {
    median + (score - DEVIATION_CENTER) / DEVIATION_PER_IQR * iqr
}

/// Inverse of [`raw_for_deviation`]; `None` when the spread is not positive.
#[must_use]
pub fn deviation_for_raw(median: f64, iqr: f64, raw: f64) -> Option<f64> {
    (iqr > 0.0).then(|| DEVIATION_CENTER + (raw - median) / iqr * DEVIATION_PER_IQR)
}

/// Horizontal axis of a distribution plot labelled in deviation scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionAxis {
    pub range: (f64, f64),
    pub tick_values: Vec<f64>,
    pub tick_labels: Vec<String>,
}

impl DistributionAxis {
    /// Axis for values that are already deviation scores.
    #[must_use]
    pub fn deviation() -> Self {
        Self {
            range: DISTRIBUTION_AXIS,
            tick_values: DISTRIBUTION_TICKS.to_vec(),
            tick_labels: DISTRIBUTION_TICKS.iter().map(|t| format!("{t:.0}")).collect(),
        }
    }

    /// Axis for raw values, placed so that tick labels read as deviation scores.
    ///
    /// Falls back to [`Self::deviation`] when `iqr` is not positive.
    #[must_use]
    pub fn scaled(median: f64, iqr: f64) -> Self {
        if !(iqr > 0.0) {
            return Self::deviation();
        }
        let raw = |score: f64| raw_for_deviation(median, iqr, score);
        Self {
            range: (raw(DISTRIBUTION_AXIS.0), raw(DISTRIBUTION_AXIS.1)),
            tick_values: DISTRIBUTION_TICKS.iter().map(|t| raw(*t)).collect(),
            tick_labels: DISTRIBUTION_TICKS.iter().map(|t| format!("{t:.0}")).collect(),
        }
    }

    /// Where a deviation score lands on this axis.
    #[must_use]
    pub fn position_of(&self, score: f64) -> f64 {
        let (lo, hi) = self.range;
        let (dev_lo, dev_hi) = DISTRIBUTION_AXIS;
        lo + (score - dev_lo) / (dev_hi - dev_lo) * (hi - lo)
    }
}

/// A horizontal span on a 0–100 track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackSpan {
    pub left: f64,
    pub width: f64,
}

/// Inline boxplot geometry on a fixed-width track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxplotTrack {
    pub lower_whisker: TrackSpan,
    pub body: TrackSpan,
    pub upper_whisker: TrackSpan,
    pub median: f64,
    pub mean: f64,
    pub label_start: f64,
    pub label_end: f64,
    /// Summary as displayed (negated for loss columns).
    pub shown: BoxplotSummary,
}

impl BoxplotTrack {
    /// Project `summary` onto `[scale_min, scale_max]`.
    ///
    /// With `negate`, values and scale are mirrored so losses read as
    /// negative numbers. Returns `None` when the scale is degenerate.
    #[must_use]
    pub fn project(
        summary: &BoxplotSummary,
        scale_min: f64,
        scale_max: f64,
        negate: bool,
    ) -> Option<Self> {
        let (shown, lo, hi) = if negate {
            (summary.negated(), -scale_max, -scale_min)
        } else {
            (*summary, scale_min, scale_max)
        };
        if !(hi - lo > 0.0) || !(hi - lo).is_finite() {
            return None;
        }
        let pct = |v: f64| to_percent(v, lo, hi);
        let (p_min, p_q1, p_median, p_q3, p_max) = (
            pct(shown.min),
            pct(shown.q1),
            pct(shown.median),
            pct(shown.q3),
            pct(shown.max),
        );
        Some(Self {
            lower_whisker: TrackSpan {
                left: p_min,
                width: p_q1 - p_min,
            },
            body: TrackSpan {
                left: p_q1,
                width: p_q3 - p_q1,
            },
            upper_whisker: TrackSpan {
                left: p_q3,
                width: p_max - p_q3,
            },
            median: p_median,
            mean: pct(shown.mean),
            label_start: lo,
            label_end: hi,
            shown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn percent_clamps_and_handles_degenerate_ranges() {
        assert!(approx(to_percent(5.0, 0.0, 10.0), 50.0));
        assert!(approx(to_percent(-3.0, 0.0, 10.0), 0.0));
        assert!(approx(to_percent(30.0, 0.0, 10.0), 100.0));
        assert!(approx(to_percent(5.0, 10.0, 10.0), 0.0));
        assert!(approx(to_percent(5.0, 10.0, 0.0), 0.0));
        assert!(approx(to_percent(f64::NAN, 0.0, 10.0), 0.0));
    }

    #[test]
    fn equal_bounds_are_transparent_for_any_value() {
        for v in [-100.0, 0.0, 3.5, f64::NAN] {
            let color = color_for_value(v, 7.0, 7.0, false);
            assert_eq!(color, Rgba::TRANSPARENT);
            assert_eq!(color.to_string(), "rgba(255, 255, 255, 0)");
        }
    }

    #[test]
    fn heat_scale_runs_green_to_red() {
        assert_eq!(color_for_value(0.0, 0.0, 10.0, false).to_string(), "rgba(0, 255, 0, 0.4)");
        assert_eq!(color_for_value(5.0, 0.0, 10.0, false).to_string(), "rgba(255, 255, 0, 0.4)");
        assert_eq!(color_for_value(10.0, 0.0, 10.0, false).to_string(), "rgba(255, 0, 0, 0.4)");
        assert_eq!(color_for_value(10.0, 0.0, 10.0, true).to_string(), "rgba(0, 255, 0, 0.4)");
        assert_eq!(color_for_value(99.0, 0.0, 10.0, false), color_for_value(10.0, 0.0, 10.0, false));
        let inverted = color_for_value(2.5, 10.0, 0.0, false);
        assert_eq!(inverted.r, 255);
    }

    #[test]
    fn deviation_mapping_round_trips() {
        let raw = raw_for_deviation(4.0, 2.0, 60.0);
        assert!(approx(raw, 6.0));
        assert!(approx(deviation_for_raw(4.0, 2.0, raw).unwrap_or_default(), 60.0));
        assert_eq!(deviation_for_raw(4.0, 0.0, 1.0), None);

        let axis = DistributionAxis::scaled(4.0, 2.0);
        assert!(approx(axis.range.0, -1.0));
        assert!(approx(axis.range.1, 9.0));
        assert!(approx(axis.position_of(25.0), axis.range.0));
        assert!(approx(axis.position_of(75.0), axis.range.1));
        assert_eq!(axis.tick_labels, vec!["30", "40", "50", "60", "70"]);
        assert!(approx(axis.position_of(50.0), 4.0));
        assert_eq!(DistributionAxis::scaled(4.0, -1.0), DistributionAxis::deviation());
    }

    #[test]
    fn boxplot_track_projects_and_negates() {
        let summary = BoxplotSummary {
            min: 0.0,
            q1: 2.0,
            median: 5.0,
            q3: 8.0,
            max: 10.0,
            mean: 5.0,
        };
        let track = BoxplotTrack::project(&summary, 0.0, 10.0, false).unwrap();
        assert!(approx(track.body.left, 20.0));
        assert!(approx(track.body.width, 60.0));
        assert!(approx(track.upper_whisker.width, 20.0));

        let negated = BoxplotTrack::project(&summary, 0.0, 10.0, true).unwrap();
        assert!(approx(negated.label_start, -10.0));
        assert!(approx(negated.label_end, 0.0));
        assert!(approx(negated.shown.min, -10.0));
        assert!(approx(negated.body.left, 20.0));
        assert!(approx(negated.lower_whisker.left, 0.0));

        assert!(BoxplotTrack::project(&summary, 3.0, 3.0, false).is_none());
    }
}
