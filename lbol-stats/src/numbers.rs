//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn count_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Convert a collection length to f64.
#[must_use]
pub fn len_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Round a f64 and clamp it to the i64 range, returning 0 for non-finite values.
#[must_use]
pub fn round_f64_to_i64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let min = cast::<i64, f64>(i64::MIN).unwrap_or(f64::MIN);
    let max = cast::<i64, f64>(i64::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(min, max).round();
    cast::<f64, i64>(clamped).unwrap_or(0)
}

/// Round a unit-interval channel value into an 8-bit color channel.
#[must_use]
pub fn unit_to_channel(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    let scaled = (value.clamp(0.0, 1.0) * 255.0).round();
    cast::<f64, u8>(scaled).unwrap_or(0)
}

/// Format an optional value with fixed digits, `N/A` when absent.
#[must_use]
pub fn fmt_fixed(value: Option<f64>, digits: usize) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.digits$}"))
}

/// Format an optional ratio as a percentage with fixed digits, `N/A` when absent.
#[must_use]
pub fn fmt_percent(value: Option<f64>, digits: usize) -> String {
    value.map_or_else(
        || "N/A".to_string(),
        |v| {
            let pct = v * 100.0;
            format!("{pct:.digits$}")
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f64_to_i64(1.6), 2);
        assert_eq!(round_f64_to_i64(f64::NAN), 0);
        assert_eq!(round_f64_to_i64(f64::INFINITY), 0);
        assert_eq!(round_f64_to_i64(-2.4), -2);
    }

    #[test]
    fn channel_conversion_clamps() {
        assert_eq!(unit_to_channel(0.0), 0);
        assert_eq!(unit_to_channel(1.0), 255);
        assert_eq!(unit_to_channel(2.0), 255);
        assert_eq!(unit_to_channel(-1.0), 0);
        assert_eq!(unit_to_channel(0.5), 128);
    }

    #[test]
    fn formatting_handles_missing_values() {
        assert_eq!(fmt_fixed(Some(1.234), 2), "1.23");
        assert_eq!(fmt_fixed(None, 2), "N/A");
        assert_eq!(fmt_percent(Some(0.1234), 1), "12.3");
        assert_eq!(fmt_percent(None, 1), "N/A");
        assert!((len_to_f64(3) - 3.0).abs() < f64::EPSILON);
        assert!((count_to_f64(7) - 7.0).abs() < f64::EPSILON);
    }
}
