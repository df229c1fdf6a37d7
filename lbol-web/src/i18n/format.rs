pub use lbol_stats::numbers::fmt_fixed;
use lbol_stats::numbers::fmt_percent;

/// Format a 0–1 ratio as `12.3%`, `N/A` when absent.
#[must_use]
pub fn fmt_pct(ratio: Option<f64>, digits: usize) -> String {
    match ratio {
        Some(_) => format!("{}%", fmt_percent(ratio, digits)),
        None => fmt_percent(None, digits),
    }
}

/// Format a change with an explicit sign, e.g. `+1.5` or `-6.0`.
#[must_use]
pub fn fmt_signed(value: f64, digits: usize) -> String {
    format!("{value:+.digits$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_and_signs() {
        assert_eq!(fmt_pct(Some(0.25), 1), "25.0%");
        assert_eq!(fmt_pct(None, 1), "N/A");
        assert_eq!(fmt_signed(1.5, 1), "+1.5");
        assert_eq!(fmt_signed(-6.0, 1), "-6.0");
        assert_eq!(fmt_fixed(Some(2.5), 2), "2.50");
    }
}
