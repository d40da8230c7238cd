//! Formatting utilities used for CLI and export outputs.

/// Presentation rounding: two decimals, half away from zero.
pub fn round2(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// `8.5` → `"8.50"`
pub fn hours2decimal(hours: f64) -> String {
    format!("{:.2}", round2(hours))
}

/// Fractional hours as a clock-like string.
///
/// Minutes are truncated, never rounded up. NaN and negative values render as `00:00`.
/// With `short = false` the long form `08h 30m` is used.
pub fn hours2readable(hours: f64, short: bool) -> String {
    if hours.is_nan() || hours < 0.0 {
        return if short {
            "00:00".to_string()
        } else {
            "00h 00m".to_string()
        };
    }

    // epsilon keeps 7.98333… (7h59m) from collapsing to 7h58m
    let total_minutes = (hours * 60.0 + 1e-9).floor() as i64;
    let h = total_minutes / 60;
    let m = total_minutes % 60;

    if short {
        format!("{:02}:{:02}", h, m)
    } else {
        format!("{:02}h {:02}m", h, m)
    }
}
