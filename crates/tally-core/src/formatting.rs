use crate::limits::{SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

/// Format a duration in seconds as a zero-padded clock string.
///
/// * `force_hours == true` or `hours > 0` → `"HH:MM:SS"`
/// * otherwise → `"MM:SS"`
///
/// Hours are padded to two digits but never truncated, so a 100-hour total
/// renders as `"100:00:00"`.
///
/// # Examples
///
/// ```
/// use tally_core::formatting::format_duration;
///
/// assert_eq!(format_duration(3723, true),  "01:02:03");
/// assert_eq!(format_duration(90, true),    "00:01:30");
/// assert_eq!(format_duration(90, false),   "01:30");
/// assert_eq!(format_duration(5400, false), "01:30:00");
/// assert_eq!(format_duration(0, false),    "00:00");
/// ```
pub fn format_duration(seconds: u64, force_hours: bool) -> String {
    let hour = u64::from(SECONDS_PER_HOUR);
    let minute = u64::from(SECONDS_PER_MINUTE);

    let h = seconds / hour;
    let m = (seconds % hour) / minute;
    let s = seconds % minute;

    if force_hours || h > 0 {
        format!("{:02}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

/// Render a playback-speed factor given as a rational, e.g. `(3, 2)` → `"1.5x"`.
///
/// Always one decimal place, so whole factors read `"2.0x"`.
///
/// # Examples
///
/// ```
/// use tally_core::formatting::format_speed_factor;
///
/// assert_eq!(format_speed_factor(3, 2), "1.5x");
/// assert_eq!(format_speed_factor(2, 1), "2.0x");
/// ```
pub fn format_speed_factor(numerator: u64, denominator: u64) -> String {
    if denominator == 0 {
        return "-".to_string();
    }
    format!("{:.1}x", numerator as f64 / denominator as f64)
}

/// Join line numbers with `", "`, as shown in live feedback.
pub fn join_line_numbers(line_numbers: &[usize]) -> String {
    line_numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_duration ──────────────────────────────────────────────────────

    #[test]
    fn test_format_duration_zero() {
        assert_eq!(format_duration(0, true), "00:00:00");
        assert_eq!(format_duration(0, false), "00:00");
    }

    #[test]
    fn test_format_duration_minutes_only() {
        assert_eq!(format_duration(2700, false), "45:00");
        assert_eq!(format_duration(59, false), "00:59");
    }

    #[test]
    fn test_format_duration_hours_promote_format() {
        // Hours > 0 always produce the long form even when not forced.
        assert_eq!(format_duration(4050, false), "01:07:30");
        assert_eq!(format_duration(86_399, false), "23:59:59");
    }

    #[test]
    fn test_format_duration_forced_hours() {
        assert_eq!(format_duration(2400, true), "00:40:00");
        assert_eq!(format_duration(1800, true), "00:30:00");
        assert_eq!(format_duration(8100, true), "02:15:00");
    }

    #[test]
    fn test_format_duration_large_totals() {
        // 1000 videos of 24h each.
        assert_eq!(format_duration(86_400_000, true), "24000:00:00");
    }

    // ── format_speed_factor ──────────────────────────────────────────────────

    #[test]
    fn test_format_speed_factor() {
        assert_eq!(format_speed_factor(3, 2), "1.5x");
        assert_eq!(format_speed_factor(2, 1), "2.0x");
        assert_eq!(format_speed_factor(5, 2), "2.5x");
    }

    #[test]
    fn test_format_speed_factor_zero_denominator() {
        assert_eq!(format_speed_factor(1, 0), "-");
    }

    // ── join_line_numbers ────────────────────────────────────────────────────

    #[test]
    fn test_join_line_numbers() {
        assert_eq!(join_line_numbers(&[1, 4, 9]), "1, 4, 9");
        assert_eq!(join_line_numbers(&[]), "");
    }
}
