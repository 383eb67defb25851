//! Structural and range validation of a single timestamp line.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tally_core::limits::MAX_LINE_LENGTH;

/// `MM:SS` / `M:SS`, optionally prefixed with `HH:` or `H:`.
static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2}:)?[0-9]{1,2}:[0-9]{2}$").expect("regex is valid"));

/// Why a line was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    /// Trimmed line exceeds [`MAX_LINE_LENGTH`] characters.
    TooLong,
    /// Cleaned line does not have a `[H]H:MM:SS` / `[M]M:SS` shape.
    BadShape,
    /// A component is above its allowed maximum.
    OutOfRange,
    /// The line describes a zero-length video.
    ZeroDuration,
    /// The line describes more than 24 hours.
    ExceedsMaximum,
}

/// Keep only ASCII digits and colons.
pub fn clean(line: &str) -> String {
    line.chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect()
}

/// Check `line` against the accepted timestamp shape and component ranges.
///
/// The line is trimmed first. Every character that is not a digit or a colon
/// is discarded before the shape check, so `"1:30 min"` is accepted as
/// `"1:30"`.
pub fn validate(line: &str) -> Result<(), InvalidReason> {
    let trimmed = line.trim();
    if trimmed.chars().count() > MAX_LINE_LENGTH {
        return Err(InvalidReason::TooLong);
    }

    let cleaned = clean(trimmed);
    if !TIME_SHAPE.is_match(&cleaned) {
        return Err(InvalidReason::BadShape);
    }

    // The shape guarantees 1-2 digit components, so parsing cannot fail.
    let parts: Vec<u32> = cleaned
        .split(':')
        .map(|p| p.parse::<u32>().unwrap_or(u32::MAX))
        .collect();

    let in_range = match parts.as_slice() {
        [m, s] => *m <= 59 && *s <= 59,
        [h, m, s] => *h <= 23 && *m <= 59 && *s <= 59,
        _ => false,
    };

    if in_range {
        Ok(())
    } else {
        Err(InvalidReason::OutOfRange)
    }
}

/// `true` when [`validate`] accepts `line`.
pub fn is_valid_time_format(line: &str) -> bool {
    validate(line).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_minutes_seconds() {
        assert!(is_valid_time_format("45:00"));
        assert!(is_valid_time_format("5:07"));
        assert!(is_valid_time_format("59:59"));
        assert!(is_valid_time_format("00:00"));
    }

    #[test]
    fn test_valid_hours_minutes_seconds() {
        assert!(is_valid_time_format("01:30:00"));
        assert!(is_valid_time_format("1:2:03"));
        assert!(is_valid_time_format("23:59:59"));
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert!(is_valid_time_format("   12:34 \t"));
    }

    #[test]
    fn test_noise_characters_are_stripped() {
        assert!(is_valid_time_format("Ep1 12:34"));
        assert!(is_valid_time_format("[01:02:03]"));
    }

    #[test]
    fn test_seconds_need_two_digits() {
        assert_eq!(validate("12:3"), Err(InvalidReason::BadShape));
    }

    #[test]
    fn test_garbage_is_bad_shape() {
        assert_eq!(validate("garbage"), Err(InvalidReason::BadShape));
        assert_eq!(validate("12"), Err(InvalidReason::BadShape));
        assert_eq!(validate("1:2:3:45"), Err(InvalidReason::BadShape));
        assert_eq!(validate("123:45"), Err(InvalidReason::BadShape));
    }

    #[test]
    fn test_two_part_range() {
        assert_eq!(validate("60:00"), Err(InvalidReason::OutOfRange));
        assert_eq!(validate("10:60"), Err(InvalidReason::OutOfRange));
    }

    #[test]
    fn test_three_part_range() {
        assert_eq!(validate("25:00:00"), Err(InvalidReason::OutOfRange));
        assert_eq!(validate("24:00:00"), Err(InvalidReason::OutOfRange));
        assert_eq!(validate("01:60:00"), Err(InvalidReason::OutOfRange));
        assert_eq!(validate("01:00:60"), Err(InvalidReason::OutOfRange));
    }

    #[test]
    fn test_too_long_line() {
        let line = format!("{}01:00", " x".repeat(10));
        assert_eq!(validate(&line), Err(InvalidReason::TooLong));
    }

    #[test]
    fn test_length_limit_counts_trimmed_characters() {
        // 20 characters after trimming is still allowed.
        let line = format!("   {}   ", "a".repeat(15) + "12:34");
        assert!(is_valid_time_format(&line));
    }

    #[test]
    fn test_clean_keeps_digits_and_colons() {
        assert_eq!(clean("a1:b2:c3"), "1:2:3");
        assert_eq!(clean("１２:34"), ":34");
    }
}
