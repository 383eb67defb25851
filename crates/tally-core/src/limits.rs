//! Processing limits and timing constants.

use std::time::Duration;

/// Input longer than this many characters is truncated before parsing.
pub const MAX_INPUT_LENGTH: usize = 50_000;

/// Only the first this-many non-empty lines are processed.
pub const MAX_LINES: usize = 1_000;

/// A trimmed line longer than this is rejected outright.
pub const MAX_LINE_LENGTH: usize = 20;

/// Upper bound on a single clamped timestamp component.
pub const MAX_COMPONENT_VALUE: u32 = 3_600;

/// Longest accepted single-video duration (24 hours).
pub const MAX_DURATION_SECS: u32 = 86_400;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: u32 = 60 * SECONDS_PER_MINUTE;

/// Minimum spacing between two accepted calculate requests.
pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(100);

/// Delay between the last keystroke and live validation feedback.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// How long a success notice stays visible in the interactive UI.
pub const SUCCESS_NOTICE_TTL: Duration = Duration::from_millis(2_000);

/// Number of invalid line numbers listed in live feedback before summarising.
pub const LIVE_PREVIEW_LINES: usize = 3;

/// Playback-speed factors for which adjusted totals are computed.
///
/// Stored as `(numerator, denominator)` so that `ceil(total / factor)` can be
/// computed exactly as `ceil(total * denominator / numerator)`.
pub const SPEED_FACTORS: &[(u64, u64)] = &[(3, 2), (2, 1)];
