//! Conversion of a validated timestamp line into seconds.

use tally_core::limits::{
    MAX_COMPONENT_VALUE, MAX_DURATION_SECS, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};

use crate::validator::{clean, InvalidReason};

/// Parse one timestamp component. Empty components are zero and every value is
/// clamped to [`MAX_COMPONENT_VALUE`]; a digit run too long for `u64` clamps
/// the same way.
fn parse_component(part: &str) -> u32 {
    if part.is_empty() {
        return 0;
    }
    match part.parse::<u64>() {
        Ok(v) => v.min(u64::from(MAX_COMPONENT_VALUE)) as u32,
        Err(_) => MAX_COMPONENT_VALUE,
    }
}

/// Convert `line` to seconds without any bounds check.
///
/// Intended for lines that already passed
/// [`validate`](crate::validator::validate), but safe on any input: components
/// are clamped and unexpected arities yield `0`.
pub fn parse_seconds(line: &str) -> u32 {
    let cleaned = clean(line.trim());
    let parts: Vec<u32> = cleaned.split(':').map(parse_component).collect();

    match parts.as_slice() {
        [h, m, s] => h * SECONDS_PER_HOUR + m * SECONDS_PER_MINUTE + s,
        [m, s] => m * SECONDS_PER_MINUTE + s,
        _ => 0,
    }
}

/// Convert `line` to seconds and enforce the `(0, 86400]` duration bound.
pub fn parse_duration(line: &str) -> Result<u32, InvalidReason> {
    match parse_seconds(line) {
        0 => Err(InvalidReason::ZeroDuration),
        s if s > MAX_DURATION_SECS => Err(InvalidReason::ExceedsMaximum),
        s => Ok(s),
    }
}
