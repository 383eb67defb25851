//! Input sanitation applied before any line is parsed.

use tally_core::advisory::Advisory;
use tally_core::limits::MAX_INPUT_LENGTH;
use tracing::debug;

/// Characters removed from user input. Output is always rendered as plain
/// text; stripping them keeps crafted input inert in any other consumer.
const STRIPPED_CHARS: &[char] = &['<', '>', '"', '\'', '&'];

/// Truncate `raw` to [`MAX_INPUT_LENGTH`] characters and strip markup-significant
/// characters.
///
/// Returns the cleaned text and an [`Advisory::InputTruncated`] when the input
/// had to be cut.
pub fn sanitize(raw: &str) -> (String, Option<Advisory>) {
    sanitize_with_limit(raw, MAX_INPUT_LENGTH)
}

/// [`sanitize`] with an explicit character limit.
pub fn sanitize_with_limit(raw: &str, limit: usize) -> (String, Option<Advisory>) {
    // Length is measured in characters so multi-byte input is never split
    // mid-codepoint.
    let (kept, advisory) = match raw.char_indices().nth(limit) {
        Some((byte_idx, _)) => {
            debug!(limit, "input truncated");
            (&raw[..byte_idx], Some(Advisory::InputTruncated { limit }))
        }
        None => (raw, None),
    };

    let cleaned: String = kept.chars().filter(|c| !STRIPPED_CHARS.contains(c)).collect();
    (cleaned, advisory)
}
