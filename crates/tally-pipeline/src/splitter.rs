//! Line splitting with stable, 1-based line numbers.

use tally_core::advisory::Advisory;
use tally_core::limits::MAX_LINES;
use tracing::debug;

/// One non-empty input line together with its position in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedLine {
    /// 1-based physical line number in the input (blank lines count).
    pub line_number: usize,
    /// Line content, untrimmed.
    pub content: String,
}

/// Iterate over the non-empty lines of `text`, keeping their original 1-based
/// line numbers. No cap is applied.
pub fn numbered_lines(text: &str) -> impl Iterator<Item = NumberedLine> + '_ {
    text.split('\n')
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| NumberedLine {
            line_number: idx + 1,
            content: line.to_string(),
        })
}

/// Split `text` into at most [`MAX_LINES`] non-empty numbered lines.
///
/// Returns [`Advisory::LineCapExceeded`] exactly when more than
/// [`MAX_LINES`] non-empty lines were present.
pub fn split_lines(text: &str) -> (Vec<NumberedLine>, Option<Advisory>) {
    split_lines_with_cap(text, MAX_LINES)
}

/// [`split_lines`] with an explicit cap.
pub fn split_lines_with_cap(text: &str, cap: usize) -> (Vec<NumberedLine>, Option<Advisory>) {
    let mut lines: Vec<NumberedLine> = numbered_lines(text).collect();

    if lines.len() > cap {
        debug!(total = lines.len(), cap, "line cap applied");
        lines.truncate(cap);
        return (lines, Some(Advisory::LineCapExceeded { limit: cap }));
    }

    (lines, None)
}
