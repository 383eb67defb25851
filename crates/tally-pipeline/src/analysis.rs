//! Top-level calculation driver.
//!
//! Runs sanitize → split → validate → parse → aggregate over one block of user
//! input and returns either a fatal [`TallyError`] or a [`Calculation`] with
//! any advisories collected along the way.

use serde::Serialize;
use tally_core::advisory::Advisory;
use tally_core::error::{Result, TallyError};
use tally_core::limits::LIVE_PREVIEW_LINES;
use tracing::{debug, info};

use crate::aggregator::{DurationAggregator, Summary};
use crate::parser::parse_duration;
use crate::sanitizer::sanitize;
use crate::splitter::{numbered_lines, split_lines, NumberedLine};
use crate::validator::{validate, InvalidReason};

// ── Per-line outcome ──────────────────────────────────────────────────────────

/// Result of validating and parsing a single numbered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineOutcome {
    Valid { line_number: usize, seconds: u32 },
    Invalid { line_number: usize, reason: InvalidReason },
}

impl LineOutcome {
    pub fn line_number(&self) -> usize {
        match self {
            LineOutcome::Valid { line_number, .. } | LineOutcome::Invalid { line_number, .. } => {
                *line_number
            }
        }
    }
}

/// Validate then parse one line.
pub fn evaluate_line(line: &NumberedLine) -> LineOutcome {
    let line_number = line.line_number;
    match validate(&line.content).and_then(|()| parse_duration(&line.content)) {
        Ok(seconds) => LineOutcome::Valid {
            line_number,
            seconds,
        },
        Err(reason) => {
            debug!(line_number, ?reason, "line rejected");
            LineOutcome::Invalid {
                line_number,
                reason,
            }
        }
    }
}

// ── Calculation ───────────────────────────────────────────────────────────────

/// A rejected line reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvalidLine {
    pub line_number: usize,
    pub reason: InvalidReason,
}

/// Successful result of [`calculate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub summary: Summary,
    /// Non-fatal conditions, in the order they were detected.
    pub advisories: Vec<Advisory>,
    /// Lines that were skipped, in input order.
    pub invalid_lines: Vec<InvalidLine>,
}

/// Run the full pipeline over `raw`.
///
/// # Errors
/// * [`TallyError::EmptyInput`] when nothing remains after trimming and
///   sanitizing.
/// * [`TallyError::NoValidData`] when no line yields an accepted duration.
pub fn calculate(raw: &str) -> Result<Calculation> {
    let (input, truncated) = sanitize(raw.trim());
    if input.trim().is_empty() {
        return Err(TallyError::EmptyInput);
    }

    let mut advisories: Vec<Advisory> = truncated.into_iter().collect();

    let (lines, capped) = split_lines(&input);
    if lines.is_empty() {
        return Err(TallyError::NoValidData);
    }
    advisories.extend(capped);

    let mut durations = Vec::with_capacity(lines.len());
    let mut invalid_lines = Vec::new();

    for line in &lines {
        match evaluate_line(line) {
            LineOutcome::Valid { seconds, .. } => durations.push(seconds),
            LineOutcome::Invalid {
                line_number,
                reason,
            } => invalid_lines.push(InvalidLine {
                line_number,
                reason,
            }),
        }
    }

    if durations.is_empty() {
        debug!(rejected = invalid_lines.len(), "no line accepted");
        return Err(TallyError::NoValidData);
    }

    if !invalid_lines.is_empty() {
        advisories.push(Advisory::InvalidLines {
            count: invalid_lines.len(),
        });
    }

    let summary = DurationAggregator::aggregate(&durations)?;

    info!(
        accepted = summary.count,
        rejected = invalid_lines.len(),
        total_seconds = summary.total_seconds,
        "calculation complete"
    );

    Ok(Calculation {
        summary,
        advisories,
        invalid_lines,
    })
}

// ── Live feedback ─────────────────────────────────────────────────────────────

/// Format-only check used while the user is still typing.
///
/// Returns `None` when the input is blank or every non-empty line has a valid
/// format; otherwise an [`Advisory::InvalidLinesPreview`] naming the first
/// [`LIVE_PREVIEW_LINES`] offending line numbers and the total count. Only the
/// format validator runs here; duration bounds are checked on calculate.
pub fn live_feedback(raw: &str) -> Option<Advisory> {
    if raw.trim().is_empty() {
        return None;
    }

    let invalid: Vec<usize> = numbered_lines(raw)
        .filter(|line| validate(&line.content).is_err())
        .map(|line| line.line_number)
        .collect();

    if invalid.is_empty() {
        return None;
    }

    Some(Advisory::InvalidLinesPreview {
        line_numbers: invalid.iter().take(LIVE_PREVIEW_LINES).copied().collect(),
        total: invalid.len(),
    })
}
