use serde::Serialize;

/// A non-fatal condition reported alongside a computed summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// Input exceeded the character cap and was cut to `limit` characters.
    InputTruncated { limit: usize },
    /// More non-empty lines than `limit` were supplied; the rest were dropped.
    LineCapExceeded { limit: usize },
    /// `count` lines were skipped during a calculation.
    InvalidLines { count: usize },
    /// Live-typing feedback: the first few offending line numbers plus the
    /// total number of offending lines.
    InvalidLinesPreview {
        line_numbers: Vec<usize>,
        total: usize,
    },
}
