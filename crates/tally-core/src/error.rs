use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by vidtally.
///
/// `EmptyInput` and `NoValidData` abort a calculation. Everything that can be
/// tolerated while still producing a summary is an
/// advisory instead and never appears here.
#[derive(Error, Debug)]
pub enum TallyError {
    /// Nothing was entered.
    #[error("No input: please enter video durations")]
    EmptyInput,

    /// Input was present but no line produced an accepted duration.
    #[error("No valid duration data found")]
    NoValidData,

    /// There is no computed result to copy.
    #[error("No result available to copy")]
    NothingToCopy,

    /// Every clipboard mechanism failed.
    #[error("Clipboard copy failed: {0}")]
    Clipboard(String),

    /// An input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A summary could not be serialized.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TallyError {
    /// Whether this error aborts a calculation (as opposed to a side-effect
    /// failure such as a clipboard error).
    pub fn is_calculation_failure(&self) -> bool {
        matches!(self, TallyError::EmptyInput | TallyError::NoValidData)
    }
}

/// Convenience alias used throughout the tally crates.
pub type Result<T> = std::result::Result<T, TallyError>;
