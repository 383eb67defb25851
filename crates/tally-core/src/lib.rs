//! Shared building blocks for vidtally.
//!
//! Holds the error taxonomy, processing limits, duration formatting, the
//! localized message catalog and the command-line settings.

pub mod advisory;
pub mod error;
pub mod formatting;
pub mod limits;
pub mod messages;
pub mod settings;
