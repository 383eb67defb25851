//! Duration aggregation pipeline for vidtally.
//!
//! Sanitizes raw text, splits it into numbered lines, validates and parses
//! each line into seconds, and reduces the accepted durations into a
//! [`aggregator::Summary`]. Everything here is pure and synchronous.

pub mod aggregator;
pub mod analysis;
pub mod parser;
pub mod sanitizer;
pub mod splitter;
pub mod validator;

pub use tally_core as core;
