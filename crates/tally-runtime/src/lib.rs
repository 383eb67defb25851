//! Runtime layer for vidtally.
//!
//! Owns the small amount of state that survives between user actions: the
//! calculate rate limiter, the live-validation debouncer, the calculator state
//! machine and clipboard access.

pub mod calculator;
pub mod clipboard;
pub mod debouncer;
pub mod rate_limiter;

pub use tally_core as core;
pub use tally_pipeline as pipeline;
