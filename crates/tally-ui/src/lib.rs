//! Terminal UI layer for vidtally.
//!
//! Provides themes, the multi-line duration editor, header, results and help
//! components, and the interactive event loop built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod editor;
pub mod themes;

pub use tally_core as core;
