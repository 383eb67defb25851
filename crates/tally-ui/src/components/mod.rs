//! Stateless render helpers composed by [`crate::app::App`].

pub mod header;
pub mod help;
pub mod results;
pub mod status;
