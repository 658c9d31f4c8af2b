//! migration-showcase - scripted legacy-to-modern migration walkthrough (TUI)
//!
//! Core library providing the demo script, step navigation, the
//! directional typewriter revealer and the terminal UI that ties them
//! together.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
