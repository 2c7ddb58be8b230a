//! CLI Module Organization
//!
//! - args: CLI argument structures
//! - commands: command execution logic
//! - config_layer: merging defaults, config files, and CLI overrides
//! - output: console summaries and report writing

pub mod args;
pub mod commands;
pub mod config_layer;
pub mod output;

// Re-export commonly used items for convenience
pub use args::*;
pub use commands::*;
