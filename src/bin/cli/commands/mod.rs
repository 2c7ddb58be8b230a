//! CLI Command Implementations
//!
//! - analyze: clustering and template extraction
//! - config: configuration management commands

pub mod analyze;
pub mod config;

pub use analyze::analyze_command;
pub use config::{init_config, print_default_config, validate_config};
