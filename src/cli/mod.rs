//! CLI module for matheal
//!
//! Command handlers print results to stdout; progress goes through
//! `tracing` to stderr.

mod commands;
mod logging;

pub use commands::run_command;
pub use logging::{init_tracing, LogLevel};

// Re-export Cli from config for convenience
pub use crate::config::Cli;
