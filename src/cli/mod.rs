//! CLI module for the BigFix Server Automation client.
//!
//! This module provides the command-line interface for listing, running and
//! watching automation plans.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
