//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bfsa - BigFix Server Automation plan runner.
///
/// Without a subcommand, fetches the configured plan's template, submits it
/// and logs the created action ID.
#[derive(Parser, Debug)]
#[command(name = "bfsa")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, env = "BFSA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List automation plans and fetch their execution templates.
    Plans,

    /// Fetch a plan execution template.
    Template {
        /// Plan fixlet ID.
        plan_id: u64,

        /// Write the template to this file instead of stdout.
        #[arg(short = 'O', long)]
        out: Option<PathBuf>,
    },

    /// Execute a plan and report the created action ID.
    Run {
        /// Plan fixlet ID (defaults to the configured plan).
        plan_id: Option<u64>,

        /// Submit this completed template instead of the server's template.
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Watch the created action until it is no longer reported.
        #[arg(short, long)]
        watch: bool,
    },

    /// Show the status of a plan action.
    Status {
        /// Plan action ID.
        action_id: String,

        /// Poll until the action is no longer reported.
        #[arg(short, long)]
        watch: bool,

        /// Seconds between polls (defaults to the configured interval).
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,

        /// Maximum number of polls (defaults to the configured limit).
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_polls: Option<u32>,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
