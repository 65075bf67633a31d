//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! information to the user in various formats.

use colored::Colorize;
use serde::Serialize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::bigfix::{ListedPlan, WatchOutcome};

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Plan row for table display.
#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "Template")]
    template: String,
}

/// Submitted action, for JSON output.
#[derive(Serialize)]
struct ActionJson<'a> {
    plan_id: u64,
    action_id: Option<&'a str>,
}

/// Action status, for JSON output.
#[derive(Serialize)]
struct StatusJson<'a> {
    action_id: &'a str,
    reported: bool,
    status: Option<&'a str>,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a plan listing.
    #[must_use]
    pub fn format_plans(&self, plans: &[ListedPlan]) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(plans).unwrap_or_default(),
            OutputFormat::Text => Self::format_plans_text(plans),
        }
    }

    fn format_plans_text(plans: &[ListedPlan]) -> String {
        if plans.is_empty() {
            return format!("{} No automation plans found.\n", "!".yellow());
        }

        let rows: Vec<PlanRow> = plans
            .iter()
            .map(|listed| PlanRow {
                id: listed.plan.id,
                name: listed.plan.name.clone(),
                site: listed.plan.site.clone(),
                template: if listed.template.is_some() {
                    "✓".green().to_string()
                } else {
                    "✗".red().to_string()
                },
            })
            .collect();

        let mut output = String::new();
        let _ = writeln!(output, "{}", "Automation plans".bold());
        let _ = writeln!(output, "{}", Table::new(rows));
        let _ = writeln!(output, "{} plan(s)", plans.len());
        output
    }

    /// Formats the result of submitting a plan.
    #[must_use]
    pub fn format_action(&self, plan_id: u64, action_id: Option<&str>) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&ActionJson { plan_id, action_id }).unwrap_or_default()
            }
            OutputFormat::Text => match action_id {
                Some(id) => format!("{} Action ID: {}", "✓".green(), id.bold()),
                None => format!("{} Plan {plan_id} was not executed", "✗".red()),
            },
        }
    }

    /// Formats a single action status response.
    #[must_use]
    pub fn format_status(&self, action_id: &str, status: Option<&str>) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&StatusJson {
                action_id,
                reported: status.is_some(),
                status,
            })
            .unwrap_or_default(),
            OutputFormat::Text => status.map_or_else(
                || {
                    format!(
                        "{} Action {action_id} is not reported (completed, stopped or expired)",
                        "!".yellow()
                    )
                },
                str::to_string,
            ),
        }
    }

    /// Formats the outcome of watching an action.
    #[must_use]
    pub fn format_watch(&self, outcome: &WatchOutcome) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(outcome).unwrap_or_default(),
            OutputFormat::Text => {
                let mut output = format!(
                    "{} Action {} finished after {} poll(s)\n",
                    "✓".green(),
                    outcome.action_id.bold(),
                    outcome.polls
                );
                if let Some(status) = &outcome.last_status {
                    let _ = writeln!(output, "\nLast reported status:\n{status}");
                }
                output
            }
        }
    }
}
