//! BigFix API integration module.
//!
//! This module provides the client for the general BigFix REST query API and
//! the Server Automation plan and plan action resources.

mod client;
mod relevance;
mod types;
mod watcher;

pub use client::BigFixClient;
pub use relevance::PlanQuery;
pub use types::{ListedPlan, PlanReference, WatchOutcome};
pub use watcher::ActionWatcher;
