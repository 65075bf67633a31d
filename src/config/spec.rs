//! Configuration specification types for the client.
//!
//! This module defines the structs that map to the `bfsa.yaml` file. Every
//! section is optional; the defaults point at the sandbox servers and the
//! `APITest` plan.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default BigFix REST API root (query endpoint lives below it).
pub const DEFAULT_API_URL: &str = "https://rootserver:52311/api";

/// Default Server Automation REST root.
pub const DEFAULT_SA_URL: &str = "https://saserver:8443/serverautomation";

/// Default custom site holding the automation plans.
pub const DEFAULT_SITE_NAME: &str = "name custom site";

/// MIME field present on every automation plan fixlet.
pub const PLAN_MIME_FIELD: &str = "plan-fixlet-children";

/// The root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Server endpoints and transport settings.
    pub server: ServerConfig,
    /// Site holding the automation plans.
    pub site: SiteConfig,
    /// Plan listing query settings.
    pub query: QueryConfig,
    /// Defaults for the plan execution entry point.
    pub run: RunConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Server endpoints and transport settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// General BigFix REST API root.
    pub api_url: String,
    /// Server Automation resource root.
    pub sa_url: String,
    /// Verify server TLS certificates.
    pub verify_tls: bool,
    /// Request timeout in seconds (none by default).
    pub timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: String::from(DEFAULT_API_URL),
            sa_url: String::from(DEFAULT_SA_URL),
            verify_tls: false,
            timeout_secs: None,
        }
    }
}

/// Site types accepted in Server Automation resource URLs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    /// The master action site.
    Master,
    /// An external (subscribed content) site.
    External,
    /// An operator site.
    Operator,
    /// A custom site.
    #[default]
    Custom,
}

impl SiteType {
    /// Returns the URL path component for this site type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::External => "external",
            Self::Operator => "operator",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Site holding the automation plans.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Site type.
    #[serde(rename = "type")]
    pub site_type: SiteType,
    /// Site name, e.g. "Server Automation".
    pub name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_type: SiteType::Custom,
            name: String::from(DEFAULT_SITE_NAME),
        }
    }
}

/// Plan listing query settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QueryConfig {
    /// MIME field marking automation plan fixlets.
    pub mime_field: String,
    /// Substring matched against site names (defaults to the site name).
    pub site_filter: Option<String>,
    /// Exact plan name to match; all plans are listed when unset.
    pub plan_name: Option<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            mime_field: String::from(PLAN_MIME_FIELD),
            site_filter: None,
            plan_name: Some(String::from("APITest")),
        }
    }
}

/// Defaults for the plan execution entry point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RunConfig {
    /// Plan fixlet ID executed when no plan is given.
    pub plan_id: u64,
    /// Watch the created action until it is no longer reported.
    pub watch: bool,
    /// Seconds between status polls.
    pub poll_interval_secs: u64,
    /// Maximum number of status polls.
    pub max_polls: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            plan_id: 125_176,
            watch: false,
            poll_interval_secs: 10,
            max_polls: 60,
        }
    }
}

/// Log output formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "bigfix_sa=debug".
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: LogFormat::Text,
        }
    }
}

impl QueryConfig {
    /// Returns the site-name filter, falling back to the configured site.
    #[must_use]
    pub fn effective_site_filter<'a>(&'a self, site: &'a SiteConfig) -> &'a str {
        self.site_filter.as_deref().unwrap_or(&site.name)
    }
}
