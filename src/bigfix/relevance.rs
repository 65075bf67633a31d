//! Session relevance for locating automation plans.

use std::fmt;

use crate::config::ClientConfig;

/// Query selecting `(id, name, site name)` of automation plan fixlets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanQuery {
    /// MIME field that marks a fixlet as an automation plan.
    pub mime_field: String,
    /// Substring the site name must contain.
    pub site_filter: String,
    /// Exact plan name, or every plan when `None`.
    pub plan_name: Option<String>,
}

impl PlanQuery {
    /// Builds the query from the configured site and query settings.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            mime_field: config.query.mime_field.clone(),
            site_filter: config.query.effective_site_filter(&config.site).to_string(),
            plan_name: config.query.plan_name.clone(),
        }
    }

    /// Renders the relevance expression.
    #[must_use]
    pub fn to_relevance(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PlanQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(ids of it, names of it, name of site of it) of bes fixlets whose \
             (exists mime field \"{}\" of it AND name of site of it contains \"{}\"",
            self.mime_field, self.site_filter
        )?;
        if let Some(name) = &self.plan_name {
            write!(f, " AND name of it = \"{name}\"")?;
        }
        f.write_str(")")
    }
}
