//! Configuration validation.
//!
//! Catches values that would otherwise only fail at request time: base URLs
//! that cannot carry resource paths, and relevance literals that would break
//! out of their string quotes.

use crate::error::{BigFixError, ConfigError, Result};
use reqwest::Url;
use tracing::debug;

use super::spec::ClientConfig;

/// Validator for client configurations.
#[derive(Debug, Default)]
pub struct ConfigValidator;

/// Validation result containing all errors found.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of warnings (non-fatal issues).
    pub warnings: Vec<String>,
}

/// A single validation error.
#[derive(Debug)]
pub struct ValidationError {
    /// The field path that failed validation.
    pub field: String,
    /// The error message.
    pub message: String,
}

impl ConfigValidator {
    /// Creates a new validator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Validates a client configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error if any check fails.
    pub fn validate(&self, config: &ClientConfig) -> Result<ValidationResult> {
        let mut result = ValidationResult::default();

        Self::validate_url("server.api_url", &config.server.api_url, &mut result);
        Self::validate_url("server.sa_url", &config.server.sa_url, &mut result);
        Self::validate_site(config, &mut result);
        Self::validate_query(config, &mut result);
        Self::validate_run(config, &mut result);

        if config.server.verify_tls {
            debug!("TLS certificate verification enabled");
        } else {
            result
                .warnings
                .push(String::from("TLS certificate verification is disabled"));
        }

        if result.errors.is_empty() {
            debug!("Configuration validation passed");
            Ok(result)
        } else {
            let first_error = &result.errors[0];
            Err(BigFixError::Config(ConfigError::validation(
                first_error.message.clone(),
                first_error.field.clone(),
            )))
        }
    }

    fn validate_url(field: &str, value: &str, result: &mut ValidationResult) {
        match Url::parse(value) {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                result.errors.push(ValidationError {
                    field: field.to_string(),
                    message: format!("URL '{value}' must use http or https"),
                });
            }
            Ok(_) => {}
            Err(e) => result.errors.push(ValidationError {
                field: field.to_string(),
                message: format!("URL '{value}' is invalid: {e}"),
            }),
        }
    }

    fn validate_site(config: &ClientConfig, result: &mut ValidationResult) {
        if config.site.name.trim().is_empty() {
            result.errors.push(ValidationError {
                field: String::from("site.name"),
                message: String::from("Site name cannot be empty"),
            });
        }
    }

    /// Relevance string literals have no escape for `"`.
    fn validate_query(config: &ClientConfig, result: &mut ValidationResult) {
        let literals = [
            ("query.mime_field", Some(config.query.mime_field.as_str())),
            (
                "query.site_filter",
                Some(config.query.effective_site_filter(&config.site)),
            ),
            ("query.plan_name", config.query.plan_name.as_deref()),
        ];

        for (field, value) in literals {
            if let Some(value) = value {
                if value.contains('"') {
                    result.errors.push(ValidationError {
                        field: field.to_string(),
                        message: format!("'{value}' cannot contain a double quote"),
                    });
                }
            }
        }

        if config.query.mime_field.is_empty() {
            result.errors.push(ValidationError {
                field: String::from("query.mime_field"),
                message: String::from("MIME field cannot be empty"),
            });
        }

        if config.query.plan_name.is_none() {
            result
                .warnings
                .push(String::from("No plan name set, all plans in matching sites are listed"));
        }
    }

    fn validate_run(config: &ClientConfig, result: &mut ValidationResult) {
        if config.run.poll_interval_secs == 0 {
            result.errors.push(ValidationError {
                field: String::from("run.poll_interval_secs"),
                message: String::from("Poll interval must be at least 1 second"),
            });
        }

        if config.run.max_polls == 0 {
            result.errors.push(ValidationError {
                field: String::from("run.max_polls"),
                message: String::from("Max polls must be at least 1"),
            });
        }
    }
}

impl ValidationResult {
    /// Returns true if no errors were found.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}
