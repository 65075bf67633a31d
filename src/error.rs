//! Error types for the BigFix Server Automation client.
//!
//! Non-200 responses are not errors here: the client reports them as an
//! absent result. Errors cover configuration problems and failures to talk
//! to the server at all.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the client.
#[derive(Debug, Error)]
pub enum BigFixError {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// BigFix API errors.
    #[error("BigFix API error: {0}")]
    Api(#[from] ApiError),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file was not found.
    #[error("Configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// The configuration file could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Optional source location.
        location: Option<String>,
    },

    /// Validation failed.
    #[error("Configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation error.
        message: String,
        /// Field that failed validation.
        field: Option<String>,
    },

    /// Environment variable is missing.
    #[error("Missing environment variable: {name}")]
    MissingEnvVar {
        /// Name of the missing variable.
        name: String,
    },

    /// A base URL cannot be used to build resource URLs.
    #[error("Invalid base URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL.
        url: String,
        /// Why it was rejected.
        message: String,
    },
}

/// BigFix API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network error (DNS, connect, TLS, timeout).
    #[error("Network error communicating with BigFix: {message}")]
    NetworkError {
        /// Description of the network error.
        message: String,
    },

    /// Invalid response from the API.
    #[error("Invalid response from BigFix API: {message}")]
    InvalidResponse {
        /// Description of the response issue.
        message: String,
    },

    /// The server returned no execution template for a plan.
    #[error("No execution template returned for plan {plan_id}")]
    TemplateUnavailable {
        /// Plan fixlet ID.
        plan_id: u64,
    },

    /// An action was still reporting status after the polling budget ran out.
    #[error("Action {action_id} still running after {polls} status polls")]
    Timeout {
        /// ID of the plan action.
        action_id: String,
        /// Number of polls made.
        polls: u32,
    },
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, BigFixError>;

impl BigFixError {
    /// Creates a new internal error with the given message.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl ConfigError {
    /// Creates a validation error for a specific field.
    #[must_use]
    pub fn validation(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Creates an invalid URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            message: message.into(),
        }
    }
}

impl ApiError {
    /// Creates a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates an invalid response error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}
