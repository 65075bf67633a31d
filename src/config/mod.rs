//! Configuration module for the BigFix Server Automation client.
//!
//! This module handles all configuration-related functionality:
//! - Parsing and deserializing `bfsa.yaml`
//! - Environment overrides and credentials
//! - Validation of configuration values

mod spec;
mod parser;
mod validator;

pub use spec::{
    ClientConfig, LogFormat, LoggingConfig, QueryConfig, RunConfig, ServerConfig, SiteConfig,
    SiteType, DEFAULT_API_URL, DEFAULT_SA_URL, DEFAULT_SITE_NAME, PLAN_MIME_FIELD,
};
pub use parser::{
    ConfigParser, Credentials, DEFAULT_CONFIG_FILES, PASSWORD_ENV_VAR, USER_ENV_VAR,
    find_config_file,
};
pub use validator::{ConfigValidator, ValidationError, ValidationResult};
