//! Configuration parser for loading configuration files and credentials.
//!
//! Configuration comes from a YAML file (optional), then environment
//! overrides. Credentials only ever come from the environment.

use crate::error::{BigFixError, ConfigError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::spec::ClientConfig;

/// Environment variable holding the BigFix user name.
pub const USER_ENV_VAR: &str = "bf_user";

/// Environment variable holding the BigFix password.
pub const PASSWORD_ENV_VAR: &str = "bf_pass";

/// Basic-auth credentials for both BigFix endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Creates credentials from a user name and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reads credentials from `bf_user` and `bf_pass`.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is not set.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads credentials through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if either variable is missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &str| {
            lookup(name).ok_or_else(|| {
                BigFixError::Config(ConfigError::MissingEnvVar {
                    name: name.to_string(),
                })
            })
        };

        Ok(Self::new(require(USER_ENV_VAR)?, require(PASSWORD_ENV_VAR)?))
    }
}

/// Configuration parser for loading client configuration.
#[derive(Debug, Default)]
pub struct ConfigParser {
    /// Base path for resolving relative paths.
    base_path: Option<PathBuf>,
}

impl ConfigParser {
    /// Creates a new configuration parser.
    #[must_use]
    pub const fn new() -> Self {
        Self { base_path: None }
    }

    /// Sets the base path used to locate the `.env` file.
    #[must_use]
    pub fn with_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<ClientConfig> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        if !path.exists() {
            return Err(BigFixError::Config(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            BigFixError::Config(ConfigError::ParseError {
                message: format!("Failed to read file: {e}"),
                location: Some(path.display().to_string()),
            })
        })?;

        self.parse_yaml(&content, Some(path))
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid.
    pub fn parse_yaml(&self, content: &str, source: Option<&Path>) -> Result<ClientConfig> {
        debug!("Parsing YAML configuration");

        // An empty file deserializes to unit, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(ClientConfig::default());
        }

        let config: ClientConfig = serde_yaml::from_str(content).map_err(|e| {
            let location = source.map(|p| p.display().to_string());
            BigFixError::Config(ConfigError::ParseError {
                message: format!("YAML parse error: {e}"),
                location,
            })
        })?;

        debug!("Parsed configuration for site: {}", config.site.name);
        Ok(config)
    }

    /// Loads the configuration file if one is given, otherwise the defaults,
    /// then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an override
    /// is malformed.
    pub fn load_with_env(&self, path: Option<&Path>) -> Result<ClientConfig> {
        let mut config = match path {
            Some(path) => self.load_file(path)?,
            None => {
                debug!("No configuration file, using built-in defaults");
                ClientConfig::default()
            }
        };

        Self::apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

        Ok(config)
    }

    /// Applies `BFSA_*` environment overrides to the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `BFSA_PLAN_ID` is not a number.
    pub fn apply_env_overrides(
        config: &mut ClientConfig,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(url) = lookup("BFSA_API_URL") {
            debug!("Overriding server.api_url from environment");
            config.server.api_url = url;
        }

        if let Some(url) = lookup("BFSA_SA_URL") {
            debug!("Overriding server.sa_url from environment");
            config.server.sa_url = url;
        }

        if let Some(site) = lookup("BFSA_SITE_NAME") {
            debug!("Overriding site.name from environment");
            config.site.name = site;
        }

        if let Some(plan_id) = lookup("BFSA_PLAN_ID") {
            debug!("Overriding run.plan_id from environment");
            config.run.plan_id = plan_id.trim().parse().map_err(|e| {
                BigFixError::Config(ConfigError::ParseError {
                    message: format!("BFSA_PLAN_ID is not a plan ID: {e}"),
                    location: None,
                })
            })?;
        }

        Ok(())
    }

    /// Loads the .env file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the .env file exists but cannot be loaded.
    pub fn load_dotenv(&self) -> Result<()> {
        let env_path = self
            .base_path
            .as_ref()
            .map_or_else(|| PathBuf::from(".env"), |p| p.join(".env"));

        if env_path.exists() {
            info!("Loading environment from: {}", env_path.display());
            dotenvy::from_path(&env_path).map_err(|e| {
                BigFixError::Config(ConfigError::ParseError {
                    message: format!("Failed to load .env file: {e}"),
                    location: Some(env_path.display().to_string()),
                })
            })?;
        } else {
            debug!(".env file not found at: {}", env_path.display());
        }

        Ok(())
    }
}

/// Default configuration file names to search for.
pub const DEFAULT_CONFIG_FILES: &[&str] = &["bfsa.yaml", "bfsa.yml", "bigfix.yaml"];

/// Finds a configuration file in the given directory or its parents.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    let mut current = start_dir.as_ref().to_path_buf();

    loop {
        for filename in DEFAULT_CONFIG_FILES {
            let config_path = current.join(filename);
            if config_path.exists() {
                info!("Found configuration file: {}", config_path.display());
                return Some(config_path);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
