use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Prefix for environment overrides, e.g. `ZOOMKIT_AUTH__CLIENT_ID`.
pub const ENV_PREFIX: &str = "ZOOMKIT";

/// Largest page size the upstream API honours.
pub const MAX_PAGE_SIZE: u32 = 300;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// How the client obtains its bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    /// Server-to-server OAuth: account id + client id/secret exchanged for a token.
    #[default]
    AccountCredentials,
    /// Legacy symmetric-key apps: a short-lived JWT signed locally.
    SignedToken,
}

/// Credential settings. Only the fields of the selected `mode` are read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub mode: AuthMode,
    pub account_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub api_key: String,
    pub api_secret: String,
}

fn is_set(value: &str) -> bool {
    !value.trim().is_empty()
}

impl AuthConfig {
    /// Check if every credential the selected mode needs is present.
    pub fn is_configured(&self) -> bool {
        match self.mode {
            AuthMode::AccountCredentials => {
                is_set(&self.account_id) && is_set(&self.client_id) && is_set(&self.client_secret)
            }
            AuthMode::SignedToken => is_set(&self.api_key) && is_set(&self.api_secret),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the data endpoints.
    pub base_url: String,

    /// Host serving `oauth/token`.
    pub oauth_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Items requested per page.
    pub page_size: u32,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.zoom.us/v2".to_string(),
            oauth_url: "https://zoom.us".to_string(),
            timeout_secs: 30,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Sqlite,
    Disabled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub backend: CacheBackend,

    /// SQLite file; defaults to `<config_dir>/requests_cache.db`.
    pub path: Option<PathBuf>,

    /// Entry lifetime in seconds. Unset means entries never expire.
    pub lifetime_secs: Option<u64>,
}

impl CacheConfig {
    pub fn lifetime(&self) -> Option<Duration> {
        self.lifetime_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    #[serde(default = "default_config_dir")]
    pub config_dir: PathBuf,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("zoomkit")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            auth: AuthConfig::default(),
            api: ApiConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, layered with `ZOOMKIT_*` environment
    /// overrides. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        Self::load_layered(path, Self::environment())
    }

    /// Validate the configuration, logging warnings.
    ///
    /// Returns the config along with its validation result, or
    /// [`ConfigError::Invalid`] if validation found errors.
    pub fn into_validated(self) -> Result<(Self, ValidationResult), ConfigError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((self, validation))
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    fn load_layered(path: &Path, environment: config::Environment) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path.to_path_buf())
                    .format(config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(environment)
            .build()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        tracing::debug!(path = %path.display(), mode = ?config.auth.mode, "Loaded configuration");
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.api.base_url, "api.base_url", &mut result);
        self.validate_url(&self.api.oauth_url, "api.oauth_url", &mut result);

        if self.api.timeout_secs == 0 {
            result.add_error("api.timeout_secs", "Timeout must be greater than 0");
        }

        if self.api.page_size == 0 {
            result.add_error("api.page_size", "Page size must be greater than 0");
        } else if self.api.page_size > MAX_PAGE_SIZE {
            result.add_warning(
                "api.page_size",
                format!("Page size above {} is capped by the API", MAX_PAGE_SIZE),
            );
        }

        if let Some(0) = self.cache.lifetime_secs {
            result.add_warning("cache.lifetime_secs", "Cache lifetime of 0 disables caching");
        }

        if !self.auth.is_configured() {
            result.add_warning(
                "auth",
                "Credentials for the selected auth mode are not configured",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// SQLite cache location, falling back to the config directory.
    pub fn cache_path(&self) -> PathBuf {
        self.cache
            .path
            .clone()
            .unwrap_or_else(|| self.config_dir.join("requests_cache.db"))
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound("config directory".to_string()))?
            .join("zoomkit");

        Ok(config_dir.join("config.toml"))
    }
}
