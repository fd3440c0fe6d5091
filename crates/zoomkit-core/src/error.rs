//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or interpreting configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration directory not found. Pass a config file path.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }

    /// Stable identifier used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "config_not_found",
            ConfigError::Invalid(_) => "config_invalid",
            ConfigError::ParseError(_) => "config_parse",
        }
    }
}
