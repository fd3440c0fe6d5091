//! Meeting data error types.

use thiserror::Error;
use zoomkit_auth::AuthError;
use zoomkit_core::ConfigError;

/// Errors surfaced by the meeting data client.
#[derive(Error, Debug)]
pub enum ZoomApiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The upstream answered with something other than a usable page.
    #[error("Could not fetch `{key}`: {reason}")]
    UpstreamData {
        key: String,
        status: Option<u16>,
        reason: String,
        /// Items aggregated before the failing page.
        gathered: usize,
        /// Truncated JSON of the items aggregated so far.
        snapshot: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl ZoomApiError {
    /// User-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(e) => e.user_message().to_string(),
            Self::Auth(e) => e.user_message(),
            Self::InvalidArgument(msg) => format!("Invalid request: {}", msg),
            Self::UpstreamData { .. } => "Zoom returned unexpected data. Please try again.".to_string(),
            Self::Network(_) => "Network error. Check your connection.".to_string(),
            Self::Cache(_) => "Local cache error".to_string(),
        }
    }

    /// Stable identifier used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.code(),
            Self::Auth(e) => e.code(),
            Self::InvalidArgument(_) => "invalid_argument",
            Self::UpstreamData { .. } => "upstream_data",
            Self::Network(_) => "network",
            Self::Cache(e) => e.code(),
        }
    }
}

/// Requests cache failures. Never fatal to a fetch.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache write failed for `{key}`: {reason}")]
    Write { key: String, reason: String },

    #[error("Cache read failed for `{key}`: {reason}")]
    Read { key: String, reason: String },

    #[error("Cache storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CacheError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Write { .. } => "cache_write",
            Self::Read { .. } => "cache_read",
            Self::Storage(_) => "cache_storage",
            Self::Serialization(_) => "cache_serialization",
            Self::Io(_) => "cache_io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_names_key() {
        let err = ZoomApiError::UpstreamData {
            key: "meetings".into(),
            status: Some(500),
            reason: "unexpected HTTP status 500".into(),
            gathered: 0,
            snapshot: "[]".into(),
        };
        assert!(err.to_string().contains("meetings"));
        assert!(err.to_string().contains("500"));
        assert_eq!(err.code(), "upstream_data");
    }

    #[test]
    fn test_auth_code_passthrough() {
        let err: ZoomApiError = AuthError::Authentication { status: 401 }.into();
        assert_eq!(err.code(), "auth_rejected");
        assert!(err.user_message().contains("rejected"));
    }
}
