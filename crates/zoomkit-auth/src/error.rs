//! Authentication error types.

use thiserror::Error;

pub(crate) const MISSING_ACCOUNT_CREDENTIALS: &str =
    "please set account id, client id and secret";
pub(crate) const MISSING_SIGNING_CREDENTIALS: &str = "please set api key and api secret";

#[derive(Error, Debug)]
pub enum AuthError {
    /// Credential fields are missing from configuration.
    #[error("Credentials not configured: {0}")]
    Configuration(&'static str),

    /// The identity endpoint rejected the credential exchange.
    #[error("Could not fetch access token (HTTP {status}); check account id, client id and client secret")]
    Authentication { status: u16 },

    /// The granted token lacks capabilities the client needs.
    #[error("Access token is missing scopes {missing:?}; the app needs: {required}")]
    Scope {
        missing: Vec<String>,
        required: String,
    },

    #[error("Invalid token response: {0}")]
    InvalidResponse(String),

    #[error("Could not sign access token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl AuthError {
    /// User-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Configuration(msg) => format!("Zoom credentials missing: {}", msg),
            Self::Authentication { .. } => {
                "Zoom rejected the credentials. Check the app settings.".to_string()
            }
            Self::Scope { required, .. } => {
                format!("The Zoom app needs the following scopes: {}", required)
            }
            Self::InvalidResponse(_) => "Zoom returned an unexpected token response.".to_string(),
            Self::Signing(_) => "Could not create a Zoom access token.".to_string(),
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Stable identifier used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "auth_configuration",
            Self::Authentication { .. } => "auth_rejected",
            Self::Scope { .. } => "auth_scope",
            Self::InvalidResponse(_) => "auth_invalid_response",
            Self::Signing(_) => "auth_signing",
            Self::Network(_) => "auth_network",
        }
    }
}
