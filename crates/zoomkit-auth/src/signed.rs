//! Locally signed tokens for symmetric-key apps.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use zoomkit_core::AuthConfig;

use crate::error::{AuthError, MISSING_SIGNING_CREDENTIALS};
use crate::token::AccessToken;

/// Lifetime of a signed token.
pub const SIGNED_TOKEN_LIFETIME_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    exp: i64,
}

/// Signs an HS256 token with the API key as issuer. No network call and
/// no scope check.
pub struct SignedTokenResolver {
    api_key: String,
    api_secret: String,
}

impl SignedTokenResolver {
    pub fn new(api_key: &str, api_secret: &str) -> Result<Self, AuthError> {
        if api_key.trim().is_empty() || api_secret.trim().is_empty() {
            return Err(AuthError::Configuration(MISSING_SIGNING_CREDENTIALS));
        }

        Ok(Self {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        })
    }

    pub fn from_config(auth: &AuthConfig) -> Result<Self, AuthError> {
        Self::new(&auth.api_key, &auth.api_secret)
    }

    pub fn resolve(&self) -> Result<AccessToken, AuthError> {
        self.resolve_at(Utc::now())
    }

    fn resolve_at(&self, now: DateTime<Utc>) -> Result<AccessToken, AuthError> {
        let expires_at = now + Duration::seconds(SIGNED_TOKEN_LIFETIME_SECS);
        let claims = Claims {
            iss: self.api_key.clone(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.api_secret.as_bytes()),
        )?;

        tracing::debug!("Signed short-lived Zoom token");
        Ok(AccessToken::new(token, Vec::<String>::new()).with_expiry(expires_at))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn test_signed_token_claims() {
        let resolver = SignedTokenResolver::new("my-key", "my-secret").unwrap();
        let now = Utc::now();
        let token = resolver.resolve_at(now).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&["my-key"]);
        let decoded = decode::<Claims>(
            token.token(),
            &DecodingKey::from_secret(b"my-secret"),
            &validation,
        )
        .unwrap();

        assert_eq!(decoded.claims.iss, "my-key");
        assert_eq!(decoded.claims.exp, now.timestamp() + SIGNED_TOKEN_LIFETIME_SECS);
        assert!(token.scopes().is_empty());
        assert_eq!(
            token.expires_at().map(|t| t.timestamp()),
            Some(now.timestamp() + SIGNED_TOKEN_LIFETIME_SECS)
        );
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let resolver = SignedTokenResolver::new("my-key", "my-secret").unwrap();
        let token = resolver.resolve().unwrap();

        let result = decode::<Claims>(
            token.token(),
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_key_or_secret() {
        assert!(matches!(
            SignedTokenResolver::new("", "secret"),
            Err(AuthError::Configuration(_))
        ));
        assert!(matches!(
            SignedTokenResolver::new("key", ""),
            Err(AuthError::Configuration(_))
        ));
        assert!(matches!(
            SignedTokenResolver::new("key", "  \t"),
            Err(AuthError::Configuration(_))
        ));
    }
}
