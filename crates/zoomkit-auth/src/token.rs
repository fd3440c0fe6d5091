//! Resolved bearer token.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// Tokens this close to expiry are treated as expired.
const EXPIRY_BUFFER_SECS: i64 = 10;

/// Short-lived bearer token plus the scopes it was granted.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    scopes: BTreeSet<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new<I, S>(token: impl Into<String>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            token: token.into(),
            scopes: scopes.into_iter().map(Into::into).collect(),
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// The opaque bearer value.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn scopes(&self) -> &BTreeSet<String> {
        &self.scopes
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.contains(scope)
    }

    /// Tokens without a known expiry never expire.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires| expires <= Utc::now() + Duration::seconds(EXPIRY_BUFFER_SECS))
            .unwrap_or(false)
    }

    /// Value for the `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[redacted]")
            .field("scopes", &self.scopes)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
