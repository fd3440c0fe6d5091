//! Configuration-selected credential strategy.

use zoomkit_core::{AuthMode, Config};

use crate::error::AuthError;
use crate::oauth::AccountCredentialsResolver;
use crate::signed::SignedTokenResolver;
use crate::token::AccessToken;

/// Credential strategy chosen by `auth.mode`.
pub enum CredentialResolver {
    AccountCredentials(AccountCredentialsResolver),
    SignedToken(SignedTokenResolver),
}

impl CredentialResolver {
    /// Build the resolver for the configured mode.
    ///
    /// Missing credential fields surface here as [`AuthError::Configuration`].
    pub fn from_config(config: &Config) -> Result<Self, AuthError> {
        match config.auth.mode {
            AuthMode::AccountCredentials => Ok(Self::AccountCredentials(
                AccountCredentialsResolver::from_config(&config.auth, &config.api)?,
            )),
            AuthMode::SignedToken => Ok(Self::SignedToken(SignedTokenResolver::from_config(
                &config.auth,
            )?)),
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            Self::AccountCredentials(_) => AuthMode::AccountCredentials,
            Self::SignedToken(_) => AuthMode::SignedToken,
        }
    }

    pub async fn resolve(&self) -> Result<AccessToken, AuthError> {
        match self {
            Self::AccountCredentials(resolver) => resolver.resolve().await,
            Self::SignedToken(resolver) => resolver.resolve(),
        }
    }
}

impl From<AccountCredentialsResolver> for CredentialResolver {
    fn from(resolver: AccountCredentialsResolver) -> Self {
        Self::AccountCredentials(resolver)
    }
}

impl From<SignedTokenResolver> for CredentialResolver {
    fn from(resolver: SignedTokenResolver) -> Self {
        Self::SignedToken(resolver)
    }
}
