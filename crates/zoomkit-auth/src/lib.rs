//! Credential resolution for the Zoom API.
//!
//! Two strategies produce an [`AccessToken`]:
//! - [`AccountCredentialsResolver`] exchanges an account id and client
//!   credentials for a bearer token (server-to-server OAuth).
//! - [`SignedTokenResolver`] signs a short-lived JWT locally from an API
//!   key/secret pair.
//!
//! [`CredentialResolver`] picks one of them from configuration.

pub mod error;
pub mod oauth;
pub mod resolver;
pub mod signed;
pub mod token;

pub use error::AuthError;
pub use oauth::{AccountCredentialsResolver, REQUIRED_SCOPES};
pub use resolver::CredentialResolver;
pub use signed::SignedTokenResolver;
pub use token::AccessToken;
