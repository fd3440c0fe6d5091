//! Cache-first meeting data service.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::instrument;
use zoomkit_auth::CredentialResolver;
use zoomkit_core::{ApiConfig, Config, ConfigError};

use crate::cache::{self, recordings_key, RequestsCache, UPCOMING_MEETINGS_KEY};
use crate::client::ZoomClient;
use crate::dates::DateRange;
use crate::error::ZoomApiError;
use crate::types::{DateInput, Record};

/// Reads meetings and recordings, consulting the requests cache first.
///
/// The HTTP session is created on the first cache miss and replaced once
/// its token expires.
pub struct MeetingService {
    resolver: CredentialResolver,
    api: ApiConfig,
    cache: Arc<dyn RequestsCache>,
    session: Mutex<Option<Arc<ZoomClient>>>,
}

impl MeetingService {
    pub fn new(resolver: CredentialResolver, api: ApiConfig, cache: Arc<dyn RequestsCache>) -> Self {
        Self {
            resolver,
            api,
            cache,
            session: Mutex::new(None),
        }
    }

    /// Rejects configurations with validation errors before any request.
    pub fn from_config(config: &Config) -> Result<Self, ZoomApiError> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        let resolver = CredentialResolver::from_config(config)?;
        let cache = cache::from_config(config)?;
        Ok(Self::new(resolver, config.api.clone(), cache))
    }

    #[instrument(skip(self), level = "info")]
    pub async fn get_upcoming_meetings(&self, skip_cache: bool) -> Result<Vec<Record>, ZoomApiError> {
        if !skip_cache {
            if let Some(cached) = self.cached(UPCOMING_MEETINGS_KEY) {
                return Ok(cached);
            }
        }

        let items = self.session().await?.upcoming_meetings().await?;
        self.store(UPCOMING_MEETINGS_KEY, &items);
        Ok(items)
    }

    /// Recordings between `from` and `to`, inclusive, most recent month first.
    #[instrument(skip(self, from, to), level = "info")]
    pub async fn get_recordings(
        &self,
        from: impl Into<DateInput>,
        to: impl Into<DateInput>,
        skip_cache: bool,
    ) -> Result<Vec<Record>, ZoomApiError> {
        let range = DateRange::from_inputs(&from.into(), &to.into())?;
        let key = recordings_key(&range);

        if !skip_cache {
            if let Some(cached) = self.cached(&key) {
                return Ok(cached);
            }
        }

        let items = self.session().await?.recordings(&range).await?;
        self.store(&key, &items);
        Ok(items)
    }

    pub fn clear_cache(&self) -> Result<(), ZoomApiError> {
        self.cache.clear()?;
        tracing::info!("Requests cache cleared");
        Ok(())
    }

    fn cached(&self, key: &str) -> Option<Vec<Record>> {
        match self.cache.get(key) {
            Ok(Some(items)) => {
                tracing::debug!(key, count = items.len(), "Cache hit");
                Some(items)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache read failed, fetching from Zoom");
                None
            }
        }
    }

    fn store(&self, key: &str, items: &[Record]) {
        if let Err(e) = self.cache.set(key, items) {
            tracing::warn!(key, error = %e, "Cache write failed");
        }
    }

    async fn session(&self) -> Result<Arc<ZoomClient>, ZoomApiError> {
        let mut session = self.session.lock().await;

        if let Some(client) = session.as_ref() {
            if !client.token().is_expired() {
                return Ok(Arc::clone(client));
            }
            tracing::debug!("Zoom token expired, resolving a new one");
        }

        let token = self.resolver.resolve().await?;
        let client = Arc::new(ZoomClient::new(token, &self.api)?);
        *session = Some(Arc::clone(&client));
        tracing::info!(mode = ?self.resolver.mode(), "Zoom session established");
        Ok(client)
    }
}
