//! Zoom REST API client bound to one bearer token.

use std::collections::HashSet;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::instrument;
use zoomkit_auth::{AccessToken, AuthError};
use zoomkit_core::ApiConfig;

use crate::dates::DateRange;
use crate::error::ZoomApiError;
use crate::types::Record;

/// Longest snapshot of gathered items attached to an upstream error.
const SNAPSHOT_LIMIT: usize = 512;

const MEETINGS_KEY: &str = "meetings";

/// HTTP session against the data host. Created once a token is resolved.
pub struct ZoomClient {
    client: reqwest::Client,
    base_url: String,
    page_size: u32,
    token: AccessToken,
}

impl ZoomClient {
    pub fn new(token: AccessToken, api: &ApiConfig) -> Result<Self, ZoomApiError> {
        let mut bearer = HeaderValue::from_str(&token.bearer_header()).map_err(|_| {
            AuthError::InvalidResponse("access token is not a valid header value".to_string())
        })?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(api.timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            page_size: api.page_size,
            token,
        })
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }

    /// Upcoming meetings of the account owner.
    #[instrument(skip(self), level = "info")]
    pub async fn upcoming_meetings(&self) -> Result<Vec<Record>, ZoomApiError> {
        self.fetch_all("users/me/meetings", &[("type", "upcoming".to_string())], MEETINGS_KEY)
            .await
    }

    /// Cloud recordings, one paged sequence per month-sized chunk.
    #[instrument(skip(self), level = "info")]
    pub async fn recordings(&self, range: &DateRange) -> Result<Vec<Record>, ZoomApiError> {
        let mut items = Vec::new();

        for chunk in range.chunks() {
            tracing::debug!(from = %chunk.from, to = %chunk.to, "Fetching recordings chunk");
            let page_items = self
                .fetch_all(
                    "users/me/recordings",
                    &[("from", chunk.from_param()), ("to", chunk.to_param())],
                    MEETINGS_KEY,
                )
                .await?;
            items.extend(page_items);
        }

        Ok(items)
    }

    /// Follow `next_page_token` until it comes back empty, concatenating the
    /// array under `items_key` from every page.
    pub async fn fetch_all(
        &self,
        path: &str,
        query: &[(&str, String)],
        items_key: &str,
    ) -> Result<Vec<Record>, ZoomApiError> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let page_size = self.page_size.to_string();
        let mut items: Vec<Record> = Vec::new();
        let mut seen_tokens = HashSet::new();
        let mut next_page_token = String::new();

        loop {
            let response = self
                .client
                .get(&url)
                .query(query)
                .query(&[
                    ("next_page_token", next_page_token.as_str()),
                    ("page_size", page_size.as_str()),
                ])
                .send()
                .await?;

            let status = response.status();
            if status != StatusCode::OK {
                return Err(upstream_error(
                    items_key,
                    Some(status.as_u16()),
                    format!("unexpected HTTP status {}", status.as_u16()),
                    &items,
                ));
            }

            let body = response.text().await?;
            let mut page = parse_page(&body, items_key)
                .map_err(|reason| upstream_error(items_key, Some(status.as_u16()), reason, &items))?;

            let page_items = match page.get_mut(items_key).map(Value::take) {
                Some(Value::Array(page_items)) => page_items,
                _ => {
                    return Err(upstream_error(
                        items_key,
                        Some(status.as_u16()),
                        format!("`{}` is not an array", items_key),
                        &items,
                    ))
                }
            };
            items.extend(page_items);

            next_page_token = page
                .get("next_page_token")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            if next_page_token.is_empty() {
                break;
            }

            if !seen_tokens.insert(next_page_token.clone()) {
                tracing::warn!(
                    path,
                    token = %next_page_token,
                    "Upstream repeated a page token, stopping pagination"
                );
                break;
            }
        }

        tracing::debug!(path, count = items.len(), "Fetched all pages");
        Ok(items)
    }
}

fn parse_page(body: &str, items_key: &str) -> Result<Value, String> {
    if body.trim().is_empty() {
        return Err("empty response body".to_string());
    }

    let page: Value =
        serde_json::from_str(body).map_err(|e| format!("response is not valid JSON: {}", e))?;

    if !page.is_object() {
        return Err("response is not a JSON object".to_string());
    }
    if page.get(items_key).is_none() {
        return Err(format!("response has no `{}` field", items_key));
    }

    Ok(page)
}

fn upstream_error(
    key: &str,
    status: Option<u16>,
    reason: String,
    gathered: &[Record],
) -> ZoomApiError {
    let snapshot: String = serde_json::to_string(gathered)
        .unwrap_or_default()
        .chars()
        .take(SNAPSHOT_LIMIT)
        .collect();

    ZoomApiError::UpstreamData {
        key: key.to_string(),
        status,
        reason,
        gathered: gathered.len(),
        snapshot,
    }
}
