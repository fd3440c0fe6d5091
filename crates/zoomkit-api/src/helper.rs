//! Failure-swallowing facade for template and script callers.

use std::error::Error as _;
use std::sync::Arc;

use crate::error::ZoomApiError;
use crate::service::MeetingService;
use crate::types::{DateInput, Record};

/// Turns every failure into `None` plus one `error` log line.
#[derive(Clone)]
pub struct ZoomApiHelper {
    service: Arc<MeetingService>,
}

impl ZoomApiHelper {
    pub fn new(service: Arc<MeetingService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &Arc<MeetingService> {
        &self.service
    }

    pub async fn get_upcoming_meetings(&self, skip_cache: bool) -> Option<Vec<Record>> {
        report(self.service.get_upcoming_meetings(skip_cache).await)
    }

    pub async fn get_recordings(
        &self,
        from: impl Into<DateInput>,
        to: impl Into<DateInput>,
        skip_cache: bool,
    ) -> Option<Vec<Record>> {
        report(self.service.get_recordings(from, to, skip_cache).await)
    }
}

fn report(result: Result<Vec<Record>, ZoomApiError>) -> Option<Vec<Record>> {
    match result {
        Ok(items) => Some(items),
        Err(e) => {
            tracing::error!(
                code = e.code(),
                error = %e,
                trace = %error_chain(&e),
                "Zoom API request failed"
            );
            None
        }
    }
}

fn error_chain(e: &ZoomApiError) -> String {
    let mut chain = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
