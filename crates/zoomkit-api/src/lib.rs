//! Zoom meeting data client.
//!
//! [`MeetingService`] serves upcoming meetings and cloud recordings from the
//! requests cache when it can and from the Zoom REST API when it must,
//! following pagination and splitting recording ranges into month-sized
//! chunks. [`ZoomApiHelper`] wraps it for callers that want `None` instead
//! of errors.

pub mod cache;
pub mod client;
pub mod dates;
pub mod error;
pub mod helper;
pub mod service;
pub mod types;

pub use cache::{
    recordings_key, MemoryCache, NoCache, RequestsCache, SqliteCache, UPCOMING_MEETINGS_KEY,
};
pub use client::ZoomClient;
pub use dates::{chunk_date_range, exceeds_one_month, DateChunk, DateRange};
pub use error::{CacheError, ZoomApiError};
pub use helper::ZoomApiHelper;
pub use service::MeetingService;
pub use types::{DateInput, Record, DATE_FORMAT};
