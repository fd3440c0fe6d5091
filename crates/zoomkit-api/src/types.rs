//! Inbound value types.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::ZoomApiError;

/// One upstream item. The schema belongs to the Zoom API.
pub type Record = serde_json::Value;

/// Date format used in queries and cache keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A date as callers hand it in: a string, a calendar date or a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    Raw(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

impl DateInput {
    /// Reduce to a calendar date. Strings may be `YYYY-MM-DD` or RFC 3339.
    pub fn normalize(&self) -> Result<NaiveDate, ZoomApiError> {
        match self {
            Self::Date(date) => Ok(*date),
            Self::DateTime(dt) => Ok(dt.date_naive()),
            Self::Raw(raw) => {
                let raw = raw.trim();
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
                    .map_err(|_| ZoomApiError::InvalidArgument(format!("invalid date: {:?}", raw)))
            }
        }
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_string_and_date() {
        let expected = NaiveDate::from_ymd_opt(1980, 1, 1).unwrap();
        assert_eq!(DateInput::from("1980-01-01").normalize().unwrap(), expected);
        assert_eq!(DateInput::from(expected).normalize().unwrap(), expected);
    }

    #[test]
    fn test_normalize_timestamps() {
        let dt = Utc.with_ymd_and_hms(2023, 3, 1, 23, 15, 0).unwrap();
        assert_eq!(
            DateInput::from(dt).normalize().unwrap(),
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()
        );
        assert_eq!(
            DateInput::from("2023-03-01T10:00:00Z").normalize().unwrap(),
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let result = DateInput::from("I am a teapot.").normalize();
        assert!(matches!(result, Err(ZoomApiError::InvalidArgument(_))));
    }
}
