//! Date ranges and the one-month chunking the recordings endpoint needs.

use chrono::{Months, NaiveDate};

use crate::error::ZoomApiError;
use crate::types::{DateInput, DATE_FORMAT};

/// Validated inclusive range, `from <= to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ZoomApiError> {
        if from > to {
            return Err(ZoomApiError::InvalidArgument(
                "from date must be before the to date".to_string(),
            ));
        }
        Ok(Self { from, to })
    }

    pub fn from_inputs(from: &DateInput, to: &DateInput) -> Result<Self, ZoomApiError> {
        Self::new(from.normalize()?, to.normalize()?)
    }

    pub fn from(&self) -> NaiveDate {
        self.from
    }

    pub fn to(&self) -> NaiveDate {
        self.to
    }

    /// Chunks to query, most recent first.
    pub fn chunks(&self) -> Vec<DateChunk> {
        chunk_date_range(self.from, self.to)
    }
}

/// One request's worth of dates, never longer than a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateChunk {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateChunk {
    pub fn from_param(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    pub fn to_param(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }
}

/// True when at least one whole calendar month lies between the dates.
pub fn exceeds_one_month(from: NaiveDate, to: NaiveDate) -> bool {
    from.checked_add_months(Months::new(1))
        .map(|month_later| month_later <= to)
        .unwrap_or(false)
}

/// Split `from..=to` into month-sized chunks walking backward from `to`.
///
/// Every chunk after the first ends the day before the previous chunk's
/// start, so boundary dates are queried once. Chunk starts never precede
/// `from`; chunks left empty by the boundary shift are dropped.
pub fn chunk_date_range(from: NaiveDate, to: NaiveDate) -> Vec<DateChunk> {
    let mut chunks = Vec::new();
    let mut end = to;
    let mut first = true;

    loop {
        let more = exceeds_one_month(from, end);
        let start = if more {
            end.checked_sub_months(Months::new(1))
                .map(|s| s.max(from))
                .unwrap_or(from)
        } else {
            from
        };

        let chunk_end = if first {
            end
        } else {
            end.pred_opt().unwrap_or(end)
        };

        if start <= chunk_end {
            chunks.push(DateChunk {
                from: start,
                to: chunk_end,
            });
        }

        if !more {
            break;
        }

        end = start;
        first = false;
    }

    chunks
}
