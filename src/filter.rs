//! Review filtering by location and date range.
//!
//! A [`ReviewFilter`] is parsed once per query from the raw request
//! parameters, then applied to every stored review.
//!
//! # Date bounds
//!
//! Both bounds are compared against the *start of day* of the given date:
//!
//! | Filter | Passes when |
//! |--------|-------------|
//! | `start_date=D` | `timestamp >= D 00:00:00` |
//! | `end_date=D` | `timestamp <= D 00:00:00` |
//!
//! So `end_date` is exclusive of everything after midnight on that day: a
//! review at `D 09:15:00` fails `end_date=D`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::ReviewError;
use crate::models::{Review, DATE_FORMAT};

/// Parsed location and date-range filter. Omitted parts always pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub location: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl ReviewFilter {
    /// Build a filter from raw request parameters.
    ///
    /// Empty strings are treated as absent. A date that does not parse as
    /// `YYYY-MM-DD` fails with [`ReviewError::InvalidDate`].
    pub fn parse(
        location: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, ReviewError> {
        Ok(Self {
            location: non_empty(location).map(str::to_string),
            start: parse_day_start("start_date", start)?,
            end: parse_day_start("end_date", end)?,
        })
    }

    /// Returns `true` if the review passes every supplied condition.
    pub fn matches(&self, review: &Review) -> bool {
        if let Some(ref location) = self.location {
            if &review.location != location {
                return false;
            }
        }
        if let Some(start) = self.start {
            if review.timestamp < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if review.timestamp > end {
                return false;
            }
        }
        true
    }
}

/// One-shot form of [`ReviewFilter::parse`] followed by [`ReviewFilter::matches`].
pub fn matches(
    review: &Review,
    location: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<bool, ReviewError> {
    Ok(ReviewFilter::parse(location, start, end)?.matches(review))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_day_start(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<NaiveDateTime>, ReviewError> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };
    let date =
        NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ReviewError::InvalidDate {
            field,
            value: raw.to_string(),
        })?;
    Ok(Some(date.and_time(NaiveTime::default())))
}
