//! Core data models used throughout the review analyzer.
//!
//! These types represent the stored reviews and the derived sentiment
//! annotations that flow through the query and ingest pipeline. Field names
//! on the wire (`ReviewId`, `ReviewBody`, `Location`, `Timestamp`) match the
//! columns of the bootstrap CSV dataset.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Textual format of [`Review::timestamp`], second precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Textual format of the `start_date` / `end_date` query filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One stored review.
///
/// Reviews are immutable once stored: the [`ReviewStore`](crate::store::ReviewStore)
/// only ever appends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "ReviewId")]
    pub id: String,
    #[serde(rename = "ReviewBody")]
    pub body: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Timestamp", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
}

/// Polarity scores for a piece of text.
///
/// `neg`, `neu` and `pos` are proportions of the text; `compound` is a
/// normalized summary in `[-1, 1]` and is the ranking key for queries.
/// Computed per request and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentScore {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

/// A review paired with the sentiment computed for it by a query.
///
/// Serializes as the review's own fields plus a nested `sentiment` object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredReview {
    #[serde(flatten)]
    pub review: Review,
    pub sentiment: SentimentScore,
}

/// Serde adapter for [`TIMESTAMP_FORMAT`] timestamps.
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map_err(|e| {
            serde::de::Error::custom(format!(
                "invalid timestamp '{}' (expected YYYY-MM-DD HH:MM:SS): {}",
                raw, e
            ))
        })
    }
}
