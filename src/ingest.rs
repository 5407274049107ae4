//! Review creation.
//!
//! [`IngestService::create`] is the only way the store grows after startup.
//! Validation runs in a fixed order:
//!
//! 1. location absent or not in [`VALID_LOCATIONS`](crate::locations::VALID_LOCATIONS)
//!    → [`ReviewError::InvalidLocation`]
//! 2. location or body empty → [`ReviewError::MissingField`]
//!
//! A missing location therefore reports "Invalid location.", not the
//! missing-field message. Clients rely on this ordering.

use chrono::{Local, NaiveDateTime, Timelike};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ReviewError;
use crate::locations::is_valid_location;
use crate::models::Review;
use crate::store::ReviewStore;

/// Validates and appends new reviews.
#[derive(Clone)]
pub struct IngestService {
    store: Arc<ReviewStore>,
}

impl IngestService {
    pub fn new(store: Arc<ReviewStore>) -> Self {
        Self { store }
    }

    /// Create a review stamped with the current local time.
    pub fn create(
        &self,
        location: Option<&str>,
        body: Option<&str>,
    ) -> Result<Review, ReviewError> {
        self.create_at(location, body, Local::now().naive_local())
    }

    /// Create a review stamped with `now`, truncated to whole seconds.
    ///
    /// On success the review has a fresh UUID v4 id and has been appended to
    /// the store. The returned review carries no sentiment; creation never
    /// scores.
    pub fn create_at(
        &self,
        location: Option<&str>,
        body: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<Review, ReviewError> {
        let location = match location {
            Some(loc) if is_valid_location(loc) => loc,
            _ => return Err(ReviewError::InvalidLocation),
        };
        let body = match body {
            Some(b) if !b.is_empty() => b,
            _ => return Err(ReviewError::MissingField),
        };

        let review = Review {
            id: Uuid::new_v4().to_string(),
            body: body.to_string(),
            location: location.to_string(),
            timestamp: now.with_nanosecond(0).unwrap_or(now),
        };
        self.store.append(review.clone());

        tracing::info!(id = %review.id, location = %review.location, "review created");
        Ok(review)
    }
}
