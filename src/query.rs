//! Sentiment-ranked review queries.
//!
//! [`QueryService::list`] is the read path: filter the store, score each
//! surviving review, and rank by compound score.
//!
//! # Ranking
//!
//! Results are ordered by `compound` descending. The sort is stable, so
//! reviews with equal compound scores stay in insertion order.

use std::sync::Arc;

use crate::error::ReviewError;
use crate::filter::ReviewFilter;
use crate::models::ScoredReview;
use crate::sentiment::SentimentScorer;
use crate::store::ReviewStore;

/// Answers read requests against a [`ReviewStore`].
#[derive(Clone)]
pub struct QueryService {
    store: Arc<ReviewStore>,
    scorer: Arc<dyn SentimentScorer>,
}

impl QueryService {
    pub fn new(store: Arc<ReviewStore>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { store, scorer }
    }

    /// List reviews matching the optional filters, ranked by sentiment.
    ///
    /// Fails with [`ReviewError::InvalidDate`] before touching the store if
    /// either date does not parse. A `start` later than `end` is not an
    /// error; it simply matches nothing.
    pub fn list(
        &self,
        location: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Vec<ScoredReview>, ReviewError> {
        let filter = ReviewFilter::parse(location, start, end)?;
        Ok(self.list_filtered(&filter))
    }

    /// Same as [`list`](Self::list) with an already parsed filter.
    pub fn list_filtered(&self, filter: &ReviewFilter) -> Vec<ScoredReview> {
        let mut results: Vec<ScoredReview> = self
            .store
            .all()
            .into_iter()
            .filter(|review| filter.matches(review))
            .map(|review| {
                let sentiment = self.scorer.score(&review.body);
                ScoredReview { review, sentiment }
            })
            .collect();

        rank_by_compound(&mut results);

        tracing::debug!(
            location = ?filter.location,
            start = ?filter.start,
            end = ?filter.end,
            scorer = self.scorer.name(),
            results = results.len(),
            "review query"
        );
        results
    }
}

/// Stable sort, compound descending.
fn rank_by_compound(results: &mut [ScoredReview]) {
    results.sort_by(|a, b| b.sentiment.compound.total_cmp(&a.sentiment.compound));
}
