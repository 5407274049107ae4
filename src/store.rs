//! In-memory, append-only review storage.
//!
//! Uses a `Vec` behind `std::sync::RwLock` for thread safety. Readers take a
//! shared lock and copy out a snapshot, so iteration never overlaps an append
//! and a reader sees either the whole sequence before an append or the whole
//! sequence after it.

use std::sync::{PoisonError, RwLock};

use crate::models::Review;

/// Ordered, append-only sequence of [`Review`]s.
///
/// The store is the sole owner of every review. There is no update or
/// delete; insertion order is preserved and is the tie-break order for
/// query ranking.
#[derive(Debug, Default)]
pub struct ReviewStore {
    reviews: RwLock<Vec<Review>>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with bootstrap reviews, keeping their order.
    pub fn with_reviews(reviews: Vec<Review>) -> Self {
        Self {
            reviews: RwLock::new(reviews),
        }
    }

    /// Snapshot of every review in insertion order.
    pub fn all(&self) -> Vec<Review> {
        // `push` is the only mutation, so a poisoned lock still guards a whole Vec.
        let reviews = self.reviews.read().unwrap_or_else(PoisonError::into_inner);
        reviews.clone()
    }

    /// Append a review. Visible to every subsequent [`all`](Self::all).
    pub fn append(&self, review: Review) {
        let mut reviews = self.reviews.write().unwrap_or_else(PoisonError::into_inner);
        reviews.push(review);
    }

    pub fn len(&self) -> usize {
        self.reviews
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
