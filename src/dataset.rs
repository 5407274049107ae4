//! Bootstrap dataset loading.
//!
//! The store is seeded once at startup from a CSV file with a header row
//! containing at least `ReviewId`, `ReviewBody`, `Location` and `Timestamp`.
//! Extra columns are ignored and column order is free. Rows are parsed into
//! typed [`Review`]s here, so a bad timestamp or a duplicate id stops startup
//! instead of surfacing later in a query.
//!
//! Bootstrap rows are trusted otherwise: locations are not checked against
//! the whitelist and empty bodies are kept.

use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::models::Review;

/// Load and validate every review in the CSV file at `path`.
pub fn load_reviews(path: &Path) -> Result<Vec<Review>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open reviews dataset: {}", path.display()))?;
    read_reviews(file).with_context(|| format!("Failed to load reviews from {}", path.display()))
}

/// Parse reviews from any CSV source, in row order.
pub fn read_reviews<R: Read>(reader: R) -> Result<Vec<Review>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let mut reviews = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, row) in csv_reader.deserialize::<Review>().enumerate() {
        // Header is line 1, so data row N is line N + 2.
        let line = index + 2;
        let review = row.with_context(|| format!("Invalid review at line {}", line))?;
        if !seen_ids.insert(review.id.clone()) {
            bail!("Duplicate ReviewId '{}' at line {}", review.id, line);
        }
        reviews.push(review);
    }

    Ok(reviews)
}
