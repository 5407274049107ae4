//! CLI command implementations.
//!
//! Each `run_*` function backs one `review-analyzer` subcommand and prints
//! to stdout. The HTTP server shares [`open_store`] for its bootstrap step.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::dataset;
use crate::models::TIMESTAMP_FORMAT;
use crate::query::QueryService;
use crate::sentiment::{LexiconScorer, SentimentScorer};
use crate::server;
use crate::store::ReviewStore;

/// Load the bootstrap dataset named in the config into a fresh store.
pub fn open_store(config: &Config) -> Result<Arc<ReviewStore>> {
    let path = &config.data.reviews_path;
    let reviews = dataset::load_reviews(path)?;
    info!(path = %path.display(), reviews = reviews.len(), "loaded bootstrap dataset");
    Ok(Arc::new(ReviewStore::with_reviews(reviews)))
}

/// `review-analyzer serve`
pub async fn run_serve(config: &Config) -> Result<()> {
    let store = open_store(config)?;
    server::run_server(config, store, Arc::new(LexiconScorer::new())).await
}

/// `review-analyzer list`: run a query offline and print ranked results.
pub fn run_list(
    config: &Config,
    location: Option<&str>,
    start_date: Option<&str>,
    end_date: Option<&str>,
    json: bool,
) -> Result<()> {
    let store = open_store(config)?;
    let service = QueryService::new(store, Arc::new(LexiconScorer::new()));
    let results = service.list(location, start_date, end_date)?;

    if json {
        let out = serde_json::to_string_pretty(&results).context("Failed to encode results")?;
        println!("{}", out);
        return Ok(());
    }

    if results.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for (i, scored) in results.iter().enumerate() {
        let review = &scored.review;
        let s = &scored.sentiment;
        println!(
            "{}. [{:+.4}] {} / {}",
            i + 1,
            s.compound,
            review.location,
            review.timestamp.format(TIMESTAMP_FORMAT)
        );
        println!(
            "    sentiment: neg={:.3} neu={:.3} pos={:.3}",
            s.neg, s.neu, s.pos
        );
        println!("    review: \"{}\"", review.body.replace('\n', " ").trim());
        println!("    id: {}", review.id);
        println!();
    }

    Ok(())
}

/// `review-analyzer score`: print the lexicon scorer's values for `text`.
pub fn run_score(text: &str) -> Result<()> {
    let scorer = LexiconScorer::new();
    let s = scorer.score(text);
    println!("neg:      {:.3}", s.neg);
    println!("neu:      {:.3}", s.neu);
    println!("pos:      {:.3}", s.pos);
    println!("compound: {:.4}", s.compound);
    Ok(())
}
