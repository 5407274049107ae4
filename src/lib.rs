//! # Review Analyzer
//!
//! An in-memory review repository with sentiment-ranked queries.
//!
//! Reviews are seeded from a CSV dataset at startup and can be added over
//! HTTP. Read queries filter by location and date range, score each review
//! with a [`SentimentScorer`](sentiment::SentimentScorer), and rank the
//! results by compound sentiment.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐   ┌──────────────┐   ┌──────────────┐
//! │  CSV      │──▶│ ReviewStore  │◀──│ IngestService│◀── POST
//! │ bootstrap │   │ (RwLock Vec) │   └──────────────┘
//! └───────────┘   └──────┬───────┘
//!                        ▼
//!                 ┌──────────────┐   ┌──────────────┐
//!                 │ ReviewFilter │──▶│ Scorer+Rank  │──▶ GET
//!                 └──────────────┘   └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! review-analyzer serve                         # start HTTP server on $PORT or 8000
//! review-analyzer list --location "Denver, Colorado"
//! review-analyzer score "Great food!"
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration and `PORT` override |
//! | [`models`] | Core data types |
//! | [`error`] | Validation errors |
//! | [`locations`] | Accepted location whitelist |
//! | [`dataset`] | CSV bootstrap loading |
//! | [`store`] | Append-only in-memory store |
//! | [`filter`] | Location and date-range filter |
//! | [`sentiment`] | Scorer trait and lexicon scorer |
//! | [`query`] | Filtered, ranked reads |
//! | [`ingest`] | Validated writes |
//! | [`server`] | HTTP server |
//! | [`commands`] | CLI subcommand implementations |

pub mod commands;
pub mod config;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod locations;
pub mod models;
pub mod query;
pub mod sentiment;
pub mod server;
pub mod store;
