//! # Review Analyzer CLI (`review-analyzer`)
//!
//! ## Usage
//!
//! ```bash
//! review-analyzer [--config ./config/reviews.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `review-analyzer serve` | Start the HTTP server |
//! | `review-analyzer list` | Print reviews ranked by sentiment |
//! | `review-analyzer score "<text>"` | Print the sentiment of a text |
//!
//! ## Examples
//!
//! ```bash
//! # Serve on port 9000
//! PORT=9000 review-analyzer serve
//!
//! # Reviews from Denver in January 2023
//! review-analyzer list --location "Denver, Colorado" \
//!     --start-date 2023-01-01 --end-date 2023-02-01
//! ```

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use review_analyzer::{commands, config};

const DEFAULT_CONFIG_PATH: &str = "./config/reviews.toml";

/// Review Analyzer: an in-memory review repository with
/// sentiment-ranked queries.
#[derive(Parser)]
#[command(name = "review-analyzer", version, about)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/reviews.toml`; if that file does not exist,
    /// built-in defaults are used. A path given explicitly must exist.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    ///
    /// Loads the bootstrap dataset and serves reads and writes on
    /// `[server].host` and `$PORT` (default 8000).
    Serve,

    /// Query the bootstrap dataset and print ranked results.
    List {
        /// Only reviews with exactly this location.
        #[arg(long)]
        location: Option<String>,

        /// Only reviews at or after this date (YYYY-MM-DD, start of day).
        #[arg(long)]
        start_date: Option<String>,

        /// Only reviews at or before this date (YYYY-MM-DD, start of day).
        #[arg(long)]
        end_date: Option<String>,

        /// Print the JSON array the HTTP endpoint would return.
        #[arg(long)]
        json: bool,
    },

    /// Print the sentiment scores of a text.
    Score {
        /// Text to score.
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Commands that don't require config
    if let Commands::Score { text } = &cli.command {
        return commands::run_score(text);
    }

    let cfg = match &cli.config {
        Some(path) => config::resolve_config(path, true)?,
        None => config::resolve_config(Path::new(DEFAULT_CONFIG_PATH), false)?,
    };

    match cli.command {
        Commands::Serve => {
            commands::run_serve(&cfg).await?;
        }
        Commands::List {
            location,
            start_date,
            end_date,
            json,
        } => {
            commands::run_list(
                &cfg,
                location.as_deref(),
                start_date.as_deref(),
                end_date.as_deref(),
                json,
            )?;
        }
        Commands::Score { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
