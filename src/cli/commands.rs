use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "newsdigest")]
#[command(about = "Daily news digest aggregated from RSS feeds, cached per UTC day")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve one digest request and print the response envelope
    Invoke {
        /// Handle the request as if made on this UTC date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Use an in-memory store instead of the configured one
        #[arg(long)]
        ephemeral: bool,
    },

    /// List the configured feeds
    Feeds,

    /// Print the cache key for today or a given date
    Key {
        /// UTC date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}
