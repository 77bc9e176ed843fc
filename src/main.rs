use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::info;

use newsdigest::app::App;
use newsdigest::cli::{Cli, Commands};
use newsdigest::config::Config;
use newsdigest::domain::{cache_key_for_date, Clock, FeedDescriptor, FixedClock, SystemClock};
use newsdigest::logging::init_logging;
use newsdigest::storage::MemoryObjectStore;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> anyhow::Result<i32> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().context("failed to load configuration")?;
    init_logging(&config);

    match cli.command {
        Commands::Invoke { date, ephemeral } => cmd_invoke(&config, date, ephemeral).await,
        Commands::Feeds => cmd_feeds(),
        Commands::Key { date } => cmd_key(date),
    }
}

async fn cmd_invoke(config: &Config, date: Option<NaiveDate>, ephemeral: bool) -> anyhow::Result<i32> {
    let clock: Arc<dyn Clock> = match date {
        // Noon keeps the request inside the requested UTC day
        Some(date) => Arc::new(FixedClock(date.and_hms_opt(12, 0, 0).context("invalid date")?.and_utc())),
        None => Arc::new(SystemClock),
    };

    let app = if ephemeral {
        info!("Using in-memory object store");
        App::new(config, Arc::new(MemoryObjectStore::new()), clock)
    } else {
        App::from_config(config, clock).await
    }
    .context("failed to build digest service")?;

    let response = app.invoke().await;

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(if response.is_success() { 0 } else { 1 })
}

fn cmd_feeds() -> anyhow::Result<i32> {
    println!("Configured feeds:\n");
    for feed in FeedDescriptor::defaults() {
        println!("  {}", feed.name);
        println!("    URL: {}", feed.url);
        println!();
    }

    Ok(0)
}

fn cmd_key(date: Option<NaiveDate>) -> anyhow::Result<i32> {
    let date = date.unwrap_or_else(|| Utc::now().date_naive());
    println!("{}", cache_key_for_date(date));
    Ok(0)
}
