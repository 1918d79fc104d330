//! newswire-feed: follows a running engine and prints the feed.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use newswire::adapters::{HttpCycleApi, HttpCycleApiConfig};
use newswire::application::{SyncClient, SyncClientConfig};
use newswire::config::AppConfig;
use newswire::domain::feed::FeedUpdate;

const UNTITLED: &str = "Untitled Article";
const NO_DESCRIPTION: &str = "No description available";
const DEFAULT_LOCATION: &str = "NEW YORK";

#[derive(Parser)]
#[command(name = "newswire-feed")]
#[command(about = "Follow a newswire engine and print its feed")]
struct Cli {
    /// Engine URL (overrides client.base_url)
    #[arg(long)]
    base_url: Option<String>,

    /// Feed page to print, starting at 1
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Reset the engine's cycle before following it
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("failed to load configuration")?;
    newswire::telemetry::init(&config.server).context("failed to install tracing")?;
    if let Some(base_url) = cli.base_url {
        config.client.base_url = base_url;
    }
    config.validate_client().context("invalid client configuration")?;

    let client_config = &config.client;
    let api = HttpCycleApi::new(
        HttpCycleApiConfig::new(client_config.base_url.clone())
            .with_timeout(client_config.request_timeout()),
    )
    .context("failed to build HTTP client")?;

    let client = SyncClient::new(
        Arc::new(api),
        SyncClientConfig::default()
            .with_poll_interval(client_config.poll_interval())
            .with_backoff(client_config.backoff())
            .with_max_retries(client_config.max_retries)
            .with_feed_order(client_config.feed_order),
    );

    if cli.reset {
        client.reset_cycle().await.context("failed to reset cycle")?;
    }

    let page = cli.page.max(1);
    let page_size = client_config.page_size;
    let _subscription = client.subscribe(move |update| {
        println!("{}", render(update, page, page_size));
    });

    info!(base_url = %client_config.base_url, "following engine");
    client.start();

    let mut watchdog = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("shutdown signal received");
                break;
            }
            _ = watchdog.tick() => {
                if !client.is_running() {
                    warn!("sync client halted after repeated failures");
                    break;
                }
            }
        }
    }

    client.stop();
    Ok(())
}

/// Renders one page of the feed as plain text.
///
/// Pages past the end show the last page. The current article is marked
/// with `>>`.
fn render(update: &FeedUpdate, page: usize, page_size: usize) -> String {
    let mut out = String::new();

    if update.metadata.is_reset {
        out.push_str("Cycle reset.\n");
    }
    if update.articles.is_empty() {
        out.push_str("No articles found. Waiting for articles to be published...\n");
        return out;
    }

    let meta = &update.metadata;
    let position = update
        .current()
        .and_then(|article| article.cycle_index)
        .unwrap_or(0);
    let progress = if meta.total_articles > 0 {
        (position as f64 / meta.total_articles as f64 * 100.0).round() as u64
    } else {
        0
    };
    let _ = writeln!(
        out,
        "Cycle #{} - Progress: {}% ({}/{}){}",
        meta.cycle_count,
        progress,
        position,
        meta.total_articles,
        if meta.is_new_cycle { " - new cycle" } else { "" }
    );

    let page_size = page_size.max(1);
    let total_pages = update.articles.len().div_ceil(page_size);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;

    for article in update.articles.iter().skip(start).take(page_size) {
        let marker = if article.is_current { ">>" } else { "  " };
        let _ = writeln!(
            out,
            "{} {}\n   {}\n   {} | Published at {}\n   {}",
            marker,
            article.title.as_deref().unwrap_or(UNTITLED),
            article.description.as_deref().unwrap_or(NO_DESCRIPTION),
            article.location.as_deref().unwrap_or(DEFAULT_LOCATION),
            article.published_at.as_deref().unwrap_or("-"),
            article.link,
        );
    }

    let _ = writeln!(out, "Page {} of {}", page, total_pages);
    out
}
