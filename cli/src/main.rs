//! RemitRoute CLI
//!
//! Ranks the ways to move an amount from one currency to another.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use remitroute_common::{Currency, RemitRouteError};
use remitroute_fx::{JsonFileRateSource, RateBook, RateFeed, RateSource, StaticRateSource};
use remitroute_routing::{validate_transfer, EngineConfig, RouteEngine};
use rust_decimal::Decimal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;

/// RemitRoute CLI
#[derive(Parser, Debug)]
#[command(name = "remitroute")]
#[command(about = "Find and rank routes for cross-border transfers")]
struct Args {
    /// Rate snapshot document to load instead of the built-in rates
    #[arg(long = "rates", value_name = "FILE", global = true)]
    rates_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank transfer routes, best first
    Routes {
        /// Amount to send, in the source currency
        #[arg(short, long)]
        amount: Decimal,

        /// Source currency code
        #[arg(short, long)]
        from: String,

        /// Target currency code
        #[arg(short, long)]
        to: String,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert at the mid-market rate, without provider fees
    Convert {
        #[arg(short, long)]
        amount: Decimal,

        #[arg(short, long)]
        from: String,

        #[arg(short, long)]
        to: String,
    },

    /// Show the rate row for one currency
    Rates {
        #[arg(long, default_value = "USD")]
        base: String,
    },

    /// Keep rates fresh in the background
    Watch {
        /// Run duration in seconds (0 = until Ctrl+C)
        #[arg(long, default_value = "0")]
        duration: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = EngineConfig::from_env();
    if let Some(path) = args.rates_file.clone() {
        config.feed.rates_file = Some(path);
    }

    init_tracing(&config);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(anyhow::anyhow!("Configuration error: {}", e));
    }

    let feed = Arc::new(build_feed(&config));
    let outcome = feed.refresh(false).await;
    info!(origin = ?outcome.origin, applied = outcome.applied, "Rates loaded");

    let engine = RouteEngine::with_book(feed.book().clone());

    match args.command {
        Command::Routes {
            amount,
            from,
            to,
            json,
        } => {
            let (from, to) = transfer_currencies(amount, &from, &to)?;
            let quote = engine.quote(amount, &from, &to);

            if json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                print!("{}", render::quote_table(&quote));
            }
        }
        Command::Convert { amount, from, to } => {
            let (from, to) = transfer_currencies(amount, &from, &to)?;
            let converted = engine.convert(amount, &from, &to);
            let rate = engine.book().current().rate(&from, &to);

            println!("{}", render::conversion(amount, &from, converted, &to, rate));
        }
        Command::Rates { base } => {
            let base = Currency::new(base);
            if !base.is_supported() {
                return Err(RemitRouteError::UnsupportedCurrency(base).into());
            }

            let table = engine.book().current();
            print!("{}", render::rate_row(&base, &table));
        }
        Command::Watch { duration } => {
            let handle = feed.spawn_refresh_loop();

            if duration > 0 {
                tokio::time::sleep(Duration::from_secs(duration)).await;
            } else {
                info!("Press Ctrl+C to stop");
                tokio::signal::ctrl_c().await?;
            }
            handle.abort();

            let stats = feed.stats();
            info!(
                refreshes = stats.refreshes,
                fetches = stats.fetches,
                cache_hits = stats.cache_hits,
                fallbacks = stats.fallbacks,
                applied = stats.applied,
                skipped = stats.skipped,
                "Rate feed stopped"
            );
        }
    }

    Ok(())
}

fn init_tracing(config: &EngineConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays machine-readable.
    if config.log_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn build_feed(config: &EngineConfig) -> RateFeed {
    let source: Arc<dyn RateSource> = match &config.feed.rates_file {
        Some(path) => Arc::new(JsonFileRateSource::new(path.clone())),
        None => Arc::new(StaticRateSource::new()),
    };

    RateFeed::new(source, RateBook::seeded(), config.feed.clone())
}

fn transfer_currencies(
    amount: Decimal,
    from: &str,
    to: &str,
) -> Result<(Currency, Currency), RemitRouteError> {
    let from = Currency::new(from);
    let to = Currency::new(to);
    validate_transfer(amount, &from, &to)?;
    Ok((from, to))
}
