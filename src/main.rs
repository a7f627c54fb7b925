//! Wiki-Ripple main entry point
//!
//! This is the command-line interface for the Wiki-Ripple crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use wiki_ripple::config::{load_config_with_hash, Config};
use wiki_ripple::crawler::{run_all, Fetcher, CHECKPOINT_INTERVAL, MAX_REQUEST_DELAY, MIN_REQUEST_DELAY};
use wiki_ripple::output::print_summary;

/// Wiki-Ripple: a polite, resumable wiki crawler
///
/// Wiki-Ripple crawls one or more wikis breadth-first from seed articles,
/// writing every article it reads as a JSON record and checkpointing its
/// progress so an interrupted crawl resumes where it stopped.
#[derive(Parser, Debug)]
#[command(name = "wiki-ripple")]
#[command(version)]
#[command(about = "A polite, resumable wiki crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Start a fresh crawl, ignoring previous checkpoints
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long, conflicts_with = "fresh")]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_crawl(config, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_ripple=info,warn"),
            1 => EnvFilter::new("wiki_ripple=debug,info"),
            2 => EnvFilter::new("wiki_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Wiki-Ripple Dry Run ===\n");

    println!("Politeness:");
    println!(
        "  Delay before each request: {:?} to {:?}",
        MIN_REQUEST_DELAY, MAX_REQUEST_DELAY
    );
    println!("  Checkpoint every {} pages", CHECKPOINT_INTERVAL);

    println!("\nCrawls ({}):", config.crawls.len());
    for crawl in &config.crawls {
        println!("  - {}", crawl.start_url);
        println!("    Directory: {}", crawl.directory.display());
        println!("    Max pages: {}", crawl.max_pages);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config, fresh: bool) -> anyhow::Result<()> {
    if fresh {
        tracing::info!("Starting fresh crawl (ignoring previous checkpoints)");
    } else {
        tracing::info!("Starting crawl (will resume from checkpoints where present)");
    }

    let fetcher = Fetcher::new().context("failed to build HTTP client")?;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received, saving progress");
            trigger.cancel();
        }
    });

    tracing::info!("Starting {} crawl instances", config.crawls.len());
    let reports = run_all(config.crawls, fetcher, fresh, cancel).await;
    tracing::info!("All crawlers completed");

    print_summary(&reports);

    Ok(())
}
