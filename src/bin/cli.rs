//! notipoll CLI
//!
//! Polls a university department notice board and ingests new notices
//! into a relational store.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use notipoll::{
    error::Result,
    models::Config,
    pipeline::{self, Poller},
    services::BoardClient,
    storage::Database,
};

/// notipoll - Department Notice Board Poller
#[derive(Parser, Debug)]
#[command(
    name = "notipoll",
    version,
    about = "Polls a department notice board and ingests new notices"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "notipoll.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the post table if absent (one-time setup)
    Provision,

    /// Run a single poll cycle
    Poll,

    /// Poll on a fixed interval until interrupted
    Run,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(&cli.config)?;
    config.validate()?;
    log::info!("Loaded configuration from {}", cli.config.display());

    if let Command::Validate = cli.command {
        log::info!("✓ Config OK");
        log::info!("  source: {} [{}]", config.source.list_url, config.source.category);
        log::info!("  poll interval: {}s", config.crawler.poll_interval_secs);
        log::info!("  database: {}", config.database.url);
        return Ok(());
    }

    // No degraded mode without storage: a failed connection ends the
    // process right here.
    let db = Database::connect(&config.database.url, config.database.max_connections).await?;
    log::info!("Connected to store at {}", config.database.url);

    match cli.command {
        Command::Provision => {
            db.provision().await?;
            log::info!("Store provisioned");
        }

        Command::Poll => {
            let poller = build_poller(&config, db)?;
            let outcome = poller.run_cycle().await?;
            log::info!(
                "Poll cycle complete: {} listed, {} new, {} ingested, {} failed",
                outcome.listed,
                outcome.dispatched,
                outcome.ingested,
                outcome.failed
            );
        }

        Command::Run => {
            let poller = build_poller(&config, db)?;
            let period = Duration::from_secs(config.crawler.poll_interval_secs);
            log::info!(
                "Polling {} every {}s",
                config.source.list_url,
                config.crawler.poll_interval_secs
            );
            pipeline::run_loop(&poller, period).await?;
        }

        Command::Validate => unreachable!("handled above"),
    }

    Ok(())
}

fn build_poller(config: &Config, db: Database) -> Result<Poller> {
    let source = Arc::new(BoardClient::new(config)?);
    Ok(Poller::new(
        source,
        db,
        config.source.category.clone(),
        config.crawler.max_concurrent,
    ))
}
