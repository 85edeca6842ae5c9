//! Community post relay CLI
//!
//! One invocation is one pass over the feed. Schedule it externally (cron,
//! systemd timer, container restart policy).

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use community_webhook::{
    error::Result,
    models::Config,
    pipeline,
    utils::http,
};

/// Relay YouTube community posts to a Discord webhook
#[derive(Parser, Debug)]
#[command(name = "community-webhook", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Announce new posts (default)
    Run,

    /// Validate configuration
    Validate,

    /// Initialize the posted log from the ignore list, then exit
    Seed,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Load the config file, then apply environment overrides.
fn load_config(path: &Path) -> Result<Config> {
    let mut config = Config::load_or_default(path);
    config.apply_env(|key| std::env::var(key).ok())?;
    Ok(config)
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli.config)?;
    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            let client = http::create_client(&config.http)?;
            let mut posted = pipeline::prepare_posted_log(&config, &client).await?;
            let summary = pipeline::run_relay(&config, &client, &mut posted).await?;
            log::info!(
                "Run ended at {} ({} sent)",
                summary.finished_at.format("%Y-%m-%d %H:%M:%S"),
                summary.sent
            );
        }

        Command::Validate => {
            log::info!("✓ Config OK");
            log::info!("Channel: {}", config.source.channel_id);
            log::info!("Posted log: {}", config.storage.posted_log.display());
            log::info!("Mention: {}", config.webhook.mention);
            log::info!(
                "Max posts: {}",
                match config.source.max_posts {
                    0 => "all".to_string(),
                    n => n.to_string(),
                }
            );
        }

        Command::Seed => {
            let client = http::create_client(&config.http)?;
            if pipeline::seed_posted_log(&config, &client).await? {
                log::info!(
                    "Posted log initialized at {}",
                    config.storage.posted_log.display()
                );
            } else {
                log::info!("Posted log left unchanged");
            }
        }
    }

    Ok(())
}
