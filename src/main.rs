//! Statuswatch — homework review-status watcher.
//!
//! Polls the review API on a fixed interval and reports verdict changes to
//! a Telegram chat.
//!
//! Quick start:
//!   statuswatch              # start watching (requires tokens in the env)
//!   statuswatch check        # verify configuration
//!
//! For more info: statuswatch --help

// Suppress warnings for items that are public API (used via lib.rs by the
// integration tests) but not referenced from the binary.
#![allow(dead_code)]

mod api;
mod config;
mod notify;
mod status;
mod watch;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::api::HttpStatusSource;
use crate::config::Config;
use crate::notify::{Notifier, TelegramSink};
use crate::watch::StatusWatcher;

/// Statuswatch — get a Telegram message the moment your homework verdict changes.
#[derive(Parser)]
#[command(
    name = "statuswatch",
    version,
    about = "Watch homework review statuses and report changes to Telegram",
    long_about = "Statuswatch polls the review API and sends a Telegram message\n\
                  whenever a homework's review status changes.\n\n\
                  Required environment:\n  \
                  PRACTICUM_TOKEN     review API token\n  \
                  TELEGRAM_TOKEN      bot token\n  \
                  TELEGRAM_CHAT_ID    target chat"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Poll interval in seconds (default: 600)
    #[arg(long, env = "STATUSWATCH_INTERVAL")]
    interval: Option<u64>,

    /// Status endpoint URL override
    #[arg(long, env = "STATUSWATCH_ENDPOINT")]
    endpoint: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify the configuration without starting the watcher
    Check,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("statuswatch=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Check) => run_check(),
        None => run_watch(cli).await,
    };

    if let Err(e) = result {
        eprintln!();
        eprintln!("  {} {}", "✗".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }
        eprintln!();
        std::process::exit(1);
    }
}

/// Start the watch loop and run until Ctrl-C.
async fn run_watch(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(secs) = cli.interval {
        config.poll_interval = Duration::from_secs(secs);
    }
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }

    let source = HttpStatusSource::new(&config.endpoint, &config.api_token, config.request_timeout)?;
    let sink = TelegramSink::new(&config.bot_token, &config.chat_id, config.request_timeout)?;
    let notifier = Notifier::new(Arc::new(sink));

    // Only statuses that change after startup are interesting.
    let start_watermark = chrono::Utc::now().timestamp();
    let mut watcher = StatusWatcher::new(
        Arc::new(source),
        notifier,
        start_watermark,
        config.poll_interval,
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown requested");
            let _ = shutdown_tx.send(true);
        }
    });

    tracing::info!(
        "watching {} every {}s",
        config.endpoint,
        config.poll_interval.as_secs()
    );
    watcher.run(shutdown_rx).await;

    Ok(())
}

/// Run the `statuswatch check` command — report which required variables
/// are present, fail if any are missing.
fn run_check() -> anyhow::Result<()> {
    println!();
    println!("  {}  configuration check", "statuswatch".bold());
    println!();

    let mut missing = false;
    for name in config::REQUIRED_VARS {
        let present = std::env::var(name)
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);
        if present {
            println!("  {} {}", "✓".green(), name);
        } else {
            println!("  {} {} {}", "✗".red(), name, "(missing)".dimmed());
            missing = true;
        }
    }
    println!();

    if missing {
        anyhow::bail!("configuration is incomplete — set the missing variables and retry");
    }

    println!("  {} Ready to watch.", "✓".green().bold());
    println!();
    Ok(())
}
