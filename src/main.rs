use anyhow::Context;
use clap::Parser;
use kickfeed::cli::output::{self, OutputMode};
use kickfeed::cli::watch::watch;
use kickfeed::cli::{Cli, Commands};
use kickfeed::config::AppConfig;
use kickfeed::feed::LiveAggregator;
use kickfeed::logging::{init_logging, init_logging_simple};
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(&cli.config)
        .with_context(|| format!("failed to load configuration from '{}'", cli.config))?;

    match cli.command {
        Commands::Live { json, report } => {
            init_logging_simple();
            warn_invalid(&config);
            run_live(&config, OutputMode::from_json_flag(json), report).await?;
        }
        Commands::Watch {
            interval_secs,
            json,
        } => {
            init_logging(&config.logging);
            warn_invalid(&config);
            run_watch(&config, interval_secs, OutputMode::from_json_flag(json)).await?;
        }
        Commands::Sources => {
            init_logging_simple();
            let aggregator = LiveAggregator::from_config(&config)?;
            for (idx, (source, query)) in aggregator
                .sources()
                .into_iter()
                .zip(&config.sources)
                .enumerate()
            {
                println!("{:>2}. {source} ({query})", idx + 1);
            }
        }
    }

    Ok(())
}

/// Configuration problems are reported but not fatal: a bad key degrades to failed sources.
fn warn_invalid(config: &AppConfig) {
    if let Err(errors) = config.validate() {
        for error in errors {
            warn!("config: {error}");
        }
    }
}

async fn run_live(config: &AppConfig, mode: OutputMode, show_report: bool) -> anyhow::Result<()> {
    let aggregator = LiveAggregator::from_config(config)?;
    let (events, report) = aggregator.get_live_matches_with_report().await;

    let report = show_report.then_some(&report);
    println!("{}", output::render_live(&events, report, mode)?);
    Ok(())
}

async fn run_watch(config: &AppConfig, interval_secs: u64, mode: OutputMode) -> anyhow::Result<()> {
    let aggregator = LiveAggregator::from_config(config)?;

    info!(
        interval_secs,
        sources = ?aggregator.sources(),
        "watching live matches"
    );

    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to listen for ctrl-c: {e}");
            std::future::pending::<()>().await;
        }
        info!("shutdown signal received");
    };

    let passes = watch(
        &aggregator,
        Duration::from_secs(interval_secs.max(1)),
        shutdown,
        |events| {
            println!("{}", output::render_events(events, mode)?);
            Ok(())
        },
    )
    .await?;

    info!(passes, "watch stopped");
    Ok(())
}
