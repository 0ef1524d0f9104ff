//! Live match aggregation entry point
//!
//! Composes the fan-out collector with the deduplicator. Holds only the ordered
//! client list, so one aggregator can be shared across tasks and queried
//! concurrently.

use crate::config::AppConfig;
use crate::domain::CanonicalEvent;
use crate::error::{FeedError, Result};
use crate::feed::api_football::ApiFootballClient;
use crate::feed::client::UpstreamClient;
use crate::feed::dedup::dedupe;
use crate::feed::orchestrator::{collect_with_report, SourceReport, SourceStatus};
use futures::FutureExt;
use reqwest::Client;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Diagnostics for one aggregation call
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationReport {
    /// One entry per configured source, in priority order
    pub sources: Vec<SourceReport>,
    pub duplicates_dropped: usize,
    pub total_events: usize,
}

impl AggregationReport {
    pub fn failed_sources(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| matches!(s.status, SourceStatus::Failed(_)))
            .count()
    }
}

/// Aggregates live matches across an ordered list of upstream clients
pub struct LiveAggregator {
    clients: Vec<Arc<dyn UpstreamClient>>,
}

impl LiveAggregator {
    /// Build from clients in priority order; earlier clients win duplicate matches
    pub fn new(clients: Vec<Arc<dyn UpstreamClient>>) -> Self {
        Self { clients }
    }

    /// One API-Football client per configured source, sharing a connection pool
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.provider.timeout_secs))
            .build()
            .map_err(|e| FeedError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        let clients = config
            .sources
            .iter()
            .map(|query| {
                Arc::new(ApiFootballClient::new(http.clone(), &config.provider, *query))
                    as Arc<dyn UpstreamClient>
            })
            .collect();

        Ok(Self::new(clients))
    }

    /// Provenance tags of the configured clients, in priority order
    pub fn sources(&self) -> Vec<&str> {
        self.clients.iter().map(|c| c.source()).collect()
    }

    /// Current live matches, deduplicated. Never fails; degrades to fewer (or zero) events.
    pub async fn get_live_matches(&self) -> Vec<CanonicalEvent> {
        self.get_live_matches_with_report().await.0
    }

    /// Same as [`get_live_matches`](Self::get_live_matches), plus per-source diagnostics
    pub async fn get_live_matches_with_report(&self) -> (Vec<CanonicalEvent>, AggregationReport) {
        match AssertUnwindSafe(self.aggregate()).catch_unwind().await {
            Ok(result) => result,
            Err(_) => {
                error!("live match aggregation aborted by internal fault; returning no events");
                (Vec::new(), AggregationReport::default())
            }
        }
    }

    async fn aggregate(&self) -> (Vec<CanonicalEvent>, AggregationReport) {
        let collected = collect_with_report(&self.clients).await;
        let before = collected.events.len();
        let events = dedupe(collected.events);

        let report = AggregationReport {
            sources: collected.sources,
            duplicates_dropped: before - events.len(),
            total_events: events.len(),
        };

        info!(
            events = report.total_events,
            duplicates = report.duplicates_dropped,
            failed_sources = report.failed_sources(),
            sources = report.sources.len(),
            "live matches aggregated"
        );

        (events, report)
    }
}
