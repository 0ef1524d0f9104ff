//! Concurrent fan-out over upstream clients with an all-settled join

use crate::domain::CanonicalEvent;
use crate::feed::client::{FetchOutcome, UpstreamClient};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

/// How one source fared during a collection pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum SourceStatus {
    /// Call succeeded with this many events (possibly zero)
    Fetched(usize),
    /// Call failed; the reason is diagnostic only
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub source: String,
    pub status: SourceStatus,
    pub elapsed_ms: u64,
}

/// Concatenated events plus one report per client, both in configured order
#[derive(Debug, Default)]
pub struct Collected {
    pub events: Vec<CanonicalEvent>,
    pub sources: Vec<SourceReport>,
}

/// Run every client concurrently and concatenate their events in client order.
pub async fn collect(clients: &[Arc<dyn UpstreamClient>]) -> Vec<CanonicalEvent> {
    collect_with_report(clients).await.events
}

/// Run every client as its own task and wait for all of them to settle.
///
/// A failed or panicked task contributes nothing and never cancels its
/// siblings. Output order follows `clients`, not completion order.
pub async fn collect_with_report(clients: &[Arc<dyn UpstreamClient>]) -> Collected {
    let tasks: Vec<_> = clients
        .iter()
        .map(|client| {
            let client = Arc::clone(client);
            tokio::spawn(async move {
                let started = Instant::now();
                let outcome = client.fetch().await;
                (outcome, started.elapsed().as_millis() as u64)
            })
        })
        .collect();

    let settled = join_all(tasks).await;

    let mut collected = Collected::default();
    for (client, result) in clients.iter().zip(settled) {
        let source = client.source().to_string();
        let (status, elapsed_ms) = match result {
            Ok((FetchOutcome::Fetched(events), elapsed_ms)) => {
                let count = events.len();
                collected.events.extend(events);
                (SourceStatus::Fetched(count), elapsed_ms)
            }
            Ok((FetchOutcome::Failed(e), elapsed_ms)) => {
                (SourceStatus::Failed(e.to_string()), elapsed_ms)
            }
            Err(e) => {
                error!(source = %source, error = %e, "upstream task aborted");
                (SourceStatus::Failed(format!("task aborted: {e}")), 0)
            }
        };
        debug!(source = %source, ?status, elapsed_ms, "source settled");
        collected.sources.push(SourceReport {
            source,
            status,
            elapsed_ms,
        });
    }

    collected
}
