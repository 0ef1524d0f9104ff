use crate::domain::CanonicalEvent;
use crate::error::FeedError;
use async_trait::async_trait;

/// Result of a single upstream call.
///
/// Keeps "no events because the call failed" apart from "no events because the
/// provider had none". Callers that only want events use [`FetchOutcome::into_events`].
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Vec<CanonicalEvent>),
    Failed(FeedError),
}

impl FetchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    pub fn event_count(&self) -> usize {
        match self {
            FetchOutcome::Fetched(events) => events.len(),
            FetchOutcome::Failed(_) => 0,
        }
    }

    /// Events on success, empty on failure
    pub fn into_events(self) -> Vec<CanonicalEvent> {
        match self {
            FetchOutcome::Fetched(events) => events,
            FetchOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// One upstream provider query.
///
/// Implementations issue exactly one request per `fetch`, enforce their own
/// timeout, and absorb every failure into [`FetchOutcome::Failed`]. They hold no
/// mutable state between calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Provenance tag stamped on every event this client produces
    fn source(&self) -> &str;

    async fn fetch(&self) -> FetchOutcome;
}
