//! Live event aggregation across upstream football data providers
//!
//! - `client`: the upstream client seam and its outcome type
//! - `api_football`: HTTP client variants for API-Football fixtures
//! - `raw` / `normalize`: lenient payload parsing into canonical events
//! - `status`: provider status code -> canonical phase
//! - `odds`: placeholder odds for records without market data
//! - `orchestrator`: concurrent all-settled fan-out
//! - `dedup`: first-writer-wins team-pair deduplication
//! - `aggregator`: the public query entry point

pub mod aggregator;
pub mod api_football;
pub mod client;
pub mod dedup;
pub mod normalize;
pub mod odds;
pub mod orchestrator;
pub mod raw;
pub mod status;

pub use aggregator::{AggregationReport, LiveAggregator};
pub use api_football::{ApiFootballClient, FixtureQuery};
pub use client::{FetchOutcome, UpstreamClient};
pub use dedup::dedupe;
pub use normalize::{normalize, MAX_EVENTS_PER_SOURCE};
pub use odds::synthesize;
pub use orchestrator::{collect, collect_with_report, SourceReport, SourceStatus};
pub use raw::RawPayload;
pub use status::map_phase;
