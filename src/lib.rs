pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod logging;

pub use config::AppConfig;
pub use domain::{CanonicalEvent, Odds, Phase, Score};
pub use error::{FeedError, Result};
pub use feed::{AggregationReport, FetchOutcome, FixtureQuery, LiveAggregator, UpstreamClient};
