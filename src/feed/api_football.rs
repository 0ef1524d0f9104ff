//! API-Football fixtures client
//!
//! One client per configured query shape: all live fixtures, today's fixtures
//! filtered to in-play statuses, or live fixtures of a single league.

use crate::config::ProviderConfig;
use crate::domain::CanonicalEvent;
use crate::error::{FeedError, Result};
use crate::feed::client::{FetchOutcome, UpstreamClient};
use crate::feed::normalize::normalize_batch;
use crate::feed::status::in_play_status_filter;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const SOURCE_PREFIX: &str = "api-football";

/// Which fixtures a client asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixtureQuery {
    /// `live=all`
    Live,
    /// Today's fixtures whose status is any in-play code
    #[serde(rename = "today")]
    TodayInPlay,
    /// Live fixtures of one league and season
    League { league_id: u64, season: u32 },
}

impl FixtureQuery {
    pub fn source_tag(&self) -> String {
        match self {
            FixtureQuery::Live => format!("{SOURCE_PREFIX}-live"),
            FixtureQuery::TodayInPlay => format!("{SOURCE_PREFIX}-today"),
            FixtureQuery::League { league_id, .. } => {
                format!("{SOURCE_PREFIX}-league-{league_id}")
            }
        }
    }

    /// Query string for the given UTC calendar date
    pub fn params(&self, today: NaiveDate) -> Vec<(&'static str, String)> {
        match self {
            FixtureQuery::Live => vec![("live", "all".to_string())],
            FixtureQuery::TodayInPlay => vec![
                ("date", today.format("%Y-%m-%d").to_string()),
                ("status", in_play_status_filter()),
            ],
            FixtureQuery::League { league_id, season } => vec![
                ("league", league_id.to_string()),
                ("season", season.to_string()),
                ("live", "all".to_string()),
            ],
        }
    }
}

impl std::fmt::Display for FixtureQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureQuery::Live => write!(f, "live"),
            FixtureQuery::TodayInPlay => write!(f, "today (in play)"),
            FixtureQuery::League { league_id, season } => {
                write!(f, "league {league_id} season {season}")
            }
        }
    }
}

/// Response envelope; `response` is required, its entries are parsed one by one
#[derive(Debug, Deserialize)]
struct FixturesResponse {
    response: Vec<Value>,
    #[serde(default)]
    errors: Value,
}

impl FixturesResponse {
    /// API-Football reports bad keys and quota issues in `errors` with a 200 status
    fn provider_errors(&self) -> Option<String> {
        let has_errors = match &self.errors {
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::Null => false,
            _ => true,
        };
        has_errors.then(|| self.errors.to_string())
    }
}

/// HTTP client for one API-Football fixtures query
pub struct ApiFootballClient {
    http: Client,
    base_url: String,
    api_key: String,
    api_host: String,
    timeout: Duration,
    max_events: usize,
    query: FixtureQuery,
    source: String,
}

impl ApiFootballClient {
    pub fn new(http: Client, provider: &ProviderConfig, query: FixtureQuery) -> Self {
        Self {
            http,
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            api_key: provider.api_key.clone(),
            api_host: provider.api_host.clone(),
            timeout: Duration::from_secs(provider.timeout_secs),
            max_events: provider.max_events_per_source,
            source: query.source_tag(),
            query,
        }
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn request(&self) -> Result<Vec<CanonicalEvent>> {
        let url = format!("{}/fixtures", self.base_url);
        let params = self.query.params(Utc::now().date_naive());
        let started = Instant::now();
        let elapsed_ms = || started.elapsed().as_millis() as u64;

        debug!(source = %self.source, url = %url, ?params, "fetching fixtures");

        let response = self
            .http
            .get(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.api_host)
            .query(&params)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| FeedError::from_request(e, elapsed_ms()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FeedError::from_request(e, elapsed_ms()))?;
        let body: FixturesResponse = serde_json::from_slice(&bytes)?;

        if let Some(errors) = body.provider_errors() {
            return Err(FeedError::InvalidPayload(format!(
                "provider reported errors: {errors}"
            )));
        }

        Ok(normalize_batch(body.response, &self.source, self.max_events))
    }
}

#[async_trait]
impl UpstreamClient for ApiFootballClient {
    fn source(&self) -> &str {
        &self.source
    }

    async fn fetch(&self) -> FetchOutcome {
        match self.request().await {
            Ok(events) => {
                debug!(source = %self.source, count = events.len(), "fixtures fetched");
                FetchOutcome::Fetched(events)
            }
            Err(e) => {
                warn!(source = %self.source, error = %e, "upstream fetch failed");
                FetchOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn provider(base_url: &str) -> ProviderConfig {
        ProviderConfig {
            base_url: base_url.to_string(),
            api_key: "test-key".to_string(),
            api_host: "v3.football.api-sports.io".to_string(),
            timeout_secs: 8,
            max_events_per_source: 10,
        }
    }

    fn fixture(id: u64, home: &str, away: &str) -> Value {
        json!({
            "fixture": { "id": id, "status": { "short": "1H", "elapsed": 20 } },
            "league": { "id": 2, "name": "UEFA Champions League" },
            "teams": { "home": { "name": home }, "away": { "name": away } },
            "goals": { "home": 0, "away": 0 }
        })
    }

    #[test]
    fn test_query_params() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

        assert_eq!(
            FixtureQuery::Live.params(date),
            vec![("live", "all".to_string())]
        );
        assert_eq!(
            FixtureQuery::TodayInPlay.params(date),
            vec![
                ("date", "2026-10-18".to_string()),
                ("status", "1H|2H|HT|ET|BT|P|SUSP|INT|LIVE".to_string()),
            ]
        );
        assert_eq!(
            FixtureQuery::League {
                league_id: 39,
                season: 2026
            }
            .params(date),
            vec![
                ("league", "39".to_string()),
                ("season", "2026".to_string()),
                ("live", "all".to_string()),
            ]
        );
    }

    #[test]
    fn test_source_tags() {
        assert_eq!(FixtureQuery::Live.source_tag(), "api-football-live");
        assert_eq!(FixtureQuery::TodayInPlay.source_tag(), "api-football-today");
        assert_eq!(
            FixtureQuery::League {
                league_id: 140,
                season: 2026
            }
            .source_tag(),
            "api-football-league-140"
        );
    }

    #[test]
    fn test_query_deserializes_from_config_shape() {
        let queries: Vec<FixtureQuery> = serde_json::from_value(json!([
            { "kind": "live" },
            { "kind": "today" },
            { "kind": "league", "league_id": 2, "season": 2026 }
        ]))
        .unwrap();

        assert_eq!(
            queries,
            vec![
                FixtureQuery::Live,
                FixtureQuery::TodayInPlay,
                FixtureQuery::League {
                    league_id: 2,
                    season: 2026
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_live_sends_headers_and_normalizes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/fixtures")
            .match_query(Matcher::UrlEncoded("live".into(), "all".into()))
            .match_header("x-rapidapi-key", "test-key")
            .match_header("x-rapidapi-host", "v3.football.api-sports.io")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "errors": [],
                    "response": [fixture(77, "Club Brugge", "Aston Villa")]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let client =
            ApiFootballClient::new(Client::new(), &provider(&server.url()), FixtureQuery::Live);
        let events = match client.fetch().await {
            FetchOutcome::Fetched(events) => events,
            FetchOutcome::Failed(e) => panic!("unexpected failure: {e}"),
        };

        mock.assert_async().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "api-football-live-77");
        assert_eq!(events[0].home_team, "Club Brugge");
        assert_eq!(events[0].clock, "20'");
        assert!(events[0].odds_synthesized);
    }

    #[tokio::test]
    async fn test_fetch_caps_large_responses() {
        let mut server = mockito::Server::new_async().await;
        let records: Vec<Value> = (0..15)
            .map(|i| fixture(i, &format!("Home {i}"), &format!("Away {i}")))
            .collect();
        let _mock = server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({ "response": records }).to_string())
            .create_async()
            .await;

        let client =
            ApiFootballClient::new(Client::new(), &provider(&server.url()), FixtureQuery::Live);
        let outcome = client.fetch().await;

        assert!(!outcome.is_failed());
        assert_eq!(outcome.event_count(), 10);
    }

    #[tokio::test]
    async fn test_non_success_status_is_absorbed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let client =
            ApiFootballClient::new(Client::new(), &provider(&server.url()), FixtureQuery::Live);

        match client.fetch().await {
            FetchOutcome::Failed(e) => assert!(e.is_auth_rejected()),
            FetchOutcome::Fetched(_) => panic!("403 should fail the call"),
        }
    }

    #[tokio::test]
    async fn test_provider_errors_block_is_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({ "errors": { "token": "Error/Missing application key" }, "response": [] })
                    .to_string(),
            )
            .create_async()
            .await;

        let client =
            ApiFootballClient::new(Client::new(), &provider(&server.url()), FixtureQuery::Live);
        assert!(client.fetch().await.is_failed());
    }

    #[tokio::test]
    async fn test_unparseable_body_is_absorbed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let client =
            ApiFootballClient::new(Client::new(), &provider(&server.url()), FixtureQuery::Live);
        match client.fetch().await {
            FetchOutcome::Failed(FeedError::Json(_)) => {}
            other => panic!("expected JSON failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_response_is_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(json!({ "response": [] }).to_string())
            .create_async()
            .await;

        let client =
            ApiFootballClient::new(Client::new(), &provider(&server.url()), FixtureQuery::Live);
        let outcome = client.fetch().await;
        assert!(!outcome.is_failed());
        assert_eq!(outcome.event_count(), 0);
    }

    #[tokio::test]
    async fn test_connection_refused_is_absorbed() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiFootballClient::new(
            Client::new(),
            &provider(&format!("http://{addr}")),
            FixtureQuery::Live,
        );
        assert!(client.fetch().await.is_failed());
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the connection without ever answering.
            if let Ok((socket, _)) = listener.accept().await {
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(socket);
            }
        });

        let client = ApiFootballClient::new(
            Client::new(),
            &provider(&format!("http://{addr}")),
            FixtureQuery::Live,
        )
        .with_timeout(Duration::from_millis(200));

        match client.fetch().await {
            FetchOutcome::Failed(FeedError::Timeout { .. }) => {}
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
