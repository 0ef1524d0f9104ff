//! Raw payload -> canonical event mapping

use crate::domain::{CanonicalEvent, Odds, Score};
use crate::feed::odds;
use crate::feed::raw::{ApiFootballFixture, RawOdds, RawPayload};
use crate::feed::status::map_phase;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_HOME_TEAM: &str = "Home Team";
pub const DEFAULT_AWAY_TEAM: &str = "Away Team";
pub const DEFAULT_LEAGUE: &str = "Unknown League";
pub const DEFAULT_SPORT: &str = "football";

/// Upper bound on events taken from a single provider response
pub const MAX_EVENTS_PER_SOURCE: usize = 10;

/// Map one raw payload into a canonical event. Never fails.
pub fn normalize(payload: RawPayload, provenance: &str) -> CanonicalEvent {
    match payload {
        RawPayload::ApiFootball(fixture) => normalize_api_football(fixture, provenance),
    }
}

/// Normalize the entries of a provider `response` array.
///
/// Entries that are not objects are skipped with a debug log; at most `cap`
/// events are produced.
pub fn normalize_batch(records: Vec<Value>, provenance: &str, cap: usize) -> Vec<CanonicalEvent> {
    let total = records.len();
    let events: Vec<CanonicalEvent> = records
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| {
            let payload = RawPayload::api_football(value);
            if payload.is_none() {
                debug!(source = %provenance, index = idx, "skipping malformed record");
            }
            payload
        })
        .take(cap)
        .map(|payload| normalize(payload, provenance))
        .collect();

    if total > events.len() {
        debug!(
            source = %provenance,
            received = total,
            kept = events.len(),
            "response truncated or records skipped"
        );
    }
    events
}

fn normalize_api_football(fixture: ApiFootballFixture, provenance: &str) -> CanonicalEvent {
    let info = fixture.fixture.unwrap_or_default();
    let status = info.status.unwrap_or_default();
    let teams = fixture.teams.unwrap_or_default();
    let goals = fixture.goals.unwrap_or_default();

    let native_id = info
        .id
        .and_then(|id| id.to_id_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let (phase, clock) = map_phase(status.short.as_deref(), status.elapsed);

    let (odds, odds_synthesized) = match fixture.odds.and_then(native_odds) {
        Some(odds) => (odds, false),
        None => (odds::synthesize(), true),
    };

    CanonicalEvent {
        id: format!("{provenance}-{native_id}"),
        home_team: name_or(teams.home.and_then(|t| t.name), DEFAULT_HOME_TEAM),
        away_team: name_or(teams.away.and_then(|t| t.name), DEFAULT_AWAY_TEAM),
        league: name_or(fixture.league.and_then(|l| l.name), DEFAULT_LEAGUE),
        sport: name_or(fixture.sport, DEFAULT_SPORT),
        phase,
        clock,
        score: Score {
            home: goals.home.unwrap_or(0),
            away: goals.away.unwrap_or(0),
        },
        odds,
        odds_synthesized,
        source: provenance.to_string(),
    }
}

/// Provider odds are used only when the whole triple is present and valid
fn native_odds(raw: RawOdds) -> Option<Odds> {
    Odds::new(raw.home?, raw.away?, raw.draw?)
}

/// Present names pass through verbatim; missing or blank ones take the default
fn name_or(name: Option<String>, default: &str) -> String {
    name.filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
