use serde::{Deserialize, Serialize};

/// Canonical match phase, independent of any provider's status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    FirstHalf,
    HalfTime,
    SecondHalf,
    ExtraTime,
    BreakTime,
    Penalties,
    Suspended,
    Interrupted,
    /// In play, but the provider's code carried no more specific phase
    InPlay,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::FirstHalf => "first_half",
            Phase::HalfTime => "half_time",
            Phase::SecondHalf => "second_half",
            Phase::ExtraTime => "extra_time",
            Phase::BreakTime => "break_time",
            Phase::Penalties => "penalties",
            Phase::Suspended => "suspended",
            Phase::Interrupted => "interrupted",
            Phase::InPlay => "in_play",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

/// Decimal odds triple for a 1X2 market
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Odds {
    pub home: f64,
    pub away: f64,
    pub draw: f64,
}

impl Odds {
    /// Build an odds triple, rejecting values that are not finite decimal odds above 1.0
    pub fn new(home: f64, away: f64, draw: f64) -> Option<Self> {
        let odds = Self { home, away, draw };
        odds.is_valid().then_some(odds)
    }

    pub fn is_valid(&self) -> bool {
        [self.home, self.away, self.draw]
            .iter()
            .all(|v| v.is_finite() && *v > 1.0)
    }
}

/// A live match normalized from any upstream provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// `{provenance}-{provider id}`
    pub id: String,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub sport: String,
    pub phase: Phase,
    /// Elapsed-time display, e.g. `55'` or `Half Time`
    pub clock: String,
    pub score: Score,
    pub odds: Odds,
    /// True when `odds` are placeholders rather than provider market data
    pub odds_synthesized: bool,
    /// Tag of the upstream client that produced this event
    pub source: String,
}

impl CanonicalEvent {
    /// Case-normalized team pairing used to collapse duplicate reports of one match.
    ///
    /// The separator is a control character so that distinct pairs like ("ab", "c") and
    /// ("a", "bc") never collide.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}\u{1f}{}",
            self.home_team.trim().to_lowercase(),
            self.away_team.trim().to_lowercase()
        )
    }

    pub fn matchup(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }
}
