//! Raw provider payloads
//!
//! Every field is optional and deserialized leniently: a sub-field with the wrong
//! JSON type becomes `None` instead of failing the whole record, so the
//! normalizer can substitute a default for it.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// A single match as reported by one provider, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    ApiFootball(ApiFootballFixture),
}

impl RawPayload {
    /// Parse one entry of an API-Football `response` array.
    ///
    /// Returns `None` only when the entry is not a JSON object; anything
    /// object-shaped is accepted and missing pieces are defaulted later.
    pub fn api_football(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        ApiFootballFixture::deserialize(value)
            .ok()
            .map(RawPayload::ApiFootball)
    }
}

/// Deserialize a field, mapping any type mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Provider-native fixture id; some feeds send numbers, some strings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NativeId {
    Number(u64),
    Text(String),
}

impl NativeId {
    /// String form, or `None` for a blank text id
    pub fn to_id_string(&self) -> Option<String> {
        match self {
            NativeId::Number(n) => Some(n.to_string()),
            NativeId::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApiFootballFixture {
    #[serde(default, deserialize_with = "lenient")]
    pub fixture: Option<FixtureInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub league: Option<LeagueInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub teams: Option<Teams>,
    #[serde(default, deserialize_with = "lenient")]
    pub goals: Option<Goals>,
    /// Decimal 1X2 odds, when the feed bundles them
    #[serde(default, deserialize_with = "lenient")]
    pub odds: Option<RawOdds>,
    #[serde(default, deserialize_with = "lenient")]
    pub sport: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FixtureInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<NativeId>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<FixtureStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FixtureStatus {
    #[serde(default, deserialize_with = "lenient")]
    pub short: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub elapsed: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LeagueInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Teams {
    #[serde(default, deserialize_with = "lenient")]
    pub home: Option<TeamInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub away: Option<TeamInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TeamInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Goals {
    #[serde(default, deserialize_with = "lenient")]
    pub home: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub away: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawOdds {
    #[serde(default, deserialize_with = "lenient")]
    pub home: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub away: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub draw: Option<f64>,
}
