//! Provider status code mapping
//!
//! Converts API-Football style short codes (`1H`, `HT`, `2H`, ...) into a
//! canonical [`Phase`] plus the clock string shown to consumers.

use crate::domain::Phase;

/// Nominal length of the first half; second-half minutes are offset by it.
pub const HALF_DURATION_MINS: u32 = 45;

/// How a status code renders its clock
enum Clock {
    /// Running minutes, offset from kickoff of the match
    Minutes { offset: u32 },
    Fixed(&'static str),
}

const STATUS_TABLE: &[(&str, Phase, Clock)] = &[
    ("1H", Phase::FirstHalf, Clock::Minutes { offset: 0 }),
    (
        "2H",
        Phase::SecondHalf,
        Clock::Minutes {
            offset: HALF_DURATION_MINS,
        },
    ),
    ("HT", Phase::HalfTime, Clock::Fixed("Half Time")),
    ("ET", Phase::ExtraTime, Clock::Fixed("Extra Time")),
    ("BT", Phase::BreakTime, Clock::Fixed("Break Time")),
    ("P", Phase::Penalties, Clock::Fixed("Penalties")),
    ("SUSP", Phase::Suspended, Clock::Fixed("Suspended")),
    ("INT", Phase::Interrupted, Clock::Fixed("Interrupted")),
];

/// Map a provider status code and elapsed minutes to a canonical phase and display string.
///
/// Total: unknown or missing codes fall back to [`Phase::InPlay`] with a minutes display,
/// and a missing elapsed value counts as zero.
pub fn map_phase(code: Option<&str>, elapsed_mins: Option<u32>) -> (Phase, String) {
    let elapsed = elapsed_mins.unwrap_or(0);
    let code = code.map(str::trim).unwrap_or_default();

    let entry = STATUS_TABLE
        .iter()
        .find(|(short, _, _)| short.eq_ignore_ascii_case(code));

    match entry {
        Some((_, phase, Clock::Minutes { offset })) => {
            (*phase, minutes_display(offset.saturating_add(elapsed)))
        }
        Some((_, phase, Clock::Fixed(label))) => (*phase, (*label).to_string()),
        None => (Phase::InPlay, minutes_display(elapsed)),
    }
}

fn minutes_display(mins: u32) -> String {
    format!("{mins}'")
}

/// Pipe-delimited list of every in-play code, as sent in status-filtered queries.
pub fn in_play_status_filter() -> String {
    STATUS_TABLE
        .iter()
        .map(|(short, _, _)| *short)
        .chain(std::iter::once("LIVE"))
        .collect::<Vec<_>>()
        .join("|")
}
