//! Output formatting for CLI commands.
//!
//! Supports two modes: human-readable tables (default) and JSON (--json).

use crate::domain::CanonicalEvent;
use crate::feed::{AggregationReport, SourceReport, SourceStatus};
use serde::Serialize;
use tabled::{Table, Tabled};

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Table,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Table
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct EventRow {
    pub league: String,
    pub matchup: String,
    pub score: String,
    pub clock: String,
    pub odds: String,
    pub source: String,
}

impl From<&CanonicalEvent> for EventRow {
    fn from(event: &CanonicalEvent) -> Self {
        let marker = if event.odds_synthesized { "*" } else { "" };
        Self {
            league: event.league.clone(),
            matchup: event.matchup(),
            score: format!("{}-{}", event.score.home, event.score.away),
            clock: event.clock.clone(),
            odds: format!(
                "{:.2} / {:.2} / {:.2}{marker}",
                event.odds.home, event.odds.draw, event.odds.away
            ),
            source: event.source.clone(),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
pub struct SourceRow {
    pub source: String,
    pub status: String,
    pub elapsed_ms: u64,
}

impl From<&SourceReport> for SourceRow {
    fn from(report: &SourceReport) -> Self {
        let status = match &report.status {
            SourceStatus::Fetched(n) => format!("ok ({n} events)"),
            SourceStatus::Failed(reason) => format!("failed: {reason}"),
        };
        Self {
            source: report.source.clone(),
            status,
            elapsed_ms: report.elapsed_ms,
        }
    }
}

/// Render events in the chosen mode. JSON keeps the full canonical shape.
pub fn render_events(events: &[CanonicalEvent], mode: OutputMode) -> anyhow::Result<String> {
    match mode {
        OutputMode::Table => {
            if events.is_empty() {
                return Ok("(no live matches)".to_string());
            }
            let rows: Vec<EventRow> = events.iter().map(EventRow::from).collect();
            Ok(format!("{}\n* placeholder odds", Table::new(rows)))
        }
        OutputMode::Json => Ok(serde_json::to_string_pretty(events)?),
    }
}

pub fn render_sources(reports: &[SourceReport], mode: OutputMode) -> anyhow::Result<String> {
    match mode {
        OutputMode::Table => {
            let rows: Vec<SourceRow> = reports.iter().map(SourceRow::from).collect();
            Ok(Table::new(rows).to_string())
        }
        OutputMode::Json => Ok(serde_json::to_string_pretty(reports)?),
    }
}

#[derive(Serialize)]
struct LiveSnapshot<'a> {
    events: &'a [CanonicalEvent],
    sources: &'a [SourceReport],
    duplicates_dropped: usize,
}

/// Complete output of one `live` pass.
///
/// JSON mode always yields a single document: the event array, or an object carrying
/// the events and the source report together.
pub fn render_live(
    events: &[CanonicalEvent],
    report: Option<&AggregationReport>,
    mode: OutputMode,
) -> anyhow::Result<String> {
    match (mode, report) {
        (_, None) => render_events(events, mode),
        (OutputMode::Json, Some(report)) => Ok(serde_json::to_string_pretty(&LiveSnapshot {
            events,
            sources: &report.sources,
            duplicates_dropped: report.duplicates_dropped,
        })?),
        (OutputMode::Table, Some(report)) => Ok(format!(
            "{}\n{}\nduplicates dropped: {}",
            render_events(events, mode)?,
            render_sources(&report.sources, mode)?,
            report.duplicates_dropped
        )),
    }
}
