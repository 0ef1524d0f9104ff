use crate::domain::CanonicalEvent;
use std::collections::HashSet;
use tracing::debug;

/// Drop every event whose team pairing was already seen.
///
/// First occurrence wins and nothing is merged from later duplicates, so the
/// input order decides which provider's record survives.
pub fn dedupe(events: Vec<CanonicalEvent>) -> Vec<CanonicalEvent> {
    let mut seen = HashSet::with_capacity(events.len());
    events
        .into_iter()
        .filter(|event| {
            let fresh = seen.insert(event.dedup_key());
            if !fresh {
                debug!(
                    id = %event.id,
                    source = %event.source,
                    matchup = %event.matchup(),
                    "dropping duplicate event"
                );
            }
            fresh
        })
        .collect()
}
