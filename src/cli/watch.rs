//! Polling loop behind `kickfeed watch`

use crate::domain::CanonicalEvent;
use crate::feed::LiveAggregator;
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// Run aggregation passes every `interval` until `shutdown` resolves.
///
/// Shutdown is observed while waiting for the next tick and while a pass is in flight,
/// so a slow upstream never delays exit. Returns the number of completed passes.
pub async fn watch<F, S>(
    aggregator: &LiveAggregator,
    interval: Duration,
    shutdown: F,
    mut on_pass: S,
) -> anyhow::Result<usize>
where
    F: Future<Output = ()>,
    S: FnMut(&[CanonicalEvent]) -> anyhow::Result<()>,
{
    let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut passes = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = ticker.tick() => {}
        }

        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown during aggregation pass, abandoning it");
                break;
            }
            events = aggregator.get_live_matches() => {
                on_pass(&events)?;
                passes += 1;
            }
        }
    }

    Ok(passes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Odds, Phase, Score};
    use crate::feed::{FetchOutcome, UpstreamClient};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Instant;

    struct DelayedClient {
        delay: Duration,
    }

    #[async_trait]
    impl UpstreamClient for DelayedClient {
        fn source(&self) -> &str {
            "delayed"
        }

        async fn fetch(&self) -> FetchOutcome {
            tokio::time::sleep(self.delay).await;
            FetchOutcome::Fetched(vec![CanonicalEvent {
                id: "delayed-1".to_string(),
                home_team: "Ajax".to_string(),
                away_team: "PSV".to_string(),
                league: "Eredivisie".to_string(),
                sport: "football".to_string(),
                phase: Phase::FirstHalf,
                clock: "10'".to_string(),
                score: Score::default(),
                odds: Odds {
                    home: 2.0,
                    away: 3.0,
                    draw: 3.2,
                },
                odds_synthesized: false,
                source: "delayed".to_string(),
            }])
        }
    }

    fn aggregator(delay: Duration) -> LiveAggregator {
        LiveAggregator::new(vec![Arc::new(DelayedClient { delay })])
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_in_flight_pass() {
        let aggregator = aggregator(Duration::from_secs(10));
        let started = Instant::now();

        let passes = watch(
            &aggregator,
            Duration::from_secs(30),
            tokio::time::sleep(Duration::from_millis(50)),
            |_| Ok(()),
        )
        .await
        .unwrap();

        assert_eq!(passes, 0);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_passes_repeat_until_shutdown() {
        let aggregator = aggregator(Duration::ZERO);
        let mut seen = Vec::new();

        let passes = watch(
            &aggregator,
            Duration::from_millis(20),
            tokio::time::sleep(Duration::from_millis(150)),
            |events| {
                seen.push(events.len());
                Ok(())
            },
        )
        .await
        .unwrap();

        assert!(passes >= 2);
        assert_eq!(seen.len(), passes);
        assert!(seen.iter().all(|n| *n == 1));
    }

    #[tokio::test]
    async fn test_output_error_stops_watch() {
        let aggregator = aggregator(Duration::ZERO);

        let result = watch(
            &aggregator,
            Duration::from_millis(10),
            std::future::pending(),
            |_| anyhow::bail!("stdout closed"),
        )
        .await;

        assert!(result.is_err());
    }
}
