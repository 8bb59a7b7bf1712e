//! Background holiday refresh
//!
//! Populates the cache once at startup, then runs the year-boundary check
//! immediately and on every tick of the refresh interval.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::manager::HolidayCacheManager;

/// Starts the background refresh loop
///
/// Failures are logged and never stop the loop. Sending `true` on the
/// shutdown channel (or dropping its sender) ends the task, abandoning an
/// initial population still in progress.
pub fn start_refresh_loop(
    mut shutdown_rx: watch::Receiver<bool>,
    manager: Arc<HolidayCacheManager>,
    interval: Duration,
) -> JoinHandle<()> {
    tracing::info!(
        "Starting holiday refresh loop every {}s",
        interval.as_secs()
    );

    tokio::spawn(async move {
        let initial = tokio::select! {
            result = manager.ensure_initial_population() => result,
            _ = shutdown_rx.wait_for(|stop| *stop) => {
                tracing::info!("Stopping holiday refresh loop during initial population");
                return;
            }
        };
        match initial {
            Ok(outcome) if !outcome.is_noop() => tracing::info!(
                "Initial holiday population: fetched {:?}, failed {:?}",
                outcome.fetched,
                outcome.failed
            ),
            Ok(_) => {}
            Err(e) => tracing::warn!("Initial holiday population failed: {}", e),
        }

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {},
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        tracing::info!("Stopping holiday refresh loop");
                        break;
                    }
                    continue;
                }
            }

            let outcome = manager.refresh_if_year_boundary().await;
            manager.metrics().record_refresh_cycle();
            if !outcome.failed.is_empty() {
                tracing::warn!(
                    "Year-boundary refresh could not fetch {:?}",
                    outcome.failed
                );
            }
            tracing::debug!(
                "Refresh cycle done (fetched {:?}, persisted: {})",
                outcome.fetched,
                outcome.persisted
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::harness;
    use chrono::NaiveDate;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    #[tokio::test(start_paused = true)]
    async fn test_startup_populates_missing_store() {
        let h = harness(2026, 1, 1);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = start_refresh_loop(shutdown_rx, h.manager.clone(), DAY);
        tokio::time::sleep(Duration::from_millis(10)).await;

        // Initial population covers 2025..=2027, so the Jan 1 check finds no gaps
        assert_eq!(h.source.calls(), vec![2025, 2026, 2027]);
        assert_eq!(h.store.write_count(), 1);

        let _ = shutdown_tx.send(true);
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_boundary_check_runs_on_each_tick() {
        let h = harness(2025, 12, 31);
        h.manager.get_holidays(2025, false).await.unwrap();
        let calls_before = h.source.calls().len();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = start_refresh_loop(shutdown_rx, h.manager.clone(), DAY);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(h.source.calls().len(), calls_before, "Dec 31 is a no-op");

        h.clock.set(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        tokio::time::sleep(DAY + Duration::from_millis(10)).await;

        assert_eq!(h.source.calls_for(2027), 1);
        assert!(h.manager.cached_years().await.contains(&2027));

        let _ = shutdown_tx.send(true);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_loop_respects_shutdown_signal() {
        let h = harness(2025, 6, 15);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = start_refresh_loop(shutdown_rx, h.manager.clone(), DAY);
        let _ = shutdown_tx.send(true);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop should stop")
            .unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_interrupts_initial_population() {
        let h = harness(2025, 6, 15);
        h.source.hang(2024);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = start_refresh_loop(shutdown_rx, h.manager.clone(), DAY);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(h.source.calls(), vec![2024], "population is stuck on 2024");

        let _ = shutdown_tx.send(true);
        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop should stop")
            .unwrap();

        assert_eq!(h.store.write_count(), 0);
        // Writer lock was released with the abandoned population
        h.source.release(2024);
        h.manager.get_holidays(2025, false).await.unwrap();
    }

    #[tokio::test]
    async fn test_loop_stops_when_sender_dropped() {
        let h = harness(2025, 6, 15);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = start_refresh_loop(shutdown_rx, h.manager.clone(), DAY);
        drop(shutdown_tx);

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("loop should stop")
            .unwrap();
    }
}
