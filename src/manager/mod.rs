// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Holiday cache manager
//!
//! Decides when the persisted cache satisfies a request and when years must be
//! refilled from the remote source. Three entry points exist:
//!
//! - [`HolidayCacheManager::get_holidays`] for on-demand lookups, which keeps
//!   the previous, current and next real-world year warm alongside the
//!   requested one;
//! - [`HolidayCacheManager::refresh_if_year_boundary`], a scheduled check that
//!   only acts on January 1st;
//! - [`HolidayCacheManager::ensure_initial_population`], run once at startup.
//!
//! All three hold a single writer lock for their whole read-merge-write cycle.


use chrono::Datelike;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::clock::Clock;
use crate::error::Result;
use crate::holidays::{HolidayCache, HolidaySource, YearStatus};
use crate::metrics::MetricsRegistry;
use crate::store::CacheStore;

/// What a refill pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Years fetched and merged into the cache
    pub fetched: Vec<i32>,
    /// Years whose remote fetch failed; left untouched in the cache
    pub failed: Vec<i32>,
    /// Whether the cache was written to the store
    pub persisted: bool,
}

impl RefreshOutcome {
    /// True when no remote fetch was attempted
    pub fn is_noop(&self) -> bool {
        self.fetched.is_empty() && self.failed.is_empty()
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    cache: HolidayCache,
    /// Set when the last flush failed; the store is stale until the next one succeeds
    dirty: bool,
}

/// Owner of the holiday cache
pub struct HolidayCacheManager {
    store: Arc<dyn CacheStore>,
    source: Arc<dyn HolidaySource>,
    clock: Arc<dyn Clock>,
    metrics: MetricsRegistry,
    write_lock: Mutex<()>,
    memory: RwLock<MemoryState>,
}

impl HolidayCacheManager {
    #[must_use]
    pub fn new(
        store: Arc<dyn CacheStore>,
        source: Arc<dyn HolidaySource>,
        clock: Arc<dyn Clock>,
        metrics: MetricsRegistry,
    ) -> Self {
        Self {
            store,
            source,
            clock,
            metrics,
            write_lock: Mutex::new(()),
            memory: RwLock::new(MemoryState::default()),
        }
    }

    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Returns the full cache after making sure `year` and the rolling window
    /// around the current year are present
    ///
    /// Years whose remote fetch fails are left as they were; the call still
    /// succeeds for the others. A failed store write is logged and the merged
    /// cache is returned anyway.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AppError::CacheRead`] if the persisted cache exists but
    /// cannot be read.
    pub async fn get_holidays(&self, year: i32, force_refresh: bool) -> Result<HolidayCache> {
        let _guard = self.write_lock.lock().await;

        let mut cache = self.load_current().await?;
        let years = years_of_interest(self.clock.current_year(), Some(year));

        if !force_refresh && cache.contains_year(year) {
            tracing::debug!("Holidays for {} found in cache", year);
        } else {
            tracing::info!(
                "Refilling holidays around {} (force refresh: {})",
                year,
                force_refresh
            );
        }

        let mut outcome = self.fill(&mut cache, &years, force_refresh).await;
        outcome.persisted = self.commit(&cache, !outcome.fetched.is_empty()).await;

        if !outcome.failed.is_empty() {
            tracing::warn!(
                "Holiday lookup for {} left years {:?} unfilled",
                year,
                outcome.failed
            );
        }

        Ok(cache)
    }

    /// Fills gaps for the current and next year, but only on January 1st
    ///
    /// Never fails: an unreadable store is treated as empty and remote
    /// failures are logged per year.
    pub async fn refresh_if_year_boundary(&self) -> RefreshOutcome {
        let today = self.clock.today();
        if today.month() != 1 || today.day() != 1 {
            tracing::trace!("{} is not a year boundary, skipping holiday refresh", today);
            return RefreshOutcome::default();
        }

        tracing::info!("January 1st: checking holiday data for {}", today.year());
        let _guard = self.write_lock.lock().await;

        let mut cache = match self.load_current().await {
            Ok(cache) => cache,
            Err(e) => {
                tracing::warn!("Failed to read holiday cache, starting empty: {}", e);
                HolidayCache::new()
            }
        };

        let years: BTreeSet<i32> = [today.year(), today.year() + 1].into();
        let mut outcome = self.fill(&mut cache, &years, false).await;
        outcome.persisted = self.commit(&cache, !outcome.fetched.is_empty()).await;

        if outcome.fetched.is_empty() && outcome.failed.is_empty() {
            tracing::info!("Holiday data already up to date");
        }
        outcome
    }

    /// Creates the persisted cache with the rolling window if none exists yet
    ///
    /// The cache is written even when some years fail; those years stay
    /// absent. An existing cache, however old, is left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot tell whether a cache exists.
    pub async fn ensure_initial_population(&self) -> Result<RefreshOutcome> {
        let _guard = self.write_lock.lock().await;

        if self.store.exists().await? {
            tracing::info!("Holiday cache already exists, no initial fetch needed");
            match self.store.load().await {
                Ok(cache) => {
                    self.commit(&cache, false).await;
                }
                Err(e) => tracing::warn!("Existing holiday cache is unreadable: {}", e),
            }
            return Ok(RefreshOutcome::default());
        }

        let current = self.clock.current_year();
        tracing::info!(
            "Holiday cache not found, fetching {}..={}",
            current - 1,
            current + 1
        );

        let mut cache = HolidayCache::new();
        let years = years_of_interest(current, None);
        let mut outcome = self.fill(&mut cache, &years, true).await;
        outcome.persisted = self.commit(&cache, true).await;
        Ok(outcome)
    }

    /// Years currently held in memory, ascending
    pub async fn cached_years(&self) -> Vec<i32> {
        self.memory.read().await.cache.years().collect()
    }

    /// Reads the store, unless memory holds data the store failed to receive
    async fn load_current(&self) -> Result<HolidayCache> {
        {
            let memory = self.memory.read().await;
            if memory.dirty {
                tracing::debug!("Store is stale, serving holiday cache from memory");
                return Ok(memory.cache.clone());
            }
        }
        self.store.load().await
    }

    async fn fill(
        &self,
        cache: &mut HolidayCache,
        years: &BTreeSet<i32>,
        force_refresh: bool,
    ) -> RefreshOutcome {
        let mut outcome = RefreshOutcome::default();

        for &year in years {
            let status = cache.status(year);
            if !force_refresh && status != YearStatus::Missing {
                tracing::trace!("Holidays for {} cached ({:?})", year, status);
                continue;
            }

            tracing::debug!("Fetching holidays for {}", year);
            let start = std::time::Instant::now();
            match self.source.fetch_year(year).await {
                Ok(bucket) => {
                    self.metrics
                        .record_fetch_success(year, start.elapsed().as_secs_f64());
                    tracing::debug!("Caching {} holiday record(s) for {}", bucket.len(), year);
                    cache.insert(year, bucket);
                    outcome.fetched.push(year);
                }
                Err(e) => {
                    self.metrics
                        .record_fetch_error(year, start.elapsed().as_secs_f64());
                    tracing::warn!("Failed to fetch holidays for {}: {}", year, e);
                    outcome.failed.push(year);
                }
            }
        }

        outcome
    }

    /// Publishes `cache` to memory and, when `changed`, to the store
    ///
    /// Returns whether the store was written.
    async fn commit(&self, cache: &HolidayCache, changed: bool) -> bool {
        let mut persisted = false;
        let mut dirty = self.memory.read().await.dirty;

        if changed {
            match self.store.flush(cache).await {
                Ok(()) => {
                    self.metrics.record_store_write();
                    tracing::info!("Holiday cache saved ({} year(s))", cache.len());
                    persisted = true;
                    dirty = false;
                }
                Err(e) => {
                    self.metrics.record_store_write_error();
                    tracing::error!("Failed to save holiday cache: {}", e);
                    dirty = true;
                }
            }
        }

        let mut memory = self.memory.write().await;
        memory.cache = cache.clone();
        memory.dirty = dirty;
        self.metrics.update_cache_stats(&memory.cache);

        persisted
    }
}

/// `{current - 1, current, current + 1}` plus the requested year, ascending
pub(crate) fn years_of_interest(current: i32, requested: Option<i32>) -> BTreeSet<i32> {
    let mut years: BTreeSet<i32> = [current - 1, current, current + 1].into();
    years.extend(requested);
    years
}
