// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Recording and encoding helpers

use crate::holidays::HolidayCache;
use crate::metrics::labels::YearLabels;
use prometheus_client::encoding::text::encode;

use super::MetricsRegistry;

impl MetricsRegistry {
    pub async fn encode_metrics(&self) -> Result<String, std::fmt::Error> {
        let registry = self.registry.lock().await;
        let mut buffer = String::new();
        encode(&mut buffer, &registry)?;
        Ok(buffer)
    }

    pub fn record_fetch_success(&self, year: i32, duration_secs: f64) {
        let labels = YearLabels::new(year);
        self.fetch_success.get_or_create(&labels).inc();
        self.record_fetch_duration(&labels, duration_secs);
    }

    pub fn record_fetch_error(&self, year: i32, duration_secs: f64) {
        let labels = YearLabels::new(year);
        self.fetch_errors.get_or_create(&labels).inc();
        self.record_fetch_duration(&labels, duration_secs);
    }

    fn record_fetch_duration(&self, labels: &YearLabels, duration_secs: f64) {
        #[allow(clippy::cast_possible_truncation)]
        let millis = (duration_secs * 1000.0).round() as i64;
        self.fetch_duration_milliseconds
            .get_or_create(labels)
            .set(millis);
    }

    pub fn record_store_write(&self) {
        self.store_writes.inc();
    }

    pub fn record_store_write_error(&self) {
        self.store_write_errors.inc();
    }

    pub fn record_refresh_cycle(&self) {
        self.refresh_cycles.inc();
    }

    /// Sets cache size gauges from the current in-memory cache
    pub fn update_cache_stats(&self, cache: &HolidayCache) {
        #[allow(clippy::cast_possible_wrap)]
        {
            self.cache_years.set(cache.len() as i64);
            self.cache_records.set(cache.record_count() as i64);
        }
    }

    pub fn get_fetch_success_count(&self, year: i32) -> u64 {
        self.fetch_success.get_or_create(&YearLabels::new(year)).get()
    }

    pub fn get_fetch_error_count(&self, year: i32) -> u64 {
        self.fetch_errors.get_or_create(&YearLabels::new(year)).get()
    }
}
