// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Registry initialization and metric registration

use crate::metrics::labels::YearLabels;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::MetricsRegistry;

impl MetricsRegistry {
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let fetch_success = Family::<YearLabels, Counter>::default();
        registry.register(
            "holiday_fetch_success",
            "Successful remote fetches per year",
            fetch_success.clone(),
        );
        let fetch_errors = Family::<YearLabels, Counter>::default();
        registry.register(
            "holiday_fetch_errors",
            "Failed remote fetches per year",
            fetch_errors.clone(),
        );
        let fetch_duration_milliseconds = Family::<YearLabels, Gauge>::default();
        registry.register(
            "holiday_fetch_duration_milliseconds",
            "Duration of the last remote fetch for a year in milliseconds",
            fetch_duration_milliseconds.clone(),
        );
        let cache_years = Gauge::default();
        registry.register(
            "holiday_cache_years",
            "Number of years held in the cache",
            cache_years.clone(),
        );
        let cache_records = Gauge::default();
        registry.register(
            "holiday_cache_records",
            "Number of holiday records held in the cache",
            cache_records.clone(),
        );
        let store_writes = Counter::default();
        registry.register(
            "holiday_store_writes",
            "Successful cache store writes",
            store_writes.clone(),
        );
        let store_write_errors = Counter::default();
        registry.register(
            "holiday_store_write_errors",
            "Failed cache store writes",
            store_write_errors.clone(),
        );
        let refresh_cycles = Counter::default();
        registry.register(
            "holiday_refresh_cycles",
            "Scheduled refresh cycles run",
            refresh_cycles.clone(),
        );

        Self {
            registry: Arc::new(Mutex::new(registry)),
            fetch_success,
            fetch_errors,
            fetch_duration_milliseconds,
            cache_years,
            cache_records,
            store_writes,
            store_write_errors,
            refresh_cycles,
        }
    }
}
