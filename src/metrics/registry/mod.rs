// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry and update logic

mod init;
mod record;

use crate::metrics::labels::YearLabels;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct MetricsRegistry {
    registry: Arc<Mutex<Registry>>,
    // remote fetches
    fetch_success: Family<YearLabels, Counter>,
    fetch_errors: Family<YearLabels, Counter>,
    fetch_duration_milliseconds: Family<YearLabels, Gauge>,
    // cache contents
    cache_years: Gauge,
    cache_records: Gauge,
    // persistence
    store_writes: Counter,
    store_write_errors: Counter,
    refresh_cycles: Counter,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}
