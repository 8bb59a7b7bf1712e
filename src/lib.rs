// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # Holiday Cache
//!
//! Year-keyed public holiday cache backed by the public data portal API.
//!
//! Holidays are kept in a single JSON file, refilled on demand for the
//! requested year and the years around today, and checked for the new year on
//! January 1st by a background loop.
//!
//! ## Main modules
//! - `api`: HTTP API handlers
//! - `clock`: wall-clock source
//! - `config`: configuration management
//! - `error`: error types
//! - `holidays`: holiday types and the remote API client
//! - `manager`: cache refill policy
//! - `metrics`: Prometheus metrics registry
//! - `scheduler`: background refresh loop
//! - `store`: persisted cache storage
//! - `prelude`: commonly used types and traits

mod api;
mod clock;
mod config;
mod error;
mod holidays;
mod manager;
mod metrics;
mod scheduler;
mod store;
pub mod prelude;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
/// Application configuration
pub use config::{Config, RemoteConfig};

/// Application error and result type
pub use error::{AppError, Result};

/// HTTP API router and state
pub use api::{AppState, create_router};

/// Wall-clock sources
pub use clock::{Clock, FixedClock, SystemClock};

/// Holiday types and remote source
pub use holidays::{
    DataPortalClient, HolidayCache, HolidayRecord, HolidaySource, MAX_PAGES_PER_MONTH, YearBucket,
    YearStatus,
};

/// Cache manager
pub use manager::{HolidayCacheManager, RefreshOutcome};

/// Metrics registry
pub use metrics::{MetricsRegistry, YearLabels};

/// Background refresh loop
pub use scheduler::start_refresh_loop;

/// Cache stores
pub use store::{CacheStore, FileStore, MemoryStore};
