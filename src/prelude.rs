// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for convenient use.
//! Users of the library can import everything they need with:
//!
//! ```rust
//! use holiday_cache::prelude::*;
//! ```

// Core types
pub use crate::config::{Config, RemoteConfig};
pub use crate::error::{AppError, Result};

// Cache
pub use crate::clock::{Clock, FixedClock, SystemClock};
pub use crate::holidays::{HolidayCache, HolidayRecord, YearBucket, YearStatus};
pub use crate::manager::{HolidayCacheManager, RefreshOutcome};
pub use crate::metrics::MetricsRegistry;
pub use crate::store::{CacheStore, FileStore, MemoryStore};

// Remote source
pub use crate::holidays::{DataPortalClient, HolidaySource};
