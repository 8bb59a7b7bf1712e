// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Persisted holiday cache storage
//!
//! The cache is always read and written as one whole JSON document.

mod file;
mod memory;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::holidays::HolidayCache;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Backing storage for the holiday cache
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Whether a persisted cache exists at all
    async fn exists(&self) -> Result<bool>;

    /// Reads the whole cache; a missing store reads as empty
    async fn load(&self) -> Result<HolidayCache>;

    /// Replaces the persisted cache with `cache`
    async fn flush(&self, cache: &HolidayCache) -> Result<()>;
}

pub(crate) fn decode_cache(text: &str) -> Result<HolidayCache> {
    serde_json::from_str(text).map_err(|e| AppError::CacheRead(format!("Malformed cache: {e}")))
}

pub(crate) fn encode_cache(cache: &HolidayCache) -> Result<String> {
    serde_json::to_string_pretty(cache)
        .map_err(|e| AppError::CacheWrite(format!("Failed to serialize cache: {e}")))
}
