// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! In-memory store

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::holidays::HolidayCache;

use super::{CacheStore, decode_cache, encode_cache};

/// Store that keeps the serialized cache in memory
///
/// Content goes through the same JSON encoding as [`super::FileStore`].
/// Writes can be made to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: Mutex<Option<String>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Creates a store with nothing persisted yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `text`, valid JSON or not
    #[must_use]
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(text.into())),
            ..Self::default()
        }
    }

    /// Raw persisted text, if anything was ever written
    pub async fn contents(&self) -> Option<String> {
        self.contents.lock().await.clone()
    }

    /// Number of successful flushes
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn exists(&self) -> Result<bool> {
        Ok(self.contents.lock().await.is_some())
    }

    async fn load(&self) -> Result<HolidayCache> {
        match self.contents.lock().await.as_deref() {
            Some(text) => decode_cache(text),
            None => Ok(HolidayCache::new()),
        }
    }

    async fn flush(&self, cache: &HolidayCache) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::CacheWrite("memory store is read-only".to_string()));
        }
        let text = encode_cache(cache)?;
        *self.contents.lock().await = Some(text);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
