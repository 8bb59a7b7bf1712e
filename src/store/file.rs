// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! JSON file store

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::holidays::HolidayCache;

use super::{CacheStore, decode_cache, encode_cache};

/// Holiday cache persisted as a single JSON file
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so readers never observe a half-written cache.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn exists(&self) -> Result<bool> {
        tokio::fs::try_exists(&self.path).await.map_err(|e| {
            AppError::CacheRead(format!("Cannot access {}: {e}", self.path.display()))
        })
    }

    async fn load(&self) -> Result<HolidayCache> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => {
                let cache = decode_cache(&text)?;
                tracing::debug!(
                    "Loaded {} cached year(s) from {}",
                    cache.len(),
                    self.path.display()
                );
                Ok(cache)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("{} not found, starting empty", self.path.display());
                Ok(HolidayCache::new())
            }
            Err(e) => Err(AppError::CacheRead(format!(
                "Cannot read {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn flush(&self, cache: &HolidayCache) -> Result<()> {
        let text = encode_cache(cache)?;
        let write_err =
            |e: std::io::Error| AppError::CacheWrite(format!("{}: {e}", self.path.display()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, text).await.map_err(write_err)?;
        tokio::fs::rename(&temp, &self.path).await.map_err(write_err)?;

        tracing::debug!(
            "Wrote {} cached year(s) to {}",
            cache.len(),
            self.path.display()
        );
        Ok(())
    }
}
