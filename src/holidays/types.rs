// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Holiday data types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One calendar holiday occurrence as stored in the cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayRecord {
    /// `YYYYMMDD`, digits only
    pub date: String,
    pub name: String,
    /// `false` for informational dates the API reports alongside holidays
    pub is_holiday: bool,
}

/// Records for exactly one calendar year, in month order
pub type YearBucket = Vec<HolidayRecord>;

/// What the cache knows about a single year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearStatus {
    /// Never fetched
    Missing,
    /// Fetched, and the API returned nothing for that year
    Empty,
    /// Fetched, holding this many records
    Populated(usize),
}

/// Year-keyed holiday cache, persisted as `{ "<year>": [record, ...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCache {
    years: BTreeMap<i32, YearBucket>,
}

impl HolidayCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, year: i32) -> YearStatus {
        match self.years.get(&year) {
            None => YearStatus::Missing,
            Some(bucket) if bucket.is_empty() => YearStatus::Empty,
            Some(bucket) => YearStatus::Populated(bucket.len()),
        }
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.contains_key(&year)
    }

    pub fn get(&self, year: i32) -> Option<&YearBucket> {
        self.years.get(&year)
    }

    /// Replaces the whole bucket for `year`
    pub fn insert(&mut self, year: i32, bucket: YearBucket) -> Option<YearBucket> {
        self.years.insert(year, bucket)
    }

    /// Cached years in ascending order
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Total records across all years
    pub fn record_count(&self) -> usize {
        self.years.values().map(Vec::len).sum()
    }
}

impl FromIterator<(i32, YearBucket)> for HolidayCache {
    fn from_iter<I: IntoIterator<Item = (i32, YearBucket)>>(iter: I) -> Self {
        Self {
            years: iter.into_iter().collect(),
        }
    }
}
