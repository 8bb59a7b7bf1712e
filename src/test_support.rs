//! Shared fakes for unit tests

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::Mutex;

use crate::clock::FixedClock;
use crate::error::{AppError, Result};
use crate::holidays::{HolidayRecord, HolidaySource, YearBucket};
use crate::manager::HolidayCacheManager;
use crate::metrics::MetricsRegistry;
use crate::store::MemoryStore;

pub(crate) fn record(date: &str, name: &str) -> HolidayRecord {
    HolidayRecord {
        date: date.to_string(),
        name: name.to_string(),
        is_holiday: true,
    }
}

/// Holiday source answering from a script, counting calls per year
#[derive(Default)]
pub(crate) struct StubSource {
    buckets: Mutex<HashMap<i32, YearBucket>>,
    failing: Mutex<HashSet<i32>>,
    hanging: Mutex<HashSet<i32>>,
    calls: Mutex<Vec<i32>>,
}

impl StubSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Sets what `year` returns; unscripted years return one New Year record
    pub(crate) fn set(&self, year: i32, bucket: YearBucket) {
        self.buckets.lock().unwrap().insert(year, bucket);
    }

    pub(crate) fn fail(&self, year: i32) {
        self.failing.lock().unwrap().insert(year);
    }

    pub(crate) fn recover(&self, year: i32) {
        self.failing.lock().unwrap().remove(&year);
    }

    /// Makes fetches of `year` never complete
    pub(crate) fn hang(&self, year: i32) {
        self.hanging.lock().unwrap().insert(year);
    }

    pub(crate) fn release(&self, year: i32) {
        self.hanging.lock().unwrap().remove(&year);
    }

    pub(crate) fn calls(&self) -> Vec<i32> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_for(&self, year: i32) -> usize {
        self.calls.lock().unwrap().iter().filter(|&&y| y == year).count()
    }
}

#[async_trait]
impl HolidaySource for StubSource {
    async fn fetch_year(&self, year: i32) -> Result<YearBucket> {
        self.calls.lock().unwrap().push(year);
        let hangs = self.hanging.lock().unwrap().contains(&year);
        if hangs {
            std::future::pending::<()>().await;
        }
        if self.failing.lock().unwrap().contains(&year) {
            return Err(AppError::remote(year, "stubbed failure"));
        }
        let bucket = self
            .buckets
            .lock()
            .unwrap()
            .get(&year)
            .cloned()
            .unwrap_or_else(|| vec![record(&format!("{year}0101"), "New Year")]);
        Ok(bucket)
    }
}

pub(crate) struct Harness {
    pub store: Arc<MemoryStore>,
    pub source: Arc<StubSource>,
    pub clock: Arc<FixedClock>,
    pub manager: Arc<HolidayCacheManager>,
}

/// Manager over an empty memory store and a stub source, pinned to `y-m-d`
pub(crate) fn harness(y: i32, m: u32, d: u32) -> Harness {
    harness_with_store(MemoryStore::new(), y, m, d)
}

pub(crate) fn harness_with_store(store: MemoryStore, y: i32, m: u32, d: u32) -> Harness {
    let store = Arc::new(store);
    let source = Arc::new(StubSource::new());
    let clock = Arc::new(FixedClock::ymd(y, m, d).expect("valid test date"));
    let manager = Arc::new(HolidayCacheManager::new(
        store.clone(),
        source.clone(),
        clock.clone(),
        MetricsRegistry::new(),
    ));
    Harness {
        store,
        source,
        clock,
        manager,
    }
}
