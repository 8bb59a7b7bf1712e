//! Public holiday API client module
//!
//! Fetches a year of holidays from the public data portal as twelve month
//! queries and normalizes the API's response shapes into [`HolidayRecord`]s.

mod client;
mod parse;
mod types;

pub use client::{DataPortalClient, HolidaySource, MAX_PAGES_PER_MONTH};
pub use types::{HolidayCache, HolidayRecord, YearBucket, YearStatus};
