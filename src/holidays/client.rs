// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Client for the public holiday API (`getRestDeInfo`)

use async_trait::async_trait;
use futures_util::future::try_join_all;
use std::borrow::Cow;
use std::time::Duration;

use crate::config::RemoteConfig;
use crate::error::{AppError, Result};

use super::parse::{MonthPage, parse_month_page};
use super::types::{HolidayRecord, YearBucket};

/// Operation path appended to the configured service root
const REST_DE_INFO_PATH: &str = "/getRestDeInfo";

/// Upper bound on pages requested for a single month
pub const MAX_PAGES_PER_MONTH: u32 = 20;

/// Anything that can produce the holiday records of one year
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Fetches every record of `year`; one failed month fails the year
    async fn fetch_year(&self, year: i32) -> Result<YearBucket>;
}

/// Holiday source backed by the public data portal REST API
///
/// Each year is fetched as twelve concurrent month queries. Pages beyond the
/// first are requested while every page comes back full and the reported
/// `totalCount` is not yet reached, up to [`MAX_PAGES_PER_MONTH`]. A month
/// that still falls short after its last allowed page fails the year.
pub struct DataPortalClient {
    http: reqwest::Client,
    config: RemoteConfig,
}

impl DataPortalClient {
    /// Creates a client with the configured request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            REST_DE_INFO_PATH
        )
    }

    async fn fetch_month(
        &self,
        service_key: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<HolidayRecord>> {
        let mut records = Vec::new();
        let mut page_no: u32 = 1;
        let rows = self.config.num_of_rows.max(1) as usize;
        let max_pages = MAX_PAGES_PER_MONTH as usize;

        loop {
            let page = self.fetch_page(service_key, year, month, page_no).await?;
            let received = page.records.len();
            records.extend(page.records);

            let total = page.total_count.unwrap_or(0);
            // A short page is the last one
            if received < rows || records.len() >= total {
                break;
            }

            if page_no as usize >= total.div_ceil(rows).min(max_pages) {
                return Err(AppError::remote(
                    year,
                    format!(
                        "month {month:02}: {} of {} records after {} page(s), giving up",
                        records.len(),
                        total,
                        page_no
                    ),
                ));
            }

            tracing::debug!(
                "Holidays {}-{:02}: {} of {} records after page {}, requesting next page",
                year,
                month,
                records.len(),
                total,
                page_no
            );
            page_no += 1;
        }

        Ok(records)
    }

    async fn fetch_page(
        &self,
        service_key: &str,
        year: i32,
        month: u32,
        page_no: u32,
    ) -> Result<MonthPage> {
        let params = [
            ("serviceKey", service_key.to_string()),
            ("solYear", format!("{year:04}")),
            ("solMonth", format!("{month:02}")),
            ("numOfRows", self.config.num_of_rows.to_string()),
            ("pageNo", page_no.to_string()),
            ("_type", "json".to_string()),
        ];

        tracing::trace!(
            "GET {} year={} month={:02} page={}",
            self.endpoint(),
            year,
            month,
            page_no
        );

        let response = self
            .http
            .get(self.endpoint())
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::remote(year, format!("month {month:02}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::remote(
                year,
                format!("month {month:02}: HTTP {}", status.as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::remote(year, format!("month {month:02}: {e}")))?;

        parse_month_page(&body)
            .map_err(|e| AppError::remote(year, format!("month {month:02}: {e}")))
    }
}

#[async_trait]
impl HolidaySource for DataPortalClient {
    async fn fetch_year(&self, year: i32) -> Result<YearBucket> {
        let service_key = self.config.service_key().ok_or_else(|| {
            AppError::Config("Holiday API service key is not configured".to_string())
        })?;
        let service_key = decode_service_key(service_key);

        let start = std::time::Instant::now();
        let months =
            try_join_all((1..=12).map(|month| self.fetch_month(&service_key, year, month))).await?;
        let records: YearBucket = months.into_iter().flatten().collect();

        tracing::info!(
            "Fetched {} holiday records for {} in {:.3}s",
            records.len(),
            year,
            start.elapsed().as_secs_f64()
        );
        Ok(records)
    }
}

/// Service keys are handed out URL-encoded; the query builder encodes again
fn decode_service_key(key: &str) -> Cow<'_, str> {
    urlencoding::decode(key).unwrap_or(Cow::Borrowed(key))
}
