// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for the holiday cache service
//!
//! Loads and parses configuration from environment variables.

use std::path::PathBuf;


/// Default configuration values
pub mod defaults {
    pub const SERVER_ADDR: &str = "127.0.0.1:9191";
    pub const DATA_DIR: &str = "./data";
    pub const API_BASE_URL: &str =
        "https://apis.data.go.kr/B090041/openapi/service/SpcdeInfoService";
    pub const NUM_OF_ROWS: u32 = 100;
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
    pub const REFRESH_INTERVAL_SECS: u64 = 24 * 60 * 60;
    pub const HOLIDAYS_FILE: &str = "holidays.json";
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const SERVER_ADDR: &str = "SERVER_ADDR";
    pub const DATA_DIR: &str = "DATA_DIR";
    pub const API_BASE_URL: &str = "HOLIDAY_API_BASE_URL";
    pub const SERVICE_KEY: &str = "HOLIDAY_SERVICE_KEY";
    pub const NUM_OF_ROWS: &str = "HOLIDAY_NUM_OF_ROWS";
    pub const REQUEST_TIMEOUT_SECS: &str = "HOLIDAY_REQUEST_TIMEOUT_SECONDS";
    pub const REFRESH_INTERVAL_SECS: &str = "REFRESH_INTERVAL_SECONDS";

    /// Names used by the desktop build's `.env` files
    pub const LEGACY_API_BASE_URL: &str = "REACT_APP_API_BASE_URL";
    pub const LEGACY_SERVICE_KEY: &str = "REACT_APP_SERVICE_KEY";
}

/// Settings for the public holiday API
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Service root; `/getRestDeInfo` is appended per request
    pub base_url: String,
    pub service_key: Option<String>,
    pub num_of_rows: u32,
    pub request_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_BASE_URL.to_string(),
            service_key: None,
            num_of_rows: defaults::NUM_OF_ROWS,
            request_timeout_secs: defaults::REQUEST_TIMEOUT_SECS,
        }
    }
}

impl RemoteConfig {
    /// Returns the service key if it is set and not blank
    pub fn service_key(&self) -> Option<&str> {
        self.service_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// Validates remote API configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("Holiday API base URL cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "Invalid base URL '{}': expected http:// or https://",
                self.base_url
            ));
        }

        if self.num_of_rows == 0 {
            return Err("numOfRows must be greater than zero".to_string());
        }

        if self.request_timeout_secs == 0 {
            return Err("Request timeout must be greater than zero".to_string());
        }

        Ok(())
    }
}

/// Application-wide configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub data_dir: PathBuf,
    pub remote: RemoteConfig,
    pub refresh_interval_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: defaults::SERVER_ADDR.to_string(),
            data_dir: PathBuf::from(defaults::DATA_DIR),
            remote: RemoteConfig::default(),
            refresh_interval_secs: defaults::REFRESH_INTERVAL_SECS,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_addr =
            lookup(env_vars::SERVER_ADDR).unwrap_or_else(|| defaults::SERVER_ADDR.to_string());

        let data_dir = lookup(env_vars::DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(defaults::DATA_DIR));

        let base_url = lookup(env_vars::API_BASE_URL)
            .or_else(|| lookup(env_vars::LEGACY_API_BASE_URL))
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| defaults::API_BASE_URL.to_string());

        let service_key =
            lookup(env_vars::SERVICE_KEY).or_else(|| lookup(env_vars::LEGACY_SERVICE_KEY));
        if service_key.as_deref().is_none_or(|key| key.trim().is_empty()) {
            tracing::warn!(
                "{} is not set. Cached holidays are served but remote refills will fail.",
                env_vars::SERVICE_KEY
            );
        }

        let remote = RemoteConfig {
            base_url,
            service_key,
            num_of_rows: parse_or_default(
                &lookup,
                env_vars::NUM_OF_ROWS,
                defaults::NUM_OF_ROWS,
            ),
            request_timeout_secs: parse_or_default(
                &lookup,
                env_vars::REQUEST_TIMEOUT_SECS,
                defaults::REQUEST_TIMEOUT_SECS,
            ),
        };

        let refresh_interval_secs = parse_or_default(
            &lookup,
            env_vars::REFRESH_INTERVAL_SECS,
            defaults::REFRESH_INTERVAL_SECS,
        );

        let config = Config {
            server_addr,
            data_dir,
            remote,
            refresh_interval_secs,
        };

        if let Err(e) = config.validate() {
            tracing::error!("Invalid configuration: {}", e);
        }

        config
    }

    /// Validates the whole configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.refresh_interval_secs == 0 {
            return Err("Refresh interval must be greater than zero".to_string());
        }
        self.remote.validate()
    }

    /// Path of the persisted holiday cache
    pub fn holidays_path(&self) -> PathBuf {
        self.data_dir.join(defaults::HOLIDAYS_FILE)
    }
}

fn parse_or_default<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            tracing::warn!("Failed to parse {}='{}'. Using {}.", name, raw, default);
            default
        }),
        None => default,
    }
}
