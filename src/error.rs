//! Error types for the holiday cache service

use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error (missing service key, invalid values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or IO error
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// Persisted cache exists but cannot be read or parsed
    #[error("Cache read error: {0}")]
    CacheRead(String),

    /// Persisted cache could not be written
    #[error("Cache write error: {0}")]
    CacheWrite(String),

    /// Remote holiday API failed for a whole year
    #[error("Remote fetch error for {year}: {reason}")]
    RemoteFetch { year: i32, reason: String },

    /// Metrics encoding error
    #[error("Metrics error: {0}")]
    Metrics(String),

    /// Address parsing error
    #[error("Address parse error")]
    AddrParse(#[from] std::net::AddrParseError),
}

impl AppError {
    pub(crate) fn remote(year: i32, reason: impl std::fmt::Display) -> Self {
        Self::RemoteFetch {
            year,
            reason: reason.to_string(),
        }
    }
}

/// Convenient alias for Result with application error
pub type Result<T> = std::result::Result<T, AppError>;
