use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppState;

/// Health check endpoint response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cached_years: Vec<i32>,
    /// Path of the persisted holiday cache
    pub cache_file: String,
}

/// GET /health
///
/// Returns "ok", the application version, the years held in memory and the
/// cache file location. Does not wait for a running refill.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cached_years: state.manager.cached_years().await,
        cache_file: state.config.holidays_path().display().to_string(),
    };

    (StatusCode::OK, Json(response))
}
