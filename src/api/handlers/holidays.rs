// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::AppState;

/// Query string of the holiday lookup
#[derive(Debug, Default, Deserialize)]
pub struct HolidaysQuery {
    /// Refetch every year of interest even if cached
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

/// Accepts 4-digit Gregorian years only
fn parse_year(raw: &str) -> Option<i32> {
    raw.parse::<i32>()
        .ok()
        .filter(|year| (1000..=9999).contains(year))
}

/// GET /holidays/{year}?force=<bool>
///
/// Returns the whole cache mapping; callers index into it themselves.
pub async fn holidays_handler(
    State(state): State<Arc<AppState>>,
    Path(raw_year): Path<String>,
    Query(query): Query<HolidaysQuery>,
) -> Response {
    let Some(year) = parse_year(&raw_year) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid year '{raw_year}': expected a 4-digit year"),
        );
    };

    tracing::debug!("/holidays/{} (force: {})", year, query.force);
    match state.manager.get_holidays(year, query.force).await {
        Ok(cache) => (StatusCode::OK, Json(cache)).into_response(),
        Err(e) => {
            tracing::error!("Holiday lookup for {} failed: {}", year, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
