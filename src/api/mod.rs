//! HTTP API module for the holiday cache service
//!
//! Exposes the holiday lookup to the presentation layer.
//!
//! # Endpoints
//! - `GET /holidays/{year}?force=<bool>` - full holiday cache, refilled as needed
//! - `GET /health` - health check
//! - `GET /metrics` - Prometheus metrics

pub mod handlers;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::config::Config;
use crate::manager::HolidayCacheManager;
use crate::metrics::MetricsRegistry;

/// Application state shared with endpoints
pub struct AppState {
    pub config: Config,
    pub manager: Arc<HolidayCacheManager>,
    pub metrics: MetricsRegistry,
}

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/holidays/{year}", get(handlers::holidays_handler))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
