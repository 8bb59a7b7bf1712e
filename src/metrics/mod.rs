// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry for the holiday cache service
//!
//! Tracks remote fetches per year, store writes and cache size.

mod labels;
mod registry;

/// Labels for per-year metrics
pub use labels::YearLabels;

/// Prometheus metrics registry
pub use registry::MetricsRegistry;
