// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

mod health;
mod holidays;
mod metrics;

pub use health::health_check;
pub use holidays::holidays_handler;
pub use metrics::metrics_handler;
