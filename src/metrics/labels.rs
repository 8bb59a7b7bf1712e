//! Label types for Prometheus metrics

use prometheus_client::encoding::EncodeLabelSet;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct YearLabels {
    pub year: String,
}

impl YearLabels {
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self {
            year: year.to_string(),
        }
    }
}
