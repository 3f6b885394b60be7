//! Grading period model

use serde::{Deserialize, Serialize};

/// A weighted slice of the course calendar (e.g., "Fall Quarter 1")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingPeriod {
    /// Period id, referenced by `Submission::grading_period_id`
    pub id: u64,

    /// Period title
    #[serde(default)]
    pub title: String,

    /// Share of the course grade in percent
    #[serde(default)]
    pub weight: f64,
}

impl GradingPeriod {
    /// Create a grading period
    #[must_use]
    pub const fn new(id: u64, title: String, weight: f64) -> Self {
        Self { id, title, weight }
    }
}
