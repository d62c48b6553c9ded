//! Daily rollup job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Job to recompute the daily sentiment rollup for one user-day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRollupJob {
    /// Owner of the affected day.
    pub user_id: String,

    /// The calendar day to recompute.
    pub date: NaiveDate,
}

impl DailyRollupJob {
    /// Create a new daily rollup job.
    #[must_use]
    pub const fn new(user_id: String, date: NaiveDate) -> Self {
        Self { user_id, date }
    }
}
