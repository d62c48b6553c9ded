//! Daily rollup worker.

use apalis::prelude::*;
use notemood_core::DailySentimentService;
use tracing::{error, info};

use crate::jobs::DailyRollupJob;

/// Context for the daily rollup worker.
#[derive(Clone)]
pub struct DailyRollupContext {
    pub service: DailySentimentService,
}

impl DailyRollupContext {
    /// Create a new daily rollup context.
    #[must_use]
    pub const fn new(service: DailySentimentService) -> Self {
        Self { service }
    }
}

/// Worker function for daily rollup jobs.
///
/// Recomputing is idempotent, so replays of the same job converge on the
/// same rollup row.
///
/// # Errors
/// Returns an error if the recompute fails, including when the Neutral
/// reference row is missing during a tie.
pub async fn daily_rollup_worker(
    job: DailyRollupJob,
    ctx: Data<DailyRollupContext>,
) -> Result<(), Error> {
    info!(user_id = %job.user_id, date = %job.date, "Recomputing daily rollup");

    match ctx.service.recompute(&job.user_id, job.date).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(user_id = %job.user_id, date = %job.date, error = %e, "Daily rollup failed");
            Err(Error::Failed(std::sync::Arc::new(e.into())))
        }
    }
}
