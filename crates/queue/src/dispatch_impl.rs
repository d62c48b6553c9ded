//! Redis-backed analysis dispatch implementation.
//!
//! This module provides a Redis-based implementation of the AnalysisDispatch
//! trait that queues jobs for the apalis workers to process.

use async_trait::async_trait;
use chrono::NaiveDate;
use notemood_common::{AppError, AppResult};
use notemood_core::AnalysisDispatch;

use crate::jobs::{AspectAnalysisJob, DailyRollupJob, TopicAnalysisJob};

/// Redis-backed analysis dispatch.
///
/// Pushes one job per analysis kind onto its own Redis queue; delivery is
/// at-least-once and unordered, which the pipelines are written to survive.
#[derive(Clone)]
pub struct RedisAnalysisDispatch {
    aspect_storage: apalis_redis::RedisStorage<AspectAnalysisJob>,
    topic_storage: apalis_redis::RedisStorage<TopicAnalysisJob>,
    rollup_storage: apalis_redis::RedisStorage<DailyRollupJob>,
}

impl RedisAnalysisDispatch {
    /// Create a new Redis analysis dispatch.
    #[must_use]
    pub const fn new(
        aspect_storage: apalis_redis::RedisStorage<AspectAnalysisJob>,
        topic_storage: apalis_redis::RedisStorage<TopicAnalysisJob>,
        rollup_storage: apalis_redis::RedisStorage<DailyRollupJob>,
    ) -> Self {
        Self {
            aspect_storage,
            topic_storage,
            rollup_storage,
        }
    }
}

#[async_trait]
impl AnalysisDispatch for RedisAnalysisDispatch {
    async fn queue_aspect_analysis(
        &self,
        entry_id: i32,
        content: &str,
        reprocess: bool,
    ) -> AppResult<()> {
        use apalis::prelude::*;

        let job = AspectAnalysisJob::new(entry_id, content.to_owned(), reprocess);
        self.aspect_storage
            .clone()
            .push(job)
            .await
            .map_err(|e| AppError::Queue(format!("Failed to queue aspect analysis: {e}")))?;

        tracing::debug!(entry_id, reprocess, "Queued aspect analysis job");
        Ok(())
    }

    async fn queue_topic_analysis(
        &self,
        entry_id: i32,
        content: &str,
        reprocess: bool,
    ) -> AppResult<()> {
        use apalis::prelude::*;

        let job = TopicAnalysisJob::new(entry_id, content.to_owned(), reprocess);
        self.topic_storage
            .clone()
            .push(job)
            .await
            .map_err(|e| AppError::Queue(format!("Failed to queue topic analysis: {e}")))?;

        tracing::debug!(entry_id, reprocess, "Queued topic analysis job");
        Ok(())
    }

    async fn queue_daily_rollup(&self, user_id: &str, date: NaiveDate) -> AppResult<()> {
        use apalis::prelude::*;

        let job = DailyRollupJob::new(user_id.to_owned(), date);
        self.rollup_storage
            .clone()
            .push(job)
            .await
            .map_err(|e| AppError::Queue(format!("Failed to queue daily rollup: {e}")))?;

        tracing::debug!(user_id, %date, "Queued daily rollup job");
        Ok(())
    }
}
