//! Background analysis dispatch.
//!
//! Provides an abstraction for queueing analysis work after a journal entry
//! changes. The actual implementation is provided by the queue crate.

use async_trait::async_trait;
use chrono::NaiveDate;
use notemood_common::AppResult;
use std::sync::Arc;

/// Trait for queueing analysis jobs.
///
/// This allows the core services to schedule background analysis
/// without directly depending on the queue implementation.
#[async_trait]
pub trait AnalysisDispatch: Send + Sync {
    /// Queue aspect-based sentiment analysis for an entry.
    ///
    /// # Arguments
    /// * `entry_id` - The ID of the entry to analyse
    /// * `content` - The entry content at the time of dispatch
    /// * `reprocess` - Whether previous results must be replaced first
    async fn queue_aspect_analysis(
        &self,
        entry_id: i32,
        content: &str,
        reprocess: bool,
    ) -> AppResult<()>;

    /// Queue topic extraction for an entry.
    ///
    /// # Arguments
    /// * `entry_id` - The ID of the entry to analyse
    /// * `content` - The entry content at the time of dispatch
    /// * `reprocess` - Whether previous results must be replaced first
    async fn queue_topic_analysis(
        &self,
        entry_id: i32,
        content: &str,
        reprocess: bool,
    ) -> AppResult<()>;

    /// Queue a daily sentiment rollup recompute.
    ///
    /// # Arguments
    /// * `user_id` - The owner of the affected day
    /// * `date` - The calendar day to recompute
    async fn queue_daily_rollup(&self, user_id: &str, date: NaiveDate) -> AppResult<()>;
}

/// A no-op implementation of AnalysisDispatch for testing or when background
/// processing is disabled.
#[derive(Clone, Default)]
pub struct NoOpDispatch;

#[async_trait]
impl AnalysisDispatch for NoOpDispatch {
    async fn queue_aspect_analysis(
        &self,
        _entry_id: i32,
        _content: &str,
        _reprocess: bool,
    ) -> AppResult<()> {
        Ok(())
    }

    async fn queue_topic_analysis(
        &self,
        _entry_id: i32,
        _content: &str,
        _reprocess: bool,
    ) -> AppResult<()> {
        Ok(())
    }

    async fn queue_daily_rollup(&self, _user_id: &str, _date: NaiveDate) -> AppResult<()> {
        Ok(())
    }
}

/// Wrapper for boxed AnalysisDispatch trait object.
pub type DispatchService = Arc<dyn AnalysisDispatch>;
