//! Daily sentiment rollup repository.
//!
//! The rollup table is keyed by the composite `(user_id, date)` identity, so
//! the operations here are get-or-absent, atomic upsert, and
//! delete-if-present.

use std::sync::Arc;

use crate::entities::{DailySentiment, daily_sentiment};
use chrono::NaiveDate;
use notemood_common::{AppError, AppResult};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

/// Daily sentiment repository for database operations.
#[derive(Clone)]
pub struct DailySentimentRepository {
    db: Arc<DatabaseConnection>,
}

impl DailySentimentRepository {
    /// Create a new daily sentiment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the rollup row for one user-day.
    pub async fn find(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> AppResult<Option<daily_sentiment::Model>> {
        DailySentiment::find_by_id((user_id.to_owned(), date))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert or overwrite the rollup row for one user-day.
    pub async fn upsert(
        &self,
        user_id: &str,
        date: NaiveDate,
        sentiment: &str,
        percentage: f64,
    ) -> AppResult<()> {
        DailySentiment::insert(daily_sentiment::ActiveModel {
            user_id: Set(user_id.to_owned()),
            date: Set(date),
            sentiment: Set(sentiment.to_owned()),
            percentage: Set(percentage),
        })
        .on_conflict(
            OnConflict::columns([
                daily_sentiment::Column::UserId,
                daily_sentiment::Column::Date,
            ])
            .update_columns([
                daily_sentiment::Column::Sentiment,
                daily_sentiment::Column::Percentage,
            ])
            .to_owned(),
        )
        .exec(self.db.as_ref())
        .await
        .map(|_| ())
        .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Idempotently delete the rollup row for one user-day. Returns whether
    /// a row was removed.
    pub async fn delete_if_exists(&self, user_id: &str, date: NaiveDate) -> AppResult<bool> {
        DailySentiment::delete_by_id((user_id.to_owned(), date))
            .exec(self.db.as_ref())
            .await
            .map(|res| res.rows_affected > 0)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Rollup rows for a user in a date range, date ascending.
    pub async fn find_in_range(
        &self,
        user_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<daily_sentiment::Model>> {
        let mut query = DailySentiment::find()
            .filter(daily_sentiment::Column::UserId.eq(user_id))
            .order_by_asc(daily_sentiment::Column::Date);

        if let Some(start) = start_date {
            query = query.filter(daily_sentiment::Column::Date.gte(start));
        }
        if let Some(end) = end_date {
            query = query.filter(daily_sentiment::Column::Date.lte(end));
        }

        query
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// The most recent date with a rollup row for this user, if any.
    pub async fn latest_date(&self, user_id: &str) -> AppResult<Option<NaiveDate>> {
        DailySentiment::find()
            .filter(daily_sentiment::Column::UserId.eq(user_id))
            .order_by_desc(daily_sentiment::Column::Date)
            .one(self.db.as_ref())
            .await
            .map(|row| row.map(|r| r.date))
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
