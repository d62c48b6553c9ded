//! Entry repository.

use std::sync::Arc;

use crate::entities::{Entry, entry, sentiment};
use chrono::NaiveDate;
use notemood_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Entry repository for database operations.
#[derive(Clone)]
pub struct EntryRepository {
    db: Arc<DatabaseConnection>,
}

impl EntryRepository {
    /// Create a new entry repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Insert a new entry.
    pub async fn create(&self, model: entry::ActiveModel) -> AppResult<entry::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Persist changes to an existing entry.
    pub async fn update(&self, model: entry::ActiveModel) -> AppResult<entry::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an entry owned by the given user.
    pub async fn find_by_id_for_user(
        &self,
        id: i32,
        user_id: &str,
    ) -> AppResult<Option<entry::Model>> {
        Entry::find_by_id(id)
            .filter(entry::Column::UserId.eq(user_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an entry with its resolved sentiment.
    pub async fn find_with_sentiment(
        &self,
        id: i32,
        user_id: &str,
    ) -> AppResult<Option<(entry::Model, Option<sentiment::Model>)>> {
        Entry::find_by_id(id)
            .filter(entry::Column::UserId.eq(user_id))
            .find_also_related(crate::entities::Sentiment)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete an entry owned by the given user. Returns whether a row was
    /// removed. Link rows go with it via FK cascade.
    pub async fn delete_by_id_for_user(&self, id: i32, user_id: &str) -> AppResult<bool> {
        Entry::delete_many()
            .filter(entry::Column::Id.eq(id))
            .filter(entry::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map(|res| res.rows_affected > 0)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All entries for one user-day, each with its resolved sentiment.
    pub async fn find_by_user_and_date(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> AppResult<Vec<(entry::Model, Option<sentiment::Model>)>> {
        Entry::find()
            .filter(entry::Column::UserId.eq(user_id))
            .filter(entry::Column::Date.eq(date))
            .find_also_related(crate::entities::Sentiment)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All entries for a user, newest first.
    pub async fn find_all_for_user(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<(entry::Model, Option<sentiment::Model>)>> {
        Entry::find()
            .filter(entry::Column::UserId.eq(user_id))
            .order_by_desc(entry::Column::Date)
            .order_by_desc(entry::Column::Time)
            .find_also_related(crate::entities::Sentiment)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
