//! Taxonomy repository.
//!
//! Idempotent find-or-create over the reference tables (sentiment, aspect,
//! subject, topic) and the per-entry link tables. Every lookup is by natural
//! key; creation races are resolved by the unique indexes: an insert that
//! loses the race comes back as `DbErr::RecordNotInserted` and falls through
//! to a re-select, so no duplicate reference row can ever be observed.

use std::sync::Arc;

use crate::entities::{
    Aspect, EntitySentiment, Sentiment, Subject, Topic, TopicSentiment, aspect, entity_sentiment,
    entry, sentiment, subject, topic, topic_sentiment,
};
use chrono::NaiveDate;
use notemood_common::{AppError, AppResult};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Set,
};

/// One grouped row of the entity-sentiment breakdown query.
#[derive(Debug, Clone, FromQueryResult)]
pub struct EntitySentimentCount {
    pub aspect_name: String,
    pub subject_name: String,
    pub sentiment_name: String,
    pub count: i64,
}

/// One flat topic link row joined with its names.
#[derive(Debug, Clone, FromQueryResult)]
pub struct TopicSentimentRow {
    pub topic_name: String,
    pub sentiment_name: String,
    pub entry_id: i32,
}

/// Taxonomy repository for idempotent upsert operations.
#[derive(Clone)]
pub struct TaxonomyRepository {
    db: Arc<DatabaseConnection>,
}

impl TaxonomyRepository {
    /// Create a new taxonomy repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a sentiment by name, creating it if absent.
    pub async fn find_or_create_sentiment(&self, name: &str) -> AppResult<sentiment::Model> {
        if let Some(existing) = self.find_sentiment(name).await? {
            return Ok(existing);
        }

        let insert = Sentiment::insert(sentiment::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(sentiment::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_with_returning(self.db.as_ref())
        .await;

        match insert {
            Ok(model) => Ok(model),
            // Lost the race; the row exists now.
            Err(DbErr::RecordNotInserted) => self.require_sentiment(name).await,
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Find a sentiment by name.
    pub async fn find_sentiment(&self, name: &str) -> AppResult<Option<sentiment::Model>> {
        Sentiment::find()
            .filter(sentiment::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a sentiment by name, failing if the reference row is absent.
    pub async fn require_sentiment(&self, name: &str) -> AppResult<sentiment::Model> {
        self.find_sentiment(name)
            .await?
            .ok_or_else(|| AppError::MissingReferenceData(name.to_owned()))
    }

    /// Find an aspect by name, creating it if absent.
    pub async fn find_or_create_aspect(&self, name: &str) -> AppResult<aspect::Model> {
        let existing = Aspect::find()
            .filter(aspect::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        if let Some(existing) = existing {
            return Ok(existing);
        }

        let insert = Aspect::insert(aspect::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(aspect::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_with_returning(self.db.as_ref())
        .await;

        match insert {
            Ok(model) => Ok(model),
            Err(DbErr::RecordNotInserted) => Aspect::find()
                .filter(aspect::Column::Name.eq(name))
                .one(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .ok_or_else(|| AppError::MissingReferenceData(name.to_owned())),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Find a subject by `(name, aspect_id)`, creating it if absent.
    pub async fn find_or_create_subject(
        &self,
        name: &str,
        aspect_id: i32,
    ) -> AppResult<subject::Model> {
        let existing = Subject::find()
            .filter(subject::Column::Name.eq(name))
            .filter(subject::Column::AspectId.eq(aspect_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        if let Some(existing) = existing {
            return Ok(existing);
        }

        let insert = Subject::insert(subject::ActiveModel {
            name: Set(name.to_owned()),
            aspect_id: Set(aspect_id),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([subject::Column::Name, subject::Column::AspectId])
                .do_nothing()
                .to_owned(),
        )
        .exec_with_returning(self.db.as_ref())
        .await;

        match insert {
            Ok(model) => Ok(model),
            Err(DbErr::RecordNotInserted) => Subject::find()
                .filter(subject::Column::Name.eq(name))
                .filter(subject::Column::AspectId.eq(aspect_id))
                .one(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .ok_or_else(|| AppError::MissingReferenceData(name.to_owned())),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Find a topic by name, creating it if absent.
    pub async fn find_or_create_topic(&self, name: &str) -> AppResult<topic::Model> {
        let existing = Topic::find()
            .filter(topic::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        if let Some(existing) = existing {
            return Ok(existing);
        }

        let insert = Topic::insert(topic::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(topic::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec_with_returning(self.db.as_ref())
        .await;

        match insert {
            Ok(model) => Ok(model),
            Err(DbErr::RecordNotInserted) => Topic::find()
                .filter(topic::Column::Name.eq(name))
                .one(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?
                .ok_or_else(|| AppError::MissingReferenceData(name.to_owned())),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Record that `subject_id` carried `sentiment_id` in `entry_id`.
    /// No-op when the identical triple already exists.
    pub async fn link_entity_sentiment(
        &self,
        subject_id: i32,
        sentiment_id: i32,
        entry_id: i32,
    ) -> AppResult<()> {
        let insert = EntitySentiment::insert(entity_sentiment::ActiveModel {
            subject_id: Set(subject_id),
            sentiment_id: Set(sentiment_id),
            entry_id: Set(entry_id),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                entity_sentiment::Column::SubjectId,
                entity_sentiment::Column::SentimentId,
                entity_sentiment::Column::EntryId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec(self.db.as_ref())
        .await;

        match insert {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Record that `topic_id` carried `sentiment_id` in `entry_id`.
    /// No-op when the identical triple already exists.
    pub async fn link_topic_sentiment(
        &self,
        topic_id: i32,
        sentiment_id: i32,
        entry_id: i32,
    ) -> AppResult<()> {
        let insert = TopicSentiment::insert(topic_sentiment::ActiveModel {
            topic_id: Set(topic_id),
            sentiment_id: Set(sentiment_id),
            entry_id: Set(entry_id),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                topic_sentiment::Column::TopicId,
                topic_sentiment::Column::SentimentId,
                topic_sentiment::Column::EntryId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec(self.db.as_ref())
        .await;

        match insert {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(AppError::Database(e.to_string())),
        }
    }

    /// Delete every entity link recorded for an entry (full-replace update).
    pub async fn delete_entity_links_for_entry(&self, entry_id: i32) -> AppResult<u64> {
        EntitySentiment::delete_many()
            .filter(entity_sentiment::Column::EntryId.eq(entry_id))
            .exec(self.db.as_ref())
            .await
            .map(|res| res.rows_affected)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete every topic link recorded for an entry (full-replace update).
    pub async fn delete_topic_links_for_entry(&self, entry_id: i32) -> AppResult<u64> {
        TopicSentiment::delete_many()
            .filter(topic_sentiment::Column::EntryId.eq(entry_id))
            .exec(self.db.as_ref())
            .await
            .map(|res| res.rows_affected)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Grouped (aspect, subject, sentiment) counts over the user's entries
    /// in the date range.
    pub async fn entity_sentiment_counts(
        &self,
        user_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<EntitySentimentCount>> {
        let mut query = EntitySentiment::find()
            .join(JoinType::InnerJoin, entity_sentiment::Relation::Subject.def())
            .join(JoinType::InnerJoin, subject::Relation::Aspect.def())
            .join(
                JoinType::InnerJoin,
                entity_sentiment::Relation::Sentiment.def(),
            )
            .join(JoinType::InnerJoin, entity_sentiment::Relation::Entry.def())
            .filter(entry::Column::UserId.eq(user_id));

        if let Some(start) = start_date {
            query = query.filter(entry::Column::Date.gte(start));
        }
        if let Some(end) = end_date {
            query = query.filter(entry::Column::Date.lte(end));
        }

        query
            .select_only()
            .column_as(aspect::Column::Name, "aspect_name")
            .column_as(subject::Column::Name, "subject_name")
            .column_as(sentiment::Column::Name, "sentiment_name")
            .column_as(entity_sentiment::Column::Id.count(), "count")
            .group_by(aspect::Column::Name)
            .group_by(subject::Column::Name)
            .group_by(sentiment::Column::Name)
            .into_model::<EntitySentimentCount>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Flat topic link rows (with names) over the user's entries in the
    /// date range. Grouping happens in the service so the distinct-entry
    /// denominator can be derived from the same rows.
    pub async fn topic_sentiment_rows(
        &self,
        user_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<Vec<TopicSentimentRow>> {
        let mut query = TopicSentiment::find()
            .join(JoinType::InnerJoin, topic_sentiment::Relation::Topic.def())
            .join(
                JoinType::InnerJoin,
                topic_sentiment::Relation::Sentiment.def(),
            )
            .join(JoinType::InnerJoin, topic_sentiment::Relation::Entry.def())
            .filter(entry::Column::UserId.eq(user_id));

        if let Some(start) = start_date {
            query = query.filter(entry::Column::Date.gte(start));
        }
        if let Some(end) = end_date {
            query = query.filter(entry::Column::Date.lte(end));
        }

        query
            .select_only()
            .column_as(topic::Column::Name, "topic_name")
            .column_as(sentiment::Column::Name, "sentiment_name")
            .column_as(topic_sentiment::Column::EntryId, "entry_id")
            .into_model::<TopicSentimentRow>()
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
