//! Journal entry service.
//!
//! Creating or editing an entry classifies its overall sentiment inline
//! (the write fails if the classifier is unreachable) and queues the
//! heavier aspect/topic analysis and the daily rollup in the background.

use chrono::{Local, NaiveDate, NaiveTime};
use notemood_common::{AppError, AppResult};
use notemood_db::entities::{entry, sentiment};
use notemood_db::repositories::{EntryRepository, TaxonomyRepository};
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::classifier::ClassifierClient;
use super::dispatch::DispatchService;

/// Input for creating or updating a journal entry.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryInput {
    pub title: String,
    pub content: String,
    /// Defaults to today when absent.
    pub date: Option<NaiveDate>,
    /// Defaults to the current time when absent.
    pub time: Option<NaiveTime>,
}

/// A journal entry with its resolved overall sentiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub sentiment: String,
}

/// Journal entry service.
#[derive(Clone)]
pub struct EntryService {
    entry_repo: EntryRepository,
    taxonomy_repo: TaxonomyRepository,
    classifier: ClassifierClient,
    dispatch: DispatchService,
}

impl EntryService {
    #[must_use]
    pub fn new(
        entry_repo: EntryRepository,
        taxonomy_repo: TaxonomyRepository,
        classifier: ClassifierClient,
        dispatch: DispatchService,
    ) -> Self {
        Self {
            entry_repo,
            taxonomy_repo,
            classifier,
            dispatch,
        }
    }

    /// Create an entry, classify its overall sentiment, and queue the
    /// aspect/topic analysis and the day's rollup.
    pub async fn create(&self, user_id: &str, input: EntryInput) -> AppResult<EntryRecord> {
        let overall = self
            .classifier
            .overall_sentiment(&input.content)
            .await
            .map_err(|e| AppError::ExternalService(e.to_string()))?;
        let sentiment = self
            .taxonomy_repo
            .find_or_create_sentiment(&overall.overall_sentiment)
            .await?;

        let now = Local::now();
        let date = input.date.unwrap_or_else(|| now.date_naive());
        let time = input.time.unwrap_or_else(|| now.time());

        let created = self
            .entry_repo
            .create(entry::ActiveModel {
                user_id: Set(user_id.to_owned()),
                title: Set(input.title),
                content: Set(input.content),
                date: Set(date),
                time: Set(time),
                sentiment_id: Set(sentiment.id),
                ..Default::default()
            })
            .await?;

        self.dispatch
            .queue_aspect_analysis(created.id, &created.content, false)
            .await?;
        self.dispatch
            .queue_topic_analysis(created.id, &created.content, false)
            .await?;
        self.dispatch.queue_daily_rollup(user_id, created.date).await?;

        info!(entry_id = created.id, user_id, "created entry");
        Ok(to_record(created, Some(sentiment)))
    }

    /// Update an entry. The overall sentiment is only re-classified when
    /// the content actually changed; analysis reprocessing follows suit.
    /// Rollups are queued for the entry's day, and for the old day too when
    /// the entry moved.
    pub async fn update(&self, user_id: &str, id: i32, input: EntryInput) -> AppResult<EntryRecord> {
        let existing = self
            .entry_repo
            .find_by_id_for_user(id, user_id)
            .await?
            .ok_or(AppError::EntryNotFound(id))?;

        let content_changed = existing.content != input.content;
        let old_date = existing.date;
        let EntryInput {
            title,
            content,
            date,
            time,
        } = input;

        let mut active: entry::ActiveModel = existing.into();
        active.title = Set(title);
        if let Some(date) = date {
            active.date = Set(date);
        }
        if let Some(time) = time {
            active.time = Set(time);
        }

        let mut sentiment = None;
        if content_changed {
            let overall = self
                .classifier
                .overall_sentiment(&content)
                .await
                .map_err(|e| AppError::ExternalService(e.to_string()))?;
            let resolved = self
                .taxonomy_repo
                .find_or_create_sentiment(&overall.overall_sentiment)
                .await?;
            active.sentiment_id = Set(resolved.id);
            sentiment = Some(resolved);
        }
        active.content = Set(content);

        let updated = self.entry_repo.update(active).await?;

        if content_changed {
            self.dispatch
                .queue_aspect_analysis(updated.id, &updated.content, true)
                .await?;
            self.dispatch
                .queue_topic_analysis(updated.id, &updated.content, true)
                .await?;
        }
        self.dispatch.queue_daily_rollup(user_id, updated.date).await?;
        if updated.date != old_date {
            self.dispatch.queue_daily_rollup(user_id, old_date).await?;
        }

        info!(entry_id = updated.id, user_id, content_changed, "updated entry");
        match sentiment {
            Some(sentiment) => Ok(to_record(updated, Some(sentiment))),
            None => self.get(user_id, updated.id).await,
        }
    }

    /// Delete an entry and queue a rollup recompute for its day. Link rows
    /// are removed by the FK cascade.
    pub async fn delete(&self, user_id: &str, id: i32) -> AppResult<()> {
        let existing = self
            .entry_repo
            .find_by_id_for_user(id, user_id)
            .await?
            .ok_or(AppError::EntryNotFound(id))?;

        if self.entry_repo.delete_by_id_for_user(id, user_id).await? {
            self.dispatch
                .queue_daily_rollup(user_id, existing.date)
                .await?;
            info!(entry_id = id, user_id, "deleted entry");
        }
        Ok(())
    }

    /// Get one entry owned by the user.
    pub async fn get(&self, user_id: &str, id: i32) -> AppResult<EntryRecord> {
        let (entry, sentiment) = self
            .entry_repo
            .find_with_sentiment(id, user_id)
            .await?
            .ok_or(AppError::EntryNotFound(id))?;
        Ok(to_record(entry, sentiment))
    }

    /// All of a user's entries, newest first.
    pub async fn list(&self, user_id: &str) -> AppResult<Vec<EntryRecord>> {
        let entries = self.entry_repo.find_all_for_user(user_id).await?;
        Ok(entries
            .into_iter()
            .map(|(entry, sentiment)| to_record(entry, sentiment))
            .collect())
    }
}

fn to_record(entry: entry::Model, sentiment: Option<sentiment::Model>) -> EntryRecord {
    EntryRecord {
        id: entry.id,
        title: entry.title,
        content: entry.content,
        date: entry.date,
        time: entry.time,
        sentiment: sentiment.map(|s| s.name).unwrap_or_default(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use notemood_common::config::ClassifierConfig;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::super::classifier::{
        ClassifierTransport, ClassifyRequest, TransportError, TransportResponse,
    };
    use super::super::dispatch::NoOpDispatch;
    use super::*;

    struct FixedTransport {
        body: Option<String>,
    }

    #[async_trait::async_trait]
    impl ClassifierTransport for FixedTransport {
        async fn post(
            &self,
            _url: &str,
            _bearer_token: &str,
            _body: &ClassifyRequest,
            _timeout: Duration,
        ) -> Result<TransportResponse, TransportError> {
            match &self.body {
                Some(body) => Ok(TransportResponse {
                    status: 200,
                    body: body.clone(),
                }),
                None => Err(TransportError::Other("connection refused".to_owned())),
            }
        }
    }

    fn classifier(body: Option<&str>) -> ClassifierClient {
        ClassifierClient::with_transport(
            ClassifierConfig::default(),
            Arc::new(FixedTransport {
                body: body.map(str::to_owned),
            }),
        )
    }

    fn service(db: sea_orm::DatabaseConnection, classifier: ClassifierClient) -> EntryService {
        let db = Arc::new(db);
        EntryService::new(
            EntryRepository::new(Arc::clone(&db)),
            TaxonomyRepository::new(db),
            classifier,
            Arc::new(NoOpDispatch),
        )
    }

    fn entry_model(id: i32, content: &str, date: &str) -> entry::Model {
        entry::Model {
            id,
            user_id: "u1".to_string(),
            title: "a day".to_string(),
            content: content.to_string(),
            date: date.parse().unwrap(),
            time: "09:30:00".parse().unwrap(),
            sentiment_id: 1,
        }
    }

    fn input(content: &str) -> EntryInput {
        EntryInput {
            title: "a day".to_string(),
            content: content.to_string(),
            date: Some("2026-03-01".parse().unwrap()),
            time: Some("09:30:00".parse().unwrap()),
        }
    }

    #[tokio::test]
    async fn create_fails_when_classifier_is_unreachable() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let service = service(db, classifier(None));

        let err = service.create("u1", input("hello")).await.unwrap_err();
        assert!(matches!(err, AppError::ExternalService(_)));
    }

    #[tokio::test]
    async fn create_stores_resolved_sentiment() {
        let positive = sentiment::Model {
            id: 1,
            name: "Positive".to_string(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[positive]])
            .append_query_results([[entry_model(7, "hello", "2026-03-01")]])
            .into_connection();
        let service = service(db, classifier(Some(r#"{"overall_seniment":"Positive"}"#)));

        let record = service.create("u1", input("hello")).await.unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.sentiment, "Positive");
        assert_eq!(record.date, "2026-03-01".parse().unwrap());
    }

    #[tokio::test]
    async fn update_with_unchanged_content_skips_classification() {
        let existing = entry_model(7, "same words", "2026-03-01");
        let updated = entry_model(7, "same words", "2026-03-01");
        let sentiment = sentiment::Model {
            id: 1,
            name: "Positive".to_string(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[existing]])
            .append_query_results([[updated.clone()]])
            .append_query_results([[(updated, sentiment)]])
            .into_connection();
        // The transport fails, so any classification attempt would error out.
        let service = service(db, classifier(None));

        let record = service.update("u1", 7, input("same words")).await.unwrap();
        assert_eq!(record.sentiment, "Positive");
    }

    #[tokio::test]
    async fn update_of_missing_entry_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entry::Model>::new()])
            .into_connection();
        let service = service(db, classifier(None));

        let err = service.update("u1", 42, input("hello")).await.unwrap_err();
        assert!(matches!(err, AppError::EntryNotFound(42)));
    }
}
