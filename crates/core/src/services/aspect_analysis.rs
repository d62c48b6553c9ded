//! Aspect-based sentiment analysis pipeline.
//!
//! Turns classifier output into taxonomy rows and link triples, and shapes
//! the stored triples back into per-aspect percentage breakdowns.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use notemood_common::AppResult;
use notemood_db::repositories::{EntitySentimentCount, TaxonomyRepository};
use serde::Serialize;
use tracing::{info, warn};

use super::classifier::ClassifierClient;
use super::stats::round2;

/// One sentiment's share of the mentions of a subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentPercentage {
    pub sentiment: String,
    pub percentage: f64,
}

/// A subject within an aspect, with its sentiment split. Sentiments are
/// ordered by descending percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectBreakdown {
    pub subject: String,
    pub sentiments: Vec<SentimentPercentage>,
}

/// An aspect with its subjects, ordered by each subject's dominant
/// percentage. Aspects themselves are ordered by their highest percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectBreakdown {
    pub aspect: String,
    pub subjects: Vec<SubjectBreakdown>,
}

/// Aspect analysis service.
#[derive(Clone)]
pub struct AspectAnalysisService {
    taxonomy_repo: TaxonomyRepository,
    classifier: ClassifierClient,
}

impl AspectAnalysisService {
    #[must_use]
    pub const fn new(taxonomy_repo: TaxonomyRepository, classifier: ClassifierClient) -> Self {
        Self {
            taxonomy_repo,
            classifier,
        }
    }

    /// Classify an entry and store its aspect/subject/sentiment triples.
    ///
    /// A classifier failure is logged and swallowed: the entry simply ends
    /// up with no aspect rows, and a later reprocess can fill them in.
    pub async fn add(&self, entry_id: i32, content: &str) -> AppResult<()> {
        let response = match self.classifier.aspects(content).await {
            Ok(response) => response,
            Err(err) => {
                warn!(entry_id, error = %err, "aspect classification failed, storing no aspects");
                return Ok(());
            }
        };

        for (aspect_name, subjects) in &response.aspects {
            let aspect = self.taxonomy_repo.find_or_create_aspect(aspect_name).await?;
            for (subject_name, sentiment_name) in &subjects.entities {
                let sentiment = self
                    .taxonomy_repo
                    .find_or_create_sentiment(sentiment_name)
                    .await?;
                let subject = self
                    .taxonomy_repo
                    .find_or_create_subject(subject_name, aspect.id)
                    .await?;
                self.taxonomy_repo
                    .link_entity_sentiment(subject.id, sentiment.id, entry_id)
                    .await?;
            }
        }

        info!(entry_id, aspects = response.aspects.len(), "stored aspect analysis");
        Ok(())
    }

    /// Replace an entry's aspect links with a fresh classification.
    ///
    /// Old links are removed before the classifier is called, so a failed
    /// classification leaves the entry with no stale results.
    pub async fn update(&self, entry_id: i32, content: &str) -> AppResult<()> {
        let removed = self
            .taxonomy_repo
            .delete_entity_links_for_entry(entry_id)
            .await?;
        info!(entry_id, removed, "cleared previous aspect links");
        self.add(entry_id, content).await
    }

    /// Per-aspect sentiment percentages for a user's entries in the given
    /// date range (both bounds optional).
    pub async fn entity_sentiment_percentages(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<AspectBreakdown>> {
        let counts = self
            .taxonomy_repo
            .entity_sentiment_counts(user_id, start, end)
            .await?;
        Ok(build_aspect_breakdown(counts))
    }
}

/// Shape grouped link counts into the nested breakdown.
///
/// Percentages are per subject: each subject's sentiment shares sum to 100.
/// Ties fall back to alphabetical order, which keeps the output stable.
fn build_aspect_breakdown(rows: Vec<EntitySentimentCount>) -> Vec<AspectBreakdown> {
    let mut tree: BTreeMap<String, BTreeMap<String, Vec<(String, i64)>>> = BTreeMap::new();
    for row in rows {
        tree.entry(row.aspect_name)
            .or_default()
            .entry(row.subject_name)
            .or_default()
            .push((row.sentiment_name, row.count));
    }

    let mut aspects: Vec<(f64, AspectBreakdown)> = Vec::new();
    for (aspect, subject_map) in tree {
        let mut subjects: Vec<SubjectBreakdown> = Vec::new();
        for (subject, sentiment_counts) in subject_map {
            let total: i64 = sentiment_counts.iter().map(|(_, count)| count).sum();
            let mut sentiments: Vec<SentimentPercentage> = sentiment_counts
                .into_iter()
                .map(|(sentiment, count)| SentimentPercentage {
                    sentiment,
                    percentage: round2(count as f64 / total as f64 * 100.0),
                })
                .collect();
            sentiments.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
            subjects.push(SubjectBreakdown { subject, sentiments });
        }

        subjects.sort_by(|a, b| dominant(b).total_cmp(&dominant(a)));
        let peak = subjects.first().map_or(0.0, dominant);
        aspects.push((peak, AspectBreakdown { aspect, subjects }));
    }

    aspects.sort_by(|a, b| b.0.total_cmp(&a.0));
    aspects.into_iter().map(|(_, aspect)| aspect).collect()
}

fn dominant(subject: &SubjectBreakdown) -> f64 {
    subject
        .sentiments
        .first()
        .map_or(0.0, |sentiment| sentiment.percentage)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use notemood_common::config::ClassifierConfig;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::super::classifier::{
        ClassifierTransport, ClassifyRequest, TransportError, TransportResponse,
    };
    use super::*;

    fn row(aspect: &str, subject: &str, sentiment: &str, count: i64) -> EntitySentimentCount {
        EntitySentimentCount {
            aspect_name: aspect.to_owned(),
            subject_name: subject.to_owned(),
            sentiment_name: sentiment.to_owned(),
            count,
        }
    }

    #[test]
    fn breakdown_orders_everything_by_descending_percentage() {
        let rows = vec![
            row("Work", "Boss", "Negative", 3),
            row("Work", "Boss", "Positive", 1),
            row("Work", "Deadlines", "Negative", 1),
            row("Work", "Deadlines", "Positive", 1),
            row("Family", "Sister", "Positive", 2),
        ];

        let breakdown = build_aspect_breakdown(rows);

        // Family peaks at 100%, Work at 75%.
        assert_eq!(breakdown[0].aspect, "Family");
        assert_eq!(breakdown[1].aspect, "Work");

        let work = &breakdown[1];
        assert_eq!(work.subjects[0].subject, "Boss");
        assert_eq!(work.subjects[0].sentiments[0].sentiment, "Negative");
        assert_eq!(work.subjects[0].sentiments[0].percentage, 75.0);
        assert_eq!(work.subjects[0].sentiments[1].percentage, 25.0);
        assert_eq!(work.subjects[1].subject, "Deadlines");
        assert_eq!(work.subjects[1].sentiments[0].percentage, 50.0);
    }

    #[test]
    fn subject_percentages_sum_to_one_hundred() {
        let rows = vec![
            row("Work", "Boss", "Negative", 1),
            row("Work", "Boss", "Positive", 1),
            row("Work", "Boss", "Neutral", 1),
        ];

        let breakdown = build_aspect_breakdown(rows);
        let sum: f64 = breakdown[0].subjects[0]
            .sentiments
            .iter()
            .map(|s| s.percentage)
            .sum();
        assert!((sum - 100.0).abs() <= 0.03);
    }

    #[test]
    fn empty_rows_produce_empty_breakdown() {
        assert!(build_aspect_breakdown(Vec::new()).is_empty());
    }

    struct FailingTransport;

    #[async_trait::async_trait]
    impl ClassifierTransport for FailingTransport {
        async fn post(
            &self,
            _url: &str,
            _bearer_token: &str,
            _body: &ClassifyRequest,
            _timeout: std::time::Duration,
        ) -> Result<TransportResponse, TransportError> {
            Err(TransportError::Other("connection refused".to_owned()))
        }
    }

    #[tokio::test]
    async fn add_swallows_classifier_failures() {
        // No query results scripted: the service must not touch the database.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let classifier = ClassifierClient::with_transport(
            ClassifierConfig::default(),
            Arc::new(FailingTransport),
        );
        let service = AspectAnalysisService::new(TaxonomyRepository::new(db), classifier);

        service.add(1, "a rough day").await.unwrap();
    }
}
