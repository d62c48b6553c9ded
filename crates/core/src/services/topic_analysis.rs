//! Topic extraction pipeline.
//!
//! Stores topic/sentiment links per entry and shapes them into frequency
//! and percentage breakdowns across a user's entries.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use notemood_common::AppResult;
use notemood_db::repositories::{TaxonomyRepository, TopicSentimentRow};
use serde::Serialize;
use tracing::{info, warn};

use super::aspect_analysis::SentimentPercentage;
use super::classifier::ClassifierClient;
use super::stats::round2;

/// A topic with how often it appears and how entries mentioning it feel.
///
/// `percentage` is the share of the user's analysed entries that mention
/// the topic, so values across topics can sum past 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicBreakdown {
    pub topic: String,
    pub frequency: u64,
    pub percentage: f64,
    pub sentiments: Vec<SentimentPercentage>,
}

/// Topic analysis service.
#[derive(Clone)]
pub struct TopicAnalysisService {
    taxonomy_repo: TaxonomyRepository,
    classifier: ClassifierClient,
}

impl TopicAnalysisService {
    #[must_use]
    pub const fn new(taxonomy_repo: TaxonomyRepository, classifier: ClassifierClient) -> Self {
        Self {
            taxonomy_repo,
            classifier,
        }
    }

    /// Classify an entry and store its topic/sentiment links.
    ///
    /// A classifier failure is logged and swallowed, same as the aspect
    /// pipeline: the entry ends up with no topics until reprocessed.
    pub async fn add(&self, entry_id: i32, content: &str) -> AppResult<()> {
        let response = match self.classifier.topics(content).await {
            Ok(response) => response,
            Err(err) => {
                warn!(entry_id, error = %err, "topic classification failed, storing no topics");
                return Ok(());
            }
        };

        for (topic_name, sentiment_name) in &response.topics {
            let topic = self.taxonomy_repo.find_or_create_topic(topic_name).await?;
            let sentiment = self
                .taxonomy_repo
                .find_or_create_sentiment(sentiment_name)
                .await?;
            self.taxonomy_repo
                .link_topic_sentiment(topic.id, sentiment.id, entry_id)
                .await?;
        }

        info!(entry_id, topics = response.topics.len(), "stored topic analysis");
        Ok(())
    }

    /// Replace an entry's topic links with a fresh classification.
    pub async fn update(&self, entry_id: i32, content: &str) -> AppResult<()> {
        let removed = self
            .taxonomy_repo
            .delete_topic_links_for_entry(entry_id)
            .await?;
        info!(entry_id, removed, "cleared previous topic links");
        self.add(entry_id, content).await
    }

    /// Topic frequencies and sentiment splits for a user's entries in the
    /// given date range (both bounds optional).
    pub async fn topic_analysis(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<TopicBreakdown>> {
        let rows = self
            .taxonomy_repo
            .topic_sentiment_rows(user_id, start, end)
            .await?;
        Ok(build_topic_breakdown(rows))
    }
}

/// Shape flat topic/sentiment/entry rows into per-topic breakdowns.
///
/// The percentage denominator is the number of distinct entries across all
/// topics in the range, not the total number of links.
fn build_topic_breakdown(rows: Vec<TopicSentimentRow>) -> Vec<TopicBreakdown> {
    if rows.is_empty() {
        return Vec::new();
    }

    let distinct_entries: HashSet<i32> = rows.iter().map(|row| row.entry_id).collect();
    let total_entries = distinct_entries.len() as f64;

    let mut by_topic: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in rows {
        by_topic.entry(row.topic_name).or_default().push(row.sentiment_name);
    }

    let mut topics: Vec<TopicBreakdown> = Vec::new();
    for (topic, sentiment_names) in by_topic {
        let frequency = sentiment_names.len() as u64;

        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for name in sentiment_names {
            *counts.entry(name).or_insert(0) += 1;
        }
        let mut sentiments: Vec<SentimentPercentage> = counts
            .into_iter()
            .map(|(sentiment, count)| SentimentPercentage {
                sentiment,
                percentage: round2(count as f64 / frequency as f64 * 100.0),
            })
            .collect();
        sentiments.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

        topics.push(TopicBreakdown {
            topic,
            frequency,
            percentage: round2(frequency as f64 / total_entries * 100.0),
            sentiments,
        });
    }

    topics.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    topics
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn link(topic: &str, sentiment: &str, entry_id: i32) -> TopicSentimentRow {
        TopicSentimentRow {
            topic_name: topic.to_owned(),
            sentiment_name: sentiment.to_owned(),
            entry_id,
        }
    }

    #[test]
    fn percentage_uses_distinct_entries_as_denominator() {
        // Two entries mention Work, one of them also mentions Home.
        let rows = vec![
            link("Work", "Negative", 1),
            link("Work", "Positive", 2),
            link("Home", "Neutral", 2),
        ];

        let topics = build_topic_breakdown(rows);

        assert_eq!(topics[0].topic, "Work");
        assert_eq!(topics[0].frequency, 2);
        assert_eq!(topics[0].percentage, 100.0);
        assert_eq!(topics[1].topic, "Home");
        assert_eq!(topics[1].frequency, 1);
        assert_eq!(topics[1].percentage, 50.0);
    }

    #[test]
    fn topics_are_ordered_by_frequency_then_name() {
        let rows = vec![
            link("Home", "Neutral", 1),
            link("Work", "Negative", 1),
            link("Sleep", "Negative", 2),
            link("Sleep", "Negative", 3),
        ];

        let topics = build_topic_breakdown(rows);

        let names: Vec<&str> = topics.iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(names, vec!["Sleep", "Home", "Work"]);
    }

    #[test]
    fn sentiment_split_is_within_a_topic() {
        let rows = vec![
            link("Work", "Negative", 1),
            link("Work", "Negative", 2),
            link("Work", "Positive", 3),
        ];

        let topics = build_topic_breakdown(rows);

        assert_eq!(topics[0].sentiments[0].sentiment, "Negative");
        assert_eq!(topics[0].sentiments[0].percentage, 66.67);
        assert_eq!(topics[0].sentiments[1].percentage, 33.33);
    }

    #[test]
    fn empty_rows_produce_empty_breakdown() {
        assert!(build_topic_breakdown(Vec::new()).is_empty());
    }
}
