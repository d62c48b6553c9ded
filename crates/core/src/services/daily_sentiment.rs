//! Daily sentiment rollups.
//!
//! Each (user, day) with at least one entry carries a single dominant
//! sentiment and its share of the day's entries. Rollups are recomputed
//! from scratch whenever a day's entries change.

use std::collections::HashMap;

use chrono::NaiveDate;
use notemood_common::{AppError, AppResult};
use notemood_db::entities::daily_sentiment;
use notemood_db::repositories::{
    DailySentimentRepository, EntryRepository, TaxonomyRepository,
};
use serde::Serialize;
use tracing::info;

use super::stats::{count_names, percentages, round2};

/// Days covered by the rolling negativity signal, including the latest day.
pub const ROLLING_WINDOW_DAYS: u64 = 7;

/// Share of Negative days at which the rolling signal raises.
const NEGATIVE_SHARE_THRESHOLD: f64 = 50.0;

/// Sentiment recorded when no single sentiment dominates a day.
const TIE_BREAK_SENTIMENT: &str = "Neutral";

/// Percentage recorded alongside the tie-break sentiment when it did not
/// itself appear that day.
const TIE_BREAK_PERCENTAGE: f64 = 50.0;

const NEGATIVE_SENTIMENT: &str = "Negative";

/// The dominant sentiment of one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyMood {
    pub date: NaiveDate,
    pub sentiment: String,
    pub percentage: f64,
}

/// How often a sentiment was the dominant one across a range of days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentFrequency {
    pub sentiment: String,
    pub count: u64,
    pub percentage: f64,
}

/// Outcome of the rolling negativity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RollingSignal {
    pub raised: bool,
}

/// Daily sentiment rollup service.
#[derive(Clone)]
pub struct DailySentimentService {
    entry_repo: EntryRepository,
    rollup_repo: DailySentimentRepository,
    taxonomy_repo: TaxonomyRepository,
}

impl DailySentimentService {
    #[must_use]
    pub const fn new(
        entry_repo: EntryRepository,
        rollup_repo: DailySentimentRepository,
        taxonomy_repo: TaxonomyRepository,
    ) -> Self {
        Self {
            entry_repo,
            rollup_repo,
            taxonomy_repo,
        }
    }

    /// Recompute the rollup for one (user, day) from its entries.
    ///
    /// A day left with no entries loses its rollup. When several sentiments
    /// tie for the top share, the day is recorded as Neutral; the Neutral
    /// sentiment must exist in the reference table or this fails with
    /// [`AppError::MissingReferenceData`].
    pub async fn recompute(&self, user_id: &str, date: NaiveDate) -> AppResult<()> {
        let entries = self.entry_repo.find_by_user_and_date(user_id, date).await?;
        if entries.is_empty() {
            let removed = self.rollup_repo.delete_if_exists(user_id, date).await?;
            if removed {
                info!(user_id, %date, "removed rollup for day with no entries");
            }
            return Ok(());
        }

        let names: Vec<&str> = entries
            .iter()
            .filter_map(|(_, sentiment)| sentiment.as_ref().map(|s| s.name.as_str()))
            .collect();
        let shares = percentages(&count_names(names));

        let overall = self.dominant_sentiment(&shares).await?;
        let percentage = shares
            .get(&overall)
            .copied()
            .unwrap_or(TIE_BREAK_PERCENTAGE);

        self.rollup_repo
            .upsert(user_id, date, &overall, percentage)
            .await?;
        info!(user_id, %date, sentiment = %overall, percentage, "recomputed daily rollup");
        Ok(())
    }

    /// Remove the rollup for a day, if present.
    pub async fn remove_if_exists(&self, user_id: &str, date: NaiveDate) -> AppResult<bool> {
        self.rollup_repo.delete_if_exists(user_id, date).await
    }

    /// Get the stored rollup for one day.
    pub async fn get(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> AppResult<Option<daily_sentiment::Model>> {
        self.rollup_repo.find(user_id, date).await
    }

    /// Dominant sentiment per day over a date range, ascending by date.
    /// Days with no entries are absent.
    pub async fn mood_per_day(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<DailyMood>> {
        let rollups = self.rollup_repo.find_in_range(user_id, start, end).await?;
        Ok(rollups
            .into_iter()
            .map(|rollup| DailyMood {
                date: rollup.date,
                sentiment: rollup.sentiment,
                percentage: rollup.percentage,
            })
            .collect())
    }

    /// How often each sentiment dominated a day within the range, with its
    /// share of the covered days. Ordered by descending count.
    pub async fn daily_sentiment_counts(
        &self,
        user_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<Vec<SentimentFrequency>> {
        let rollups = self.rollup_repo.find_in_range(user_id, start, end).await?;
        let names: Vec<&str> = rollups.iter().map(|r| r.sentiment.as_str()).collect();
        Ok(sentiment_frequencies(&names))
    }

    /// Check whether Negative days make up at least half of the user's
    /// rollups in the window ending at their latest recorded day.
    pub async fn rolling_signal(&self, user_id: &str) -> AppResult<RollingSignal> {
        let Some(latest) = self.rollup_repo.latest_date(user_id).await? else {
            return Ok(RollingSignal { raised: false });
        };

        let start = latest - chrono::Duration::days(ROLLING_WINDOW_DAYS as i64 - 1);
        let frequencies = self
            .daily_sentiment_counts(user_id, Some(start), Some(latest))
            .await?;

        let raised = frequencies.iter().any(|f| {
            f.sentiment == NEGATIVE_SENTIMENT && f.percentage >= NEGATIVE_SHARE_THRESHOLD
        });
        Ok(RollingSignal { raised })
    }

    /// Pick the sentiment with the highest share, resolving ties to the
    /// Neutral reference row.
    async fn dominant_sentiment(&self, shares: &HashMap<String, f64>) -> AppResult<String> {
        let mut top: Vec<&str> = Vec::new();
        let mut max = f64::MIN;
        for (name, &share) in shares {
            if share > max + f64::EPSILON {
                max = share;
                top.clear();
                top.push(name);
            } else if (share - max).abs() <= f64::EPSILON {
                top.push(name);
            }
        }

        let name = match top.as_slice() {
            [] => {
                return Err(AppError::Internal(
                    "no sentiments resolved for a day with entries".to_string(),
                ));
            }
            [single] => *single,
            _ => TIE_BREAK_SENTIMENT,
        };

        // Resolve through the reference table so a missing row surfaces
        // as MissingReferenceData instead of a dangling name.
        let sentiment = self.taxonomy_repo.require_sentiment(name).await?;
        Ok(sentiment.name)
    }
}

/// Count dominant-sentiment days and express each as a share of the total,
/// ordered by descending count (alphabetical on ties).
fn sentiment_frequencies(names: &[&str]) -> Vec<SentimentFrequency> {
    let total = names.len();
    if total == 0 {
        return Vec::new();
    }

    let counts = count_names(names.iter().copied());
    let mut frequencies: Vec<SentimentFrequency> = counts
        .into_iter()
        .map(|(sentiment, count)| SentimentFrequency {
            sentiment,
            count,
            percentage: round2(count as f64 / total as f64 * 100.0),
        })
        .collect();
    frequencies.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.sentiment.cmp(&b.sentiment)));
    frequencies
}
