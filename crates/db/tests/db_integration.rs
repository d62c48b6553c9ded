//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `notemood_test`)
//!   `TEST_DB_PASSWORD` (default: `notemood_test`)
//!   `TEST_DB_NAME` (default: `notemood_test`)

#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, NaiveTime};
use notemood_db::entities::entry;
use notemood_db::repositories::{
    DailySentimentRepository, EntryRepository, TaxonomyRepository,
};
use notemood_db::test_utils::{TestDatabase, TestDbConfig};
use sea_orm::Set;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("5432"));
    assert!(url.contains("testdb"));
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let config = TestDbConfig::default();
    let result = TestDatabase::with_config(config).await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_find_or_create_is_idempotent() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.conn.clone();
    let taxonomy = TaxonomyRepository::new(conn);

    let first = taxonomy.find_or_create_sentiment("Positive").await.unwrap();
    let second = taxonomy.find_or_create_sentiment("Positive").await.unwrap();
    assert_eq!(first.id, second.id);

    let aspect_a = taxonomy.find_or_create_aspect("Food").await.unwrap();
    let aspect_b = taxonomy.find_or_create_aspect("Food").await.unwrap();
    assert_eq!(aspect_a.id, aspect_b.id);

    // Same subject name under a different aspect is a distinct row.
    let other_aspect = taxonomy.find_or_create_aspect("Service").await.unwrap();
    let subject_a = taxonomy
        .find_or_create_subject("coffee", aspect_a.id)
        .await
        .unwrap();
    let subject_b = taxonomy
        .find_or_create_subject("coffee", other_aspect.id)
        .await
        .unwrap();
    assert_ne!(subject_a.id, subject_b.id);

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_link_rows_never_duplicate() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.conn.clone();
    let taxonomy = TaxonomyRepository::new(conn.clone());
    let entries = EntryRepository::new(conn);

    let sentiment = taxonomy.find_or_create_sentiment("Positive").await.unwrap();
    let aspect = taxonomy.find_or_create_aspect("Food").await.unwrap();
    let subject = taxonomy
        .find_or_create_subject("coffee", aspect.id)
        .await
        .unwrap();

    let entry = entries
        .create(entry::ActiveModel {
            user_id: Set("u1".to_string()),
            title: Set("morning".to_string()),
            content: Set("the coffee was great".to_string()),
            date: Set(day(1)),
            time: Set(NaiveTime::from_hms_opt(9, 0, 0).unwrap()),
            sentiment_id: Set(sentiment.id),
            ..Default::default()
        })
        .await
        .unwrap();

    // Reprocessing the same triple must be a no-op.
    taxonomy
        .link_entity_sentiment(subject.id, sentiment.id, entry.id)
        .await
        .unwrap();
    taxonomy
        .link_entity_sentiment(subject.id, sentiment.id, entry.id)
        .await
        .unwrap();

    let counts = taxonomy
        .entity_sentiment_counts("u1", None, None)
        .await
        .unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].count, 1);

    // Full-replace delete clears the entry's links.
    let removed = taxonomy
        .delete_entity_links_for_entry(entry.id)
        .await
        .unwrap();
    assert_eq!(removed, 1);

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_daily_rollup_upsert_and_delete() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.conn.clone();
    let rollups = DailySentimentRepository::new(conn);

    rollups.upsert("u1", day(1), "Positive", 100.0).await.unwrap();
    rollups.upsert("u1", day(1), "Negative", 66.67).await.unwrap();

    let row = rollups.find("u1", day(1)).await.unwrap().unwrap();
    assert_eq!(row.sentiment, "Negative");
    assert!((row.percentage - 66.67).abs() < f64::EPSILON);

    assert!(rollups.delete_if_exists("u1", day(1)).await.unwrap());
    assert!(!rollups.delete_if_exists("u1", day(1)).await.unwrap());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_seeded_sentiments_present() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.conn.clone();
    let taxonomy = TaxonomyRepository::new(conn);

    for name in ["Positive", "Negative", "Neutral"] {
        assert!(
            taxonomy.find_sentiment(name).await.unwrap().is_some(),
            "missing seeded sentiment {name}"
        );
    }

    db.drop_database().await.unwrap();
}
