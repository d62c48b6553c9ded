//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20260101_000001_create_sentiment_table;
mod m20260101_000002_create_entry_table;
mod m20260101_000003_create_aspect_analysis_tables;
mod m20260101_000004_create_topic_analysis_tables;
mod m20260101_000005_create_daily_sentiment_table;
mod m20260101_000006_seed_sentiments;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000001_create_sentiment_table::Migration),
            Box::new(m20260101_000002_create_entry_table::Migration),
            Box::new(m20260101_000003_create_aspect_analysis_tables::Migration),
            Box::new(m20260101_000004_create_topic_analysis_tables::Migration),
            Box::new(m20260101_000005_create_daily_sentiment_table::Migration),
            Box::new(m20260101_000006_seed_sentiments::Migration),
        ]
    }
}
