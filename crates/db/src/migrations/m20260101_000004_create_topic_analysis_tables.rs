//! Create topic analysis tables migration (topic, topic_sentiment).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Topic::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Topic::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Topic::Name).string_len(128).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_topic_name")
                    .table(Topic::Table)
                    .col(Topic::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TopicSentiment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TopicSentiment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TopicSentiment::TopicId).integer().not_null())
                    .col(
                        ColumnDef::new(TopicSentiment::SentimentId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TopicSentiment::EntryId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_topic_sentiment_topic")
                            .from(TopicSentiment::Table, TopicSentiment::TopicId)
                            .to(Topic::Table, Topic::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_topic_sentiment_sentiment")
                            .from(TopicSentiment::Table, TopicSentiment::SentimentId)
                            .to(Sentiment::Table, Sentiment::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_topic_sentiment_entry")
                            .from(TopicSentiment::Table, TopicSentiment::EntryId)
                            .to(Entry::Table, Entry::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: one link per (topic, sentiment, entry) triple
        manager
            .create_index(
                Index::create()
                    .name("idx_topic_sentiment_triple")
                    .table(TopicSentiment::Table)
                    .col(TopicSentiment::TopicId)
                    .col(TopicSentiment::SentimentId)
                    .col(TopicSentiment::EntryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: entry_id (for full-replace deletes on entry update)
        manager
            .create_index(
                Index::create()
                    .name("idx_topic_sentiment_entry_id")
                    .table(TopicSentiment::Table)
                    .col(TopicSentiment::EntryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TopicSentiment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Topic::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Topic {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum TopicSentiment {
    Table,
    Id,
    TopicId,
    SentimentId,
    EntryId,
}

#[derive(Iden)]
enum Sentiment {
    Table,
    Id,
}

#[derive(Iden)]
enum Entry {
    Table,
    Id,
}
