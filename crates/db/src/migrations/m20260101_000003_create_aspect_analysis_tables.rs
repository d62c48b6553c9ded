//! Create aspect analysis tables migration (aspect, subject, entity_sentiment).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Aspect::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Aspect::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Aspect::Name).string_len(128).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_aspect_name")
                    .table(Aspect::Table)
                    .col(Aspect::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subject::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subject::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Subject::AspectId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subject_aspect")
                            .from(Subject::Table, Subject::AspectId)
                            .to(Aspect::Table, Aspect::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (name, aspect_id) - the same name under another
        // aspect is a distinct subject
        manager
            .create_index(
                Index::create()
                    .name("idx_subject_name_aspect")
                    .table(Subject::Table)
                    .col(Subject::Name)
                    .col(Subject::AspectId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EntitySentiment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EntitySentiment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EntitySentiment::SubjectId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EntitySentiment::SentimentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EntitySentiment::EntryId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entity_sentiment_subject")
                            .from(EntitySentiment::Table, EntitySentiment::SubjectId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entity_sentiment_sentiment")
                            .from(EntitySentiment::Table, EntitySentiment::SentimentId)
                            .to(Sentiment::Table, Sentiment::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entity_sentiment_entry")
                            .from(EntitySentiment::Table, EntitySentiment::EntryId)
                            .to(Entry::Table, Entry::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: one link per (subject, sentiment, entry) triple
        manager
            .create_index(
                Index::create()
                    .name("idx_entity_sentiment_triple")
                    .table(EntitySentiment::Table)
                    .col(EntitySentiment::SubjectId)
                    .col(EntitySentiment::SentimentId)
                    .col(EntitySentiment::EntryId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: entry_id (for full-replace deletes on entry update)
        manager
            .create_index(
                Index::create()
                    .name("idx_entity_sentiment_entry_id")
                    .table(EntitySentiment::Table)
                    .col(EntitySentiment::EntryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EntitySentiment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Aspect::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Aspect {
    Table,
    Id,
    Name,
}

#[derive(Iden)]
enum Subject {
    Table,
    Id,
    Name,
    AspectId,
}

#[derive(Iden)]
enum EntitySentiment {
    Table,
    Id,
    SubjectId,
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
