//! Create entry table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Entry::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entry::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entry::UserId).string_len(64).not_null())
                    .col(ColumnDef::new(Entry::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Entry::Content).text().not_null())
                    .col(ColumnDef::new(Entry::Date).date().not_null())
                    .col(ColumnDef::new(Entry::Time).time().not_null())
                    .col(ColumnDef::new(Entry::SentimentId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_entry_sentiment")
                            .from(Entry::Table, Entry::SentimentId)
                            .to(Sentiment::Table, Sentiment::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, date) - daily rollup recomputation and range scans
        manager
            .create_index(
                Index::create()
                    .name("idx_entry_user_date")
                    .table(Entry::Table)
                    .col(Entry::UserId)
                    .col(Entry::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entry::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Entry {
    Table,
    Id,
    UserId,
    Title,
    Content,
    Date,
    Time,
    SentimentId,
}

#[derive(Iden)]
enum Sentiment {
    Table,
    Id,
}
