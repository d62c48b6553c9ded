//! Create sentiment table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sentiment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sentiment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sentiment::Name).string_len(128).not_null())
                    .to_owned(),
            )
            .await?;

        // Unique index: name is the natural key; concurrent find-or-create
        // relies on this constraint to resolve races.
        manager
            .create_index(
                Index::create()
                    .name("idx_sentiment_name")
                    .table(Sentiment::Table)
                    .col(Sentiment::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sentiment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sentiment {
    Table,
    Id,
    Name,
}
