//! Create daily sentiment rollup table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DailySentiment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailySentiment::UserId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DailySentiment::Date).date().not_null())
                    .col(
                        ColumnDef::new(DailySentiment::Sentiment)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DailySentiment::Percentage)
                            .double()
                            .not_null(),
                    )
                    // Composite primary key: the rollup is keyed by identity,
                    // not by a surrogate id.
                    .primary_key(
                        Index::create()
                            .col(DailySentiment::UserId)
                            .col(DailySentiment::Date),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(DailySentiment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum DailySentiment {
    Table,
    UserId,
    Date,
    Sentiment,
    Percentage,
}
