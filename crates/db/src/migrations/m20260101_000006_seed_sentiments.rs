//! Seed required sentiment reference rows.
//!
//! The daily rollup tie-break requires a sentiment named "Neutral" to exist;
//! it is a fatal configuration error at runtime if it does not. Seeding here
//! guarantees the invariant at deployment time.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const SEEDED: [&str; 3] = ["Positive", "Negative", "Neutral"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in SEEDED {
            let insert = Query::insert()
                .into_table(Sentiment::Table)
                .columns([Sentiment::Name])
                .values_panic([name.into()])
                .on_conflict(
                    OnConflict::column(Sentiment::Name)
                        .do_nothing()
                        .to_owned(),
                )
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = Query::delete()
            .from_table(Sentiment::Table)
            .cond_where(Expr::col(Sentiment::Name).is_in(SEEDED))
            .to_owned();

        manager.exec_stmt(delete).await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Sentiment {
    Table,
    Name,
}
