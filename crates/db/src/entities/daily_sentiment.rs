//! Daily sentiment rollup entity.
//!
//! One derived row per `(user_id, date)`, keyed by that composite identity
//! rather than a surrogate id. The row exists only while at least one entry
//! exists for that user-day; the aggregator deletes it otherwise.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "daily_sentiment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,

    #[sea_orm(primary_key, auto_increment = false)]
    pub date: Date,

    /// Name of the day's overall sentiment.
    pub sentiment: String,

    /// Share of the day's entries carrying that sentiment.
    pub percentage: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
