//! Journal entry entity.
//!
//! Entries are authored by the surrounding application; the analysis
//! pipelines treat `id` and `content` as their primary inputs and never
//! create or delete entry rows themselves.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entry")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning user (identity is managed outside this system).
    pub user_id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Calendar day the entry belongs to (drives the daily rollup).
    pub date: Date,

    pub time: Time,

    /// Overall sentiment resolved by the classifier at write time.
    pub sentiment_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sentiment::Entity",
        from = "Column::SentimentId",
        to = "super::sentiment::Column::Id"
    )]
    Sentiment,

    #[sea_orm(has_many = "super::entity_sentiment::Entity")]
    EntitySentiment,

    #[sea_orm(has_many = "super::topic_sentiment::Entity")]
    TopicSentiment,
}

impl Related<super::sentiment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sentiment.def()
    }
}

impl Related<super::entity_sentiment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntitySentiment.def()
    }
}

impl Related<super::topic_sentiment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TopicSentiment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
