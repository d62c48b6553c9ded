//! Topic-sentiment link row.
//!
//! Analogous to `entity_sentiment`: unique `(topic_id, sentiment_id,
//! entry_id)` triple, cascaded away when the entry is deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "topic_sentiment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub topic_id: i32,

    pub sentiment_id: i32,

    pub entry_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::topic::Entity",
        from = "Column::TopicId",
        to = "super::topic::Column::Id",
        on_delete = "Cascade"
    )]
    Topic,

    #[sea_orm(
        belongs_to = "super::sentiment::Entity",
        from = "Column::SentimentId",
        to = "super::sentiment::Column::Id"
    )]
    Sentiment,

    #[sea_orm(
        belongs_to = "super::entry::Entity",
        from = "Column::EntryId",
        to = "super::entry::Column::Id",
        on_delete = "Cascade"
    )]
    Entry,
}

impl Related<super::topic::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Topic.def()
    }
}

impl Related<super::sentiment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sentiment.def()
    }
}

impl Related<super::entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
