//! Sentiment reference entity.
//!
//! Shared lookup row for every analysis kind ("Positive", "Negative",
//! "Neutral", plus whatever vocabulary the classifier emits). Natural key
//! is the name; a unique index keeps concurrent find-or-create honest.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sentiment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Natural key.
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::entry::Entity")]
    Entry,

    #[sea_orm(has_many = "super::entity_sentiment::Entity")]
    EntitySentiment,

    #[sea_orm(has_many = "super::topic_sentiment::Entity")]
    TopicSentiment,
}

impl Related<super::entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entry.def()
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
