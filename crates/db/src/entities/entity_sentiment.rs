//! Entity-sentiment link row.
//!
//! Records that a given subject was expressed with a given sentiment in one
//! specific entry. The `(subject_id, sentiment_id, entry_id)` triple is
//! unique so reprocessing an entry never inflates counts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "entity_sentiment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub subject_id: i32,

    pub sentiment_id: i32,

    pub entry_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id",
        on_delete = "Cascade"
    )]
    Subject,

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

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
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
