//! Topic reference entity (subject-matter label independent of aspects).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "topic")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Natural key.
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::topic_sentiment::Entity")]
    TopicSentiment,
}

impl Related<super::topic_sentiment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TopicSentiment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
