//! Subject entity (a named thing mentioned within one aspect category).
//!
//! Natural key is `(name, aspect_id)`: the same name under a different
//! aspect is a distinct row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subject")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub aspect_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::aspect::Entity",
        from = "Column::AspectId",
        to = "super::aspect::Column::Id",
        on_delete = "Cascade"
    )]
    Aspect,

    #[sea_orm(has_many = "super::entity_sentiment::Entity")]
    EntitySentiment,
}

impl Related<super::aspect::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Aspect.def()
    }
}

impl Related<super::entity_sentiment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EntitySentiment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
