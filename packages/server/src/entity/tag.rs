use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A named label shared by many data items. Created lazily, never deleted.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Case-sensitive as stored.
    #[sea_orm(unique)]
    pub name: String,

    #[sea_orm(has_many, via = "data_tag")]
    pub data_items: HasMany<super::data_item::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
