use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Association between a data item and a tag.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "data_tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub data_item_id: i32,
    #[sea_orm(primary_key, indexed)]
    pub tag_id: i32,
    #[sea_orm(belongs_to, from = "data_item_id", to = "id")]
    pub data_item: Option<super::data_item::Entity>,
    #[sea_orm(belongs_to, from = "tag_id", to = "id")]
    pub tag: Option<super::tag::Entity>,

    /// Order in which the tag names were supplied for the item.
    #[sea_orm(default_value = 0)]
    pub position: i32,
}

impl ActiveModelBehavior for ActiveModel {}
