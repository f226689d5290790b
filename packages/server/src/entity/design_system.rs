use common::DesignConfig;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A named theme. At most one row has `is_active = true`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "design_system")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    /// The five theme sections stored as one JSON document.
    #[sea_orm(column_type = "JsonBinary")]
    pub config: DesignConfig,

    #[sea_orm(default_value = false, indexed)]
    pub is_active: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
