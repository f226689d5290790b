use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::string_list::StringList;

/// A work-experience entry. The id is chosen by the client (e.g. `"acme-2021"`).
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "experience")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub role: String,
    pub company: String,
    pub period: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub achievements: StringList,
    /// Ids of related projects.
    #[sea_orm(column_type = "JsonBinary")]
    pub projects: StringList,
    pub color: String,
}

impl ActiveModelBehavior for ActiveModel {}
