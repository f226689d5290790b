use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::string_list::StringList;

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "project")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub technologies: StringList,
    pub link: String,
    pub github: Option<String>,
    pub app_store: Option<String>,
    pub play_store: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub achievements: StringList,
}

impl ActiveModelBehavior for ActiveModel {}
