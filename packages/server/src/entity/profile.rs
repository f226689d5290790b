use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Primary key of the single profile row.
pub const PROFILE_ID: &str = "main_profile";

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub email: String,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub professional_background: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub journey: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
