use chrono::{DateTime, Utc};
use common::{DesignConfig, DesignConfigPatch};
use serde::{Deserialize, Serialize};

use crate::entity::design_system;
use crate::error::AppError;

use super::shared::validate_required;

pub const MAX_DESIGN_NAME_LENGTH: usize = 128;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateDesignRequest {
    #[schema(example = "Violet")]
    pub name: String,
    /// All five sections are required.
    #[serde(flatten)]
    pub config: DesignConfig,
    /// Make the new design system the active one. Default: false.
    #[serde(default)]
    pub activate: bool,
}

/// Section-level update. Present sections replace the stored ones.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateDesignRequest {
    pub name: Option<String>,
    #[serde(flatten)]
    pub patch: DesignConfigPatch,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DesignResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Violet")]
    pub name: String,
    #[serde(flatten)]
    pub config: DesignConfig,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<design_system::Model> for DesignResponse {
    fn from(m: design_system::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            config: m.config,
            is_active: m.is_active,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn validate_name(name: &str) -> Result<(), AppError> {
    validate_required("Name", name, MAX_DESIGN_NAME_LENGTH)
}

pub fn validate_create_design(req: &CreateDesignRequest) -> Result<(), AppError> {
    validate_name(&req.name)?;
    req.config.validate()?;
    Ok(())
}

pub fn validate_update_design(req: &UpdateDesignRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name)?;
    }
    req.patch.validate()?;
    Ok(())
}
