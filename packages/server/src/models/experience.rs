use serde::{Deserialize, Serialize};

use crate::entity::experience;
use crate::error::AppError;

use super::shared::{validate_required, validate_slug_id};

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateExperienceRequest {
    #[schema(example = "acme-2021")]
    pub id: String,
    #[schema(example = "Senior Engineer")]
    pub role: String,
    #[schema(example = "Acme")]
    pub company: String,
    #[schema(example = "2021 - 2023")]
    pub period: String,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Ids of related projects.
    #[serde(default)]
    pub projects: Vec<String>,
    #[schema(example = "#8B5CF6")]
    pub color: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateExperienceRequest {
    pub role: Option<String>,
    pub company: Option<String>,
    pub period: Option<String>,
    pub description: Option<String>,
    pub achievements: Option<Vec<String>>,
    pub projects: Option<Vec<String>>,
    pub color: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ExperienceResponse {
    pub id: String,
    pub role: String,
    pub company: String,
    pub period: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub projects: Vec<String>,
    pub color: String,
}

impl From<experience::Model> for ExperienceResponse {
    fn from(m: experience::Model) -> Self {
        Self {
            id: m.id,
            role: m.role,
            company: m.company,
            period: m.period,
            description: m.description,
            achievements: m.achievements.into(),
            projects: m.projects.into(),
            color: m.color,
        }
    }
}

pub fn validate_create_experience(req: &CreateExperienceRequest) -> Result<(), AppError> {
    validate_slug_id(&req.id)?;
    validate_required("Role", &req.role, 256)?;
    validate_required("Company", &req.company, 256)?;
    validate_required("Period", &req.period, 128)?;
    Ok(())
}

pub fn validate_update_experience(req: &UpdateExperienceRequest) -> Result<(), AppError> {
    if let Some(ref role) = req.role {
        validate_required("Role", role, 256)?;
    }
    if let Some(ref company) = req.company {
        validate_required("Company", company, 256)?;
    }
    if let Some(ref period) = req.period {
        validate_required("Period", period, 128)?;
    }
    Ok(())
}
