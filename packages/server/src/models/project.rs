use serde::{Deserialize, Serialize};

use crate::entity::project;
use crate::error::AppError;

use super::shared::{validate_required, validate_slug_id, validate_title};

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    #[schema(example = "portfolio-site")]
    pub id: String,
    #[schema(example = "Portfolio Site")]
    pub title: String,
    pub description: String,
    #[schema(example = "/images/portfolio.png")]
    pub image: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[schema(example = "https://example.com")]
    pub link: String,
    pub github: Option<String>,
    pub app_store: Option<String>,
    pub play_store: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub technologies: Option<Vec<String>>,
    pub link: Option<String>,
    pub github: Option<String>,
    pub app_store: Option<String>,
    pub play_store: Option<String>,
    pub achievements: Option<Vec<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub link: String,
    pub github: Option<String>,
    pub app_store: Option<String>,
    pub play_store: Option<String>,
    pub achievements: Vec<String>,
}

impl From<project::Model> for ProjectResponse {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            image: m.image,
            technologies: m.technologies.into(),
            link: m.link,
            github: m.github,
            app_store: m.app_store,
            play_store: m.play_store,
            achievements: m.achievements.into(),
        }
    }
}

pub fn validate_create_project(req: &CreateProjectRequest) -> Result<(), AppError> {
    validate_slug_id(&req.id)?;
    validate_title(&req.title)?;
    validate_required("Link", &req.link, 2048)
}

pub fn validate_update_project(req: &UpdateProjectRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref link) = req.link {
        validate_required("Link", link, 2048)?;
    }
    Ok(())
}
