use serde::Serialize;

use super::experience::ExperienceResponse;
use super::project::ProjectResponse;

/// Everything the portfolio front page renders in one payload.
#[derive(Serialize, utoipa::ToSchema)]
pub struct PortfolioResponse {
    pub experiences: Vec<ExperienceResponse>,
    pub projects: Vec<ProjectResponse>,
}
