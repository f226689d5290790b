use axum::Json;
use axum::extract::State;
use sea_orm::*;
use serde::Serialize;
use tracing::instrument;

use crate::entity::{experience, project};
use crate::error::AppError;
use crate::models::experience::ExperienceResponse;
use crate::models::portfolio::PortfolioResponse;
use crate::models::project::ProjectResponse;
use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: &'static str,
}

#[utoipa::path(
    get,
    path = "/portfolio",
    tag = "Portfolio",
    operation_id = "getPortfolio",
    summary = "All experiences and projects",
    responses(
        (status = 200, description = "Every experience and project ordered by ID", body = PortfolioResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<PortfolioResponse>, AppError> {
    let experiences = experience::Entity::find()
        .order_by_asc(experience::Column::Id)
        .all(&state.db)
        .await?;
    let projects = project::Entity::find()
        .order_by_asc(project::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(PortfolioResponse {
        experiences: experiences.into_iter().map(ExperienceResponse::from).collect(),
        projects: projects.into_iter().map(ProjectResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "health",
    summary = "Liveness probe",
    responses(
        (status = 200, description = "Service is up and the database answers", body = HealthResponse),
        (status = 500, description = "Database unreachable (INTERNAL_ERROR)", body = crate::error::ErrorBody),
    ),
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.db.ping().await?;
    Ok(Json(HealthResponse { status: "ok" }))
}
