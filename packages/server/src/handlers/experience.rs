use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::experience;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::experience::*;
use crate::models::shared::ListQuery;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/experiences",
    tag = "Experiences",
    operation_id = "listExperiences",
    summary = "List work experiences",
    params(ListQuery),
    responses(
        (status = 200, description = "Experiences ordered by ID", body = Vec<ExperienceResponse>),
        (status = 400, description = "Invalid query (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_experiences(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<ExperienceResponse>>, AppError> {
    let (skip, limit) = query.window(state.config.api.default_limit)?;
    let rows = experience::Entity::find()
        .order_by_asc(experience::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(ExperienceResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/experiences",
    tag = "Experiences",
    operation_id = "createExperience",
    summary = "Create a work experience",
    request_body = CreateExperienceRequest,
    responses(
        (status = 201, description = "Experience created", body = ExperienceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "ID already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %payload.id))]
pub async fn create_experience(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateExperienceRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_experience(&payload)?;

    let txn = state.db.begin().await?;
    if experience::Entity::find_by_id(payload.id.clone())
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(duplicate_id(&payload.id));
    }

    let id = payload.id.clone();
    let model = experience::ActiveModel {
        id: Set(payload.id),
        role: Set(payload.role.trim().to_string()),
        company: Set(payload.company.trim().to_string()),
        period: Set(payload.period.trim().to_string()),
        description: Set(payload.description),
        achievements: Set(payload.achievements.into()),
        projects: Set(payload.projects.into()),
        color: Set(payload.color),
    }
    .insert(&txn)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_id(&id),
        _ => e.into(),
    })?;
    txn.commit().await?;

    info!(id = %model.id, "Created experience");
    Ok((StatusCode::CREATED, Json(ExperienceResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/experiences/{id}",
    tag = "Experiences",
    operation_id = "getExperience",
    summary = "Get a work experience by ID",
    params(("id" = String, Path, description = "Experience ID")),
    responses(
        (status = 200, description = "Experience", body = ExperienceResponse),
        (status = 404, description = "Experience not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExperienceResponse>, AppError> {
    let model = find_experience(&state.db, &id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/experiences/{id}",
    tag = "Experiences",
    operation_id = "updateExperience",
    summary = "Update a work experience",
    description = "Only provided fields are modified.",
    params(("id" = String, Path, description = "Experience ID")),
    request_body = UpdateExperienceRequest,
    responses(
        (status = 200, description = "Experience updated", body = ExperienceResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Experience not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateExperienceRequest>,
) -> Result<Json<ExperienceResponse>, AppError> {
    validate_update_experience(&payload)?;

    if payload == UpdateExperienceRequest::default() {
        let existing = find_experience(&state.db, &id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_experience(&txn, &id).await?;
    let mut active: experience::ActiveModel = existing.into();

    if let Some(role) = payload.role {
        active.role = Set(role.trim().to_string());
    }
    if let Some(company) = payload.company {
        active.company = Set(company.trim().to_string());
    }
    if let Some(period) = payload.period {
        active.period = Set(period.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(achievements) = payload.achievements {
        active.achievements = Set(achievements.into());
    }
    if let Some(projects) = payload.projects {
        active.projects = Set(projects.into());
    }
    if let Some(color) = payload.color {
        active.color = Set(color);
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/experiences/{id}",
    tag = "Experiences",
    operation_id = "deleteExperience",
    summary = "Delete a work experience",
    params(("id" = String, Path, description = "Experience ID")),
    responses(
        (status = 204, description = "Experience deleted"),
        (status = 404, description = "Experience not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = experience::Entity::delete_by_id(id.clone())
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("Experience '{id}' not found")));
    }

    info!(id = %id, "Deleted experience");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_experience<C: ConnectionTrait>(db: &C, id: &str) -> Result<experience::Model, AppError> {
    experience::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Experience '{id}' not found")))
}

fn duplicate_id(id: &str) -> AppError {
    AppError::Conflict(format!("Experience '{id}' already exists"))
}
