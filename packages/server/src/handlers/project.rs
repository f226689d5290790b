use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::project;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::project::*;
use crate::models::shared::ListQuery;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/projects",
    tag = "Projects",
    operation_id = "listProjects",
    summary = "List projects",
    params(ListQuery),
    responses(
        (status = 200, description = "Projects ordered by ID", body = Vec<ProjectResponse>),
        (status = 400, description = "Invalid query (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_projects(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<ProjectResponse>>, AppError> {
    let (skip, limit) = query.window(state.config.api.default_limit)?;
    let rows = project::Entity::find()
        .order_by_asc(project::Column::Id)
        .offset(skip)
        .limit(limit)
        .all(&state.db)
        .await?;
    Ok(Json(rows.into_iter().map(ProjectResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/projects",
    tag = "Projects",
    operation_id = "createProject",
    summary = "Create a project",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "ID already in use (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %payload.id))]
pub async fn create_project(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_project(&payload)?;

    let txn = state.db.begin().await?;
    if project::Entity::find_by_id(payload.id.clone())
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(duplicate_id(&payload.id));
    }

    let id = payload.id.clone();
    let model = project::ActiveModel {
        id: Set(payload.id),
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        image: Set(payload.image),
        technologies: Set(payload.technologies.into()),
        link: Set(payload.link.trim().to_string()),
        github: Set(payload.github),
        app_store: Set(payload.app_store),
        play_store: Set(payload.play_store),
        achievements: Set(payload.achievements.into()),
    }
    .insert(&txn)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_id(&id),
        _ => e.into(),
    })?;
    txn.commit().await?;

    info!(id = %model.id, "Created project");
    Ok((StatusCode::CREATED, Json(ProjectResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/projects/{id}",
    tag = "Projects",
    operation_id = "getProject",
    summary = "Get a project by ID",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, AppError> {
    let model = find_project(&state.db, &id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/projects/{id}",
    tag = "Projects",
    operation_id = "updateProject",
    summary = "Update a project",
    description = "Only provided fields are modified.",
    params(("id" = String, Path, description = "Project ID")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id = %id))]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    validate_update_project(&payload)?;

    if payload == UpdateProjectRequest::default() {
        let existing = find_project(&state.db, &id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_project(&txn, &id).await?;
    let mut active: project::ActiveModel = existing.into();

    if let Some(title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(image) = payload.image {
        active.image = Set(image);
    }
    if let Some(technologies) = payload.technologies {
        active.technologies = Set(technologies.into());
    }
    if let Some(link) = payload.link {
        active.link = Set(link.trim().to_string());
    }
    if let Some(github) = payload.github {
        active.github = Set(Some(github));
    }
    if let Some(app_store) = payload.app_store {
        active.app_store = Set(Some(app_store));
    }
    if let Some(play_store) = payload.play_store {
        active.play_store = Set(Some(play_store));
    }
    if let Some(achievements) = payload.achievements {
        active.achievements = Set(achievements.into());
    }

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/projects/{id}",
    tag = "Projects",
    operation_id = "deleteProject",
    summary = "Delete a project",
    params(("id" = String, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 404, description = "Project not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = project::Entity::delete_by_id(id.clone())
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound(format!("Project '{id}' not found")));
    }

    info!(id = %id, "Deleted project");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_project<C: ConnectionTrait>(db: &C, id: &str) -> Result<project::Model, AppError> {
    project::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project '{id}' not found")))
}

fn duplicate_id(id: &str) -> AppError {
    AppError::Conflict(format!("Project '{id}' already exists"))
}
