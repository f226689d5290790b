use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use sea_orm::*;
use tracing::{info, instrument};

use crate::entity::profile::{self, PROFILE_ID};
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::profile::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/profile",
    tag = "Profile",
    operation_id = "getProfile",
    summary = "Get the profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 404, description = "Profile not created yet (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<ProfileResponse>, AppError> {
    let model = find_profile(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/profile",
    tag = "Profile",
    operation_id = "createProfile",
    summary = "Create the profile",
    description = "There is exactly one profile. Creating it a second time fails.",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Profile already exists (CONFLICT)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_profile(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_profile(&payload)?;

    let txn = state.db.begin().await?;
    if profile::Entity::find_by_id(PROFILE_ID.to_string())
        .one(&txn)
        .await?
        .is_some()
    {
        return Err(already_exists());
    }

    let now = Utc::now();
    let model = profile::ActiveModel {
        id: Set(PROFILE_ID.to_string()),
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        email: Set(payload.email.trim().to_string()),
        linkedin_url: Set(payload.linkedin_url),
        github_url: Set(payload.github_url),
        professional_background: Set(payload.professional_background),
        journey: Set(payload.journey),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await
    .map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => already_exists(),
        _ => e.into(),
    })?;
    txn.commit().await?;

    info!("Created profile");
    Ok((StatusCode::CREATED, Json(ProfileResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/profile",
    tag = "Profile",
    operation_id = "updateProfile",
    summary = "Update the profile",
    description = "Fields that are absent or null keep their stored value.",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Profile not created yet (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    validate_update_profile(&payload)?;

    if payload == UpdateProfileRequest::default() {
        let existing = find_profile(&state.db).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_profile(&txn).await?;
    let mut active: profile::ActiveModel = existing.into();

    if let Some(name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(email) = payload.email {
        active.email = Set(email.trim().to_string());
    }
    if let Some(linkedin_url) = payload.linkedin_url {
        active.linkedin_url = Set(Some(linkedin_url));
    }
    if let Some(github_url) = payload.github_url {
        active.github_url = Set(Some(github_url));
    }
    if let Some(background) = payload.professional_background {
        active.professional_background = Set(Some(background));
    }
    if let Some(journey) = payload.journey {
        active.journey = Set(Some(journey));
    }
    active.updated_at = Set(Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

async fn find_profile<C: ConnectionTrait>(db: &C) -> Result<profile::Model, AppError> {
    profile::Entity::find_by_id(PROFILE_ID.to_string())
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".into()))
}

fn already_exists() -> AppError {
    AppError::Conflict("Profile already exists; use PUT to update it".into())
}
