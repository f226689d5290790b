use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use common::color::{generate_color_palette, generate_css_variables};
use common::{ColorPalette, ColorScheme};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::design::*;
use crate::models::shared::ListQuery;
use crate::services::{DesignRegistry, RegistryError};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/design",
    tag = "Design",
    operation_id = "listDesignSystems",
    summary = "List design systems",
    params(ListQuery),
    responses(
        (status = 200, description = "Design systems in creation order", body = Vec<DesignResponse>),
        (status = 400, description = "Invalid query (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_designs(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<DesignResponse>>, AppError> {
    let (skip, limit) = query.window(state.config.api.default_limit)?;
    let designs = DesignRegistry::new(&state.db).list(skip, limit).await?;
    Ok(Json(designs.into_iter().map(DesignResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/design",
    tag = "Design",
    operation_id = "createDesignSystem",
    summary = "Create a design system",
    description = "Creates a named theme. All five sections are required and color values must be hex codes. The new theme is inactive unless `activate` is true.",
    request_body = CreateDesignRequest,
    responses(
        (status = 201, description = "Design system created", body = DesignResponse),
        (status = 400, description = "Validation error or name taken (VALIDATION_ERROR, DUPLICATE_NAME)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(name = %payload.name))]
pub async fn create_design(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDesignRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_design(&payload)?;

    let model = DesignRegistry::new(&state.db).create(payload).await?;
    Ok((StatusCode::CREATED, Json(DesignResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/design/active",
    tag = "Design",
    operation_id = "getActiveDesignSystem",
    summary = "Get the active design system",
    responses(
        (status = 200, description = "The active design system", body = DesignResponse),
        (status = 404, description = "No design system is active (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_active_design(
    State(state): State<AppState>,
) -> Result<Json<DesignResponse>, AppError> {
    let model = DesignRegistry::new(&state.db)
        .get_active()
        .await?
        .ok_or_else(|| AppError::NotFound("No active design system".into()))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/design/color-scheme",
    tag = "Design",
    operation_id = "getColorScheme",
    summary = "Get the current color scheme",
    description = "Colors of the active design system, or of the built-in default theme when none is active.",
    responses(
        (status = 200, description = "Current colors", body = ColorScheme),
    ),
)]
#[instrument(skip(state))]
pub async fn get_color_scheme(
    State(state): State<AppState>,
) -> Result<Json<ColorScheme>, AppError> {
    let colors = DesignRegistry::new(&state.db)
        .color_scheme(&state.default_theme)
        .await?;
    Ok(Json(colors))
}

#[utoipa::path(
    put,
    path = "/design/color-scheme",
    tag = "Design",
    operation_id = "updateColorScheme",
    summary = "Replace the active color scheme",
    request_body = ColorScheme,
    responses(
        (status = 200, description = "Colors of the active design system", body = ColorScheme),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "No design system is active (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_color_scheme(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ColorScheme>,
) -> Result<Json<ColorScheme>, AppError> {
    payload.validate()?;

    let model = DesignRegistry::new(&state.db)
        .update_color_scheme(payload)
        .await?;
    Ok(Json(model.config.colors))
}

#[utoipa::path(
    get,
    path = "/design/css",
    tag = "Design",
    operation_id = "getDesignCss",
    summary = "CSS custom properties for the current theme",
    responses(
        (status = 200, description = "Stylesheet with `:root` variables", body = String, content_type = "text/css"),
    ),
)]
#[instrument(skip(state))]
pub async fn get_css(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let config = DesignRegistry::new(&state.db)
        .current_config(&state.default_theme)
        .await?;
    Ok((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        generate_css_variables(&config),
    ))
}

#[utoipa::path(
    get,
    path = "/design/palette",
    tag = "Design",
    operation_id = "getColorPalette",
    summary = "Palette derived from the current primary color",
    responses(
        (status = 200, description = "Primary color with lighter, darker and complementary shades", body = ColorPalette),
    ),
)]
#[instrument(skip(state))]
pub async fn get_palette(State(state): State<AppState>) -> Result<Json<ColorPalette>, AppError> {
    let colors = DesignRegistry::new(&state.db)
        .color_scheme(&state.default_theme)
        .await?;
    Ok(Json(generate_color_palette(&colors.primary)?))
}

#[utoipa::path(
    get,
    path = "/design/{id}",
    tag = "Design",
    operation_id = "getDesignSystem",
    summary = "Get a design system by ID",
    params(("id" = i32, Path, description = "Design system ID")),
    responses(
        (status = 200, description = "Design system", body = DesignResponse),
        (status = 404, description = "Design system not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_design(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DesignResponse>, AppError> {
    let model = DesignRegistry::new(&state.db)
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Design system {id} not found")))?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/design/{id}",
    tag = "Design",
    operation_id = "updateDesignSystem",
    summary = "Update a design system",
    description = "Each provided section replaces the stored section as a whole. `name` may be changed in the same call.",
    params(("id" = i32, Path, description = "Design system ID")),
    request_body = UpdateDesignRequest,
    responses(
        (status = 200, description = "Design system updated", body = DesignResponse),
        (status = 400, description = "Validation error or name taken (VALIDATION_ERROR, DUPLICATE_NAME)", body = ErrorBody),
        (status = 404, description = "Design system not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_design(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateDesignRequest>,
) -> Result<Json<DesignResponse>, AppError> {
    validate_update_design(&payload)?;

    let registry = DesignRegistry::new(&state.db);
    let model = if payload == UpdateDesignRequest::default() {
        registry
            .get(id)
            .await?
            .ok_or(RegistryError::NotFound(id))?
    } else {
        registry.update(id, payload).await?
    };
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/design/{id}",
    tag = "Design",
    operation_id = "deleteDesignSystem",
    summary = "Delete a design system",
    description = "The active design system cannot be deleted; activate another one first.",
    params(("id" = i32, Path, description = "Design system ID")),
    responses(
        (status = 204, description = "Design system deleted"),
        (status = 404, description = "Design system not found (NOT_FOUND)", body = ErrorBody),
        (status = 409, description = "Design system is active (INVALID_STATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_design(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    DesignRegistry::new(&state.db).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/design/{id}/activate",
    tag = "Design",
    operation_id = "activateDesignSystem",
    summary = "Make a design system the active one",
    description = "Deactivates every other design system in the same transaction. An unknown ID changes nothing.",
    params(("id" = i32, Path, description = "Design system ID")),
    responses(
        (status = 200, description = "Design system activated", body = DesignResponse),
        (status = 404, description = "Design system not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn activate_design(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DesignResponse>, AppError> {
    let model = DesignRegistry::new(&state.db).set_active(id).await?;
    Ok(Json(model.into()))
}
