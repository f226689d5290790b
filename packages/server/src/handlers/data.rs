use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::data::*;
use crate::models::shared::offset_window;
use crate::services::TagStore;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/data",
    tag = "Data",
    operation_id = "listDataItems",
    summary = "List data items",
    description = "Returns data items in creation order. With `tag`, only items carrying a tag with exactly that name are returned.",
    params(DataListQuery),
    responses(
        (status = 200, description = "One page of data items", body = DataItemListResponse),
        (status = 400, description = "Invalid query (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(tag = ?query.tag))]
pub async fn list_data_items(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<DataListQuery>,
) -> Result<Json<DataItemListResponse>, AppError> {
    let (skip, limit) = offset_window(query.skip, query.limit, state.config.api.default_limit)?;

    let page = TagStore::new(&state.db)
        .list_data_items(skip, limit, query.tag.as_deref())
        .await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/data",
    tag = "Data",
    operation_id = "createDataItem",
    summary = "Create a data item",
    description = "Creates a data item and links it to the given tag names, creating unknown tags. Repeated names are linked once.",
    request_body = CreateDataItemRequest,
    responses(
        (status = 201, description = "Data item created", body = DataItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(title = %payload.title))]
pub async fn create_data_item(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateDataItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_data_item(&payload)?;

    let record = TagStore::new(&state.db).create_data_item(payload).await?;
    Ok((StatusCode::CREATED, Json(DataItemResponse::from(record))))
}

#[utoipa::path(
    get,
    path = "/data/search",
    tag = "Data",
    operation_id = "searchDataItems",
    summary = "Search data items",
    description = "Case-insensitive substring search over title and description. `%` and `_` in `q` match literally.",
    params(DataSearchQuery),
    responses(
        (status = 200, description = "One page of matching items", body = DataItemListResponse),
        (status = 400, description = "Missing or invalid query (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query), fields(q = %query.q))]
pub async fn search_data_items(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<DataSearchQuery>,
) -> Result<Json<DataItemListResponse>, AppError> {
    let (skip, limit) = offset_window(query.skip, query.limit, state.config.api.default_limit)?;

    let page = TagStore::new(&state.db)
        .search_data_items(&query.q, skip, limit)
        .await?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/data/tags",
    tag = "Data",
    operation_id = "listTags",
    summary = "List all tags",
    responses(
        (status = 200, description = "Every tag ever referenced", body = Vec<TagResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagResponse>>, AppError> {
    let tags = TagStore::new(&state.db).list_tags().await?;
    Ok(Json(tags.into_iter().map(TagResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/data/{id}",
    tag = "Data",
    operation_id = "getDataItem",
    summary = "Get a data item by ID",
    params(("id" = i32, Path, description = "Data item ID")),
    responses(
        (status = 200, description = "Data item with its tags", body = DataItemResponse),
        (status = 404, description = "Data item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_data_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DataItemResponse>, AppError> {
    let record = TagStore::new(&state.db)
        .get_data_item(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(record.into()))
}

#[utoipa::path(
    put,
    path = "/data/{id}",
    tag = "Data",
    operation_id = "updateDataItem",
    summary = "Update a data item",
    description = "Only provided fields are modified. A provided `tags` list replaces the item's tags; omitting it keeps them.",
    params(("id" = i32, Path, description = "Data item ID")),
    request_body = UpdateDataItemRequest,
    responses(
        (status = 200, description = "Data item updated", body = DataItemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Data item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(id))]
pub async fn update_data_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateDataItemRequest>,
) -> Result<Json<DataItemResponse>, AppError> {
    validate_update_data_item(&payload)?;

    let store = TagStore::new(&state.db);
    let record = if payload == UpdateDataItemRequest::default() {
        store.get_data_item(id).await?
    } else {
        store.update_data_item(id, payload).await?
    };
    Ok(Json(record.ok_or_else(|| not_found(id))?.into()))
}

#[utoipa::path(
    delete,
    path = "/data/{id}",
    tag = "Data",
    operation_id = "deleteDataItem",
    summary = "Delete a data item",
    description = "Deletes the item and its tag links. Tags themselves are kept.",
    params(("id" = i32, Path, description = "Data item ID")),
    responses(
        (status = 204, description = "Data item deleted"),
        (status = 404, description = "Data item not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn delete_data_item(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if !TagStore::new(&state.db).delete_data_item(id).await? {
        return Err(not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Data item {id} not found"))
}
