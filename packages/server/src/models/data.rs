use chrono::{DateTime, Utc};
use common::PageWindow;
use serde::{Deserialize, Serialize};

use crate::entity::tag;
use crate::error::AppError;
use crate::services::tag_store::{DataItemPage, DataItemRecord};

use super::shared::{double_option, validate_required, validate_title};

pub const MAX_TAG_LENGTH: usize = 64;
pub const MAX_TAGS_PER_ITEM: usize = 64;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateDataItemRequest {
    #[schema(example = "Test Data")]
    pub title: String,
    #[schema(example = "This is test data")]
    pub description: Option<String>,
    /// Arbitrary JSON object.
    #[schema(value_type = Object, example = json!({"key": "value"}))]
    pub content: serde_json::Value,
    /// Tag names in display order. Unknown names are created on the fly.
    #[serde(default)]
    #[schema(example = json!(["test", "example"]))]
    pub tags: Vec<String>,
}

/// Partial update. Absent fields are left untouched; `tags`, when present,
/// replaces the whole tag set.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateDataItemRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[schema(value_type = Option<Object>)]
    pub content: Option<serde_json::Value>,
    pub tags: Option<Vec<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TagResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "example")]
    pub name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DataItemResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Test Data")]
    pub title: String,
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub content: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tags: Vec<TagResponse>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DataItemListResponse {
    pub data: Vec<DataItemResponse>,
    /// Number of items matching the filter across all pages.
    #[schema(example = 47)]
    pub total: u64,
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 100)]
    pub page_size: u64,
    #[schema(example = 1)]
    pub total_pages: u64,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DataListQuery {
    /// Number of items to skip. Default: 0.
    #[param(example = 0)]
    pub skip: Option<u64>,
    /// Page size. Default: `api.default_limit`.
    #[param(example = 100)]
    pub limit: Option<u64>,
    /// Only return items carrying a tag with exactly this name.
    #[param(example = "example")]
    pub tag: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DataSearchQuery {
    /// Case-insensitive substring matched against title and description.
    #[param(example = "test")]
    pub q: String,
    #[param(example = 0)]
    pub skip: Option<u64>,
    #[param(example = 100)]
    pub limit: Option<u64>,
}

impl From<tag::Model> for TagResponse {
    fn from(m: tag::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

impl From<DataItemRecord> for DataItemResponse {
    fn from(record: DataItemRecord) -> Self {
        let DataItemRecord { item, tags } = record;
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            content: item.content,
            created_at: item.created_at,
            updated_at: item.updated_at,
            tags: tags.into_iter().map(TagResponse::from).collect(),
        }
    }
}

impl From<DataItemPage> for DataItemListResponse {
    fn from(page: DataItemPage) -> Self {
        let PageWindow {
            page: page_number,
            page_size,
            total_pages,
        } = page.window;
        Self {
            data: page.items.into_iter().map(DataItemResponse::from).collect(),
            total: page.total,
            page: page_number,
            page_size,
            total_pages,
        }
    }
}

fn validate_content(content: &serde_json::Value) -> Result<(), AppError> {
    if !content.is_object() {
        return Err(AppError::Validation("Content must be a JSON object".into()));
    }
    Ok(())
}

fn validate_tags(tags: &[String]) -> Result<(), AppError> {
    if tags.len() > MAX_TAGS_PER_ITEM {
        return Err(AppError::Validation(format!(
            "At most {MAX_TAGS_PER_ITEM} tags per item"
        )));
    }
    for name in tags {
        validate_required("Tag name", name, MAX_TAG_LENGTH)?;
    }
    Ok(())
}

pub fn validate_create_data_item(req: &CreateDataItemRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_content(&req.content)?;
    validate_tags(&req.tags)
}

pub fn validate_update_data_item(req: &UpdateDataItemRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref content) = req.content {
        validate_content(content)?;
    }
    if let Some(ref tags) = req.tags {
        validate_tags(tags)?;
    }
    Ok(())
}
