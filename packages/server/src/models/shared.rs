use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Serde helper for partial-update semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Offset/limit parameters shared by the plain list endpoints.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Number of rows to skip. Default: 0.
    pub skip: Option<u64>,
    /// Maximum number of rows to return. Default: `api.default_limit`.
    pub limit: Option<u64>,
}

impl ListQuery {
    pub fn window(&self, default_limit: u64) -> Result<(u64, u64), AppError> {
        offset_window(self.skip, self.limit, default_limit)
    }
}

/// Resolve `skip`/`limit` against the configured default. Both must fit a
/// signed 64-bit SQL integer.
pub fn offset_window(
    skip: Option<u64>,
    limit: Option<u64>,
    default_limit: u64,
) -> Result<(u64, u64), AppError> {
    let skip = skip.unwrap_or(0);
    let limit = limit.unwrap_or(default_limit);
    for (field, value) in [("skip", skip), ("limit", limit)] {
        if i64::try_from(value).is_err() {
            return Err(AppError::Validation(format!(
                "{field} must be at most {}",
                i64::MAX
            )));
        }
    }
    Ok((skip, limit))
}

/// Validate a trimmed, required text field (1-`max` Unicode characters).
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    validate_required("Title", title, 256)
}

/// Validate a client-chosen string identifier: 1-128 characters, no whitespace or `/`.
pub fn validate_slug_id(id: &str) -> Result<(), AppError> {
    if id.is_empty() || id.chars().count() > 128 {
        return Err(AppError::Validation("Id must be 1-128 characters".into()));
    }
    if id.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(AppError::Validation(
            "Id must not contain whitespace or '/'".into(),
        ));
    }
    Ok(())
}
