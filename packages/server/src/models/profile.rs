use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::entity::profile;
use crate::error::AppError;

use super::shared::validate_required;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateProfileRequest {
    #[schema(example = "Jane Doe")]
    pub name: String,
    pub description: String,
    #[schema(example = "jane@example.com")]
    pub email: String,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub professional_background: Option<String>,
    pub journey: Option<String>,
}

/// Only fields that are present and non-null are applied.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub professional_background: Option<String>,
    pub journey: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub name: String,
    pub description: String,
    pub email: String,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub professional_background: Option<String>,
    pub journey: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<profile::Model> for ProfileResponse {
    fn from(m: profile::Model) -> Self {
        Self {
            name: m.name,
            description: m.description,
            email: m.email,
            linkedin_url: m.linkedin_url,
            github_url: m.github_url,
            professional_background: m.professional_background,
            journey: m.journey,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// RFC 5322 address check with a dotted domain, so `user@localhost` is refused.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let dotted = email.rsplit_once('@').is_some_and(|(_, domain)| domain.contains('.'));
    if !email.validate_email() || !dotted {
        return Err(AppError::Validation(format!("Invalid email address: {email}")));
    }
    Ok(())
}

pub fn validate_create_profile(req: &CreateProfileRequest) -> Result<(), AppError> {
    validate_required("Name", &req.name, 256)?;
    validate_email(&req.email)
}

pub fn validate_update_profile(req: &UpdateProfileRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_required("Name", name, 256)?;
    }
    if let Some(ref email) = req.email {
        validate_email(email)?;
    }
    Ok(())
}
