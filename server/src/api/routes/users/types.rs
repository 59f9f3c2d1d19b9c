//! User API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::data::types::UserRow;

const AUTH_PROVIDERS: &[&str] = &["apple", "google", "anonymous"];

fn validate_auth_provider(provider: &str) -> Result<(), ValidationError> {
    if AUTH_PROVIDERS.contains(&provider) {
        Ok(())
    } else {
        Err(ValidationError::new("auth_provider").with_message(
            format!("auth_provider must be one of: {}", AUTH_PROVIDERS.join(", ")).into(),
        ))
    }
}

/// User DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub auth_provider: String,
    pub email: Option<String>,
    pub email_verified: bool,
    pub display_name: Option<String>,
    pub avatar_color: String,
    pub is_premium: bool,
    pub locale: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserDto {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            auth_provider: row.auth_provider,
            email: row.email,
            email_verified: row.email_verified,
            display_name: row.display_name,
            avatar_color: row.avatar_color,
            is_premium: row.is_premium,
            locale: row.locale,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
            updated_at: DateTime::from_timestamp(row.updated_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

/// Request body for creating a user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(custom(function = "validate_auth_provider"))]
    pub auth_provider: String,
    #[validate(length(min = 1, max = 256, message = "provider_user_id must be 1-256 characters"))]
    pub provider_user_id: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(length(max = 100, message = "Display name must be at most 100 characters"))]
    pub display_name: Option<String>,
    #[validate(length(min = 2, max = 10, message = "Locale must be 2-10 characters"))]
    pub locale: Option<String>,
}

/// Request body for updating user profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(max = 100, message = "Display name must be at most 100 characters"))]
    pub display_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_provider_allow_list() {
        assert!(validate_auth_provider("apple").is_ok());
        assert!(validate_auth_provider("google").is_ok());
        assert!(validate_auth_provider("anonymous").is_ok());
        assert!(validate_auth_provider("facebook").is_err());
    }

    #[test]
    fn test_create_user_request_validation() {
        let req = CreateUserRequest {
            auth_provider: "apple".to_string(),
            provider_user_id: "abc123".to_string(),
            email: Some("not-an-email".to_string()),
            display_name: None,
            locale: None,
        };
        assert!(req.validate().is_err());
    }
}
