//! Device API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::types::DeviceRow;

/// Device DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct DeviceDto {
    pub id: String,
    pub device_fingerprint: String,
    pub user_id: Option<i64>,
    pub locale: String,
    pub platform: Option<String>,
    pub app_version: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl From<DeviceRow> for DeviceDto {
    fn from(row: DeviceRow) -> Self {
        Self {
            id: row.id,
            device_fingerprint: row.device_fingerprint,
            user_id: row.user_id,
            locale: row.locale,
            platform: row.platform,
            app_version: row.app_version,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
            last_seen_at: row.last_seen_at.and_then(|t| DateTime::from_timestamp(t, 0)),
        }
    }
}

/// Request body for registering a device
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDeviceRequest {
    #[validate(length(min = 1, max = 256, message = "device_id must be 1-256 characters"))]
    pub device_id: String,
    #[validate(length(min = 1, max = 256, message = "device_fingerprint must be 1-256 characters"))]
    pub device_fingerprint: String,
    #[validate(length(min = 2, max = 10, message = "Locale must be 2-10 characters"))]
    pub locale: Option<String>,
    #[validate(length(max = 32, message = "Platform must be at most 32 characters"))]
    pub platform: Option<String>,
    #[validate(length(max = 32, message = "App version must be at most 32 characters"))]
    pub app_version: Option<String>,
}

/// Request body for linking a device to a user
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LinkDeviceRequest {
    #[validate(range(min = 1, message = "user_id must be positive"))]
    pub user_id: i64,
}
