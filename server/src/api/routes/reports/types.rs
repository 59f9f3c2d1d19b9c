//! Report API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::data::types::ReportRow;

const REPORT_REASONS: &[&str] = &[
    "inappropriate",
    "spam",
    "fake",
    "child_safety",
    "copyright",
    "other",
];

fn validate_reason(reason: &str) -> Result<(), ValidationError> {
    if REPORT_REASONS.contains(&reason) {
        Ok(())
    } else {
        Err(ValidationError::new("reason").with_message(
            format!("reason must be one of: {}", REPORT_REASONS.join(", ")).into(),
        ))
    }
}

/// Report DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReportDto {
    pub id: i64,
    pub quote_id: i64,
    pub user_id: Option<i64>,
    pub device_id: Option<String>,
    pub reason: String,
    pub details: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<ReportRow> for ReportDto {
    fn from(row: ReportRow) -> Self {
        Self {
            id: row.id,
            quote_id: row.quote_id,
            user_id: row.user_id,
            device_id: row.device_id,
            reason: row.reason,
            details: row.details,
            status: row.status,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

/// Request body for filing a report
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReportRequest {
    #[validate(range(min = 1, message = "quote_id must be positive"))]
    pub quote_id: i64,
    pub user_id: Option<i64>,
    #[validate(length(min = 1, max = 256, message = "device_id must be 1-256 characters"))]
    pub device_id: Option<String>,
    #[validate(custom(function = "validate_reason"))]
    pub reason: String,
    #[validate(length(max = 1000, message = "Details must be at most 1000 characters"))]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_allow_list() {
        for reason in REPORT_REASONS {
            assert!(validate_reason(reason).is_ok());
        }
        assert!(validate_reason("dislike").is_err());
    }
}
