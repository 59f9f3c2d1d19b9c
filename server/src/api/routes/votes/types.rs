//! Vote API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::types::VoteRow;

/// Vote DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct VoteDto {
    pub id: i64,
    pub quote_id: i64,
    pub user_id: Option<i64>,
    pub device_id: Option<String>,
    pub vote_period: String,
    pub created_at: DateTime<Utc>,
}

impl From<VoteRow> for VoteDto {
    fn from(row: VoteRow) -> Self {
        Self {
            id: row.id,
            quote_id: row.quote_id,
            user_id: row.user_id,
            device_id: row.device_id,
            vote_period: row.vote_period,
            created_at: DateTime::from_timestamp(row.created_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

/// Request body for casting a vote
///
/// Exactly one of `user_id` and `device_id` must be present. The period is
/// stored verbatim (clients send "YYYY-MM" by convention).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateVoteRequest {
    #[validate(range(min = 1, message = "quote_id must be positive"))]
    pub quote_id: i64,
    pub user_id: Option<i64>,
    #[validate(length(min = 1, max = 256, message = "device_id must be 1-256 characters"))]
    pub device_id: Option<String>,
    #[validate(length(min = 1, max = 32, message = "vote_period must be 1-32 characters"))]
    pub vote_period: String,
}
